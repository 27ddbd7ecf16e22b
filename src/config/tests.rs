//! Tests for the config module

use super::loader::{discover, load_with_warnings, with_overrides_from};
use super::types::*;
use crate::runtime::RuntimeMode;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_config_default() {
    let config = Config::default();

    assert_eq!(config.build.output, PathBuf::from("dist/fractals"));
    assert_eq!(config.build.extensions, vec!["jsx", "tsx"]);
    assert_eq!(config.build.externals, vec!["react", "react-dom"]);
    assert_eq!(config.build.jobs, 1);
    assert_eq!(config.build.register_module, "@fractal/core");
    assert_eq!(config.bundler.target, "es2020");
    assert_eq!(config.bundler.server_target, "es2015");
    assert_eq!(config.server.port, 3001);
    assert_eq!(config.runtime.mode, RuntimeMode::Development);
    assert!(config.registry.url.is_none());
}

#[test]
fn test_config_parse_toml() {
    let toml = r#"
[build]
output = "out"
extensions = ["tsx"]
exclude = ["stories"]
jobs = 4

[bundler]
esbuild = "/opt/esbuild"

[registry]
url = "http://registry.local:3001"

[server]
port = 8080
public_url = "https://fractals.example.com"

[runtime]
mode = "production"
"#;

    let config: Config = toml::from_str(toml).unwrap();

    assert_eq!(config.build.output, PathBuf::from("out"));
    assert_eq!(config.build.extensions, vec!["tsx"]);
    assert_eq!(config.build.exclude, vec!["stories"]);
    assert_eq!(config.build.jobs, 4);
    // untouched keys keep their defaults
    assert_eq!(config.build.externals, vec!["react", "react-dom"]);
    assert_eq!(config.bundler.esbuild, PathBuf::from("/opt/esbuild"));
    assert_eq!(config.registry.url.as_deref(), Some("http://registry.local:3001"));
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.runtime.mode, RuntimeMode::Production);
}

#[test]
fn test_unknown_keys_produce_warnings() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("fractal.toml");
    fs::write(&path, "[build]\njbos = 2\n\n[server]\nport = 9000\n").unwrap();

    let (config, warnings) = load_with_warnings(&path).unwrap();
    assert_eq!(config.server.port, 9000);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].key, "jbos");
    assert_eq!(warnings[0].line, Some(2));
    assert_eq!(warnings[0].suggestion.as_deref(), Some("jobs"));
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("fractal.toml");
    fs::write(&path, "[build\noutput = ").unwrap();

    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, super::ConfigError::Parse { .. }));
}

#[test]
fn test_missing_file_is_read_error() {
    let dir = tempdir().unwrap();
    let err = Config::load(&dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, super::ConfigError::Read { .. }));
}

#[test]
fn test_discover_prefers_project_file() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("fractal.toml"), "[build]\njobs = 3\n").unwrap();

    let (config, warnings) = discover(Some(dir.path())).unwrap();
    assert!(warnings.is_empty());
    // FRACTAL_JOBS may be set in the environment running the tests
    if std::env::var("FRACTAL_JOBS").is_err() {
        assert_eq!(config.build.jobs, 3);
    }
}

#[test]
fn test_env_overrides() {
    let config = with_overrides_from(
        Config::default(),
        lookup(&[
            ("FRACTAL_REGISTRY_URL", "http://r:1"),
            ("FRACTAL_ESBUILD", "/bin/esbuild"),
            ("FRACTAL_STORAGE", "/var/fractals"),
            ("FRACTAL_JOBS", "8"),
            ("FRACTAL_MODE", "production"),
        ]),
    );

    assert_eq!(config.registry.url.as_deref(), Some("http://r:1"));
    assert_eq!(config.bundler.esbuild, PathBuf::from("/bin/esbuild"));
    assert_eq!(config.server.storage, PathBuf::from("/var/fractals"));
    assert_eq!(config.build.jobs, 8);
    assert_eq!(config.runtime.mode, RuntimeMode::Production);
}

#[test]
fn test_port_env_precedence() {
    let config = with_overrides_from(Config::default(), lookup(&[("PORT", "4000")]));
    assert_eq!(config.server.port, 4000);

    let config = with_overrides_from(
        Config::default(),
        lookup(&[("PORT", "4000"), ("FRACTAL_PORT", "5000")]),
    );
    assert_eq!(config.server.port, 5000);

    let config = with_overrides_from(Config::default(), lookup(&[("PORT", "not-a-port")]));
    assert_eq!(config.server.port, 3001);
}

#[test]
fn test_zero_jobs_clamps_to_one() {
    let config = with_overrides_from(Config::default(), lookup(&[("FRACTAL_JOBS", "0")]));
    assert_eq!(config.build.jobs, 1);
}
