//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::services::{DEFAULT_REGISTER_MODULE, DEFAULT_SERVER_TARGET};
use crate::runtime::RuntimeMode;

use super::loader::{self, ConfigError, ConfigWarning};

/// `[build]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildConfig {
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Component source extensions, without the dot
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Directory names skipped in addition to the built-in list
    #[serde(default)]
    pub exclude: Vec<String>,

    #[serde(default = "default_jobs")]
    pub jobs: usize,

    /// Module specifier providing `registerModule`
    #[serde(default = "default_register_module")]
    pub register_module: String,

    /// Packages left unbundled
    #[serde(default = "default_externals")]
    pub externals: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            extensions: default_extensions(),
            exclude: Vec::new(),
            jobs: default_jobs(),
            register_module: default_register_module(),
            externals: default_externals(),
        }
    }
}

fn default_output() -> PathBuf {
    PathBuf::from("dist/fractals")
}

fn default_extensions() -> Vec<String> {
    vec!["jsx".to_string(), "tsx".to_string()]
}

fn default_jobs() -> usize {
    1
}

fn default_register_module() -> String {
    DEFAULT_REGISTER_MODULE.to_string()
}

fn default_externals() -> Vec<String> {
    vec!["react".to_string(), "react-dom".to_string()]
}

/// `[bundler]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundlerConfig {
    /// esbuild executable
    #[serde(default = "default_esbuild")]
    pub esbuild: PathBuf,

    /// Syntax level of built artifacts
    #[serde(default = "default_target")]
    pub target: String,

    /// Syntax level of registry-compiled code
    #[serde(default = "default_server_target")]
    pub server_target: String,
}

impl Default for BundlerConfig {
    fn default() -> Self {
        Self {
            esbuild: default_esbuild(),
            target: default_target(),
            server_target: default_server_target(),
        }
    }
}

fn default_esbuild() -> PathBuf {
    PathBuf::from("esbuild")
}

fn default_target() -> String {
    "es2020".to_string()
}

fn default_server_target() -> String {
    DEFAULT_SERVER_TARGET.to_string()
}

/// `[registry]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Publish target
    #[serde(default)]
    pub url: Option<String>,
}

/// `[server]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_storage")]
    pub storage: PathBuf,

    /// Base for absolute URLs in metadata; the request `Host` is used when unset
    #[serde(default)]
    pub public_url: Option<String>,

    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            storage: default_storage(),
            public_url: None,
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_storage() -> PathBuf {
    PathBuf::from("fractal-storage")
}

fn default_max_body_bytes() -> usize {
    10 * 1024 * 1024
}

/// `[runtime]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default)]
    pub mode: RuntimeMode,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub bundler: BundlerConfig,

    #[serde(default)]
    pub registry: RegistryConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub runtime: RuntimeConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> Result<(Self, Vec<ConfigWarning>), ConfigError> {
        loader::load_with_warnings(path)
    }

    /// Project config, else user config, else defaults; then `FRACTAL_*`.
    pub fn discover(project_root: Option<&Path>) -> Result<(Self, Vec<ConfigWarning>), ConfigError> {
        loader::discover(project_root)
    }

    /// Apply environment variable overrides (FRACTAL_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }
}
