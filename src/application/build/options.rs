//! Build Options

use std::path::PathBuf;

use crate::config::Config;
use crate::domain::services::DEFAULT_REGISTER_MODULE;

/// Options for the build use case
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Source tree to scan
    pub input: PathBuf,
    /// Directory receiving artifacts, manifests and metadata
    pub output: PathBuf,
    /// Component extensions, without the dot
    pub extensions: Vec<String>,
    /// Extra directory names to skip
    pub exclude: Vec<String>,
    /// Worker threads (at least 1)
    pub jobs: usize,
    /// Module providing `registerModule`
    pub register_module: String,
    /// Packages left unbundled
    pub externals: Vec<String>,
    /// Bundler syntax target
    pub target: String,
}

impl BuildOptions {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            extensions: vec!["jsx".to_string(), "tsx".to_string()],
            exclude: Vec::new(),
            jobs: 1,
            register_module: DEFAULT_REGISTER_MODULE.to_string(),
            externals: vec!["react".to_string(), "react-dom".to_string()],
            target: "es2020".to_string(),
        }
    }

    /// Options for `input` with every other field taken from `config`.
    pub fn from_config(input: impl Into<PathBuf>, config: &Config) -> Self {
        Self {
            input: input.into(),
            output: config.build.output.clone(),
            extensions: config.build.extensions.clone(),
            exclude: config.build.exclude.clone(),
            jobs: config.build.jobs.max(1),
            register_module: config.build.register_module.clone(),
            externals: config.build.externals.clone(),
            target: config.bundler.target.clone(),
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    pub fn with_externals(mut self, externals: Vec<String>) -> Self {
        self.externals = externals;
        self
    }

    pub fn with_exclude(mut self, exclude: Vec<String>) -> Self {
        self.exclude = exclude;
        self
    }

    pub fn with_register_module(mut self, module: impl Into<String>) -> Self {
        self.register_module = module.into();
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }
}
