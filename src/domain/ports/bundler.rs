//! Bundler port
//!
//! The crate never lowers TypeScript or JSX itself. A bundle turns a build
//! entry into a self-contained browser module; a transform turns one source
//! string into runnable code for the registry.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleFormat {
    Esm,
    Cjs,
    Iife,
}

impl ModuleFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleFormat::Esm => "esm",
            ModuleFormat::Cjs => "cjs",
            ModuleFormat::Iife => "iife",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Browser,
    Node,
    Neutral,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Browser => "browser",
            Platform::Node => "node",
            Platform::Neutral => "neutral",
        }
    }
}

/// Source dialect of a transform input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loader {
    Tsx,
    Jsx,
    Ts,
    Js,
}

impl Loader {
    pub fn as_str(&self) -> &'static str {
        match self {
            Loader::Tsx => "tsx",
            Loader::Jsx => "jsx",
            Loader::Ts => "ts",
            Loader::Js => "js",
        }
    }
}

/// Classic JSX lowering into explicit construction calls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsxTransform {
    pub factory: String,
    pub fragment: String,
}

impl Default for JsxTransform {
    fn default() -> Self {
        Self {
            factory: "React.createElement".to_string(),
            fragment: "React.Fragment".to_string(),
        }
    }
}

/// Bundle one entry file into `outfile`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleRequest {
    pub entry: PathBuf,
    pub outfile: PathBuf,
    pub format: ModuleFormat,
    pub platform: Platform,
    pub target: String,
    /// Packages left as imports instead of being inlined
    pub externals: Vec<String>,
    pub minify: bool,
    pub sourcemap: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleOutput {
    pub code_path: PathBuf,
    pub map_path: Option<PathBuf>,
}

/// Transform one source string in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformRequest {
    pub source: String,
    pub loader: Loader,
    pub format: ModuleFormat,
    pub jsx: JsxTransform,
    pub target: String,
    /// Name used in diagnostics
    pub sourcefile: Option<String>,
}

#[derive(Debug, Error)]
pub enum BundleError {
    #[error("bundler executable '{program}' not found")]
    NotFound { program: String },

    #[error("failed to run bundler: {0}")]
    Io(#[from] std::io::Error),

    #[error("bundler exited with {}: {stderr}", status.map(|c| c.to_string()).unwrap_or_else(|| "signal".to_string()))]
    Failed { status: Option<i32>, stderr: String },

    #[error("bundler produced no output at {path}")]
    MissingOutput { path: PathBuf },
}

impl BundleError {
    /// True when the bundler ran and rejected the input.
    pub fn is_rejection(&self) -> bool {
        matches!(self, BundleError::Failed { .. })
    }
}

pub trait Bundler: Send + Sync {
    fn bundle(&self, request: &BundleRequest) -> Result<BundleOutput, BundleError>;

    fn transform(&self, request: &TransformRequest) -> Result<String, BundleError>;
}
