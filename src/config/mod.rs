//! Configuration module for Fractal
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (FRACTAL_*, plus PORT for the registry)
//! 3. Project config (`<input>/fractal.toml`)
//! 4. User config (`~/.config/fractal/config.toml`)
//! 5. Built-in defaults (lowest priority)

mod loader;
#[cfg(test)]
mod tests;
mod types;

pub use loader::{
    user_config_path, with_overrides_from, ConfigError, ConfigWarning, PROJECT_CONFIG_FILE,
};
pub use types::{BuildConfig, BundlerConfig, Config, RegistryConfig, RuntimeConfig, ServerConfig};
