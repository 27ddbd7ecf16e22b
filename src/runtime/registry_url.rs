//! Registry URL resolution
//!
//! Order: per-call override, host context, `FRACTAL_REGISTRY_URL`, then the
//! same-origin default `http://<host>:<3001 | 8080 in production>`.

use super::mode::RuntimeMode;

pub const REGISTRY_URL_ENV: &str = "FRACTAL_REGISTRY_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryResolver {
    context: Option<String>,
    env: Option<String>,
    host: String,
    mode: RuntimeMode,
}

impl Default for RegistryResolver {
    fn default() -> Self {
        Self::new(RuntimeMode::default())
    }
}

impl RegistryResolver {
    /// Reads `FRACTAL_REGISTRY_URL` once, now.
    pub fn new(mode: RuntimeMode) -> Self {
        Self {
            context: None,
            env: std::env::var(REGISTRY_URL_ENV).ok(),
            host: "localhost".to_string(),
            mode,
        }
        .normalized()
    }

    /// Registry provided by the host application
    pub fn with_context(mut self, url: Option<String>) -> Self {
        self.context = url;
        self.normalized()
    }

    pub fn with_env(mut self, url: Option<String>) -> Self {
        self.env = url;
        self.normalized()
    }

    /// Host name for the same-origin default
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn mode(&self) -> RuntimeMode {
        self.mode
    }

    pub fn default_url(&self) -> String {
        format!("http://{}:{}", self.host, self.mode.default_registry_port())
    }

    pub fn resolve(&self, override_url: Option<&str>) -> String {
        override_url
            .and_then(non_empty)
            .or(self.context.as_deref())
            .or(self.env.as_deref())
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| self.default_url())
    }

    fn normalized(mut self) -> Self {
        self.context = self.context.filter(|u| !u.trim().is_empty());
        self.env = self.env.filter(|u| !u.trim().is_empty());
        self
    }
}

fn non_empty(url: &str) -> Option<&str> {
    (!url.trim().is_empty()).then_some(url)
}
