//! Blocking registry client
//!
//! Used by the build and publish commands, which run outside any async
//! runtime. The runtime loader has its own async fetcher.

use reqwest::blocking::Client;
use reqwest::StatusCode;

use crate::domain::entities::{PublishReceipt, PublishRequest};
use crate::domain::ports::{PublishError, RegistryPublisher};
use crate::domain::value_objects::FractalId;

pub struct RegistryClient {
    base_url: String,
    client: Client,
}

impl RegistryClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// `<base>/fractals/<encoded id>`
    pub fn fractal_url(&self, id: &FractalId) -> String {
        format!("{}/fractals/{}", self.base_url, id.encoded())
    }

    /// `GET /health`
    pub fn health(&self) -> Result<(), PublishError> {
        let url = format!("{}/health", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| PublishError::Transport(e.to_string()))?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(PublishError::InvalidResponse(format!(
                "health check returned {}",
                response.status()
            )))
        }
    }
}

/// `{"error": "..."}` body, else the raw text
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                status.to_string()
            } else {
                trimmed.to_string()
            }
        })
}

impl RegistryPublisher for RegistryClient {
    fn registry_url(&self) -> &str {
        &self.base_url
    }

    fn publish(
        &self,
        id: &FractalId,
        request: &PublishRequest,
    ) -> Result<PublishReceipt, PublishError> {
        let url = self.fractal_url(id);
        tracing::debug!(%url, "publishing");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .map_err(|e| PublishError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| PublishError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(PublishError::Rejected {
                id: id.to_string(),
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }
        serde_json::from_str(&body).map_err(|e| PublishError::InvalidResponse(e.to_string()))
    }
}
