//! Registry fetch port and its HTTP adapter

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::FractalMetadata;
use crate::domain::value_objects::percent_encode;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("fractal not found: {id}")]
    NotFound { id: String },

    #[error("registry returned {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("invalid metadata from {url}: {message}")]
    InvalidMetadata { url: String, message: String },
}

#[async_trait]
pub trait RegistryFetcher: Send + Sync {
    /// `GET <registry>/fractals/<id>`
    async fn fetch_metadata(&self, registry: &str, id: &str) -> Result<FractalMetadata, FetchError>;

    /// Code at the absolute `url` from the metadata
    async fn fetch_code(&self, url: &str) -> Result<String, FetchError>;
}

/// Metadata URL for `id` on `registry`
pub fn metadata_url(registry: &str, id: &str) -> String {
    format!(
        "{}/fractals/{}",
        registry.trim_end_matches('/'),
        percent_encode(id)
    )
}

/// reqwest-backed fetcher. No request timeout: loads run to completion.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, FetchError> {
        self.client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            })
    }
}

#[async_trait]
impl RegistryFetcher for HttpFetcher {
    async fn fetch_metadata(&self, registry: &str, id: &str) -> Result<FractalMetadata, FetchError> {
        let url = metadata_url(registry, id);
        let response = self.get(&url).await?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound { id: id.to_string() });
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }
        response
            .json::<FractalMetadata>()
            .await
            .map_err(|e| FetchError::InvalidMetadata {
                url,
                message: e.to_string(),
            })
    }

    async fn fetch_code(&self, url: &str) -> Result<String, FetchError> {
        let response = self.get(url).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        response.text().await.map_err(|e| FetchError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}
