//! Registry request routing
//!
//! Routes:
//! - `GET  /health`
//! - `GET  /fractals`
//! - `GET  /fractals/{id}` metadata with absolute code and manifest URLs
//! - `GET  /fractals/{id}/code` browser-ready wrapped code
//! - `GET  /fractals/{id}/manifest`
//! - `POST /fractals/{id}` `{source, manifest?}`
//! - `OPTIONS *`

use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::Body;
use hyper::header;
use hyper::{Method, Request, Response, StatusCode};
use serde_json::Value;

use crate::domain::entities::{FractalMetadata, PublishReceipt};
use crate::domain::services::CompileError;
use crate::domain::value_objects::FractalId;

use super::code::wrap_commonjs;
use super::store::{RegistryStore, StoreError};
use super::types::{
    empty_response, error_response, javascript_response, json_response, with_cors, FractalList,
    HealthStatus,
};

/// Default request body limit (1MB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 1_048_576;

#[derive(Clone)]
pub struct RegistryRouter {
    store: Arc<RegistryStore>,
    public_url: Option<String>,
    max_body_bytes: usize,
}

impl RegistryRouter {
    pub fn new(store: Arc<RegistryStore>) -> Self {
        Self {
            store,
            public_url: None,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    /// Base for absolute URLs; the request `Host` is used when unset.
    pub fn with_public_url(mut self, url: Option<String>) -> Self {
        self.public_url = url.map(|u| u.trim_end_matches('/').to_string());
        self
    }

    pub fn with_max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = limit;
        self
    }

    pub fn store(&self) -> &Arc<RegistryStore> {
        &self.store
    }

    pub async fn handle<B>(&self, req: Request<B>) -> Response<Full<Bytes>>
    where
        B: Body + Send + 'static,
        B::Data: Send,
        B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let method = req.method().clone();
        let path = req.uri().path().to_string();
        tracing::debug!(%method, %path, "registry request");

        let response = self.route(req, &method, &path).await;
        tracing::debug!(%method, %path, status = response.status().as_u16(), "registry response");
        with_cors(response)
    }

    async fn route<B>(&self, req: Request<B>, method: &Method, path: &str) -> Response<Full<Bytes>>
    where
        B: Body + Send + 'static,
        B::Data: Send,
        B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        if method == Method::OPTIONS {
            return empty_response(StatusCode::NO_CONTENT);
        }

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match (method, segments.as_slice()) {
            (&Method::GET, ["health"]) => json_response(StatusCode::OK, &HealthStatus::ok()),
            (&Method::GET, ["fractals"]) => self.list(),
            (&Method::GET, ["fractals", id]) => {
                let base = self.base_url(&req);
                self.with_id(id, |id| self.metadata(id, &base))
            }
            (&Method::GET, ["fractals", id, "code"]) => self.with_id(id, |id| self.code(id)),
            (&Method::GET, ["fractals", id, "manifest"]) => {
                self.with_id(id, |id| self.manifest(id))
            }
            (&Method::POST, ["fractals", id]) => match FractalId::from_segment(id) {
                Ok(id) => self.publish(id, req).await,
                Err(e) => error_response(StatusCode::BAD_REQUEST, &e.to_string()),
            },
            (_, ["health"])
            | (_, ["fractals"])
            | (_, ["fractals", _])
            | (_, ["fractals", _, "code" | "manifest"]) => {
                error_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
            }
            _ => error_response(StatusCode::NOT_FOUND, "Not found"),
        }
    }

    fn with_id(
        &self,
        segment: &str,
        f: impl FnOnce(&FractalId) -> Response<Full<Bytes>>,
    ) -> Response<Full<Bytes>> {
        match FractalId::from_segment(segment) {
            Ok(id) => f(&id),
            Err(e) => error_response(StatusCode::BAD_REQUEST, &e.to_string()),
        }
    }

    fn base_url<B>(&self, req: &Request<B>) -> String {
        if let Some(url) = &self.public_url {
            return url.clone();
        }
        let host = req
            .uri()
            .authority()
            .map(|a| a.to_string())
            .or_else(|| {
                req.headers()
                    .get(header::HOST)
                    .and_then(|h| h.to_str().ok())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| "localhost".to_string());
        format!("http://{host}")
    }

    fn list(&self) -> Response<Full<Bytes>> {
        match self.store.list() {
            Ok(fractals) => json_response(StatusCode::OK, &FractalList { fractals }),
            Err(e) => {
                tracing::error!(error = %e, "failed to list fractals");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "Storage error")
            }
        }
    }

    fn metadata(&self, id: &FractalId, base: &str) -> Response<Full<Bytes>> {
        let Some(record) = self.store.get_fractal(id) else {
            return error_response(StatusCode::NOT_FOUND, "Not found");
        };
        let encoded = id.encoded();
        json_response(
            StatusCode::OK,
            &FractalMetadata {
                url: format!("{base}/fractals/{encoded}/code"),
                manifest_url: Some(format!("{base}/fractals/{encoded}/manifest")),
                styles: record.styles.clone(),
                has_manifest: record.has_manifest(),
            },
        )
    }

    fn code(&self, id: &FractalId) -> Response<Full<Bytes>> {
        match self.store.get_fractal(id) {
            Some(record) => javascript_response(wrap_commonjs(&record.compiled_code)),
            None => empty_response(StatusCode::NOT_FOUND),
        }
    }

    fn manifest(&self, id: &FractalId) -> Response<Full<Bytes>> {
        let Some(record) = self.store.get_fractal(id) else {
            return error_response(StatusCode::NOT_FOUND, "Not found");
        };
        match &record.manifest {
            Some(manifest) => json_response(StatusCode::OK, manifest),
            None => error_response(StatusCode::NOT_FOUND, "Manifest not available"),
        }
    }

    async fn publish<B>(&self, id: FractalId, req: Request<B>) -> Response<Full<Bytes>>
    where
        B: Body + Send + 'static,
        B::Data: Send,
        B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let declared = req
            .headers()
            .get(header::CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<usize>().ok());
        if declared.is_some_and(|len| len > self.max_body_bytes) {
            return self.too_large();
        }

        let body = match Limited::new(req.into_body(), self.max_body_bytes).collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => return self.too_large(),
            Err(e) => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    &format!("Failed to read request body: {e}"),
                )
            }
        };

        let Ok(body) = serde_json::from_slice::<Value>(&body) else {
            return error_response(StatusCode::BAD_REQUEST, "Invalid JSON body");
        };
        let source = match body.get("source").and_then(Value::as_str) {
            Some(source) if !source.is_empty() => source.to_string(),
            _ => return error_response(StatusCode::BAD_REQUEST, "Source required"),
        };
        let manifest = body.get("manifest").filter(|m| !m.is_null()).cloned();

        // the compiler runs the bundler as a subprocess
        let store = self.store.clone();
        let stored = tokio::task::spawn_blocking(move || {
            store.add_fractal(&id, &source, manifest)
        })
        .await;

        match stored {
            Ok(Ok(record)) => json_response(StatusCode::OK, &PublishReceipt::from(&record)),
            Ok(Err(e)) => store_error_response(&e),
            Err(e) => {
                tracing::error!(error = %e, "compile task failed");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }

    fn too_large(&self) -> Response<Full<Bytes>> {
        error_response(
            StatusCode::PAYLOAD_TOO_LARGE,
            &format!("Request body too large (max: {} bytes)", self.max_body_bytes),
        )
    }
}

fn store_error_response(err: &StoreError) -> Response<Full<Bytes>> {
    match err {
        StoreError::Compile(CompileError::MissingDirective) => {
            error_response(StatusCode::BAD_REQUEST, &err.to_string())
        }
        StoreError::Compile(e) if e.is_invalid_source() => {
            error_response(StatusCode::UNPROCESSABLE_ENTITY, &e.to_string())
        }
        _ => {
            tracing::error!(error = %err, "failed to store fractal");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
        }
    }
}
