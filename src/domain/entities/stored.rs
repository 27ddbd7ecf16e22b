//! Registry records and wire shapes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unit of registry storage
///
/// Replaced wholesale on republish, never mutated. The manifest is kept as
/// raw JSON: the registry stores whatever the publisher sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFractal {
    pub id: String,
    pub source: String,
    #[serde(alias = "compiled")]
    pub compiled_code: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub styles: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub manifest: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl StoredFractal {
    pub fn has_manifest(&self) -> bool {
        self.manifest.is_some()
    }
}

/// Response of `GET /fractals/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FractalMetadata {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub manifest_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub styles: Option<String>,
    #[serde(default)]
    pub has_manifest: bool,
}

/// Response of `POST /fractals/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishReceipt {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub has_manifest: bool,
}

impl From<&StoredFractal> for PublishReceipt {
    fn from(stored: &StoredFractal) -> Self {
        Self {
            id: stored.id.clone(),
            created_at: stored.created_at,
            has_manifest: stored.has_manifest(),
        }
    }
}

/// Body of `POST /fractals/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishRequest {
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub manifest: Option<serde_json::Value>,
}
