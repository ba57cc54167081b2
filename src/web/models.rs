use serde::{Deserialize, Serialize};
use serde_json::Value;

// --- Request/Response Structs ---

#[derive(Debug, Deserialize)]
pub struct CreateSectionRequest {
    pub name: String,
    pub color: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateSectionRequest {
    pub name: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateLinkRequest {
    pub title: String,
    pub url: String,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateLinkRequest {
    pub title: Option<String>,
    pub url: Option<String>,
    pub notes: Option<String>,
}

/// Entries are kept as raw JSON so that stale or malformed ids can be
/// sanitized instead of failing the whole request.
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    #[serde(default)]
    pub ordered_ids: Vec<Value>,
}

#[derive(Debug, Serialize)]
pub struct Ack {
    pub ok: bool,
}

impl Ack {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

#[derive(Debug, Serialize)]
pub struct ReorderResponse {
    pub ok: bool,
    pub count: usize,
}
