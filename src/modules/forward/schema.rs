use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Forwarded fields are passed through untouched; absent fields travel
/// as nulls, matching what the downstream collector already accepts.
#[derive(Debug, Deserialize)]
pub struct ForwardTranscriptRequest {
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub transcript: Value,
    #[serde(default)]
    pub analysis: Value,
    #[serde(default)]
    pub metadata: Value,
}

#[derive(Debug, Serialize)]
pub struct ForwardResponse {
    pub success: bool,
    pub message: String,
    pub conversation_id: Option<String>,
    pub server_response: Value,
}

#[derive(Debug, Serialize)]
pub struct ForwardFailure {
    pub success: bool,
    pub error: String,
}
