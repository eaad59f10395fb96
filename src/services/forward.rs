use chrono::Utc;
use reqwest::Client;
use serde_json::{json, Value};
use std::env;
use thiserror::Error;

use crate::modules::forward::schema::ForwardTranscriptRequest;

#[derive(Error, Debug)]
pub enum ForwardError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Failed to forward transcript: {status} {body}")]
    ApiError { status: u16, body: String },
    #[error("Missing forwarding target URL")]
    MissingTargetUrl,
}

/// Relays transcript payloads verbatim to a configured downstream
/// collector.
#[derive(Clone)]
pub struct ForwardClient {
    client: Client,
    target_url: String,
    auth_token: Option<String>,
}

impl ForwardClient {
    pub fn new() -> Result<Self, ForwardError> {
        let target_url =
            env::var("FORWARD_SERVER_URL").map_err(|_| ForwardError::MissingTargetUrl)?;
        let auth_token = env::var("FORWARD_SERVER_AUTH_TOKEN").ok();

        Ok(Self {
            client: Client::new(),
            target_url,
            auth_token,
        })
    }

    /// Returns the downstream response body, or `{}` when the
    /// downstream answers with something other than JSON.
    pub async fn forward(&self, payload: &ForwardTranscriptRequest) -> Result<Value, ForwardError> {
        let body = json!({
            "conversation_id": payload.conversation_id,
            "transcript": payload.transcript,
            "analysis": payload.analysis,
            "metadata": payload.metadata,
            "forwarded_at": Utc::now().to_rfc3339(),
        });

        let mut request = self
            .client
            .post(&self.target_url)
            .header("Content-Type", "application/json")
            .json(&body);

        if let Some(token) = &self.auth_token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ForwardError::ApiError { status, body });
        }

        Ok(response.json().await.unwrap_or_else(|_| json!({})))
    }
}
