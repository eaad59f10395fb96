use chrono::Utc;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::env;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::services::extraction::{extract_message, format_message};

/// A hung provider must fail the relay, not the whole request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("API request failed with status {status}: {body}")]
    ApiError { status: u16, body: String },
    #[error("Analysis provider timed out")]
    Timeout,
    #[error("Missing analysis provider URL")]
    MissingApiUrl,
}

#[derive(Debug, Serialize)]
struct FlowRequest<'a> {
    input_value: &'a str,
    output_type: &'a str,
    input_type: &'a str,
    session_id: String,
}

/// Outcome of one relay attempt. Failures are carried as data; this
/// type never leaves the relay boundary as an error.
#[derive(Debug)]
pub struct RelayResult {
    pub success: bool,
    pub response: Option<Value>,
    pub extracted_message: Option<String>,
    pub error: Option<String>,
}

impl RelayResult {
    pub fn failure(error: String) -> Self {
        Self {
            success: false,
            response: None,
            extracted_message: None,
            error: Some(error),
        }
    }
}

#[derive(Clone)]
pub struct AnalysisClient {
    client: Client,
    api_url: String,
}

impl AnalysisClient {
    pub fn new() -> Result<Self, AnalysisError> {
        let api_url = match env::var("LANGFLOW_API_URL") {
            Ok(url) => url,
            Err(_) => {
                let server = env::var("LANGFLOW_SERVER_ADDRESS")
                    .map_err(|_| AnalysisError::MissingApiUrl)?;
                let flow_id =
                    env::var("LANGFLOW_FLOW_ID").map_err(|_| AnalysisError::MissingApiUrl)?;
                format!("{}/api/v1/run/{}", server, flow_id)
            }
        };

        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self { client, api_url })
    }

    /// Fresh per request so the provider never serves a cached run.
    fn session_id(conversation_id: &str) -> String {
        let suffix = Uuid::new_v4().simple().to_string();
        format!(
            "{}-{}-{}",
            conversation_id,
            Utc::now().timestamp_millis(),
            &suffix[..9]
        )
    }

    async fn run_flow(&self, transcript: &str, conversation_id: &str) -> Result<Value, AnalysisError> {
        let request = FlowRequest {
            input_value: transcript,
            output_type: "chat",
            input_type: "chat",
            session_id: Self::session_id(conversation_id),
        };

        tracing::debug!(
            session_id = %request.session_id,
            transcript_len = transcript.len(),
            "sending transcript to analysis provider"
        );

        let response = self
            .client
            .post(&self.api_url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AnalysisError::Timeout
                } else {
                    AnalysisError::RequestError(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::ApiError { status, body });
        }

        Ok(response.json().await?)
    }

    /// Posts the transcript and extracts the summary message. All
    /// failure kinds come back inside the result; callers always get a
    /// well-formed outcome.
    pub async fn relay(&self, transcript: &str, conversation_id: &str) -> RelayResult {
        match self.run_flow(transcript, conversation_id).await {
            Ok(response) => {
                let extracted_message = extract_message(&response).map(|m| format_message(&m));
                RelayResult {
                    success: true,
                    response: Some(response),
                    extracted_message,
                    error: None,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "analysis provider call failed");
                RelayResult::failure(e.to_string())
            }
        }
    }
}
