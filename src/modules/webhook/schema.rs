use serde::Serialize;

use crate::modules::webhook::model::WebhookEvent;
use crate::services::analysis::RelayResult;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct LangflowStatus {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub response_received: bool,
    pub extracted_message: Option<String>,
    pub message_length: usize,
}

impl LangflowStatus {
    pub fn from_relay(relay: &RelayResult) -> Self {
        Self {
            success: relay.success,
            error: relay.error.clone(),
            response_received: relay.response.is_some(),
            extracted_message: relay.extracted_message.clone(),
            message_length: relay
                .extracted_message
                .as_ref()
                .map(|m| m.len())
                .unwrap_or(0),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub received: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub langflow_api: Option<LangflowStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_at: Option<String>,
}

impl WebhookAck {
    /// Minimal acknowledgement for event types this service does not
    /// process.
    pub fn received() -> Self {
        Self {
            received: true,
            conversation_id: None,
            status: None,
            langflow_api: None,
            received_at: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WebhookStatusResponse {
    pub status: String,
    pub recent_calls: Vec<WebhookEvent>,
    pub langflow_integration: String,
    pub endpoint: String,
    pub methods: Vec<String>,
    pub supported_types: Vec<String>,
}
