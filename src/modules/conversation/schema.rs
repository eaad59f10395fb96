use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::modules::webhook::model::TranscriptTurn;
use crate::services::analysis::RelayResult;

#[derive(Debug, Deserialize, Validate)]
pub struct SubmitConversationRequest {
    #[validate(length(min = 1, message = "Transcript cannot be empty"))]
    pub transcript: Vec<TranscriptTurn>,
}

#[derive(Debug, Serialize)]
pub struct LangflowSummary {
    pub success: bool,
    pub error: Option<String>,
    pub extracted_message: Option<String>,
    pub message_length: usize,
}

impl LangflowSummary {
    pub fn from_relay(relay: &RelayResult) -> Self {
        Self {
            success: relay.success,
            error: relay.error.clone(),
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
pub struct SubmitConversationResponse {
    pub stored: bool,
    pub conversation_id: String,
    pub langflow_api: LangflowSummary,
    pub received_at: String,
}

#[derive(Debug, Serialize)]
pub struct ConversationResponse {
    pub id: String,
    pub transcript: String,
    pub ai_summary: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct ConversationListResponse {
    pub data: Vec<ConversationResponse>,
    pub total: u64,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
