use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct SendSmsRequest {
    #[validate(length(min = 1, message = "Recipient number cannot be empty"))]
    pub to: String,
    #[serde(rename = "childName")]
    pub child_name: Option<String>,
    #[validate(length(min = 1, message = "Summary cannot be empty"))]
    pub summary: String,
}

#[derive(Debug, Serialize)]
pub struct SendSmsResponse {
    pub sent: bool,
    pub sid: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
