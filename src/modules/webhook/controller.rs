use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use chrono::Utc;
use std::env;

use crate::modules::webhook::{
    log::WebhookLog,
    model::{format_transcript, POST_CALL_TRANSCRIPTION},
    schema::{ErrorResponse, LangflowStatus, WebhookAck, WebhookStatusResponse},
    verify::{construct_webhook_event, WebhookError},
};
use crate::services::analysis::{AnalysisClient, RelayResult};

const SIGNATURE_HEADER: &str = "ElevenLabs-Signature";

pub async fn receive_webhook(
    State(log): State<WebhookLog>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<WebhookAck>, (StatusCode, Json<ErrorResponse>)> {
    let secret = env::var("ELEVENLABS_WEBHOOK_SECRET").ok();
    let header = headers.get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok());

    let event = construct_webhook_event(&body, header, secret.as_deref(), Utc::now()).map_err(
        |e| match e {
            WebhookError::Signature(err) => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse { error: err.to_string() }),
            ),
            WebhookError::Payload(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse { error: format!("Invalid webhook payload: {}", err) }),
            ),
        },
    )?;

    if event.event_type != POST_CALL_TRANSCRIPTION {
        return Ok(Json(WebhookAck::received()));
    }

    log.append(event.clone());

    let Some(data) = event.data else {
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse { error: "Missing call data in webhook payload".to_string() }),
        ));
    };

    tracing::info!(
        conversation_id = %data.conversation_id,
        turns = data.transcript.len(),
        status = %data.status,
        "call completed"
    );

    let relay = if data.transcript.is_empty() {
        RelayResult::failure("No transcript data available".to_string())
    } else {
        let transcript = format_transcript(&data.transcript);
        match AnalysisClient::new() {
            Ok(client) => client.relay(&transcript, &data.conversation_id).await,
            Err(e) => RelayResult::failure(e.to_string()),
        }
    };

    if !relay.success {
        tracing::warn!(
            conversation_id = %data.conversation_id,
            error = relay.error.as_deref().unwrap_or("unknown"),
            "transcript relay failed"
        );
    }

    Ok(Json(WebhookAck {
        received: true,
        conversation_id: Some(data.conversation_id),
        status: Some("processed".to_string()),
        langflow_api: Some(LangflowStatus::from_relay(&relay)),
        received_at: Some(Utc::now().to_rfc3339()),
    }))
}

pub async fn webhook_status(State(log): State<WebhookLog>) -> Json<WebhookStatusResponse> {
    Json(WebhookStatusResponse {
        status: "webhook listening".to_string(),
        recent_calls: log.recent(10),
        langflow_integration: "enabled".to_string(),
        endpoint: "/api/webhook".to_string(),
        methods: vec!["GET".to_string(), "POST".to_string()],
        supported_types: vec![POST_CALL_TRANSCRIPTION.to_string()],
    })
}
