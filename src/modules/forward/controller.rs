use axum::{http::StatusCode, Json};

use crate::modules::forward::schema::{ForwardFailure, ForwardResponse, ForwardTranscriptRequest};
use crate::services::forward::ForwardClient;

pub async fn forward_transcript(
    Json(payload): Json<ForwardTranscriptRequest>,
) -> Result<Json<ForwardResponse>, (StatusCode, Json<ForwardFailure>)> {
    let client = ForwardClient::new().map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ForwardFailure { success: false, error: e.to_string() }),
        )
    })?;

    match client.forward(&payload).await {
        Ok(server_response) => {
            tracing::info!(
                conversation_id = payload.conversation_id.as_deref().unwrap_or("unknown"),
                "transcript forwarded"
            );
            Ok(Json(ForwardResponse {
                success: true,
                message: "Transcript forwarded successfully".to_string(),
                conversation_id: payload.conversation_id,
                server_response,
            }))
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to forward transcript");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ForwardFailure { success: false, error: e.to_string() }),
            ))
        }
    }
}
