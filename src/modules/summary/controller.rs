use axum::{http::StatusCode, Json};
use validator::Validate;

use crate::modules::summary::schema::{ErrorResponse, SummarizeRequest, SummarizeResponse};
use crate::services::analysis::AnalysisClient;

pub async fn summarize(
    Json(payload): Json<SummarizeRequest>,
) -> Result<Json<SummarizeResponse>, (StatusCode, Json<ErrorResponse>)> {
    if let Err(e) = payload.validate() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse { error: e.to_string() }),
        ));
    }

    let client = AnalysisClient::new().map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse { error: e.to_string() }),
        )
    })?;

    let relay = client.relay(&payload.transcript, "summarize").await;

    if !relay.success {
        return Err((
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse { error: "Failed to summarize".to_string() }),
        ));
    }

    let summary = relay.extracted_message.ok_or_else(|| {
        tracing::warn!("analysis run succeeded but no message was found");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse { error: "No summary generated".to_string() }),
        )
    })?;

    Ok(Json(SummarizeResponse { summary }))
}
