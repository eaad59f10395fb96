use axum::{http::StatusCode, Json};
use validator::Validate;

use crate::modules::sms::schema::{ErrorResponse, SendSmsRequest, SendSmsResponse};
use crate::services::sms::SmsClient;

pub async fn send_sms(
    Json(payload): Json<SendSmsRequest>,
) -> Result<Json<SendSmsResponse>, (StatusCode, Json<ErrorResponse>)> {
    if let Err(e) = payload.validate() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse { error: e.to_string() }),
        ));
    }

    let client = SmsClient::new().map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse { error: e.to_string() }),
        )
    })?;

    let heading = match &payload.child_name {
        Some(name) => format!("Report for {}:", name),
        None => "Check-up summary:".to_string(),
    };
    let body = format!("{}\n\n{}", heading, payload.summary);

    match client.send(&payload.to, &body).await {
        Ok(dispatch) => {
            tracing::info!(sid = %dispatch.sid, "SMS sent");
            Ok(Json(SendSmsResponse { sent: true, sid: dispatch.sid }))
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to send SMS");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse { error: e.to_string() }),
            ))
        }
    }
}
