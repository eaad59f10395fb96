use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use bson::oid::ObjectId;
use chrono::Utc;
use validator::Validate;

use crate::modules::conversation::{
    crud::ConversationCrud,
    model::Conversation,
    schema::{
        ConversationListResponse, ConversationResponse, ErrorResponse, LangflowSummary,
        SubmitConversationRequest, SubmitConversationResponse,
    },
};
use crate::modules::webhook::model::format_transcript;
use crate::services::analysis::{AnalysisClient, RelayResult};
use crate::services::auth::{AuthClient, AuthUser};
use crate::AppState;

const SESSION_COOKIE: &str = "sb-access-token";

fn to_response(c: &Conversation) -> ConversationResponse {
    ConversationResponse {
        id: c.id.map(|id| id.to_hex()).unwrap_or_default(),
        transcript: c.transcript.clone(),
        ai_summary: c.ai_summary.clone(),
        created_at: c.created_at_rfc3339(),
    }
}

fn access_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
    {
        return Some(token.to_string());
    }

    // Session cookie fallback for browser submissions
    headers
        .get("cookie")
        .and_then(|v| v.to_str().ok())
        .and_then(|cookies| {
            cookies.split(';').find_map(|cookie| {
                cookie
                    .trim()
                    .strip_prefix(SESSION_COOKIE)
                    .and_then(|rest| rest.strip_prefix('='))
                    .map(|v| v.to_string())
            })
        })
}

async fn resolve_user(headers: &HeaderMap) -> Result<AuthUser, (StatusCode, Json<ErrorResponse>)> {
    let token = access_token(headers).ok_or_else(|| {
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse { error: "Unauthorized".to_string() }),
        )
    })?;

    let auth = AuthClient::new().map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse { error: e.to_string() }),
        )
    })?;

    auth.get_user(&token).await.map_err(|_| {
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse { error: "Unauthorized".to_string() }),
        )
    })
}

pub async fn submit_conversation(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<SubmitConversationRequest>,
) -> Result<Json<SubmitConversationResponse>, (StatusCode, Json<ErrorResponse>)> {
    if let Err(e) = payload.validate() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse { error: e.to_string() }),
        ));
    }

    let user = resolve_user(&headers).await?;

    let transcript = format_transcript(&payload.transcript);

    let crud = ConversationCrud::new(&state.db, state.redis.clone());
    let conversation = Conversation::new(user.id.clone(), transcript.clone());

    let id = crud.create(conversation).await.map_err(|e| {
        tracing::error!(error = %e, "failed to store conversation");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse { error: e.to_string() }),
        )
    })?;

    let relay = match AnalysisClient::new() {
        Ok(client) => client.relay(&transcript, &id.to_hex()).await,
        Err(e) => RelayResult::failure(e.to_string()),
    };

    // Best-effort back-fill; the stored transcript is the record
    if let Some(message) = &relay.extracted_message {
        let _ = crud.update_summary(&id, message.clone()).await;
    }

    Ok(Json(SubmitConversationResponse {
        stored: true,
        conversation_id: id.to_hex(),
        langflow_api: LangflowSummary::from_relay(&relay),
        received_at: Utc::now().to_rfc3339(),
    }))
}

pub async fn get_conversation(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<ConversationResponse>, (StatusCode, Json<ErrorResponse>)> {
    let user = resolve_user(&headers).await?;

    let oid = ObjectId::parse_str(&id).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse { error: "Invalid ID format".to_string() }),
        )
    })?;

    let crud = ConversationCrud::new(&state.db, state.redis.clone());

    match crud.find_by_id(&oid).await {
        Ok(Some(c)) if c.user_id == user.id => Ok(Json(to_response(&c))),
        Ok(_) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse { error: "Conversation not found".to_string() }),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse { error: e.to_string() }),
        )),
    }
}

pub async fn list_conversations(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ConversationListResponse>, (StatusCode, Json<ErrorResponse>)> {
    let user = resolve_user(&headers).await?;

    let crud = ConversationCrud::new(&state.db, state.redis.clone());

    let conversations = crud.find_by_user(&user.id, 50).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse { error: e.to_string() }),
        )
    })?;

    let total = crud.count_for_user(&user.id).await.unwrap_or(0);

    Ok(Json(ConversationListResponse {
        data: conversations.iter().map(to_response).collect(),
        total,
    }))
}
