use axum::{
    routing::{get, post},
    Router,
};

use crate::modules::conversation::controller;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/conversation", post(controller::submit_conversation))
        .route("/api/conversation/{id}", get(controller::get_conversation))
        .route("/api/conversations", get(controller::list_conversations))
}
