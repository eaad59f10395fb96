use axum::{
    extract::FromRef,
    routing::{get, post},
    Router,
};

use crate::modules::webhook::controller;
use crate::modules::webhook::log::WebhookLog;

pub fn routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    WebhookLog: FromRef<S>,
{
    Router::new().route(
        "/api/webhook",
        get(controller::webhook_status).post(controller::receive_webhook),
    )
}
