use axum::extract::FromRef;
use mongodb::Database;
use redis::aio::ConnectionManager;

pub mod config;
pub mod modules;
pub mod services;

use crate::modules::webhook::log::WebhookLog;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub redis: ConnectionManager,
    pub webhook_log: WebhookLog,
}

impl FromRef<AppState> for WebhookLog {
    fn from_ref(state: &AppState) -> Self {
        state.webhook_log.clone()
    }
}
