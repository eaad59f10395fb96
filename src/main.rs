use axum::Router;
use std::env;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

use wellcheck::modules::webhook::log::WebhookLog;
use wellcheck::modules::{conversation, forward, sms, summary, webhook};
use wellcheck::{config, AppState};

const WEBHOOK_LOG_CAPACITY: usize = 50;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let db = config::database::connect().await;
    let redis = config::redis::connect().await;

    let state = AppState {
        db,
        redis,
        webhook_log: WebhookLog::new(WEBHOOK_LOG_CAPACITY),
    };

    let app = Router::new()
        .merge(webhook::routes::routes())
        .merge(conversation::routes::routes())
        .merge(summary::routes::routes())
        .merge(sms::routes::routes())
        .merge(forward::routes::routes())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!(%addr, "wellcheck listening");

    axum::serve(listener, app).await?;

    Ok(())
}
