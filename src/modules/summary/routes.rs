use axum::{routing::post, Router};

use crate::modules::summary::controller;

pub fn routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/api/summarize", post(controller::summarize))
}
