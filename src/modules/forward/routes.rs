use axum::{routing::post, Router};

use crate::modules::forward::controller;

pub fn routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/api/forward-transcript", post(controller::forward_transcript))
}
