use axum::{routing::post, Router};

use crate::modules::sms::controller;

pub fn routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/api/send-sms", post(controller::send_sms))
}
