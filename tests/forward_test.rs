use axum::http::StatusCode;
use axum::Router;
use axum_test::TestServer;
use serde_json::{json, Value};
use serial_test::serial;
use wellcheck::modules::forward;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn setup_server() -> TestServer {
    let app: Router = Router::new().merge(forward::routes::routes());
    TestServer::new(app).unwrap()
}

#[tokio::test]
#[serial]
async fn test_forward_transcript_success() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/transcripts"))
        .and(body_partial_json(json!({ "conversation_id": "conv_1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .mount(&mock)
        .await;
    std::env::set_var("FORWARD_SERVER_URL", format!("{}/api/transcripts", mock.uri()));
    std::env::remove_var("FORWARD_SERVER_AUTH_TOKEN");

    let server = setup_server();

    let response = server
        .post("/api/forward-transcript")
        .json(&json!({
            "conversation_id": "conv_1",
            "transcript": [{ "role": "user", "message": "hi" }],
            "analysis": { "call_successful": "success" },
            "metadata": { "call_duration_secs": 12 }
        }))
        .await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["conversation_id"], "conv_1");
    assert_eq!(body["server_response"], json!({ "ok": true }));
}

#[tokio::test]
#[serial]
async fn test_forward_includes_bearer_token_when_configured() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("Authorization", "Bearer fwd_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock)
        .await;
    std::env::set_var("FORWARD_SERVER_URL", mock.uri());
    std::env::set_var("FORWARD_SERVER_AUTH_TOKEN", "fwd_token");

    let server = setup_server();

    let response = server
        .post("/api/forward-transcript")
        .json(&json!({ "conversation_id": "conv_2" }))
        .await;

    response.assert_status(StatusCode::OK);
    std::env::remove_var("FORWARD_SERVER_AUTH_TOKEN");
}

#[tokio::test]
#[serial]
async fn test_forward_downstream_failure() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("downstream broke"))
        .mount(&mock)
        .await;
    std::env::set_var("FORWARD_SERVER_URL", mock.uri());
    std::env::remove_var("FORWARD_SERVER_AUTH_TOKEN");

    let server = setup_server();

    let response = server
        .post("/api/forward-transcript")
        .json(&json!({ "conversation_id": "conv_3" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert!(!body["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
#[serial]
async fn test_forward_without_target_url_is_config_error() {
    std::env::remove_var("FORWARD_SERVER_URL");

    let server = setup_server();

    let response = server
        .post("/api/forward-transcript")
        .json(&json!({ "conversation_id": "conv_4" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
}
