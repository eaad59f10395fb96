use axum::http::StatusCode;
use axum::Router;
use axum_test::TestServer;
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde_json::{json, Value};
use serial_test::serial;
use sha2::Sha256;
use wellcheck::modules::webhook;
use wellcheck::modules::webhook::log::WebhookLog;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

const SECRET: &str = "wsec_webhook_test";

fn setup_server(log: WebhookLog) -> TestServer {
    let app: Router = Router::new()
        .merge(webhook::routes::routes())
        .with_state(log);

    TestServer::new(app).unwrap()
}

fn sign(secret: &str, timestamp: i64, body: &str) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(format!("{}.{}", timestamp, body).as_bytes());
    format!("t={},v0={}", timestamp, hex::encode(mac.finalize().into_bytes()))
}

fn call_event(conversation_id: &str) -> Value {
    json!({
        "type": "post_call_transcription",
        "event_timestamp": Utc::now().timestamp(),
        "data": {
            "agent_id": "agent_1",
            "conversation_id": conversation_id,
            "status": "done",
            "transcript": [
                { "role": "agent", "message": "Hi! How are you feeling today?", "time_in_call_secs": 1.0 },
                { "role": "user", "message": "Pretty good!", "time_in_call_secs": 3.5 },
                { "role": "agent", "message": "Glad to hear it.", "time_in_call_secs": 5.0 }
            ],
            "metadata": {},
            "analysis": {}
        }
    })
}

async fn mock_provider(response: ResponseTemplate) -> MockServer {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(response)
        .mount(&mock)
        .await;
    mock
}

#[tokio::test]
#[serial]
async fn test_signed_webhook_roundtrip() {
    std::env::set_var("ELEVENLABS_WEBHOOK_SECRET", SECRET);
    let mock = mock_provider(ResponseTemplate::new(200).set_body_json(json!({
        "outputs": [{ "artifacts": { "message": "All good today" } }]
    })))
    .await;
    std::env::set_var("LANGFLOW_API_URL", mock.uri());

    let server = setup_server(WebhookLog::new(50));

    let body = call_event("conv_roundtrip").to_string();
    let header = sign(SECRET, Utc::now().timestamp(), &body);

    let response = server
        .post("/api/webhook")
        .add_header("ElevenLabs-Signature", header.as_str())
        .text(body)
        .await;

    response.assert_status(StatusCode::OK);
    let ack: Value = response.json();
    assert_eq!(ack["received"], true);
    assert_eq!(ack["conversation_id"], "conv_roundtrip");
    assert_eq!(ack["status"], "processed");
    assert_eq!(ack["langflow_api"]["success"], true);
    assert_eq!(ack["langflow_api"]["extracted_message"], "All good today");

    let status = server.get("/api/webhook").await;
    status.assert_status(StatusCode::OK);
    let body: Value = status.json();
    let recent = body["recent_calls"].as_array().unwrap();
    assert!(!recent.is_empty());
    assert_eq!(
        recent.last().unwrap()["data"]["conversation_id"],
        "conv_roundtrip"
    );
}

#[tokio::test]
#[serial]
async fn test_extracted_message_is_formatted() {
    std::env::set_var("ELEVENLABS_WEBHOOK_SECRET", SECRET);
    let mock = mock_provider(ResponseTemplate::new(200).set_body_json(json!({
        "outputs": [{ "artifacts": { "message": "**Hi** - there" } }]
    })))
    .await;
    std::env::set_var("LANGFLOW_API_URL", mock.uri());

    let server = setup_server(WebhookLog::new(50));

    let body = call_event("conv_formatting").to_string();
    let header = sign(SECRET, Utc::now().timestamp(), &body);

    let response = server
        .post("/api/webhook")
        .add_header("ElevenLabs-Signature", header.as_str())
        .text(body)
        .await;

    response.assert_status(StatusCode::OK);
    let ack: Value = response.json();
    assert_eq!(ack["langflow_api"]["extracted_message"], "Hi • there");
}

#[tokio::test]
#[serial]
async fn test_provider_failure_does_not_fail_request() {
    std::env::set_var("ELEVENLABS_WEBHOOK_SECRET", SECRET);
    let mock = mock_provider(ResponseTemplate::new(500).set_body_string("boom")).await;
    std::env::set_var("LANGFLOW_API_URL", mock.uri());

    let server = setup_server(WebhookLog::new(50));

    let body = call_event("conv_provider_down").to_string();
    let header = sign(SECRET, Utc::now().timestamp(), &body);

    let response = server
        .post("/api/webhook")
        .add_header("ElevenLabs-Signature", header.as_str())
        .text(body)
        .await;

    response.assert_status(StatusCode::OK);
    let ack: Value = response.json();
    assert_eq!(ack["received"], true);
    assert_eq!(ack["langflow_api"]["success"], false);
    assert!(!ack["langflow_api"]["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
#[serial]
async fn test_invalid_signature_rejected() {
    std::env::set_var("ELEVENLABS_WEBHOOK_SECRET", SECRET);

    let server = setup_server(WebhookLog::new(50));

    let body = call_event("conv_bad_sig").to_string();
    let header = sign("some_other_secret", Utc::now().timestamp(), &body);

    let response = server
        .post("/api/webhook")
        .add_header("ElevenLabs-Signature", header.as_str())
        .text(body)
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let err: Value = response.json();
    assert_eq!(err["error"], "Invalid signature");
}

#[tokio::test]
#[serial]
async fn test_missing_signature_rejected() {
    std::env::set_var("ELEVENLABS_WEBHOOK_SECRET", SECRET);

    let server = setup_server(WebhookLog::new(50));

    let response = server
        .post("/api/webhook")
        .text(call_event("conv_no_sig").to_string())
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let err: Value = response.json();
    assert_eq!(err["error"], "Missing signature header");
}

#[tokio::test]
#[serial]
async fn test_expired_signature_rejected() {
    std::env::set_var("ELEVENLABS_WEBHOOK_SECRET", SECRET);

    let server = setup_server(WebhookLog::new(50));

    let body = call_event("conv_expired").to_string();
    let stale = Utc::now().timestamp() - 31 * 60;
    let header = sign(SECRET, stale, &body);

    let response = server
        .post("/api/webhook")
        .add_header("ElevenLabs-Signature", header.as_str())
        .text(body)
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let err: Value = response.json();
    assert_eq!(err["error"], "Request expired");
}

#[tokio::test]
#[serial]
async fn test_unknown_event_type_acknowledged_but_not_logged() {
    std::env::set_var("ELEVENLABS_WEBHOOK_SECRET", SECRET);

    let log = WebhookLog::new(50);
    let server = setup_server(log.clone());

    let body = json!({ "type": "ping", "event_timestamp": Utc::now().timestamp() }).to_string();
    let header = sign(SECRET, Utc::now().timestamp(), &body);

    let response = server
        .post("/api/webhook")
        .add_header("ElevenLabs-Signature", header.as_str())
        .text(body)
        .await;

    response.assert_status(StatusCode::OK);
    let ack: Value = response.json();
    assert_eq!(ack, json!({ "received": true }));
    assert!(log.is_empty());
}

#[tokio::test]
#[serial]
async fn test_valid_signature_over_invalid_json_is_server_error() {
    std::env::set_var("ELEVENLABS_WEBHOOK_SECRET", SECRET);

    let server = setup_server(WebhookLog::new(50));

    let body = "definitely not json";
    let header = sign(SECRET, Utc::now().timestamp(), body);

    let response = server
        .post("/api/webhook")
        .add_header("ElevenLabs-Signature", header.as_str())
        .text(body)
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}
