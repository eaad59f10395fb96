use hmac::{Hmac, Mac};
use reqwest::Client;
use serde_json::json;
use sha2::Sha256;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let secret = std::env::var("ELEVENLABS_WEBHOOK_SECRET")
        .expect("ELEVENLABS_WEBHOOK_SECRET not set");
    let base_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://localhost:3000".to_string());

    let timestamp = chrono::Utc::now().timestamp();

    let payload = json!({
        "type": "post_call_transcription",
        "event_timestamp": timestamp,
        "data": {
            "agent_id": "agent_local_test",
            "conversation_id": format!("conv_{}", chrono::Utc::now().timestamp_millis()),
            "status": "done",
            "transcript": [
                { "role": "agent", "message": "Hi! How are you feeling today?", "time_in_call_secs": 1.2 },
                { "role": "user", "message": "My tummy hurts a little bit.", "time_in_call_secs": 4.8 },
                { "role": "agent", "message": "I'm sorry to hear that. Did you eat breakfast this morning?", "time_in_call_secs": 7.5 }
            ],
            "metadata": { "call_duration_secs": 42 },
            "analysis": { "call_successful": "success" }
        }
    });

    let body = payload.to_string();

    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).expect("HMAC key");
    mac.update(format!("{}.{}", timestamp, body).as_bytes());
    let signature = format!("t={},v0={}", timestamp, hex::encode(mac.finalize().into_bytes()));

    println!("🧪 POST {}/api/webhook", base_url);

    let response = Client::new()
        .post(format!("{}/api/webhook", base_url))
        .header("ElevenLabs-Signature", signature)
        .header("Content-Type", "application/json")
        .body(body)
        .send()
        .await
        .expect("Request failed");

    let status = response.status();
    let text = response.text().await.unwrap_or_default();

    println!("Status: {}", status);
    println!("{}", text);
}
