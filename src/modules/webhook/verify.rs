use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

use crate::modules::webhook::model::WebhookEvent;

/// Signatures older than this are rejected. Only a lower bound is
/// enforced; future-dated timestamps pass.
const TOLERANCE_MS: i64 = 30 * 60 * 1000;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SignatureError {
    #[error("Missing signature header")]
    MissingSignature,
    #[error("Invalid signature format")]
    MalformedSignature,
    #[error("Request expired")]
    Expired,
    #[error("Webhook secret not configured")]
    SecretNotConfigured,
    #[error("Invalid signature")]
    InvalidSignature,
}

#[derive(Error, Debug)]
pub enum WebhookError {
    #[error(transparent)]
    Signature(#[from] SignatureError),
    #[error("Invalid webhook payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Checks a `t=<unix-seconds>,v0=<hex-hmac>` header against the raw
/// request body. The digest covers the exact string `"<t>.<body>"`.
pub fn verify_signature(
    body: &str,
    header: Option<&str>,
    secret: Option<&str>,
    now: DateTime<Utc>,
) -> Result<(), SignatureError> {
    let header = header.ok_or(SignatureError::MissingSignature)?;

    let timestamp = header
        .split(',')
        .find_map(|part| part.strip_prefix("t="))
        .ok_or(SignatureError::MalformedSignature)?;
    let signature = header
        .split(',')
        .find_map(|part| part.strip_prefix("v0="))
        .ok_or(SignatureError::MalformedSignature)?;

    let timestamp_secs: i64 = timestamp
        .parse()
        .map_err(|_| SignatureError::MalformedSignature)?;

    if timestamp_secs.saturating_mul(1000) < now.timestamp_millis() - TOLERANCE_MS {
        return Err(SignatureError::Expired);
    }

    let secret = secret.ok_or(SignatureError::SecretNotConfigured)?;

    let digest = hex::decode(signature).map_err(|_| SignatureError::MalformedSignature)?;

    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
        .map_err(|_| SignatureError::InvalidSignature)?;
    mac.update(format!("{}.{}", timestamp, body).as_bytes());

    // Constant-time comparison.
    mac.verify_slice(&digest)
        .map_err(|_| SignatureError::InvalidSignature)
}

/// Verifies the signature and, only then, parses the body into a typed
/// event. A body that fails to parse after a valid signature is a
/// payload error, surfaced to the caller rather than swallowed.
pub fn construct_webhook_event(
    body: &str,
    header: Option<&str>,
    secret: Option<&str>,
    now: DateTime<Utc>,
) -> Result<WebhookEvent, WebhookError> {
    verify_signature(body, header, secret, now)?;
    let event = serde_json::from_str(body)?;
    Ok(event)
}
