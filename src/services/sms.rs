use reqwest::Client;
use serde::Deserialize;
use std::env;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SmsError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("SMS API error: {0}")]
    ApiError(String),
    #[error("Missing SMS provider credentials")]
    MissingCredentials,
}

#[derive(Debug, Deserialize)]
struct MessageCreated {
    sid: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    message: String,
}

pub struct SmsDispatch {
    pub sid: String,
}

#[derive(Clone)]
pub struct SmsClient {
    client: Client,
    base_url: String,
    account_sid: String,
    auth_token: String,
    from_number: String,
}

impl SmsClient {
    pub fn new() -> Result<Self, SmsError> {
        let account_sid = env::var("TWILIO_SID").map_err(|_| SmsError::MissingCredentials)?;
        let auth_token = env::var("TWILIO_TOKEN").map_err(|_| SmsError::MissingCredentials)?;
        let from_number = env::var("TWILIO_NUMBER").map_err(|_| SmsError::MissingCredentials)?;
        let base_url =
            env::var("TWILIO_BASE_URL").unwrap_or_else(|_| "https://api.twilio.com".to_string());

        Ok(Self {
            client: Client::new(),
            base_url,
            account_sid,
            auth_token,
            from_number,
        })
    }

    pub async fn send(&self, to: &str, body: &str) -> Result<SmsDispatch, SmsError> {
        let url = format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.base_url, self.account_sid
        );

        let params = [("To", to), ("From", self.from_number.as_str()), ("Body", body)];

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            if let Ok(error_response) = serde_json::from_str::<ApiErrorResponse>(&error_text) {
                return Err(SmsError::ApiError(error_response.message));
            }
            return Err(SmsError::ApiError(error_text));
        }

        let created: MessageCreated = response.json().await?;

        Ok(SmsDispatch { sid: created.sid })
    }
}
