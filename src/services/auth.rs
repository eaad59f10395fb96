use reqwest::Client;
use serde::Deserialize;
use std::env;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Missing auth backend configuration")]
    MissingConfig,
    #[error("Invalid or expired token")]
    Unauthorized,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Resolves bearer tokens to user identities against the managed auth
/// backend.
#[derive(Clone)]
pub struct AuthClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl AuthClient {
    pub fn new() -> Result<Self, AuthError> {
        let base_url = env::var("SUPABASE_URL").map_err(|_| AuthError::MissingConfig)?;
        let anon_key = env::var("SUPABASE_ANON_KEY").map_err(|_| AuthError::MissingConfig)?;

        Ok(Self {
            client: Client::new(),
            base_url,
            anon_key,
        })
    }

    pub async fn get_user(&self, token: &str) -> Result<AuthUser, AuthError> {
        let response = self
            .client
            .get(format!("{}/auth/v1/user", self.base_url))
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AuthError::Unauthorized);
        }

        Ok(response.json().await?)
    }
}
