//! HTTP client for the hosted push-messaging provider.

use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use std::time::Duration;

use super::notifications_errors::{NotificationError, Result};
use super::notifications_model::PushMessage;
use super::notifications_traits::{PushClientTrait, TokenProvider};

/// Default timeout for provider requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorResponse {
    code: String,
    message: String,
}

/// Client for the push provider's REST API. Dispatches token-addressed
/// messages and requests device tokens.
#[derive(Debug, Clone)]
pub struct PushClient {
    client: reqwest::Client,
    base_url: String,
    server_key: String,
}

impl PushClient {
    /// Create a new push client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the provider API
    /// * `server_key` - The server credential authorizing dispatches
    pub fn new(base_url: &str, server_key: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            server_key: server_key.to_string(),
        })
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let auth_value = HeaderValue::from_str(&format!("Bearer {}", self.server_key))
            .map_err(|_| NotificationError::provider(0, "Invalid server key format"))?;
        headers.insert(AUTHORIZATION, auth_value);

        Ok(headers)
    }

    /// Parse a JSON response body.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;
        debug!("Provider response ({}): {}", status, body);

        if !status.is_success() {
            if let Ok(error) = serde_json::from_str::<ProviderErrorResponse>(&body) {
                return Err(NotificationError::provider(
                    status.as_u16(),
                    format!("{}: {}", error.code, error.message),
                ));
            }
            return Err(NotificationError::provider(
                status.as_u16(),
                format!("Request failed: {}", body),
            ));
        }

        serde_json::from_str(&body).map_err(|e| {
            NotificationError::provider(
                status.as_u16(),
                format!("Failed to parse response: {}", e),
            )
        })
    }
}

#[async_trait]
impl PushClientTrait for PushClient {
    /// POST /v1/messages
    async fn send(&self, message: &PushMessage) -> Result<()> {
        let url = format!("{}/v1/messages", self.base_url);

        let response = self
            .client
            .post(&url)
            .headers(self.headers()?)
            .json(message)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if let Ok(error) = serde_json::from_str::<ProviderErrorResponse>(&body) {
                return Err(NotificationError::provider(
                    status.as_u16(),
                    format!("{}: {}", error.code, error.message),
                ));
            }
            return Err(NotificationError::provider(
                status.as_u16(),
                format!("Dispatch failed: {}", body),
            ));
        }

        Ok(())
    }
}

#[async_trait]
impl TokenProvider for PushClient {
    /// POST /v1/tokens
    async fn request_token(&self, client_key: &str) -> Result<String> {
        let url = format!("{}/v1/tokens", self.base_url);

        let response = self
            .client
            .post(&url)
            .headers(self.headers()?)
            .json(&serde_json::json!({ "clientKey": client_key }))
            .send()
            .await?;

        let parsed: TokenResponse = Self::parse_response(response).await?;

        if parsed.token.is_empty() {
            return Err(NotificationError::token_unavailable(
                "provider returned an empty token",
            ));
        }

        Ok(parsed.token)
    }
}
