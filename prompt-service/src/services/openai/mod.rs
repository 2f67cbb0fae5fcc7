//! OpenAI provider client.
//!
//! `OpenAiClient` is the outbound request executor: one JSON POST with
//! bearer auth, full body read, status check. The gateways in `chat` and
//! `images` build the payloads on top of it.

pub mod chat;
pub mod images;

pub use chat::ChatCompletionGateway;
pub use images::ImageGenerationGateway;

use super::{Credential, GatewayError};
use crate::config::OpenAiConfig;
use reqwest::{header::CONTENT_TYPE, Client, StatusCode};
use secrecy::ExposeSecret;
use serde::Serialize;

/// Longest slice of an error body that goes into logs.
const ERROR_BODY_LOG_LIMIT: usize = 512;

#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    credential: Credential,
    api_base_url: String,
}

impl OpenAiClient {
    /// Create a client. One instance is shared by both gateways so they reuse
    /// the same connection pool.
    pub fn new(config: &OpenAiConfig) -> Result<Self, GatewayError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            credential: Credential::new(config.api_key.clone()),
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Check if the API key is set.
    pub fn is_configured(&self) -> bool {
        self.credential.is_configured()
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }

    /// POST `payload` as JSON to `path` and return the response body.
    ///
    /// Anything other than `200 OK` is an `Upstream` error.
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &T,
    ) -> Result<String, GatewayError> {
        let api_key = self.credential.api_key()?;
        let body = serde_json::to_vec(payload).map_err(GatewayError::Encoding)?;
        let url = self.endpoint(path);

        tracing::debug!(url = %url, payload_bytes = body.len(), "Sending request to provider");

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .bearer_auth(api_key.expose_secret())
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if status != StatusCode::OK {
            tracing::warn!(
                status = %status,
                body = %truncate(&text, ERROR_BODY_LOG_LIMIT),
                "Provider returned non-OK status"
            );
            return Err(GatewayError::Upstream { status });
        }

        tracing::debug!(status = %status, body_bytes = text.len(), "Provider response received");
        Ok(text)
    }
}

fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
