//! Request and response bodies for the prompt routes.

use crate::services::GatewayError;
use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use serde::Serialize;
use serde_json::{Map, Value};
use service_core::error::AppError;

/// Inbound `{"prompt": "..."}` body.
///
/// Parsed by hand rather than with `Json<T>` so that a missing
/// `Content-Type` is accepted and rejections render as `{"error": ...}`:
/// 413 when the body exceeds the route's limit, 400 otherwise.
#[derive(Debug, Clone)]
pub struct PromptRequest {
    pub prompt: String,
}

#[async_trait]
impl<S> FromRequest<S> for PromptRequest
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            tracing::debug!(error = %e, "Failed to read request body");
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                AppError::PayloadTooLarge(anyhow::anyhow!(e.body_text()))
            } else {
                bad_request().into()
            }
        })?;

        let body: Map<String, Value> = serde_json::from_slice(&bytes).map_err(|e| {
            tracing::debug!(error = %e, "Request body is not a JSON object");
            bad_request()
        })?;

        let prompt = body.get("prompt").and_then(Value::as_str).ok_or_else(|| {
            GatewayError::MalformedRequest("Prompt not found in request body".to_string())
        })?;

        Ok(PromptRequest {
            prompt: prompt.to_string(),
        })
    }
}

fn bad_request() -> GatewayError {
    GatewayError::MalformedRequest("Bad request".to_string())
}

/// Successful `/text` body; `response` is the provider JSON as a string.
#[derive(Debug, Serialize)]
pub struct TextCompletionResponse {
    pub response: String,
}

/// Successful `/image` body.
#[derive(Debug, Serialize)]
pub struct ImageUrlResponse {
    pub image_url: String,
}
