use crate::config::API_KEY_VAR;
use reqwest::StatusCode;
use service_core::error::AppError;
use thiserror::Error;

/// Failure kinds of a single prompt round trip.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("{} not found in environment variables", API_KEY_VAR)]
    MissingCredential,

    #[error("failed to encode provider request: {0}")]
    Encoding(#[source] serde_json::Error),

    #[error("provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("non-OK status code received: {status}")]
    Upstream { status: StatusCode },

    #[error("failed to decode provider response: {0}")]
    Decoding(#[source] serde_json::Error),

    #[error("image URL not found in response")]
    MissingResult,

    #[error("{0}")]
    MalformedRequest(String),
}

impl GatewayError {
    /// Stable label for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::MissingCredential => "missing_credential",
            GatewayError::Encoding(_) => "encoding",
            GatewayError::Transport(_) => "transport",
            GatewayError::Upstream { .. } => "upstream",
            GatewayError::Decoding(_) => "decoding",
            GatewayError::MissingResult => "missing_result",
            GatewayError::MalformedRequest(_) => "malformed_request",
        }
    }
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::MalformedRequest(msg) => AppError::BadRequest(anyhow::anyhow!(msg)),
            other => AppError::InternalError(anyhow::Error::new(other)),
        }
    }
}
