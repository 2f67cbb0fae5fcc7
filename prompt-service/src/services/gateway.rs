//! Gateway abstractions.
//!
//! Handlers only see these traits, so the provider backend can be swapped
//! (or stubbed in tests) without touching routing code.

use super::GatewayError;
use async_trait::async_trait;

/// Forwards a prompt to a text-completion backend.
#[async_trait]
pub trait TextGateway: Send + Sync {
    /// Returns the provider's response body verbatim.
    async fn complete(&self, prompt: &str) -> Result<String, GatewayError>;
}

/// Forwards a prompt to an image-generation backend.
#[async_trait]
pub trait ImageGateway: Send + Sync {
    /// Returns the URL of the first generated image.
    async fn generate_image(&self, prompt: &str) -> Result<String, GatewayError>;
}
