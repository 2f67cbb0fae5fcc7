//! Image-generation gateway.

use super::OpenAiClient;
use crate::services::metrics::record_upstream_request;
use crate::services::{GatewayError, ImageGateway};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Instant;

const IMAGE_GENERATIONS_PATH: &str = "images/generations";

/// Request body for `POST /images/generations`.
#[derive(Debug, Serialize)]
pub struct ImageRequest<'a> {
    pub prompt: &'a str,
    /// Number of images; always 1, only the first result is relayed.
    pub n: u8,
    pub size: &'a str,
}

/// Relevant part of the image-generation response.
#[derive(Debug, Deserialize)]
pub struct ImageResponse {
    #[serde(default)]
    pub data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
pub struct ImageData {
    #[serde(default)]
    pub url: Option<String>,
}

impl ImageResponse {
    /// URL of the first image, if the provider returned a non-empty one.
    pub fn first_url(&self) -> Option<&str> {
        self.data
            .first()
            .and_then(|image| image.url.as_deref())
            .filter(|url| !url.is_empty())
    }
}

#[derive(Clone)]
pub struct ImageGenerationGateway {
    client: OpenAiClient,
    size: String,
}

impl ImageGenerationGateway {
    pub fn new(client: OpenAiClient, size: impl Into<String>) -> Self {
        Self {
            client,
            size: size.into(),
        }
    }

    async fn request_image(&self, prompt: &str) -> Result<String, GatewayError> {
        let request = ImageRequest {
            prompt,
            n: 1,
            size: &self.size,
        };

        let body = self.client.post_json(IMAGE_GENERATIONS_PATH, &request).await?;
        let response: ImageResponse =
            serde_json::from_str(&body).map_err(GatewayError::Decoding)?;

        tracing::debug!(images = response.data.len(), "Image generation response decoded");

        response
            .first_url()
            .map(str::to_string)
            .ok_or(GatewayError::MissingResult)
    }
}

#[async_trait]
impl ImageGateway for ImageGenerationGateway {
    async fn generate_image(&self, prompt: &str) -> Result<String, GatewayError> {
        tracing::debug!(
            size = %self.size,
            prompt_len = prompt.len(),
            "Requesting image generation"
        );

        let started = Instant::now();
        let result = self.request_image(prompt).await;
        let outcome = match &result {
            Ok(_) => "success",
            Err(e) => e.kind(),
        };
        record_upstream_request("image_generation", outcome, started.elapsed());

        result
    }
}
