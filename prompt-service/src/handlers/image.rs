use crate::dtos::{ImageUrlResponse, PromptRequest};
use crate::startup::AppState;
use axum::{extract::State, Json};
use service_core::error::AppError;

/// `POST /image`: generate one image and return its URL.
///
/// Unlike `/text`, failures name their cause in the message, e.g.
/// "Error generating image: image URL not found in response".
pub async fn generate_image(
    State(state): State<AppState>,
    payload: PromptRequest,
) -> Result<Json<ImageUrlResponse>, AppError> {
    tracing::info!(prompt_len = payload.prompt.len(), "Image prompt received");

    let image_url = state
        .image_gateway
        .generate_image(&payload.prompt)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, kind = e.kind(), "Image generation failed");
            AppError::InternalError(anyhow::anyhow!("Error generating image: {}", e))
        })?;

    tracing::info!(image_url = %image_url, "Image generated");

    Ok(Json(ImageUrlResponse { image_url }))
}
