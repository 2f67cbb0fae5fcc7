use crate::dtos::{PromptRequest, TextCompletionResponse};
use crate::startup::AppState;
use axum::{extract::State, Json};
use service_core::error::AppError;

/// `POST /text`: relay the provider's chat-completion body untouched.
pub async fn generate_text(
    State(state): State<AppState>,
    payload: PromptRequest,
) -> Result<Json<TextCompletionResponse>, AppError> {
    tracing::info!(prompt_len = payload.prompt.len(), "Text prompt received");

    let response = state
        .text_gateway
        .complete(&payload.prompt)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, kind = e.kind(), "Chat completion failed");
            AppError::InternalError(anyhow::anyhow!("Error getting ChatGPT response"))
        })?;

    Ok(Json(TextCompletionResponse { response }))
}
