use crate::services::get_metrics;
use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use service_core::error::AppError;

/// Liveness probe.
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "prompt-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// Readiness probe: not ready until a provider key is configured.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let openai = &state.config.openai;
    if state.provider_configured {
        (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "chat_model": openai.chat_model,
                "image_size": openai.image_size
            })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "not_ready",
                "reason": "provider API key not configured"
            })),
        )
    }
}

/// Prometheus metrics endpoint.
pub async fn metrics_endpoint() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}

pub async fn not_found() -> AppError {
    AppError::NotFound(anyhow::anyhow!("Route not found"))
}
