//! Application startup and lifecycle management.

use crate::config::PromptConfig;
use crate::handlers;
use crate::services::{
    init_metrics, ChatCompletionGateway, ImageGateway, ImageGenerationGateway, OpenAiClient,
    TextGateway,
};
use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{make_request_span, metrics_middleware, request_id_middleware};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: PromptConfig,
    pub text_gateway: Arc<dyn TextGateway>,
    pub image_gateway: Arc<dyn ImageGateway>,
    /// Whether a provider API key is set; drives `/ready`.
    pub provider_configured: bool,
}

/// Build the HTTP router for the given state.
pub fn router(state: AppState) -> Router {
    let body_limit = match state.config.openai.max_body_bytes {
        Some(limit) => DefaultBodyLimit::max(limit),
        None => DefaultBodyLimit::disable(),
    };

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .route("/text", post(handlers::generate_text).layer(body_limit))
        .route("/image", post(handlers::generate_image).layer(body_limit))
        .fallback(handlers::not_found)
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<Body>))
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    http_port: u16,
    http_listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: PromptConfig) -> Result<Self, AppError> {
        init_metrics().map_err(|e| {
            tracing::error!("Failed to initialize metrics: {}", e);
            AppError::InternalError(e)
        })?;

        let client = OpenAiClient::new(&config.openai).map_err(|e| {
            tracing::error!("Failed to build provider HTTP client: {}", e);
            AppError::InternalError(e.into())
        })?;

        let provider_configured = client.is_configured();
        if provider_configured {
            tracing::info!(
                base_url = %config.openai.api_base_url,
                chat_model = %config.openai.chat_model,
                image_size = %config.openai.image_size,
                "Initialized OpenAI gateways"
            );
        } else {
            tracing::warn!(
                "Provider API key not configured - /text and /image will answer 500"
            );
        }

        let text_gateway: Arc<dyn TextGateway> = Arc::new(ChatCompletionGateway::new(
            client.clone(),
            config.openai.chat_model.clone(),
        ));
        let image_gateway: Arc<dyn ImageGateway> = Arc::new(ImageGenerationGateway::new(
            client,
            config.openai.image_size.clone(),
        ));

        let state = AppState {
            config: config.clone(),
            text_gateway,
            image_gateway,
            provider_configured,
        };

        // Bind HTTP listener (port 0 = random port for testing)
        let http_addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let http_listener = TcpListener::bind(http_addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", http_addr, e);
            AppError::from(e)
        })?;
        let http_port = http_listener.local_addr()?.port();

        tracing::info!("Prompt service: HTTP on port {}", http_port);

        Ok(Self {
            http_port,
            http_listener,
            state,
        })
    }

    /// Get the HTTP port the server is listening on.
    pub fn http_port(&self) -> u16 {
        self.http_port
    }

    /// Get the application state.
    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let http_router = router(self.state);

        axum::serve(self.http_listener, http_router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                std::io::Error::other(format!("HTTP server error: {}", e))
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
