//! Router-level tests with in-process stub gateways (no network).

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use prompt_service::config::{OpenAiConfig, PromptConfig};
use prompt_service::services::{GatewayError, ImageGateway, TextGateway};
use prompt_service::{router, AppState};
use service_core::config::Config as CoreConfig;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Records prompts and answers with a canned result.
struct StubGateway {
    prompts: Mutex<Vec<String>>,
    fail_with_missing_result: bool,
}

impl StubGateway {
    fn new(fail_with_missing_result: bool) -> Arc<Self> {
        Arc::new(Self {
            prompts: Mutex::new(Vec::new()),
            fail_with_missing_result,
        })
    }

    fn seen(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    fn answer(&self, prompt: &str, ok: &str) -> Result<String, GatewayError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if self.fail_with_missing_result {
            Err(GatewayError::MissingResult)
        } else {
            Ok(ok.to_string())
        }
    }
}

#[async_trait]
impl TextGateway for StubGateway {
    async fn complete(&self, prompt: &str) -> Result<String, GatewayError> {
        self.answer(prompt, r#"{"choices":[]}"#)
    }
}

#[async_trait]
impl ImageGateway for StubGateway {
    async fn generate_image(&self, prompt: &str) -> Result<String, GatewayError> {
        self.answer(prompt, "http://stub/img.png")
    }
}

fn state(gateway: Arc<StubGateway>) -> AppState {
    AppState {
        config: PromptConfig {
            common: CoreConfig::default(),
            openai: OpenAiConfig::default(),
        },
        text_gateway: gateway.clone(),
        image_gateway: gateway,
        provider_configured: true,
    }
}

async fn post(app: axum::Router, uri: &str, body: &'static str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn text_route_wraps_gateway_output() {
    let gateway = StubGateway::new(false);
    let app = router(state(gateway.clone()));

    let (status, body) = post(app, "/text", r#"{"prompt":"hello"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], r#"{"choices":[]}"#);
    assert_eq!(gateway.seen(), vec!["hello".to_string()]);
}

#[tokio::test]
async fn image_route_wraps_gateway_output() {
    let gateway = StubGateway::new(false);
    let app = router(state(gateway));

    let (status, body) = post(app, "/image", r#"{"prompt":"a cat"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["image_url"], "http://stub/img.png");
}

#[tokio::test]
async fn empty_prompt_is_forwarded() {
    let gateway = StubGateway::new(false);
    let app = router(state(gateway.clone()));

    let (status, _) = post(app, "/text", r#"{"prompt":""}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(gateway.seen(), vec![String::new()]);
}

#[tokio::test]
async fn non_string_prompt_is_rejected_without_gateway_call() {
    let gateway = StubGateway::new(false);
    let app = router(state(gateway.clone()));

    let (status, body) = post(app, "/image", r#"{"prompt":42}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Prompt not found in request body");
    assert!(gateway.seen().is_empty());
}

#[tokio::test]
async fn gateway_failures_become_500() {
    let gateway = StubGateway::new(true);

    let (status, body) = post(router(state(gateway.clone())), "/text", r#"{"prompt":"x"}"#).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Error getting ChatGPT response");

    let (status, body) = post(router(state(gateway)), "/image", r#"{"prompt":"x"}"#).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["error"],
        "Error generating image: image URL not found in response"
    );
}
