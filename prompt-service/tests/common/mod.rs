#![allow(dead_code)]

use prompt_service::config::{OpenAiConfig, PromptConfig};
use prompt_service::startup::Application;
use secrecy::Secret;
use service_core::config::Config as CoreConfig;
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "sk-test-key";

pub struct TestApp {
    pub http_address: String,
    pub http_port: u16,
    /// Stand-in for the provider API; mount mocks on it per test.
    pub upstream: MockServer,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawn the app with a configured API key.
    pub async fn spawn() -> Self {
        Self::spawn_with_key(Some(TEST_API_KEY)).await
    }

    /// Spawn the app with the given (possibly absent) API key.
    pub async fn spawn_with_key(api_key: Option<&str>) -> Self {
        Self::spawn_against(api_key, None).await
    }

    /// Spawn the app pointed at `base_url`, or at the stub upstream when `None`.
    pub async fn spawn_against(api_key: Option<&str>, base_url: Option<&str>) -> Self {
        let base_url = base_url.map(str::to_string);
        Self::spawn_with(|openai| {
            openai.api_key = api_key.map(|key| Secret::new(key.to_string()));
            if let Some(base_url) = base_url {
                openai.api_base_url = base_url;
            }
        })
        .await
    }

    /// Spawn the app with a key, the stub upstream, and `configure` applied last.
    pub async fn spawn_with(configure: impl FnOnce(&mut OpenAiConfig)) -> Self {
        let upstream = MockServer::start().await;

        let mut openai = OpenAiConfig {
            api_key: Some(Secret::new(TEST_API_KEY.to_string())),
            api_base_url: format!("{}/v1", upstream.uri()),
            ..OpenAiConfig::default()
        };
        configure(&mut openai);

        let config = PromptConfig {
            common: CoreConfig {
                port: 0, // Random port
                ..CoreConfig::default()
            },
            openai,
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let http_port = app.http_port();
        let http_address = format!("http://127.0.0.1:{}", http_port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", http_address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            http_address,
            http_port,
            upstream,
            client,
        }
    }

    pub async fn post_prompt(&self, route: &str, body: serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.http_address, route))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_raw(&self, route: &str, body: &'static str) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.http_address, route))
            .body(body)
            .send()
            .await
            .expect("Failed to execute request")
    }
}
