//! Chat-completion gateway.

use super::OpenAiClient;
use crate::services::metrics::record_upstream_request;
use crate::services::{GatewayError, TextGateway};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Instant;

const CHAT_COMPLETIONS_PATH: &str = "chat/completions";

/// Request body for `POST /chat/completions`.
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

impl<'a> ChatRequest<'a> {
    /// A single user-role message carrying the prompt.
    pub fn from_prompt(model: &'a str, prompt: &'a str) -> Self {
        Self {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        }
    }
}

#[derive(Clone)]
pub struct ChatCompletionGateway {
    client: OpenAiClient,
    model: String,
}

impl ChatCompletionGateway {
    pub fn new(client: OpenAiClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl TextGateway for ChatCompletionGateway {
    async fn complete(&self, prompt: &str) -> Result<String, GatewayError> {
        let request = ChatRequest::from_prompt(&self.model, prompt);

        tracing::debug!(
            model = %self.model,
            prompt_len = prompt.len(),
            "Requesting chat completion"
        );

        let started = Instant::now();
        let result = self.client.post_json(CHAT_COMPLETIONS_PATH, &request).await;
        let outcome = match &result {
            Ok(_) => "success",
            Err(e) => e.kind(),
        };
        record_upstream_request("chat_completion", outcome, started.elapsed());

        result
    }
}
