//! OpenAI-compatible chat-completions backend
//!
//! One `OpenAiClient` wraps one API credential against any endpoint that
//! speaks the OpenAI chat-completions protocol (OpenAI itself, DeepSeek,
//! Gemini's compatibility surface, local gateways). The pipeline requires
//! near-deterministic structured output, so requests are non-streaming at
//! low temperature.

use crate::LlmError;
use graphmill_domain::traits::CompletionBackend;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Fixed request timeout. A slow credential fails its chunk rather than
/// stalling the whole batch.
pub const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Sampling temperature for extraction calls. Downstream parsing expects
/// structured JSON, so the output must be close to deterministic.
pub const EXTRACTION_TEMPERATURE: f32 = 0.3;

/// One credential against an OpenAI-compatible chat-completions endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    base_url: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl OpenAiClient {
    /// Create a client for one credential.
    ///
    /// # Parameters
    ///
    /// - `base_url`: endpoint base, e.g. "https://api.deepseek.com/"
    /// - `model`: model identifier, e.g. "deepseek-chat"
    /// - `api_key`: the credential this client owns
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap();

        Self {
            base_url: base_url.into(),
            model: model.into(),
            api_key: api_key.into(),
            client,
        }
    }

    async fn request(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!(
            "{}/chat/completions",
            self.base_url.trim_end_matches('/')
        );

        let body = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: prompt.to_string(),
            }],
            temperature: EXTRACTION_TEMPERATURE,
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Communication(format!("Failed to parse response: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(LlmError::EmptyCompletion)
    }
}

impl CompletionBackend for OpenAiClient {
    type Error = LlmError;

    async fn complete(&self, prompt: &str) -> Result<String, Self::Error> {
        self.request(prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = OpenAiClient::new("https://api.deepseek.com/", "deepseek-chat", "sk-test");
        assert_eq!(client.base_url, "https://api.deepseek.com/");
        assert_eq!(client.model, "deepseek-chat");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_communication_error() {
        // Port 1 refuses connections immediately
        let client = OpenAiClient::new("http://127.0.0.1:1", "test-model", "sk-test");
        let result = client.complete("test").await;
        assert!(matches!(result, Err(LlmError::Communication(_))));
    }
}
