use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use crate::config::{EnricherConfig, DEFAULT_BASE_URL};
use crate::error::{EnricherError, Result};
use crate::llm::client::TextGenerator;
use crate::llm::types::*;

/// Chat-completions client for OpenAI-compatible endpoints.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.into(),
        }
    }

    pub fn from_config(config: &EnricherConfig) -> Self {
        Self::new(config.api_key.clone(), config.model.clone()).with_base_url(&config.base_url)
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: GenerationRequest) -> Result<String> {
        let payload = ChatCompletionRequest {
            model: &self.model,
            messages: &request.messages,
            temperature: request.settings.temperature,
            max_tokens: request.settings.max_tokens,
        };

        debug!(
            "POST {} ({} messages, max_tokens={})",
            self.endpoint(),
            request.messages.len(),
            request.settings.max_tokens
        );

        let res = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;
        let status = res.status();

        if !status.is_success() {
            let err_text = res.text().await?;
            return Err(EnricherError::GenerationFailed(format!(
                "API error (status {}): {}",
                status, err_text
            )));
        }

        let body: ChatCompletionResponse = res.json().await?;

        body.choices
            .into_iter()
            .next()
            .ok_or_else(|| EnricherError::GenerationFailed("No choices returned".to_string()))?
            .message
            .content
            .ok_or_else(|| {
                EnricherError::GenerationFailed("Model returned an empty message".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_dropped() {
        let client = OpenAiClient::new("key".into(), "gpt-4.1-mini")
            .with_base_url("http://localhost:8080/v1/");
        assert_eq!(client.endpoint(), "http://localhost:8080/v1/chat/completions");
        assert_eq!(client.model(), "gpt-4.1-mini");
    }
}
