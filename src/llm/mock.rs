//! Scripted generator for tests and dry runs.
//!
//! Responses are looked up by the exact content of the request's user
//! message. Requests without a scripted response fail, which lets tests
//! exercise the error paths of the callers.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{EnricherError, Result};
use crate::llm::client::TextGenerator;
use crate::llm::types::GenerationRequest;

#[derive(Default)]
pub struct MockGenerator {
    responses: HashMap<String, String>,
    fallback: Option<String>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl MockGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `response` whenever the user message equals `user_content`.
    pub fn respond_to(
        mut self,
        user_content: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        self.responses.insert(user_content.into(), response.into());
        self
    }

    /// Answer `response` to any request that has no scripted match.
    pub fn with_fallback(mut self, response: impl Into<String>) -> Self {
        self.fallback = Some(response.into());
        self
    }

    /// All requests received so far, in order.
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    fn model(&self) -> &str {
        "mock"
    }

    async fn generate(&self, request: GenerationRequest) -> Result<String> {
        let user = request.user_content().unwrap_or_default().to_string();
        if let Ok(mut seen) = self.requests.lock() {
            seen.push(request);
        }

        self.responses
            .get(&user)
            .or(self.fallback.as_ref())
            .cloned()
            .ok_or_else(|| {
                EnricherError::GenerationFailed(format!("no scripted response for: {}", user))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::types::GenerationSettings;

    #[tokio::test]
    async fn test_scripted_and_fallback_responses() {
        let mock = MockGenerator::new()
            .respond_to("ping", "pong")
            .with_fallback("default");
        let settings = GenerationSettings::new(0.0, 10);

        let a = mock
            .generate(GenerationRequest::new("sys", "ping", settings))
            .await
            .unwrap();
        let b = mock
            .generate(GenerationRequest::new("sys", "other", settings))
            .await
            .unwrap();

        assert_eq!(a, "pong");
        assert_eq!(b, "default");
        assert_eq!(mock.request_count(), 2);
    }

    #[tokio::test]
    async fn test_unscripted_request_fails() {
        let mock = MockGenerator::new();
        let result = mock
            .generate(GenerationRequest::new("sys", "?", GenerationSettings::new(0.0, 1)))
            .await;
        assert!(matches!(result, Err(EnricherError::GenerationFailed(_))));
    }
}
