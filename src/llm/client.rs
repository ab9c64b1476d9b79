use async_trait::async_trait;

use crate::error::Result;
use crate::llm::types::GenerationRequest;

/// A text-generation backend: role-tagged messages in, one completion out.
///
/// Implementations are expected to be slow, non-deterministic and fallible.
/// Callers await each request before issuing the next one.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Model identifier, used for logging.
    fn model(&self) -> &str;

    async fn generate(&self, request: GenerationRequest) -> Result<String>;
}
