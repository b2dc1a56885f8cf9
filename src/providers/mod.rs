pub mod gemini;

pub use gemini::GeminiClient;

use async_trait::async_trait;

use crate::error::AppResult;

/// Turns free text into a fixed-length embedding vector. One network call
/// per text; no caching, no retries. Implementations hold no mutable state
/// and may be invoked concurrently for independent texts.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, text: &str) -> AppResult<Vec<f32>>;
}

/// Produces natural-language text from a system instruction and a user query.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    async fn generate(
        &self,
        system_instruction: &str,
        user_query: &str,
        temperature: f32,
    ) -> AppResult<String>;
}
