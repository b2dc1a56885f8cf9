use crate::error::{AppError, AppResult};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_CHAT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-004";
pub const DEFAULT_PORT: u16 = 8780;

/// Provider credentials and server binding, read once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: String,
    pub base_url: String,
    pub chat_model: String,
    pub embedding_model: String,
    pub port: u16,
}

impl Settings {
    pub fn from_env() -> AppResult<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| AppError::Validation("GEMINI_API_KEY is not set".into()))?;
        let base_url = std::env::var("GEMINI_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let port = std::env::var("PAKLEGAL_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        Ok(Self {
            api_key,
            base_url,
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            port,
        })
    }
}

/// Retrieval tunables. The defaults are tuned for the shipped legal corpus.
#[derive(Debug, Clone, Copy)]
pub struct RetrievalConfig {
    /// Minimum cosine similarity for a chunk to be considered relevant.
    /// Results must score strictly above this to be returned.
    pub similarity_threshold: f32,
    /// Maximum number of snippets handed to the generation prompt.
    pub top_k: usize,
    /// Spans shorter than this (after trimming) are dropped at ingest.
    pub min_chunk_chars: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.4,
            top_k: 4,
            min_chunk_chars: 50,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retrieval_defaults() {
        let config = RetrievalConfig::default();
        assert_eq!(config.similarity_threshold, 0.4);
        assert_eq!(config.top_k, 4);
        assert_eq!(config.min_chunk_chars, 50);
    }
}
