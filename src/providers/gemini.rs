use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use super::{EmbeddingProvider, GenerationProvider};
use crate::config::Settings;
use crate::error::{AppError, AppResult};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for the Gemini Generative Language REST API. Serves both the
/// embedding and the generation contract from one configured endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    chat_model: String,
    embedding_model: String,
}

impl GeminiClient {
    pub fn new(settings: &Settings) -> AppResult<Self> {
        if settings.api_key.trim().is_empty() {
            return Err(AppError::Validation("Gemini API key is empty".into()));
        }
        url::Url::parse(&settings.base_url)
            .map_err(|e| AppError::Validation(format!("Invalid provider base URL: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            API_KEY_HEADER,
            HeaderValue::from_str(settings.api_key.trim())
                .map_err(|_| AppError::Validation("Gemini API key is not a valid header value".into()))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(headers)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            chat_model: settings.chat_model.clone(),
            embedding_model: settings.embedding_model.clone(),
        })
    }

    fn endpoint(&self, model: &str, action: &str) -> String {
        format!("{}/models/{}:{}", self.base_url, model, action)
    }

    async fn post_json<Req: Serialize, Resp: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        request: &Req,
        what: &str,
    ) -> AppResult<Resp> {
        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::Provider(format!("{what} request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_string());
            return Err(AppError::Provider(format!(
                "{what} request failed ({status}): {body}"
            )));
        }

        response
            .json::<Resp>()
            .await
            .map_err(|e| AppError::Provider(format!("Failed to parse {what} response: {e}")))
    }
}

#[async_trait]
impl EmbeddingProvider for GeminiClient {
    async fn embed(&self, text: &str) -> AppResult<Vec<f32>> {
        let request = EmbedContentRequest {
            content: Content::from_text(text),
        };
        let url = self.endpoint(&self.embedding_model, "embedContent");
        let parsed: EmbedContentResponse = self.post_json(&url, &request, "embedding").await?;

        let values = parsed.embedding.map(|e| e.values).unwrap_or_default();
        if values.is_empty() {
            return Err(AppError::Provider(
                "Embedding response contained no values".into(),
            ));
        }
        Ok(values)
    }
}

#[async_trait]
impl GenerationProvider for GeminiClient {
    async fn generate(
        &self,
        system_instruction: &str,
        user_query: &str,
        temperature: f32,
    ) -> AppResult<String> {
        let request = GenerateContentRequest {
            contents: vec![Content::from_text(user_query)],
            system_instruction: Content::from_text(system_instruction),
            generation_config: GenerationConfig { temperature },
        };
        let url = self.endpoint(&self.chat_model, "generateContent");
        let parsed: GenerateContentResponse = self.post_json(&url, &request, "generation").await?;

        let text = parsed
            .candidates
            .into_iter()
            .flatten()
            .next()
            .and_then(|c| c.content)
            .map(|c| {
                c.parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(AppError::Provider(
                "Generation response contained no text".into(),
            ));
        }
        Ok(text)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

impl Content {
    fn from_text(text: &str) -> Self {
        Self {
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }
}

#[derive(Debug, Serialize)]
struct EmbedContentRequest {
    content: Content,
}

#[derive(Debug, Deserialize)]
struct EmbedContentResponse {
    embedding: Option<ContentEmbedding>,
}

#[derive(Debug, Deserialize)]
struct ContentEmbedding {
    values: Vec<f32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    system_instruction: Content,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_CHAT_MODEL, DEFAULT_EMBEDDING_MODEL};

    fn test_settings() -> Settings {
        Settings {
            api_key: "test-key".to_string(),
            base_url: "https://example.test/v1beta".to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            port: 0,
        }
    }

    #[test]
    fn test_new_rejects_empty_api_key() {
        let mut settings = test_settings();
        settings.api_key = "  ".to_string();
        assert!(GeminiClient::new(&settings).is_err());
    }

    #[test]
    fn test_new_rejects_invalid_base_url() {
        let mut settings = test_settings();
        settings.base_url = "not a url".to_string();
        assert!(GeminiClient::new(&settings).is_err());
    }

    #[test]
    fn test_endpoint_formatting() {
        let client = GeminiClient::new(&test_settings()).unwrap();
        assert_eq!(
            client.endpoint("text-embedding-004", "embedContent"),
            "https://example.test/v1beta/models/text-embedding-004:embedContent"
        );
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let mut settings = test_settings();
        settings.base_url = "https://example.test/v1beta/".to_string();
        let client = GeminiClient::new(&settings).unwrap();
        assert_eq!(
            client.endpoint("gemini-2.5-flash", "generateContent"),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_generate_response_parsing() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"text":"Hello "},{"text":"world"}]}}]}"#;
        let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        let mut candidates = parsed.candidates.unwrap();
        let candidate = candidates.remove(0);
        let text: String = candidate
            .content
            .unwrap()
            .parts
            .into_iter()
            .map(|p| p.text)
            .collect();
        assert_eq!(text, "Hello world");
    }

    #[test]
    fn test_embed_response_parsing() {
        let raw = r#"{"embedding":{"values":[0.1,0.2,0.3]}}"#;
        let parsed: EmbedContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.embedding.unwrap().values.len(), 3);
    }
}
