use std::sync::Arc;

use serde::Serialize;

use crate::providers::GenerationProvider;
use crate::rag::{format_context, Retriever, SearchResult};

const GENERATION_TEMPERATURE: f32 = 0.3;

pub const APOLOGY_MESSAGE: &str =
    "I apologize, but I encountered an error while processing your legal query.";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub reply: String,
    pub sources: Vec<SearchResult>,
}

/// Answers a legal question by grounding the generation call in retrieved
/// snippets. Retrieval failures degrade to an ungrounded answer; generation
/// failures degrade to a fixed apology. Neither surfaces raw provider text.
pub struct Assistant {
    retriever: Arc<Retriever>,
    generator: Arc<dyn GenerationProvider>,
}

impl Assistant {
    pub fn new(retriever: Arc<Retriever>, generator: Arc<dyn GenerationProvider>) -> Self {
        Self {
            retriever,
            generator,
        }
    }

    pub async fn answer(&self, query: &str) -> ChatReply {
        let sources = match self.retriever.retrieve(query, self.retriever.top_k()).await {
            Ok(results) => results,
            Err(e) => {
                eprintln!("[chat] retrieval failed, answering without context: {e}");
                Vec::new()
            }
        };

        let instruction = build_system_instruction(&sources);
        let reply = match self
            .generator
            .generate(&instruction, query, GENERATION_TEMPERATURE)
            .await
        {
            Ok(text) => text,
            Err(e) => {
                eprintln!("[chat] generation failed: {e}");
                APOLOGY_MESSAGE.to_string()
            }
        };

        ChatReply { reply, sources }
    }
}

fn build_system_instruction(context: &[SearchResult]) -> String {
    let context_text = format_context(context);
    format!(
        "You are an expert legal assistant specializing in Pakistan Law.\n\
         Your goal is to answer the user's question accurately using ONLY the provided context snippets below.\n\
         \n\
         ---\n\
         CONTEXT:\n\
         {context_text}\n\
         ---\n\
         \n\
         INSTRUCTIONS:\n\
         1. If the answer is found in the CONTEXT, provide a detailed, professional legal explanation.\n\
         2. Cite the specific articles, sections, or source names provided in the context (e.g., \"According to Article 1...\").\n\
         3. If the answer is NOT in the CONTEXT, politely state that you do not have that information in your current database. Do not hallucinate or use outside knowledge.\n\
         4. Maintain a formal, authoritative tone suitable for legal counsel.\n\
         5. Format your response with clear Markdown headings and bullet points where appropriate.\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RetrievalConfig;
    use crate::error::{AppError, AppResult};
    use crate::providers::EmbeddingProvider;
    use crate::rag::DocumentInput;
    use async_trait::async_trait;

    struct StubEmbedder {
        fail_queries: bool,
    }

    #[async_trait]
    impl EmbeddingProvider for StubEmbedder {
        async fn embed(&self, text: &str) -> AppResult<Vec<f32>> {
            if self.fail_queries && text.starts_with("query:") {
                return Err(AppError::Provider("stubbed embedding outage".into()));
            }
            Ok(vec![1.0, 0.0])
        }
    }

    struct StubGenerator {
        fail: bool,
    }

    #[async_trait]
    impl GenerationProvider for StubGenerator {
        async fn generate(
            &self,
            system_instruction: &str,
            _user_query: &str,
            temperature: f32,
        ) -> AppResult<String> {
            if self.fail {
                return Err(AppError::Provider("stubbed generation outage".into()));
            }
            assert_eq!(temperature, 0.3);
            Ok(format!("answered with {} bytes of instruction", system_instruction.len()))
        }
    }

    fn assistant(fail_queries: bool, fail_generation: bool) -> (Assistant, Arc<Retriever>) {
        let retriever = Arc::new(Retriever::new(
            Arc::new(StubEmbedder { fail_queries }),
            RetrievalConfig::default(),
        ));
        let generator = Arc::new(StubGenerator {
            fail: fail_generation,
        });
        (Assistant::new(retriever.clone(), generator), retriever)
    }

    fn seed_doc() -> DocumentInput {
        DocumentInput {
            title: "Article 1".to_string(),
            content: "Pakistan shall be a Federal Republic to be known as the Islamic Republic of Pakistan.".to_string(),
        }
    }

    #[tokio::test]
    async fn test_answer_attaches_sources() {
        let (assistant, retriever) = assistant(false, false);
        retriever.ingest(&[seed_doc()]).await;

        let reply = assistant.answer("query: what is pakistan").await;
        assert!(!reply.sources.is_empty());
        assert_eq!(reply.sources[0].source, "Article 1");
        assert!(reply.reply.starts_with("answered"));
    }

    #[tokio::test]
    async fn test_generation_failure_returns_apology() {
        let (assistant, retriever) = assistant(false, true);
        retriever.ingest(&[seed_doc()]).await;

        let reply = assistant.answer("query: anything").await;
        assert_eq!(reply.reply, APOLOGY_MESSAGE);
    }

    #[tokio::test]
    async fn test_retrieval_failure_degrades_to_ungrounded_answer() {
        let (assistant, retriever) = assistant(true, false);
        retriever.ingest(&[seed_doc()]).await;

        let reply = assistant.answer("query: anything").await;
        assert!(reply.sources.is_empty());
        assert!(reply.reply.starts_with("answered"));
    }

    #[tokio::test]
    async fn test_empty_index_still_answers() {
        let (assistant, _retriever) = assistant(false, false);
        let reply = assistant.answer("query: anything").await;
        assert!(reply.sources.is_empty());
        assert!(reply.reply.starts_with("answered"));
    }

    #[test]
    fn test_system_instruction_embeds_context_blocks() {
        let results = vec![SearchResult {
            id: "Article 1-0-0".to_string(),
            text: "The territories of Pakistan shall comprise the Provinces.".to_string(),
            source: "Article 1".to_string(),
            similarity: 0.9,
        }];
        let instruction = build_system_instruction(&results);
        assert!(instruction.contains("[Source: Article 1]"));
        assert!(instruction.contains("The territories of Pakistan shall comprise the Provinces."));
        assert!(instruction.contains("ONLY the provided context"));
    }
}
