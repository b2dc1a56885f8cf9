use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::config::RetrievalConfig;
use crate::error::AppResult;
use crate::providers::EmbeddingProvider;
use crate::rag::chunker::Chunker;
use crate::rag::index::{Chunk, IndexStats, SearchResult, VectorIndex};

/// Ingest input shape handed over by the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentInput {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestOutcome {
    pub chunks_indexed: usize,
    pub chunks_skipped: usize,
}

/// Coordinates the ingest path (chunk, embed, insert) and the query path
/// (embed, search). The index has single-writer discipline: only `ingest`
/// mutates it, and embedding calls happen outside the write lock.
pub struct Retriever {
    index: RwLock<VectorIndex>,
    embedder: Arc<dyn EmbeddingProvider>,
    chunker: Chunker,
    config: RetrievalConfig,
}

impl Retriever {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, config: RetrievalConfig) -> Self {
        Self {
            index: RwLock::new(VectorIndex::default()),
            embedder,
            chunker: Chunker::new(config.min_chunk_chars),
            config,
        }
    }

    /// Chunks and embeds every document sequentially. A span whose embedding
    /// fails is logged and skipped; one bad chunk never aborts the batch.
    pub async fn ingest(&self, documents: &[DocumentInput]) -> IngestOutcome {
        let mut outcome = IngestOutcome::default();
        for doc in documents {
            for (seq, text) in self.chunker.chunk(&doc.content).into_iter().enumerate() {
                match self.embedder.embed(&text).await {
                    Ok(embedding) => {
                        let chunk = Chunk {
                            id: format!("{}-{}-{}", doc.title, seq, Utc::now().timestamp_millis()),
                            text,
                            source: doc.title.clone(),
                            embedding,
                        };
                        self.index.write().await.insert(chunk);
                        outcome.chunks_indexed += 1;
                    }
                    Err(e) => {
                        eprintln!("[ingest] failed to embed chunk {seq} of '{}': {e}", doc.title);
                        outcome.chunks_skipped += 1;
                    }
                }
            }
        }
        outcome
    }

    /// Embeds the query and runs the similarity search. An empty index
    /// short-circuits to an empty result without an embedding round trip.
    /// A failed query embedding propagates; callers decide how to degrade.
    pub async fn retrieve(&self, query: &str, top_k: usize) -> AppResult<Vec<SearchResult>> {
        if self.index.read().await.is_empty() {
            return Ok(Vec::new());
        }
        let query_embedding = self.embedder.embed(query).await?;
        let index = self.index.read().await;
        Ok(index.search(&query_embedding, top_k, self.config.similarity_threshold))
    }

    pub fn top_k(&self) -> usize {
        self.config.top_k
    }

    pub async fn stats(&self) -> IndexStats {
        self.index.read().await.stats()
    }
}
