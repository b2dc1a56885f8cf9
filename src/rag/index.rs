use std::cmp::Ordering;
use std::collections::HashSet;

use serde::Serialize;

/// A stored unit of retrievable text: the literal span, the title of the
/// document it came from, and its embedding. Immutable once inserted.
#[derive(Debug, Clone)]
pub struct Chunk {
    pub id: String,
    pub text: String,
    pub source: String,
    pub embedding: Vec<f32>,
}

/// A chunk scored against one query. Exists only on the query path.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: String,
    pub text: String,
    pub source: String,
    pub similarity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStats {
    pub total_chunks: usize,
    /// Count of distinct source titles among stored chunks.
    pub documents: usize,
}

/// Cosine similarity between two equal-length vectors:
/// `dot(a,b) / (||a|| * ||b||)`.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(
        a.len(),
        b.len(),
        "embedding dimension mismatch: {} vs {}",
        a.len(),
        b.len()
    );
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for i in 0..a.len() {
        dot += a[i] * b[i];
        norm_a += a[i] * a[i];
        norm_b += b[i] * b[i];
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Append-only in-memory store over chunks with exhaustive similarity
/// search. The corpus is assumed small (tens to low thousands of chunks),
/// so every query is a full linear scan.
#[derive(Default)]
pub struct VectorIndex {
    chunks: Vec<Chunk>,
}

impl VectorIndex {
    /// Appends a fully-formed chunk. No deduplication: repeated content
    /// produces independent chunks. All stored embeddings must share one
    /// dimensionality; a mismatch is a programming error upstream.
    pub fn insert(&mut self, chunk: Chunk) {
        if let Some(first) = self.chunks.first() {
            assert_eq!(
                first.embedding.len(),
                chunk.embedding.len(),
                "embedding dimension mismatch: index has {}, chunk has {}",
                first.embedding.len(),
                chunk.embedding.len()
            );
        }
        self.chunks.push(chunk);
    }

    /// Scores every chunk against `query`, sorts descending (stable, so
    /// exact ties keep insertion order), drops results at or below
    /// `threshold`, and returns at most `top_k`.
    pub fn search(&self, query: &[f32], top_k: usize, threshold: f32) -> Vec<SearchResult> {
        if self.chunks.is_empty() {
            return Vec::new();
        }

        let mut results: Vec<SearchResult> = self
            .chunks
            .iter()
            .map(|chunk| SearchResult {
                id: chunk.id.clone(),
                text: chunk.text.clone(),
                source: chunk.source.clone(),
                similarity: cosine_similarity(query, &chunk.embedding),
            })
            .collect();

        results.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
        });
        results.retain(|r| r.similarity > threshold);
        results.truncate(top_k);
        results
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Computed on demand; the distinct-source count is not maintained
    /// incrementally.
    pub fn stats(&self) -> IndexStats {
        let documents = self
            .chunks
            .iter()
            .map(|c| c.source.as_str())
            .collect::<HashSet<_>>()
            .len();
        IndexStats {
            total_chunks: self.chunks.len(),
            documents,
        }
    }
}
