use std::sync::Arc;

use axum::extract::State;
use axum::response::{IntoResponse, Json};
use axum::routing::{get, post};
use axum::Router;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::assistant::Assistant;
use crate::corpus::initial_legal_documents;
use crate::error::{AppError, AppResult};
use crate::rag::{DocumentInput, IndexStats, IngestOutcome, Retriever, SearchResult};

/// Shared state for the HTTP API.
#[derive(Clone)]
pub struct AppState {
    pub assistant: Arc<Assistant>,
    pub retriever: Arc<Retriever>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/chat", post(chat_handler))
        .route("/documents", post(add_documents_handler))
        .route("/documents/seed", post(seed_documents_handler))
        .route("/stats", get(stats_handler))
        .with_state(state)
}

async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub id: String,
    pub reply: String,
    pub sources: Vec<SearchResult>,
    pub timestamp: String,
}

async fn chat_handler(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err(AppError::Validation("message must not be empty".into()));
    }

    eprintln!("[chat] query received ({} chars)", message.chars().count());
    let reply = state.assistant.answer(message).await;

    Ok(Json(ChatResponse {
        id: Uuid::new_v4().to_string(),
        reply: reply.reply,
        sources: reply.sources,
        timestamp: now_iso(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct AddDocumentsRequest {
    pub documents: Vec<DocumentInput>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddDocumentsResponse {
    pub outcome: IngestOutcome,
    pub stats: IndexStats,
}

async fn add_documents_handler(
    State(state): State<AppState>,
    Json(request): Json<AddDocumentsRequest>,
) -> AppResult<Json<AddDocumentsResponse>> {
    validate_documents(&request.documents)?;
    ingest_documents(&state, &request.documents).await
}

async fn seed_documents_handler(
    State(state): State<AppState>,
) -> AppResult<Json<AddDocumentsResponse>> {
    let documents = initial_legal_documents();
    ingest_documents(&state, &documents).await
}

async fn ingest_documents(
    state: &AppState,
    documents: &[DocumentInput],
) -> AppResult<Json<AddDocumentsResponse>> {
    eprintln!("[ingest] indexing {} document(s)", documents.len());
    let outcome = state.retriever.ingest(documents).await;
    let stats = state.retriever.stats().await;
    eprintln!(
        "[ingest] indexed {} chunk(s), skipped {}, corpus now {} chunk(s) across {} document(s)",
        outcome.chunks_indexed, outcome.chunks_skipped, stats.total_chunks, stats.documents
    );
    Ok(Json(AddDocumentsResponse { outcome, stats }))
}

async fn stats_handler(State(state): State<AppState>) -> Json<IndexStats> {
    Json(state.retriever.stats().await)
}

fn validate_documents(documents: &[DocumentInput]) -> AppResult<()> {
    if documents.is_empty() {
        return Err(AppError::Validation("documents must not be empty".into()));
    }
    for doc in documents {
        if doc.title.trim().is_empty() || doc.content.trim().is_empty() {
            return Err(AppError::Validation(
                "each document needs a non-empty title and content".into(),
            ));
        }
    }
    Ok(())
}

fn now_iso() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Binds the API on localhost and serves until the process exits.
pub async fn start_server(state: AppState, port: u16) -> AppResult<()> {
    let router = build_router(state);
    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], port));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to bind on port {port}: {e}")))?;

    eprintln!("[server] listening on http://{addr}");
    axum::serve(listener, router)
        .await
        .map_err(|e| AppError::Internal(format!("Server error: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(title: &str, content: &str) -> DocumentInput {
        DocumentInput {
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_validate_rejects_empty_batch() {
        assert!(validate_documents(&[]).is_err());
    }

    #[test]
    fn test_validate_rejects_blank_title() {
        assert!(validate_documents(&[doc("   ", "some content")]).is_err());
    }

    #[test]
    fn test_validate_rejects_blank_content() {
        assert!(validate_documents(&[doc("Contract Act 1872", "  \n ")]).is_err());
    }

    #[test]
    fn test_validate_accepts_wellformed_batch() {
        let docs = vec![
            doc("Contract Act 1872", "Agreements and their enforcement."),
            doc("Article 1", "Pakistan shall be a Federal Republic."),
        ];
        assert!(validate_documents(&docs).is_ok());
    }

    #[test]
    fn test_now_iso_shape() {
        let ts = now_iso();
        assert_eq!(ts.len(), 20);
        assert!(ts.ends_with('Z'));
    }
}
