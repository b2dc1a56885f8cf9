pub mod chunker;
pub mod format;
pub mod index;
pub mod retriever;

pub use chunker::Chunker;
pub use format::format_context;
pub use index::{cosine_similarity, Chunk, IndexStats, SearchResult, VectorIndex};
pub use retriever::{DocumentInput, IngestOutcome, Retriever};
