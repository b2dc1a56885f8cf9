use crate::rag::index::SearchResult;

/// Renders retrieved snippets as `[Source: <title>]` blocks joined by blank
/// lines, the shape the generation prompt embeds verbatim.
pub fn format_context(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|r| format!("[Source: {}]\n{}", r.source, r.text))
        .collect::<Vec<_>>()
        .join("\n\n")
}
