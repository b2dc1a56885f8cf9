use regex::Regex;

/// Splits document text into paragraph-level spans suitable for independent
/// retrieval. Paragraph boundaries work well for legal prose; this is not a
/// general-purpose semantic segmenter.
pub struct Chunker {
    paragraph_break: Regex,
    min_chars: usize,
}

impl Default for Chunker {
    fn default() -> Self {
        Self::new(crate::config::RetrievalConfig::default().min_chunk_chars)
    }
}

impl Chunker {
    pub fn new(min_chars: usize) -> Self {
        Self {
            // One or more whitespace-only lines separate paragraphs.
            paragraph_break: Regex::new(r"\n\s*\n").expect("paragraph regex is valid"),
            min_chars,
        }
    }

    /// Trimmed paragraph spans of `content`. Spans shorter than the minimum
    /// length are dropped so headers and stray fragments do not pollute the
    /// vector space. A document with no qualifying spans yields an empty vec.
    pub fn chunk(&self, content: &str) -> Vec<String> {
        self.paragraph_break
            .split(content)
            .map(str::trim)
            .filter(|span| span.chars().count() >= self.min_chars)
            .map(str::to_string)
            .collect()
    }
}
