//! Word-based text chunking for the summarization job.

/// Default chunk size in whitespace-separated words.
pub const DEFAULT_CHUNK_WORDS: usize = 50;

/// Split `text` into chunks of at most `max_words` words, rejoined with
/// single spaces.
///
/// Whitespace runs (including newlines) collapse. The last chunk holds
/// the remainder. A `max_words` of zero is treated as one.
pub fn chunk_text(text: &str, max_words: usize) -> Vec<String> {
    let max_words = max_words.max(1);
    let words: Vec<&str> = text.split_whitespace().collect();
    words.chunks(max_words).map(|c| c.join(" ")).collect()
}
