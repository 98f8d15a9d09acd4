//! Chunk summarizers.
//!
//! The server summarizes a document one chunk at a time so it can report
//! progress between chunks. [`Summarizer`] is the seam for plugging in a
//! model-backed implementation; [`LeadSummarizer`] is the built-in
//! extractive default.

use crate::error::CoreError;

/// Produces a short summary of one chunk of text.
pub trait Summarizer: Send + Sync {
    fn summarize(&self, chunk: &str) -> Result<String, CoreError>;
}

/// Extractive summarizer that keeps the lead sentence of each chunk.
///
/// The lead sentence is cut to `max_words`. A lead shorter than
/// `min_words` is padded with following words up to `min_words`.
#[derive(Debug, Clone, Copy)]
pub struct LeadSummarizer {
    pub min_words: usize,
    pub max_words: usize,
}

impl Default for LeadSummarizer {
    fn default() -> Self {
        Self {
            min_words: 5,
            max_words: 15,
        }
    }
}

fn ends_sentence(word: &str) -> bool {
    word.ends_with(['.', '!', '?'])
}

impl Summarizer for LeadSummarizer {
    fn summarize(&self, chunk: &str) -> Result<String, CoreError> {
        if self.min_words > self.max_words {
            return Err(CoreError::Validation(format!(
                "min_words ({}) exceeds max_words ({})",
                self.min_words, self.max_words
            )));
        }

        let words: Vec<&str> = chunk.split_whitespace().collect();
        let lead_len = words
            .iter()
            .position(|w| ends_sentence(w))
            .map_or(words.len(), |idx| idx + 1);

        let len = lead_len
            .max(self.min_words)
            .min(self.max_words)
            .min(words.len());

        Ok(words[..len].join(" "))
    }
}
