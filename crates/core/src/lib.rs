//! Domain types and pure functions shared by the summarizer server and
//! client.
//!
//! Nothing in this crate performs I/O. The API crate drives chunking and
//! summarization on background tasks, and the client crate uses the wire
//! types and markup sanitization when rendering results.

pub mod chunking;
pub mod download;
pub mod error;
pub mod extract;
pub mod markup;
pub mod progress;
pub mod summarize;
pub mod types;
