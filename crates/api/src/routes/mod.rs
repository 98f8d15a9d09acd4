//! HTTP routes.
//!
//! ```text
//! GET  /health                       service health
//! POST /start_summarization          start a job (multipart: file | text)
//! GET  /progress/{session_id}        poll job progress
//! POST /download                     render a finished summary (form: summary, filetype)
//! ```

pub mod download;
pub mod health;
pub mod summarize;
