//! Text extraction from uploaded documents.

use docx_rs::{DocumentChild, ParagraphChild, RunChild};

use crate::error::CoreError;

/// Document kinds recognised by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Text,
    Pdf,
    Docx,
    Other,
}

impl DocumentKind {
    /// Classify by the (case-insensitive) extension of `filename`.
    pub fn from_filename(filename: &str) -> Self {
        let lower = filename.to_lowercase();
        if lower.ends_with(".txt") {
            Self::Text
        } else if lower.ends_with(".pdf") {
            Self::Pdf
        } else if lower.ends_with(".docx") {
            Self::Docx
        } else {
            Self::Other
        }
    }
}

/// Extract plain text from an uploaded file.
///
/// `.txt` is decoded as UTF-8, replacing invalid sequences. Unrecognised
/// extensions yield empty text so the caller reports "no text". A PDF or
/// DOCX that cannot be parsed is a validation error.
pub fn extract_text(filename: &str, bytes: &[u8]) -> Result<String, CoreError> {
    match DocumentKind::from_filename(filename) {
        DocumentKind::Text => Ok(String::from_utf8_lossy(bytes).into_owned()),
        DocumentKind::Pdf => extract_pdf(bytes),
        DocumentKind::Docx => extract_docx(bytes),
        DocumentKind::Other => Ok(String::new()),
    }
}

fn extract_pdf(bytes: &[u8]) -> Result<String, CoreError> {
    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| CoreError::Validation(format!("Could not read PDF document: {e}")))
}

/// Paragraph texts of a DOCX body, joined by spaces.
fn extract_docx(bytes: &[u8]) -> Result<String, CoreError> {
    let docx = docx_rs::read_docx(bytes)
        .map_err(|e| CoreError::Validation(format!("Could not read DOCX document: {e}")))?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(p) => Some(p),
            _ => None,
        })
        .map(|p| {
            p.children
                .iter()
                .filter_map(|child| match child {
                    ParagraphChild::Run(run) => Some(run),
                    _ => None,
                })
                .flat_map(|run| run.children.iter())
                .filter_map(|child| match child {
                    RunChild::Text(t) => Some(t.text.as_str()),
                    _ => None,
                })
                .collect::<String>()
        })
        .collect();

    Ok(paragraphs.join(" "))
}
