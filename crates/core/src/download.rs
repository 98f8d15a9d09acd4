//! Rendering a finished summary as a downloadable file.

use std::io::Cursor;

use docx_rs::{Docx, Paragraph, Run};
use printpdf::{BuiltinFont, Mm, PdfDocument};

use crate::error::CoreError;

/// US Letter, in millimetres.
const PAGE_WIDTH: f32 = 215.9;
const PAGE_HEIGHT: f32 = 279.4;
const LEFT_MARGIN: f32 = 14.1;
const TOP_LINE: f32 = 264.6;
const BOTTOM_MARGIN: f32 = 14.1;
const FONT_SIZE: f32 = 12.0;
const LINE_HEIGHT: f32 = 5.0;

/// Output formats accepted by the download endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadFormat {
    Txt,
    Pdf,
    Docx,
}

impl DownloadFormat {
    /// Parse the `filetype` form value.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "txt" => Ok(Self::Txt),
            "pdf" => Ok(Self::Pdf),
            "docx" => Ok(Self::Docx),
            _ => Err(CoreError::Unsupported("Unsupported file type.".to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Txt => "txt",
            Self::Pdf => "pdf",
            Self::Docx => "docx",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Self::Txt => "summary.txt",
            Self::Pdf => "summary.pdf",
            Self::Docx => "summary.docx",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Txt => "text/plain; charset=utf-8",
            Self::Pdf => "application/pdf",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

/// A rendered attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: &'static str,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Render `summary` in the requested format.
///
/// An empty summary is rejected; there is nothing to download.
pub fn render(summary: &str, format: DownloadFormat) -> Result<Attachment, CoreError> {
    if summary.is_empty() {
        return Err(CoreError::Validation("No summary to download.".to_string()));
    }
    let bytes = match format {
        DownloadFormat::Txt => summary.as_bytes().to_vec(),
        DownloadFormat::Pdf => render_pdf(summary)?,
        DownloadFormat::Docx => render_docx(summary)?,
    };
    Ok(Attachment {
        file_name: format.file_name(),
        content_type: format.content_type(),
        bytes,
    })
}

/// One text line per summary line, flowing onto new pages as needed.
fn render_pdf(summary: &str) -> Result<Vec<u8>, CoreError> {
    let (doc, page, layer) =
        PdfDocument::new("Summary", Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| CoreError::Internal(format!("PDF font: {e}")))?;

    let mut current = doc.get_page(page).get_layer(layer);
    let mut y = TOP_LINE;
    for line in summary.split('\n') {
        if y < BOTTOM_MARGIN {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            current = doc.get_page(page).get_layer(layer);
            y = TOP_LINE;
        }
        current.use_text(line, FONT_SIZE, Mm(LEFT_MARGIN), Mm(y), &font);
        y -= LINE_HEIGHT;
    }

    doc.save_to_bytes()
        .map_err(|e| CoreError::Internal(format!("PDF render: {e}")))
}

/// The whole summary as a single paragraph.
fn render_docx(summary: &str) -> Result<Vec<u8>, CoreError> {
    let mut buf = Cursor::new(Vec::new());
    Docx::new()
        .add_paragraph(Paragraph::new().add_run(Run::new().add_text(summary)))
        .build()
        .pack(&mut buf)
        .map_err(|e| CoreError::Internal(format!("DOCX render: {e}")))?;
    Ok(buf.into_inner())
}

/// Render `summary` for a raw `filetype` form value.
///
/// The summary is checked before the format, so an empty summary is
/// reported as such whatever format was asked for.
pub fn render_named(summary: &str, filetype: &str) -> Result<Attachment, CoreError> {
    if summary.is_empty() {
        return Err(CoreError::Validation("No summary to download.".to_string()));
    }
    render(summary, DownloadFormat::parse(filetype)?)
}
