//! PDF-to-text capability used by [`crate::StatementParser`].

use lopdf::Document;
use std::panic;
use tracing::debug;

use crate::error::ExtractError;

/// Linear text of a statement plus its page count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub text: String,
    pub page_count: u32,
}

/// Turns PDF bytes into text. Implementations are shared read-only across
/// threads once built.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, pdf: &[u8]) -> Result<ExtractedText, ExtractError>;
}

/// `lopdf` for structure checks, `pdf-extract` for the text itself
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractText;

impl TextExtractor for PdfExtractText {
    fn extract(&self, pdf: &[u8]) -> Result<ExtractedText, ExtractError> {
        let doc = Document::load_mem(pdf).map_err(|e| ExtractError::Parse(e.to_string()))?;
        if doc.is_encrypted() {
            return Err(ExtractError::Encrypted);
        }

        let page_count = doc.get_pages().len() as u32;
        if page_count == 0 {
            return Err(ExtractError::NoPages);
        }

        // pdf-extract panics on some malformed content streams
        let text = panic::catch_unwind(|| pdf_extract::extract_text_from_mem(pdf))
            .map_err(|_| ExtractError::TextExtraction("text extractor panicked".to_string()))?
            .map_err(|e| ExtractError::TextExtraction(e.to_string()))?;

        debug!(page_count, chars = text.len(), "extracted statement text");
        Ok(ExtractedText { text, page_count })
    }
}
