//! Error types for statement text extraction.

use thiserror::Error;

/// Fatal failures of the PDF-to-text step. Anything past this step degrades
/// to skipped lines instead of an error.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Failed to open/parse the PDF.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// The PDF is encrypted and cannot be read.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// The document loaded but its text could not be extracted.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),
}
