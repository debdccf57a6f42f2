//! passbook-ingest: bank statement text extraction (variant detection,
//! bank-specific grammars with a generic fallback, field normalization and
//! the validity gate).

pub mod detect;
pub mod engine;
pub mod error;
pub mod metadata;
pub mod normalize;
pub mod parsers;
pub mod pdf;
pub mod pipeline;
pub mod types;

pub use detect::detect_variant;
pub use engine::{
    extract_transactions, parse_text, parse_text_with_skipped, ParseContext, StatementParser,
};
pub use error::ExtractError;
pub use parsers::{grammar_for, BankGrammar, FallbackGrammar, Grammar};
pub use pdf::{ExtractedText, PdfExtractText, TextExtractor};
pub use types::{Attempt, Candidate, Extraction, SkipReason, Skipped};
