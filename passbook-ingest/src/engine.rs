//! Statement parsing entry points.
//!
//! Text flows: detect variant → bank grammar → (no matches) fallback
//! heuristic → validity gate → [`ParseResult`]. Only the PDF-to-text step can
//! fail the whole parse.

use chrono::{DateTime, Datelike, Local, Utc};
use passbook_core::{BankVariant, ExtractionPass, ParseMetadata, ParseResult, ParsedStatement};
use std::fmt;
use std::sync::OnceLock;
use tracing::{debug, info, warn};

use crate::detect::detect_variant;
use crate::error::ExtractError;
use crate::metadata::{extract_account_info, extract_statement_period};
use crate::parsers::{grammar_for, FallbackGrammar, Grammar};
use crate::pdf::{ExtractedText, PdfExtractText, TextExtractor};
use crate::pipeline::finalize;
use crate::types::{Extraction, Skipped};

/// Clock inputs of a parse. Fixing them makes parsing fully deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseContext {
    pub parsed_at: DateTime<Utc>,
    /// Year given to dates printed without one
    pub default_year: i32,
}

impl ParseContext {
    /// Current instant; short dates resolve to the current local calendar year
    pub fn now() -> Self {
        Self {
            parsed_at: Utc::now(),
            default_year: Local::now().year(),
        }
    }

    pub fn at(parsed_at: DateTime<Utc>) -> Self {
        Self {
            parsed_at,
            default_year: parsed_at.year(),
        }
    }

    pub fn with_default_year(mut self, year: i32) -> Self {
        self.default_year = year;
        self
    }
}

/// Run the variant's grammar, falling back to the line heuristic only when
/// the grammar matched no line at all.
pub fn extract_transactions(
    text: &str,
    variant: BankVariant,
    default_year: i32,
) -> (ExtractionPass, Extraction) {
    let grammar = grammar_for(variant);
    let primary = grammar.try_extract(text, default_year);
    if !primary.is_empty() {
        return (ExtractionPass::Primary, finalize(primary));
    }

    debug!(
        grammar = grammar.name(),
        fallback = FallbackGrammar.name(),
        "no grammar rows matched"
    );
    let fallback = FallbackGrammar.try_extract(text, default_year);
    (ExtractionPass::Fallback, finalize(fallback))
}

/// Parse already-extracted statement text. Never fails.
pub fn parse_text(text: &str, page_count: u32, ctx: &ParseContext) -> ParseResult {
    parse_text_with_skipped(text, page_count, ctx).0
}

/// [`parse_text`] plus every line the run dropped, in source order
pub fn parse_text_with_skipped(
    text: &str,
    page_count: u32,
    ctx: &ParseContext,
) -> (ParseResult, Vec<Skipped>) {
    let bank_variant = detect_variant(text);
    let (extraction_pass, extraction) = extract_transactions(text, bank_variant, ctx.default_year);
    let Extraction {
        transactions,
        skipped,
    } = extraction;

    let skipped_candidates = skipped.iter().filter(|s| s.reason.is_field_failure()).count();

    info!(
        variant = %bank_variant,
        pass = ?extraction_pass,
        transactions = transactions.len(),
        skipped = skipped_candidates,
        "parsed statement"
    );

    let result = ParseResult::parsed(ParsedStatement {
        bank_variant,
        account_info: extract_account_info(text),
        total_transactions: transactions.len(),
        transactions,
        statement_period: extract_statement_period(text, ctx.default_year),
        metadata: ParseMetadata {
            page_count,
            parsed_at: ctx.parsed_at,
            extraction_pass,
            skipped_candidates,
        },
    });
    (result, skipped)
}

type ExtractorInit = Box<dyn Fn() -> Box<dyn TextExtractor> + Send + Sync>;

/// PDF statement parser.
///
/// The text extractor is built by the injected factory on first use, exactly
/// once even under concurrent callers, then shared read-only.
pub struct StatementParser {
    init: ExtractorInit,
    extractor: OnceLock<Box<dyn TextExtractor>>,
}

impl StatementParser {
    pub fn new<F, E>(init: F) -> Self
    where
        F: Fn() -> E + Send + Sync + 'static,
        E: TextExtractor + 'static,
    {
        Self {
            init: Box::new(move || Box::new(init()) as Box<dyn TextExtractor>),
            extractor: OnceLock::new(),
        }
    }

    fn extractor(&self) -> &dyn TextExtractor {
        self.extractor
            .get_or_init(|| {
                debug!("initializing text extractor");
                (self.init)()
            })
            .as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.extractor.get().is_some()
    }

    pub fn parse(&self, pdf: &[u8]) -> ParseResult {
        self.parse_at(pdf, &ParseContext::now())
    }

    /// Text and page count through the shared extractor
    pub fn extract_text(&self, pdf: &[u8]) -> Result<ExtractedText, ExtractError> {
        self.extractor().extract(pdf)
    }

    pub fn parse_at(&self, pdf: &[u8], ctx: &ParseContext) -> ParseResult {
        match self.extract_text(pdf) {
            Ok(extracted) => parse_text(&extracted.text, extracted.page_count, ctx),
            Err(err) => {
                warn!(error = %err, bytes = pdf.len(), "statement text extraction failed");
                ParseResult::failed(err.to_string())
            }
        }
    }
}

impl Default for StatementParser {
    fn default() -> Self {
        Self::new(PdfExtractText::default)
    }
}

impl fmt::Debug for StatementParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatementParser")
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use crate::types::SkipReason;

    fn ctx() -> ParseContext {
        ParseContext::at(Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap())
    }

    #[test]
    fn test_context_year_follows_instant() {
        assert_eq!(ctx().default_year, 2024);
        assert_eq!(ctx().with_default_year(2019).default_year, 2019);
    }

    #[test]
    fn test_primary_pass_wins_when_anything_matches() {
        // the bad date row still counts as a grammar match, so no fallback
        let text = "13/45 BROKEN ROW 1.00\nsome 02/02 loose 3.00 line";
        let (pass, extraction) = extract_transactions(text, BankVariant::Generic, 2024);
        assert_eq!(pass, ExtractionPass::Primary);
        assert!(extraction.transactions.is_empty());
        assert_eq!(extraction.skipped_for(SkipReason::UnparseableDate), 1);
    }

    #[test]
    fn test_fallback_when_grammar_matches_nothing() {
        let text = "Posted on 02/02/2024: COFFEE 3.00 (card)";
        let (pass, extraction) = extract_transactions(text, BankVariant::Chase, 2024);
        assert_eq!(pass, ExtractionPass::Fallback);
        assert_eq!(extraction.transactions.len(), 1);
        assert_eq!(extraction.transactions[0].description, "COFFEE");
    }

    #[test]
    fn test_parse_text_counts_only_field_failures() {
        let text = "Statement of account\nsome heading\nref 02/02 ** 3.00\nref 02/03 TEA 2.00";
        let result = parse_text(text, 1, &ctx());
        let statement = result.statement.as_ref().unwrap();
        assert_eq!(statement.metadata.extraction_pass, ExtractionPass::Fallback);
        assert_eq!(statement.total_transactions, 1);
        // boilerplate and dateless lines are not counted, the empty description is
        assert_eq!(statement.metadata.skipped_candidates, 1);
        assert_eq!(statement.transactions[0].description, "TEA");
    }

    #[test]
    fn test_skip_records_come_from_the_same_run() {
        let text = "Statement of account\nsome heading\nref 02/02 ** 3.00\nref 02/03 TEA 2.00";
        let (result, skipped) = parse_text_with_skipped(text, 1, &ctx());
        assert_eq!(result, parse_text(text, 1, &ctx()));
        assert_eq!(
            skipped,
            vec![
                Skipped::new(1, SkipReason::Boilerplate),
                Skipped::new(2, SkipReason::NoDate),
                Skipped::new(3, SkipReason::EmptyDescription),
            ]
        );
    }
}
