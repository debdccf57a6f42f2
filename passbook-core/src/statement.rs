//! Statement-level types: bank variant, account metadata and the parse result.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::transaction::Transaction;

/// Statement layout family, selected by header detection
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum BankVariant {
    Generic,
    Chase,
    BankOfAmerica,
    WellsFargo,
    Citibank,
}

impl BankVariant {
    /// Bank-specific variants in detection priority order (generic excluded)
    pub const DETECTION_ORDER: [BankVariant; 4] = [
        BankVariant::Chase,
        BankVariant::BankOfAmerica,
        BankVariant::WellsFargo,
        BankVariant::Citibank,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BankVariant::Generic => "generic",
            BankVariant::Chase => "chase",
            BankVariant::BankOfAmerica => "bankOfAmerica",
            BankVariant::WellsFargo => "wellsFargo",
            BankVariant::Citibank => "citibank",
        }
    }
}

impl fmt::Display for BankVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account metadata scraped from the statement; every field is optional
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number_masked: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_holder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_balance: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closing_balance: Option<Decimal>,
}

impl AccountInfo {
    pub fn is_empty(&self) -> bool {
        self.account_number_masked.is_none()
            && self.account_holder.is_none()
            && self.opening_balance.is_none()
            && self.closing_balance.is_none()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatementPeriod {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// Which extraction pass produced the transactions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ExtractionPass {
    /// The detected bank grammar matched at least one line
    Primary,
    /// No grammar line matched; the generic line heuristic ran instead
    Fallback,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParseMetadata {
    pub page_count: u32,
    pub parsed_at: DateTime<Utc>,
    pub extraction_pass: ExtractionPass,
    /// Candidate lines dropped because a field failed to parse
    pub skipped_candidates: usize,
}

/// Successful parse payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParsedStatement {
    pub bank_variant: BankVariant,
    pub account_info: AccountInfo,
    /// Chronological; same-date transactions keep statement order
    pub transactions: Vec<Transaction>,
    pub total_transactions: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statement_period: Option<StatementPeriod>,
    pub metadata: ParseMetadata,
}

/// Outcome of parsing one statement.
///
/// `success` is false only when text extraction itself failed; malformed
/// statement content degrades to fewer (or zero) transactions instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParseResult {
    pub success: bool,
    #[serde(flatten)]
    pub statement: Option<ParsedStatement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ParseResult {
    pub fn parsed(statement: ParsedStatement) -> Self {
        Self {
            success: true,
            statement: Some(statement),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            statement: None,
            error: Some(error.into()),
        }
    }

    /// Transactions of a successful parse; empty on failure
    pub fn transactions(&self) -> &[Transaction] {
        self.statement
            .as_ref()
            .map(|s| s.transactions.as_slice())
            .unwrap_or(&[])
    }

    pub fn bank_variant(&self) -> Option<BankVariant> {
        self.statement.as_ref().map(|s| s.bank_variant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_statement() -> ParsedStatement {
        ParsedStatement {
            bank_variant: BankVariant::BankOfAmerica,
            account_info: AccountInfo::default(),
            transactions: Vec::new(),
            total_transactions: 0,
            statement_period: None,
            metadata: ParseMetadata {
                page_count: 2,
                parsed_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
                extraction_pass: ExtractionPass::Primary,
                skipped_candidates: 0,
            },
        }
    }

    #[test]
    fn test_success_flattens_statement() {
        let json = serde_json::to_value(ParseResult::parsed(sample_statement())).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["bankVariant"], "bankOfAmerica");
        assert_eq!(json["totalTransactions"], 0);
        assert_eq!(json["metadata"]["pageCount"], 2);
        assert_eq!(json["metadata"]["extractionPass"], "primary");
        assert!(json.get("error").is_none());
        assert!(json.get("statementPeriod").is_none());
    }

    #[test]
    fn test_failure_has_only_flag_and_error() {
        let result = ParseResult::failed("PDF is encrypted");
        assert!(result.transactions().is_empty());
        assert_eq!(result.bank_variant(), None);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json, serde_json::json!({"success": false, "error": "PDF is encrypted"}));
    }

    #[test]
    fn test_variant_names() {
        assert_eq!(BankVariant::WellsFargo.to_string(), "wellsFargo");
        let json = serde_json::to_value(BankVariant::Generic).unwrap();
        assert_eq!(json, "generic");
    }
}
