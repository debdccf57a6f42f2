use chrono::NaiveDate;
use passbook_core::Transaction;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A tentatively parsed row, not yet through the validity gate
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// 1-based line number in the extracted text
    pub line: usize,
    pub date: Option<NaiveDate>,
    /// Already cleaned; may be empty
    pub description: String,
    pub amount: Option<Decimal>,
    pub balance: Option<Decimal>,
}

/// Why a line did not become a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Page markers, column headers, summary rows
    Boilerplate,
    NoDate,
    NoAmount,
    UnparseableDate,
    UnparseableAmount,
    /// The first date sits at or after the first amount
    DateAfterAmount,
    EmptyDescription,
}

impl SkipReason {
    /// The line looked like a transaction but one of its fields was unusable
    pub fn is_field_failure(&self) -> bool {
        !matches!(
            self,
            SkipReason::Boilerplate | SkipReason::NoDate | SkipReason::NoAmount
        )
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SkipReason::Boilerplate => "boilerplate line",
            SkipReason::NoDate => "no date",
            SkipReason::NoAmount => "no amount",
            SkipReason::UnparseableDate => "unparseable date",
            SkipReason::UnparseableAmount => "unparseable amount",
            SkipReason::DateAfterAmount => "date after amount",
            SkipReason::EmptyDescription => "empty description",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skipped {
    pub line: usize,
    pub reason: SkipReason,
}

impl Skipped {
    pub fn new(line: usize, reason: SkipReason) -> Self {
        Self { line, reason }
    }
}

/// One grammar attempt on one line
pub type Attempt = Result<Candidate, Skipped>;

/// Transactions that passed the validity gate plus everything that didn't
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub transactions: Vec<Transaction>,
    pub skipped: Vec<Skipped>,
}

impl Extraction {
    pub fn skipped_for(&self, reason: SkipReason) -> usize {
        self.skipped.iter().filter(|s| s.reason == reason).count()
    }
}
