//! passbook-core: statement transaction types and deterministic classification

pub mod classify;
pub mod statement;
pub mod transaction;

pub use classify::{categorize, classify, transaction_type, Classification, CATEGORY_RULES};
pub use statement::{
    AccountInfo, BankVariant, ExtractionPass, ParseMetadata, ParseResult, ParsedStatement,
    StatementPeriod,
};
pub use transaction::{Category, Transaction, TransactionType};
