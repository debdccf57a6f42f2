//! Transaction types produced by statement parsing

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A normalized statement transaction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Posting date (zone-less)
    pub date: NaiveDate,
    /// Cleaned description, at most 100 characters
    pub description: String,
    /// Positive = money in, negative = money out. Always two fraction digits.
    pub amount: Decimal,
    /// Running balance printed next to the amount, if the statement has one
    pub balance: Option<Decimal>,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: Category,
}

impl Transaction {
    pub fn is_credit(&self) -> bool {
        self.kind == TransactionType::Credit
    }

    pub fn is_debit(&self) -> bool {
        self.kind == TransactionType::Debit
    }

    /// Get the absolute amount
    pub fn abs_amount(&self) -> Decimal {
        self.amount.abs()
    }
}

/// Direction of a transaction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TransactionType {
    #[serde(rename = "credit")]
    Credit,
    #[serde(rename = "debit")]
    Debit,
    #[serde(rename = "unknown")]
    Unknown,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Credit => "credit",
            TransactionType::Debit => "debit",
            TransactionType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed transaction taxonomy
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    #[serde(rename = "Banking Fees")]
    BankingFees,
    #[serde(rename = "ATM/Cash")]
    AtmCash,
    #[serde(rename = "Income")]
    Income,
    #[serde(rename = "Transfers")]
    Transfers,
    #[serde(rename = "Online Payment")]
    OnlinePayment,
    #[serde(rename = "Check")]
    Check,
    #[serde(rename = "Debit Card")]
    DebitCard,
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::BankingFees,
        Category::AtmCash,
        Category::Income,
        Category::Transfers,
        Category::OnlinePayment,
        Category::Check,
        Category::DebitCard,
        Category::Other,
    ];

    /// Display name, identical to the serialized form
    pub fn label(&self) -> &'static str {
        match self {
            Category::BankingFees => "Banking Fees",
            Category::AtmCash => "ATM/Cash",
            Category::Income => "Income",
            Category::Transfers => "Transfers",
            Category::OnlinePayment => "Online Payment",
            Category::Check => "Check",
            Category::DebitCard => "Debit Card",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
