//! Deterministic keyword classification of transaction descriptions.
//!
//! Category rules are evaluated in order and the first match wins, so an
//! "ATM fee" lands in Banking Fees rather than ATM/Cash.

use regex::Regex;
use rust_decimal::Decimal;
use std::sync::OnceLock;

use crate::transaction::{Category, TransactionType};

/// Ordered (category, keyword pattern) rules, matched against the lower-cased
/// description. Patterns anchor on a word start so "deposit" never reads as "pos".
pub const CATEGORY_RULES: &[(Category, &str)] = &[
    (Category::BankingFees, r"\b(?:fee|charge)"),
    (Category::AtmCash, r"\b(?:atm|withdrawal)"),
    (Category::Income, r"\b(?:direct deposit|payroll|salary)"),
    (Category::Transfers, r"\b(?:transfer|tfr)"),
    (Category::OnlinePayment, r"\b(?:online|electronic|ach\b)"),
    (Category::Check, r"\b(?:check|chk)"),
    (Category::DebitCard, r"\b(?:debit|purchase|pos\b)"),
];

const CREDIT_KEYWORDS: &str = r"\b(?:deposit|credit)";
const DEBIT_KEYWORDS: &str = r"\b(?:withdrawal|debit|fee)";

/// Type and category assigned to one transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub kind: TransactionType,
    pub category: Category,
}

fn category_rules() -> &'static [(Category, Regex)] {
    static RULES: OnceLock<Vec<(Category, Regex)>> = OnceLock::new();
    RULES.get_or_init(|| {
        CATEGORY_RULES
            .iter()
            .map(|(category, pattern)| (*category, Regex::new(pattern).expect("category rule regex")))
            .collect()
    })
}

fn credit_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(CREDIT_KEYWORDS).expect("credit keyword regex"))
}

fn debit_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(DEBIT_KEYWORDS).expect("debit keyword regex"))
}

/// Index into [`CATEGORY_RULES`] of the first rule matching `description`
pub fn matching_rule(description: &str) -> Option<usize> {
    let desc = description.to_lowercase();
    category_rules().iter().position(|(_, re)| re.is_match(&desc))
}

/// Categorize a description; falls through to [`Category::Other`]
pub fn categorize(description: &str) -> Category {
    matching_rule(description)
        .map(|i| category_rules()[i].0)
        .unwrap_or(Category::Other)
}

/// Sign decides the type; keywords only break the tie for zero amounts
pub fn transaction_type(amount: Decimal, description: &str) -> TransactionType {
    if amount > Decimal::ZERO {
        return TransactionType::Credit;
    }
    if amount < Decimal::ZERO {
        return TransactionType::Debit;
    }

    let desc = description.to_lowercase();
    if credit_re().is_match(&desc) {
        TransactionType::Credit
    } else if debit_re().is_match(&desc) {
        TransactionType::Debit
    } else {
        TransactionType::Unknown
    }
}

pub fn classify(amount: Decimal, description: &str) -> Classification {
    Classification {
        kind: transaction_type(amount, description),
        category: categorize(description),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_beats_atm() {
        assert_eq!(categorize("ATM Fee Withdrawal"), Category::BankingFees);
        assert_eq!(matching_rule("ATM Fee Withdrawal"), Some(0));
    }

    #[test]
    fn test_each_rule_in_isolation() {
        let cases = [
            ("MONTHLY SERVICE CHARGE", Category::BankingFees),
            ("ATM CASH 4411 MAIN ST", Category::AtmCash),
            ("Counter Withdrawal", Category::AtmCash),
            ("ACME CORP PAYROLL", Category::Income),
            ("Direct Deposit IRS TREAS", Category::Income),
            ("Salary March", Category::Income),
            ("Online Transfer to SAV 1234", Category::Transfers),
            ("TFR FROM 9921", Category::Transfers),
            ("ELECTRONIC PMT VERIZON", Category::OnlinePayment),
            ("ACH PMT COMCAST", Category::OnlinePayment),
            ("CHECK 1042", Category::Check),
            ("CHK #881", Category::Check),
            ("POS PURCHASE SHELL OIL", Category::DebitCard),
            ("Debit Card Purchase TARGET", Category::DebitCard),
            ("ZELLE FROM J SMITH", Category::Other),
        ];

        for (desc, expected) in cases {
            assert_eq!(categorize(desc), expected, "description: {desc}");
        }
    }

    #[test]
    fn test_order_is_tie_break() {
        // transfer rule precedes online rule
        assert_eq!(categorize("Online Transfer"), Category::Transfers);
        // income precedes debit card even though "deposit" contains "pos"
        assert_eq!(categorize("PAYROLL DEPOSIT"), Category::Income);
        assert_eq!(categorize("Mobile deposit"), Category::Other);
        // "coach" must not trip the ach rule
        assert_eq!(categorize("COACH OUTLET"), Category::Other);
    }

    #[test]
    fn test_type_from_sign() {
        assert_eq!(transaction_type(Decimal::new(250000, 2), "anything"), TransactionType::Credit);
        assert_eq!(transaction_type(Decimal::new(-1, 2), "deposit"), TransactionType::Debit);
    }

    #[test]
    fn test_type_from_keywords_when_zero() {
        assert_eq!(transaction_type(Decimal::ZERO, "Mobile Deposit"), TransactionType::Credit);
        assert_eq!(transaction_type(Decimal::ZERO, "Fee reversal pending"), TransactionType::Debit);
        assert_eq!(transaction_type(Decimal::ZERO, "Memo line"), TransactionType::Unknown);
    }

    #[test]
    fn test_classify_combines_both() {
        let c = classify(Decimal::new(-4567, 2), "GROCERY STORE PURCHASE");
        assert_eq!(c.kind, TransactionType::Debit);
        assert_eq!(c.category, Category::DebitCard);
    }
}
