//! Statement-level metadata scans (account holder, masked account number,
//! balances, statement period). Each scan is independent and optional.

use passbook_core::{AccountInfo, StatementPeriod};
use regex::Regex;
use rust_decimal::Decimal;
use std::sync::OnceLock;

use crate::normalize::{parse_amount, parse_date, round_cents};

/// Optional "on 1/31" / "as of 01/31/2024" after a balance label, then the amount
const BALANCE_TAIL: &str = concat!(
    r"(?:\s+(?:on|as\s+of)\s+\d{1,2}/\d{1,2}(?:/\d{2,4})?)?",
    r"[^\d$(\-\n]*(\(?-?\$?-?\d[\d,]*\.\d{2}\)?)"
);

fn account_number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)account\s*(?:number|#|no\.?)[ \t]*:?[ \t]*([\dX*]+(?:[\- ][\dX*]+)*)")
            .expect("account number regex")
    })
}

fn account_holder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i:account\s+(?:holder|name))[ \t]*:?[ \t]*([A-Z][A-Za-z.'\-]*(?:[ \t]+[A-Z][A-Za-z.'\-]*)*)")
            .expect("account holder regex")
    })
}

fn opening_balance_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(r"(?i)\b(?:opening|beginning|previous)\s+balance{BALANCE_TAIL}"))
            .expect("opening balance regex")
    })
}

fn closing_balance_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(r"(?i)\b(?:closing|ending|new)\s+balance{BALANCE_TAIL}"))
            .expect("closing balance regex")
    })
}

fn statement_period_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"(?i)statement\s+period\s*:?\s*",
            r"(\d{1,2}/\d{1,2}(?:/\d{4})?)",
            r"\s*(?:-|to|through)\s*",
            r"(\d{1,2}/\d{1,2}(?:/\d{4})?)"
        ))
        .expect("statement period regex")
    })
}

fn capture_balance(re: &Regex, text: &str) -> Option<Decimal> {
    let caps = re.captures(text)?;
    parse_amount(&caps[1]).map(round_cents)
}

/// `****1234` from the last four digits of the number after
/// "account number"/"account #", however it is grouped
pub fn extract_account_number_masked(text: &str) -> Option<String> {
    let caps = account_number_re().captures(text)?;
    let digits: Vec<char> = caps[1].chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() < 4 {
        return None;
    }
    let last4: String = digits[digits.len() - 4..].iter().collect();
    Some(format!("****{last4}"))
}

/// Capitalized name run after "account holder"/"account name"
pub fn extract_account_holder(text: &str) -> Option<String> {
    let caps = account_holder_re().captures(text)?;
    let name = caps[1].trim();
    (!name.is_empty()).then(|| name.to_string())
}

pub fn extract_account_info(text: &str) -> AccountInfo {
    AccountInfo {
        account_number_masked: extract_account_number_masked(text),
        account_holder: extract_account_holder(text),
        opening_balance: capture_balance(opening_balance_re(), text),
        closing_balance: capture_balance(closing_balance_re(), text),
    }
}

/// "Statement Period: 01/01/2024 - 01/31/2024"; both ends must parse
pub fn extract_statement_period(text: &str, default_year: i32) -> Option<StatementPeriod> {
    let caps = statement_period_re().captures(text)?;
    Some(StatementPeriod {
        from: parse_date(&caps[1], default_year)?,
        to: parse_date(&caps[2], default_year)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    const HEADER: &str = "\
CHASE
Account Holder: JANE Q DOE
123 MAIN ST
Account Number: 000000123456789
Statement Period: 01/01/2024 - 01/31/2024
Beginning Balance $1,245.50
Ending Balance (12.03)
";

    #[test]
    fn test_full_header() {
        let info = extract_account_info(HEADER);
        assert_eq!(
            info,
            AccountInfo {
                account_number_masked: Some("****6789".to_string()),
                account_holder: Some("JANE Q DOE".to_string()),
                opening_balance: Some(Decimal::new(124550, 2)),
                closing_balance: Some(Decimal::new(-1203, 2)),
            }
        );
    }

    #[test]
    fn test_masked_input_numbers() {
        assert_eq!(
            extract_account_number_masked("Account # XXXX-XXXX-4321"),
            Some("****4321".to_string())
        );
        assert_eq!(extract_account_number_masked("acct 4321"), None);
        assert_eq!(extract_account_number_masked("Account #: XX-12"), None);
    }

    #[test]
    fn test_grouped_numbers_mask_last_group() {
        assert_eq!(
            extract_account_number_masked("Account Number: 0001-2345-6789"),
            Some("****6789".to_string())
        );
        assert_eq!(
            extract_account_number_masked("Account Number: 1234 5678 9012\nPage 1"),
            Some("****9012".to_string())
        );
        // wide column gap ends the number
        assert_eq!(
            extract_account_number_masked("Account No. 000123456789      Statement Date 01/31/2024"),
            Some("****6789".to_string())
        );
    }

    #[test]
    fn test_balances_with_as_of_date() {
        let info = extract_account_info(
            "Beginning balance on 1/1 $1,245.50\nEnding balance on 1/31 $1,300.00",
        );
        assert_eq!(info.opening_balance, Some(Decimal::new(124550, 2)));
        assert_eq!(info.closing_balance, Some(Decimal::new(130000, 2)));

        let info = extract_account_info("Previous Balance as of 12/31/2023: (15.20)\nNew Balance 0.00");
        assert_eq!(info.opening_balance, Some(Decimal::new(-1520, 2)));
        assert_eq!(info.closing_balance, Some(Decimal::new(0, 2)));
    }

    #[test]
    fn test_holder_stops_at_line_end_and_lowercase() {
        assert_eq!(
            extract_account_holder("Account Name: John Smith\nJane"),
            Some("John Smith".to_string())
        );
        assert_eq!(
            extract_account_holder("account holder Mary Ann for checking"),
            Some("Mary Ann".to_string())
        );
        assert_eq!(extract_account_holder("account holder: n/a"), None);
    }

    #[test]
    fn test_period() {
        assert_eq!(
            extract_statement_period(HEADER, 1999),
            Some(StatementPeriod {
                from: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                to: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            })
        );

        let short = extract_statement_period("STATEMENT PERIOD 12/01 through 12/31", 2025).unwrap();
        assert_eq!(short.from, NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
        assert_eq!(short.to, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());

        assert_eq!(extract_statement_period("Statement Period: 02/30 - 03/31", 2025), None);
    }

    #[test]
    fn test_nothing_found() {
        let info = extract_account_info("no metadata here");
        assert!(info.is_empty());
        assert_eq!(extract_statement_period("no metadata here", 2024), None);
    }
}
