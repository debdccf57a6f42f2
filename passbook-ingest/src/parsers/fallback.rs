//! Generic line heuristic for statement layouts no grammar recognises.
//!
//! Favors recall: any line with a date followed by an amount becomes a
//! candidate. It still never emits an unparseable amount or an empty
//! description.

use regex::Regex;
use std::sync::OnceLock;

use super::{is_boilerplate, Grammar};
use crate::normalize::{clean_description, parse_amount, parse_date};
use crate::types::{Attempt, Candidate, SkipReason, Skipped};

fn loose_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b\d{1,2}/\d{1,2}(?:/\d{2,4})?\b").expect("loose date regex"))
}

fn loose_amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\(?-?\$?-?\d[\d,]*\.\d{2}\)?").expect("loose amount regex"))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackGrammar;

impl FallbackGrammar {
    fn scan_line(line_no: usize, line: &str, default_year: i32) -> Attempt {
        let skip = |reason| Skipped::new(line_no, reason);

        if is_boilerplate(line) {
            return Err(skip(SkipReason::Boilerplate));
        }

        let date = loose_date_re()
            .find(line)
            .ok_or_else(|| skip(SkipReason::NoDate))?;
        let amounts: Vec<_> = loose_amount_re().find_iter(line).collect();
        let (first_amount, last_amount) = match (amounts.first(), amounts.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return Err(skip(SkipReason::NoAmount)),
        };

        let parsed_date =
            parse_date(date.as_str(), default_year).ok_or_else(|| skip(SkipReason::UnparseableDate))?;

        if date.end() > first_amount.start() {
            return Err(skip(SkipReason::DateAfterAmount));
        }
        let description = clean_description(&line[date.end()..first_amount.start()]);

        let amount =
            parse_amount(first_amount.as_str()).ok_or_else(|| skip(SkipReason::UnparseableAmount))?;
        if description.is_empty() {
            return Err(skip(SkipReason::EmptyDescription));
        }

        let balance = if amounts.len() >= 2 {
            parse_amount(last_amount.as_str())
        } else {
            None
        };

        Ok(Candidate {
            line: line_no,
            date: Some(parsed_date),
            description,
            amount: Some(amount),
            balance,
        })
    }
}

impl Grammar for FallbackGrammar {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn try_extract(&self, text: &str, default_year: i32) -> Vec<Attempt> {
        text.lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| Self::scan_line(idx + 1, line, default_year))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn reason(attempt: &Attempt) -> Option<SkipReason> {
        attempt.as_ref().err().map(|s| s.reason)
    }

    #[test]
    fn test_unaligned_row_is_recovered() {
        let attempts =
            FallbackGrammar.try_extract("Posted 3/7/2024 * COFFEE SHOP * 4.50 USD bal 95.50", 2026);
        assert_eq!(attempts.len(), 1);

        let c = attempts[0].as_ref().unwrap();
        assert_eq!(c.date, NaiveDate::from_ymd_opt(2024, 3, 7));
        assert_eq!(c.description, "COFFEE SHOP");
        assert_eq!(c.amount, Some(Decimal::new(450, 2)));
        assert_eq!(c.balance, Some(Decimal::new(9550, 2)));
    }

    #[test]
    fn test_single_amount_has_no_balance() {
        let attempts = FallbackGrammar.try_extract("on 12/24 GIFT SHOP paid $19.99 thanks", 2025);
        let c = attempts[0].as_ref().unwrap();
        assert_eq!(c.date, NaiveDate::from_ymd_opt(2025, 12, 24));
        assert_eq!(c.description, "GIFT SHOP paid");
        assert_eq!(c.balance, None);
    }

    #[test]
    fn test_last_of_many_amounts_is_balance() {
        let attempts = FallbackGrammar.try_extract("01/02 X 1.00 2.00 3.00", 2024);
        let c = attempts[0].as_ref().unwrap();
        assert_eq!(c.description, "X");
        assert_eq!(c.amount, Some(Decimal::new(100, 2)));
        assert_eq!(c.balance, Some(Decimal::new(300, 2)));
    }

    #[test]
    fn test_skip_reasons() {
        let text = "\
Page 1 of 2
Just a heading line
02/01/2024 memo without money
02/01/24 TWO DIGIT YEAR 5.00
14/40 BAD DATE 5.00
5.00 paid on 02/03
02/03 ** 5.00
";
        let attempts = FallbackGrammar.try_extract(text, 2024);
        let reasons: Vec<_> = attempts.iter().map(reason).collect();
        assert_eq!(
            reasons,
            vec![
                Some(SkipReason::Boilerplate),
                Some(SkipReason::NoDate),
                Some(SkipReason::NoAmount),
                Some(SkipReason::UnparseableDate),
                Some(SkipReason::UnparseableDate),
                Some(SkipReason::DateAfterAmount),
                Some(SkipReason::EmptyDescription),
            ]
        );

        let lines: Vec<_> = attempts.iter().map(|a| a.as_ref().unwrap_err().line).collect();
        assert_eq!(lines, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_blank_lines_are_not_attempts() {
        assert!(FallbackGrammar.try_extract("\n   \n\t\n", 2024).is_empty());
    }
}
