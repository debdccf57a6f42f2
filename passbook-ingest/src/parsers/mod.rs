//! Statement grammars: one regex grammar per known bank layout plus the
//! generic line heuristic used when none of them match.
//!
//! Adding a bank means adding a module with a `grammar()` constructor and a
//! [`BankVariant`] arm in [`grammar_for`].

pub mod bank_of_america;
pub mod chase;
pub mod citibank;
pub mod fallback;
pub mod generic;
pub mod wells_fargo;

use passbook_core::BankVariant;
use regex::Regex;
use std::sync::OnceLock;

use crate::normalize::{clean_description, parse_amount, parse_date};
use crate::types::{Attempt, Candidate};

pub use fallback::FallbackGrammar;

/// Something that turns statement text into per-line attempts
pub trait Grammar {
    fn name(&self) -> &'static str;

    /// `default_year` fills in dates printed without a year
    fn try_extract(&self, text: &str, default_year: i32) -> Vec<Attempt>;
}

/// Regex grammar for one bank's statement layout.
///
/// The transaction regex must define `date`, `desc` and `amount` groups and
/// may define `balance`.
#[derive(Debug)]
pub struct BankGrammar {
    pub variant: BankVariant,
    header: Option<Regex>,
    transaction: Regex,
}

impl BankGrammar {
    pub fn new(
        variant: BankVariant,
        header: Option<&str>,
        transaction: &str,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            variant,
            header: header.map(Regex::new).transpose()?,
            transaction: Regex::new(transaction)?,
        })
    }

    /// `lowered` must already be lower-cased
    pub fn matches_header(&self, lowered: &str) -> bool {
        self.header.as_ref().is_some_and(|re| re.is_match(lowered))
    }
}

impl Grammar for BankGrammar {
    fn name(&self) -> &'static str {
        self.variant.as_str()
    }

    fn try_extract(&self, text: &str, default_year: i32) -> Vec<Attempt> {
        let mut out = Vec::new();

        for (idx, line) in text.lines().enumerate() {
            if line.trim().is_empty() || is_boilerplate(line) {
                continue;
            }

            if let Some(caps) = self.transaction.captures(line) {
                out.push(Ok(Candidate {
                    line: idx + 1,
                    date: parse_date(&caps["date"], default_year),
                    description: clean_description(&caps["desc"]),
                    amount: parse_amount(&caps["amount"]),
                    balance: caps.name("balance").and_then(|m| parse_amount(m.as_str())),
                }));
            }
        }

        out
    }
}

/// Grammar for a detected variant
pub fn grammar_for(variant: BankVariant) -> &'static BankGrammar {
    match variant {
        BankVariant::Generic => generic::grammar(),
        BankVariant::Chase => chase::grammar(),
        BankVariant::BankOfAmerica => bank_of_america::grammar(),
        BankVariant::WellsFargo => wells_fargo::grammar(),
        BankVariant::Citibank => citibank::grammar(),
    }
}

fn header_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"(?i)^\s*(?:",
            r"page\s+\d+(?:\s+of\s+\d+)?\b",
            r"|statement\s+(?:period|date|closing\s+date|of|for)\b",
            r"|(?:account|balance)\s+summary\b",
            r"|summary\s+of\b",
            r"|date\s+(?:posted\s+)?description\b",
            r"|transaction\s+detail\b",
            r"|(?:sub)?total\b",
            r"|continued\b",
            r")"
        ))
        .expect("header line regex")
    })
}

fn balance_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b(?:(?:opening|beginning|closing|ending)\s+balance|balance\s+forward)\b")
            .expect("balance line regex")
    })
}

/// Page markers, column headers, summary and balance-forward rows
pub fn is_boilerplate(line: &str) -> bool {
    header_line_re().is_match(line) || balance_line_re().is_match(line)
}
