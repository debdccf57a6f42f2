//! Chase checking statement grammar
//!
//! Rows look like
//!   03/05       Card Purchase 03/04 Shell Oil 574443            -40.00       960.00
//! with the balance column sometimes missing.

use passbook_core::BankVariant;
use std::sync::OnceLock;

use super::BankGrammar;

/// Rows are MM/DD; the year is inferred.
pub fn grammar() -> &'static BankGrammar {
    static GRAMMAR: OnceLock<BankGrammar> = OnceLock::new();
    GRAMMAR.get_or_init(|| {
        BankGrammar::new(
            BankVariant::Chase,
            Some(r"\bchase\b|jpmorgan"),
            concat!(
                r"^\s*(?P<date>\d{2}/\d{2})\s+",
                r"(?P<desc>.+?)\s+",
                r"(?P<amount>\(?-?\$?-?\d[\d,]*\.\d{2}\)?)",
                r"(?:\s+(?P<balance>\(?-?\$?-?\d[\d,]*\.\d{2}\)?))?\s*$"
            ),
        )
        .expect("chase grammar")
    })
}
