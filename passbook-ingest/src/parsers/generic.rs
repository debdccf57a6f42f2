//! Layout-agnostic grammar used when no bank header is recognised.
//!
//! Accepts `M/D` or `M/D/YYYY` dates followed by description, amount and an
//! optional running balance.

use passbook_core::BankVariant;
use std::sync::OnceLock;

use super::BankGrammar;

pub fn grammar() -> &'static BankGrammar {
    static GRAMMAR: OnceLock<BankGrammar> = OnceLock::new();
    GRAMMAR.get_or_init(|| {
        BankGrammar::new(
            BankVariant::Generic,
            None,
            concat!(
                r"^\s*(?P<date>\d{1,2}/\d{1,2}(?:/\d{4})?)\s+",
                r"(?P<desc>.+?)\s+",
                r"(?P<amount>\(?-?\$?-?\d[\d,]*\.\d{2}\)?)",
                r"(?:\s+(?P<balance>\(?-?\$?-?\d[\d,]*\.\d{2}\)?))?\s*$"
            ),
        )
        .expect("generic grammar")
    })
}
