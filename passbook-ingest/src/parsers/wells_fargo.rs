//! Wells Fargo statement grammar
//!
//! Dates are printed without zero padding and an optional balance follows
//! the amount:
//!   Date   Description                                    Amount   Ending daily balance
//!   1/5    Purchase authorized on 01/03 Shell Oil         -38.12   1,961.88

use passbook_core::BankVariant;
use std::sync::OnceLock;

use super::BankGrammar;

pub fn grammar() -> &'static BankGrammar {
    static GRAMMAR: OnceLock<BankGrammar> = OnceLock::new();
    GRAMMAR.get_or_init(|| {
        BankGrammar::new(
            BankVariant::WellsFargo,
            Some(r"wells\s+fargo|wellsfargo\.com"),
            concat!(
                r"^\s*(?P<date>\d{1,2}/\d{1,2})\s+",
                r"(?P<desc>.+?)\s+",
                r"(?P<amount>\(?-?\$?-?\d[\d,]*\.\d{2}\)?)",
                r"(?:\s+(?P<balance>\(?-?\$?-?\d[\d,]*\.\d{2}\)?))?\s*$"
            ),
        )
        .expect("wells fargo grammar")
    })
}
