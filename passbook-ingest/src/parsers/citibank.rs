//! Citibank statement grammar
//!
//!   Date    Description                               Amount       Balance
//!   02/03   ACH Electronic Credit GUSTO PAY 123456    1,800.00     4,210.55

use passbook_core::BankVariant;
use std::sync::OnceLock;

use super::BankGrammar;

pub fn grammar() -> &'static BankGrammar {
    static GRAMMAR: OnceLock<BankGrammar> = OnceLock::new();
    GRAMMAR.get_or_init(|| {
        BankGrammar::new(
            BankVariant::Citibank,
            Some(r"citibank|citigroup|\bciti\b"),
            concat!(
                r"^\s*(?P<date>\d{2}/\d{2})\s+",
                r"(?P<desc>.+?)\s+",
                r"(?P<amount>\(?-?\$?-?\d[\d,]*\.\d{2}\)?)",
                r"(?:\s+(?P<balance>\(?-?\$?-?\d[\d,]*\.\d{2}\)?))?\s*$"
            ),
        )
        .expect("citibank grammar")
    })
}
