//! Bank of America statement grammar
//!
//! Deposits and withdrawals are listed in separate sections without a
//! running balance column:
//!   Date        Description                                              Amount
//!   01/15/2024  BKOFAMERICA ATM 01/15 #000004421 WITHDRWL MAIN ST       -200.00

use passbook_core::BankVariant;
use std::sync::OnceLock;

use super::BankGrammar;

pub fn grammar() -> &'static BankGrammar {
    static GRAMMAR: OnceLock<BankGrammar> = OnceLock::new();
    GRAMMAR.get_or_init(|| {
        BankGrammar::new(
            BankVariant::BankOfAmerica,
            Some(r"bank\s+of\s+america|bankofamerica\.com"),
            concat!(
                r"^\s*(?P<date>\d{2}/\d{2}/\d{4})\s+",
                r"(?P<desc>.+?)\s+",
                r"(?P<amount>\(?-?\$?-?\d[\d,]*\.\d{2}\)?)\s*$"
            ),
        )
        .expect("bank of america grammar")
    })
}
