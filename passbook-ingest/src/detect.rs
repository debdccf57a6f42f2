//! Bank variant detection from statement header text.

use passbook_core::BankVariant;
use tracing::debug;

use crate::parsers::grammar_for;

/// First bank (in fixed priority order) whose header pattern appears in the
/// text, else [`BankVariant::Generic`].
pub fn detect_variant(text: &str) -> BankVariant {
    let lowered = text.to_lowercase();
    let variant = BankVariant::DETECTION_ORDER
        .into_iter()
        .find(|v| grammar_for(*v).matches_header(&lowered))
        .unwrap_or(BankVariant::Generic);

    debug!(%variant, "detected statement layout");
    variant
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_each_bank() {
        assert_eq!(detect_variant("CHASE\nTotal Checking"), BankVariant::Chase);
        assert_eq!(detect_variant("Bank of America, N.A."), BankVariant::BankOfAmerica);
        assert_eq!(detect_variant("WELLS FARGO BANK"), BankVariant::WellsFargo);
        assert_eq!(detect_variant("Citibank Client Services"), BankVariant::Citibank);
    }

    #[test]
    fn test_priority_order() {
        // a Chase statement mentioning a Citi transfer is still Chase
        let text = "Citibank transfer received\nJPMorgan Chase Bank";
        assert_eq!(detect_variant(text), BankVariant::Chase);

        let text = "Payment to Wells Fargo card\nBank of America";
        assert_eq!(detect_variant(text), BankVariant::BankOfAmerica);
    }

    #[test]
    fn test_unknown_is_generic() {
        assert_eq!(detect_variant(""), BankVariant::Generic);
        assert_eq!(
            detect_variant("01/15/2024 GROCERY STORE PURCHASE -45.67 1200.33"),
            BankVariant::Generic
        );
    }
}
