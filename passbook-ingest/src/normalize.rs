//! Field normalizers shared by every statement grammar.
//!
//! None of these fail loudly: an unparseable field comes back as `None` and
//! the caller drops that one candidate.

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;
use std::sync::OnceLock;

/// Maximum description length, in characters
pub const MAX_DESCRIPTION_LEN: usize = 100;

const CURRENCY_SYMBOLS: [char; 4] = ['$', '€', '£', '¥'];

fn date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{1,2})/(\d{1,2})(?:/(\d{4}))?$").expect("date regex"))
}

fn ws_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("ws regex"))
}

fn noise_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w\s\-&.]").expect("noise regex"))
}

/// Parse `MM/DD/YYYY`, `M/D/YYYY`, `MM/DD` or `M/D`.
///
/// Dates without a year take `default_year`. Two-digit years and impossible
/// calendar dates are rejected.
pub fn parse_date(raw: &str, default_year: i32) -> Option<NaiveDate> {
    let caps = date_re().captures(raw.trim())?;
    let month: u32 = caps[1].parse().ok()?;
    let day: u32 = caps[2].parse().ok()?;
    let year: i32 = match caps.get(3) {
        Some(y) => y.as_str().parse().ok()?,
        None => default_year,
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse a statement amount like `$1,234.56`, `-45.67` or `(250.00)`.
///
/// Parenthesized amounts are negative (accounting notation). The value is
/// returned unrounded.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let stripped: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && !CURRENCY_SYMBOLS.contains(c))
        .collect();

    let (body, negate) = match stripped
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
    {
        Some(inner) => (inner, true),
        None => (stripped.as_str(), false),
    };

    let body = body.replace(',', "");
    if body.is_empty() {
        return None;
    }

    let value = Decimal::from_str(&body).ok()?;
    Some(if negate { -value } else { value })
}

/// Collapse whitespace, drop punctuation noise, trim and cap the length.
///
/// Keeps word characters, whitespace, `-`, `&` and `.` so classifier
/// keywords survive.
pub fn clean_description(raw: &str) -> String {
    let collapsed = ws_re().replace_all(raw, " ");
    let kept = noise_re().replace_all(&collapsed, "");
    kept.trim().chars().take(MAX_DESCRIPTION_LEN).collect()
}

/// Round half away from zero to cents, always keeping two fraction digits
pub fn round_cents(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}
