//! QIF currency strings.
//!
//! Amounts are kept as text. A well-formed amount is an optionally signed
//! run of digits (commas allowed as group separators), a dot, and exactly two
//! fraction digits. Anything else decodes to zero.

use rust_decimal::Decimal;

/// The canonical textual zero.
pub const ZERO: &str = "0.00";

/// Parse a QIF amount into a two-place decimal.
///
/// Returns `None` if `s` is not shaped like a QIF amount.
#[must_use]
pub fn parse(s: &str) -> Option<Decimal> {
    let (negative, body) = match s.as_bytes().first()? {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };
    let (whole, cents) = body.rsplit_once('.')?;
    if whole.is_empty() || cents.len() != 2 || !cents.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if whole.starts_with(',') || whole.ends_with(',') {
        return None;
    }
    if !whole.bytes().all(|b| b.is_ascii_digit() || b == b',') {
        return None;
    }

    let mut units: i64 = 0;
    for b in whole.bytes().chain(cents.bytes()).filter(u8::is_ascii_digit) {
        units = units.checked_mul(10)?.checked_add(i64::from(b - b'0'))?;
    }
    let value = Decimal::new(units, 2);
    Some(if negative { -value } else { value })
}

/// Normalize an amount field.
///
/// Well-formed amounts lose their group separators and any leading `+`;
/// malformed ones become [`ZERO`]. An empty field stays empty so that an
/// absent amount can still be told apart from an explicit zero.
#[must_use]
pub fn normalize(s: &str) -> String {
    if s.is_empty() {
        return String::new();
    }
    match parse(s) {
        Some(value) if value.is_zero() => ZERO.to_string(),
        Some(value) => value.to_string(),
        None => ZERO.to_string(),
    }
}

/// Whether an amount counts as zero: empty, or exactly `0.00`.
#[must_use]
pub fn is_zero(amount: &str) -> bool {
    amount.is_empty() || amount == ZERO
}

/// Change the sign of an amount.
///
/// Flipping is an involution except at zero: both `""` and `"0.00"` flip to
/// `"0.00"`.
#[must_use]
pub fn flip_sign(amount: &str) -> String {
    if is_zero(amount) {
        ZERO.to_string()
    } else if let Some(rest) = amount.strip_prefix('-') {
        rest.to_string()
    } else if let Some(rest) = amount.strip_prefix('+') {
        format!("-{rest}")
    } else {
        format!("-{amount}")
    }
}

/// Remove group separators from an amount.
#[must_use]
pub fn strip_commas(amount: &str) -> String {
    amount.replace(',', "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse() {
        assert_eq!(parse("12.45"), Some(dec!(12.45)));
        assert_eq!(parse("-12.45"), Some(dec!(-12.45)));
        assert_eq!(parse("+12.45"), Some(dec!(12.45)));
        assert_eq!(parse("1,234.56"), Some(dec!(1234.56)));
        assert_eq!(parse("0.00"), Some(dec!(0.00)));
    }

    #[test]
    fn test_parse_rejects_other_shapes() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("12"), None);
        assert_eq!(parse("12.5"), None);
        assert_eq!(parse("12.345"), None);
        assert_eq!(parse(".45"), None);
        assert_eq!(parse("$12.45"), None);
        assert_eq!(parse(",12.45"), None);
        assert_eq!(parse("--12.45"), None);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("1,234.56"), "1234.56");
        assert_eq!(normalize("+5.00"), "5.00");
        assert_eq!(normalize("-0.05"), "-0.05");
        assert_eq!(normalize("-0.00"), "0.00");
        assert_eq!(normalize("abc"), "0.00");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_flip_sign() {
        assert_eq!(flip_sign("0.00"), "0.00");
        assert_eq!(flip_sign("12.45"), "-12.45");
        assert_eq!(flip_sign("-12.45"), "12.45");
        assert_eq!(flip_sign("+12.45"), "-12.45");
        assert_eq!(flip_sign(""), "0.00");
    }

    #[test]
    fn test_is_zero() {
        assert!(is_zero(""));
        assert!(is_zero("0.00"));
        assert!(!is_zero("0.01"));
        assert!(!is_zero("-0.00"));
    }

    proptest! {
        #[test]
        fn prop_flip_sign_is_involution(cents in 1i64..10_000_000, negative in any::<bool>()) {
            let value = Decimal::new(if negative { -cents } else { cents }, 2);
            let amount = value.to_string();
            prop_assert_eq!(flip_sign(&flip_sign(&amount)), amount);
        }

        #[test]
        fn prop_normalize_is_idempotent(s in "[-+]?[0-9,]{0,9}(\\.[0-9]{0,3})?") {
            let once = normalize(&s);
            prop_assert_eq!(normalize(&once), once);
        }
    }
}
