//! QIF date decoding.
//!
//! A QIF date looks like `M[M]/[ ]DD'YY`: a one or two digit month, a two
//! character day whose first character may be a space, and a two digit year
//! after a tick. Years are always taken to be in the 21st century.

use chrono::NaiveDate;

/// The value a date field decodes to when it is not a valid QIF date.
pub const INVALID_DATE: &str = "****/**/**";

/// Length in bytes of the date lexeme at the start of `s`, if `s` starts with
/// something shaped like a QIF date.
///
/// Only the shape is checked here; calendar validity is left to [`parse`].
#[must_use]
pub fn lexeme_len(s: &str) -> Option<usize> {
    let b = s.as_bytes();
    let mut len = 0;

    // digit digit?
    if !b.first()?.is_ascii_digit() {
        return None;
    }
    len += 1;
    if b.get(len).is_some_and(u8::is_ascii_digit) {
        len += 1;
    }

    // slash
    if *b.get(len)? != b'/' {
        return None;
    }
    len += 1;

    // (space | digit) digit
    let c = *b.get(len)?;
    if !(c == b' ' || c.is_ascii_digit()) {
        return None;
    }
    len += 1;
    if !b.get(len)?.is_ascii_digit() {
        return None;
    }
    len += 1;

    // tick digit digit
    if *b.get(len)? != b'\'' {
        return None;
    }
    len += 1;
    for _ in 0..2 {
        if !b.get(len)?.is_ascii_digit() {
            return None;
        }
        len += 1;
    }

    Some(len)
}

/// Parse a QIF date lexeme into a calendar date.
///
/// Returns `None` when the lexeme is not exactly one date or when the day
/// does not exist (e.g. `2/29'01` or `11/31'00`).
#[must_use]
pub fn parse(lexeme: &str) -> Option<NaiveDate> {
    if lexeme_len(lexeme)? != lexeme.len() {
        return None;
    }
    let (month, rest) = lexeme.split_once('/')?;
    let (day, year) = rest.split_once('\'')?;

    let month = digits(month);
    let day = digits(day);
    let year = 2000 + digits(year) as i32;

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Decode a QIF date lexeme to `YYYY/MM/DD`, or [`INVALID_DATE`].
#[must_use]
pub fn decode(lexeme: &str) -> String {
    parse(lexeme).map_or_else(|| INVALID_DATE.to_string(), render)
}

/// Render a date the way every writer expects it.
#[must_use]
pub fn render(date: NaiveDate) -> String {
    date.format("%Y/%m/%d").to_string()
}

// Leading spaces in the day are allowed, so only digits count.
fn digits(s: &str) -> u32 {
    s.bytes()
        .filter(u8::is_ascii_digit)
        .fold(0, |n, b| n * 10 + u32::from(b - b'0'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_decode_single_digit_month() {
        assert_eq!(decode("9/ 3'16"), "2016/09/03");
        assert_eq!(decode("9/13'16"), "2016/09/13");
    }

    #[test]
    fn test_decode_two_digit_month() {
        assert_eq!(decode("12/ 9'16"), "2016/12/09");
        assert_eq!(decode("12/19'16"), "2016/12/19");
    }

    #[test]
    fn test_decode_not_a_date() {
        assert_eq!(decode("ab/cd'ee"), INVALID_DATE);
        assert_eq!(decode(""), INVALID_DATE);
        assert_eq!(decode("2016-09-03"), INVALID_DATE);
        assert_eq!(decode("9/3'16"), INVALID_DATE);
        assert_eq!(decode("9/ 3'2016"), INVALID_DATE);
    }

    #[test]
    fn test_decode_calendar() {
        assert_eq!(decode("1/32'00"), INVALID_DATE);
        assert_eq!(decode("2/29'01"), INVALID_DATE);
        assert_eq!(decode("2/29'04"), "2004/02/29");
        assert_eq!(decode("11/31'00"), INVALID_DATE);
        assert_eq!(decode("13/01'10"), INVALID_DATE);
        assert_eq!(decode("0/01'10"), INVALID_DATE);
    }

    #[test]
    fn test_lexeme_len_stops_at_date() {
        assert_eq!(lexeme_len("9/ 3'16"), Some(7));
        assert_eq!(lexeme_len("12/19'16 trailing"), Some(8));
        assert_eq!(lexeme_len("12/19"), None);
    }

    proptest! {
        #[test]
        fn prop_decode_renders_four_digit_year(
            date in (2000i32..2100, 1u32..=12, 1u32..=28)
                .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap()),
            space_pad in any::<bool>(),
        ) {
            use chrono::Datelike;

            let day = if space_pad && date.day() < 10 {
                format!(" {}", date.day())
            } else {
                format!("{:02}", date.day())
            };
            let lexeme = format!("{}/{}'{:02}", date.month(), day, date.year() - 2000);

            prop_assert_eq!(decode(&lexeme), date.format("%Y/%m/%d").to_string());
        }
    }
}
