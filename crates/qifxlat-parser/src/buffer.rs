//! Input normalization.
//!
//! A [`Buffer`] owns the text every [`Cursor`] walks over. Building one
//! validates the encoding and irons out the line-level noise QIF exporters
//! leave behind, so the matchers only ever see `\n`-terminated lines without
//! trailing whitespace.

use crate::{Cursor, ParseError, ParseErrorKind, Position, Span};
use std::borrow::Cow;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Normalized, UTF-8 validated QIF text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    text: String,
}

impl Buffer {
    /// Validate and normalize raw input.
    ///
    /// Every carriage return is removed, trailing whitespace is trimmed from
    /// each line and a leading byte order mark is dropped. If the last
    /// non-blank line is a field line, a `^` line is appended so the final
    /// record is closed.
    ///
    /// # Errors
    ///
    /// Returns [`ParseErrorKind::InvalidEncoding`] positioned at the first
    /// byte that is not valid UTF-8. Its span refers to the raw input.
    pub fn new(input: &[u8]) -> Result<Self, ParseError> {
        match std::str::from_utf8(input) {
            Ok(text) => Ok(Self::from_text(text)),
            Err(e) => Err(encoding_error(input, e.valid_up_to())),
        }
    }

    /// Normalize text that is already known to be UTF-8.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
        let mut out = String::with_capacity(text.len() + 2);
        let mut needs_terminator = false;

        for raw in text.split_terminator('\n') {
            let line: Cow<'_, str> = if raw.contains('\r') {
                Cow::Owned(raw.replace('\r', ""))
            } else {
                Cow::Borrowed(raw)
            };
            let line = line.trim_end();
            if !line.is_empty() {
                needs_terminator = !(line.starts_with('^') || line.starts_with('!'));
            }
            out.push_str(line);
            out.push('\n');
        }

        if needs_terminator {
            out.push_str("^\n");
        }
        Self { text: out }
    }

    /// The normalized text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length of the normalized text in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the normalized text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// A cursor at the first line.
    #[must_use]
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(&self.text)
    }
}

impl From<&str> for Buffer {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

fn encoding_error(input: &[u8], valid_up_to: usize) -> ParseError {
    let prefix = String::from_utf8_lossy(&input[..valid_up_to]);
    let line = 1 + prefix.matches('\n').count();
    let last_line = prefix.rsplit('\n').next().unwrap_or_default();
    let col = 1 + last_line.chars().filter(|&c| c != '\r').count();

    ParseError::new(
        ParseErrorKind::InvalidEncoding,
        Position::new(line, col),
        Span::new(valid_up_to, valid_up_to + 1),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crlf_and_trailing_whitespace() {
        let buffer = Buffer::from_text("!Type:Bank  \r\nD1/ 2'16\t\r\nT-5.00\r\n^\r\n");
        assert_eq!(buffer.as_str(), "!Type:Bank\nD1/ 2'16\nT-5.00\n^\n");
    }

    #[test]
    fn test_appends_missing_terminator() {
        let buffer = Buffer::from_text("!Type:Bank\nD1/ 2'16\nT-5.00");
        assert_eq!(buffer.as_str(), "!Type:Bank\nD1/ 2'16\nT-5.00\n^\n");
    }

    #[test]
    fn test_terminator_ignores_trailing_blank_lines() {
        let buffer = Buffer::from_text("!Type:Bank\nT-5.00\n\n  \n");
        assert_eq!(buffer.as_str(), "!Type:Bank\nT-5.00\n\n\n^\n");
    }

    #[test]
    fn test_no_terminator_after_header_or_caret() {
        assert_eq!(Buffer::from_text("!Type:Cat\n").as_str(), "!Type:Cat\n");
        assert_eq!(Buffer::from_text("NFood\n^").as_str(), "NFood\n^\n");
        assert_eq!(Buffer::from_text("").as_str(), "");
    }

    #[test]
    fn test_strips_byte_order_mark() {
        let buffer = Buffer::new("\u{feff}!Type:Tag\n".as_bytes()).unwrap();
        assert_eq!(buffer.as_str(), "!Type:Tag\n");
    }

    #[test]
    fn test_invalid_utf8_position() {
        let err = Buffer::new(b"!Type:Bank\r\nPAb\xff\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidEncoding);
        assert_eq!(err.line(), 2);
        assert_eq!(err.col(), 4);
        assert_eq!(err.span, Span::new(15, 16));
    }

    #[test]
    fn test_invalid_utf8_on_first_line() {
        let err = Buffer::new(b"\xc3(").unwrap_err();
        assert_eq!((err.line(), err.col()), (1, 1));
    }
}
