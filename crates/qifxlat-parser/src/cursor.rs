//! Line-oriented matchers over a [`Buffer`](crate::Buffer).
//!
//! A [`Cursor`] is a cheap `Copy` value: every matcher takes the cursor by
//! value and, on success, hands back the matched text together with a new
//! cursor positioned past it. On failure the caller still holds the old
//! cursor, so trying alternatives is free.

use crate::{ParseError, ParseErrorKind, Position, Span};
use qifxlat_core::date;

/// A position in normalized QIF text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor<'a> {
    source: &'a str,
    offset: usize,
    line: usize,
    col: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) const fn new(source: &'a str) -> Self {
        Self {
            source,
            offset: 0,
            line: 1,
            col: 1,
        }
    }

    /// Current line (1-based).
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Current column (1-based).
    #[must_use]
    pub const fn col(&self) -> usize {
        self.col
    }

    /// Current line and column.
    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.line, self.col)
    }

    /// Byte offset into the buffer.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// The unconsumed input.
    #[must_use]
    pub fn rest(&self) -> &'a str {
        &self.source[self.offset..]
    }

    /// Whether all input has been consumed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offset >= self.source.len()
    }

    /// The unconsumed part of the current line, without its newline.
    #[must_use]
    pub fn current_line(&self) -> &'a str {
        let rest = self.rest();
        rest.find('\n').map_or(rest, |end| &rest[..end])
    }

    /// Span of the unconsumed part of the current line.
    #[must_use]
    pub fn line_span(&self) -> Span {
        Span::new(self.offset, self.offset + self.current_line().len())
    }

    /// Consume the rest of the current line, including its newline.
    #[must_use]
    pub fn skip_line(self) -> (&'a str, Self) {
        let text = self.current_line();
        let mut offset = self.offset + text.len();
        if offset < self.source.len() {
            offset += 1;
        }
        let next = Self {
            source: self.source,
            offset,
            line: self.line + 1,
            col: 1,
        };
        (text, next)
    }

    /// Match a line that starts with `text`, consuming the whole line.
    ///
    /// Used for section headers and control literals.
    #[must_use]
    pub fn literal(self, text: &str) -> Option<Self> {
        if self.current_line().starts_with(text) {
            Some(self.skip_line().1)
        } else {
            None
        }
    }

    /// Match a field line introduced by `tag`, returning the value after the
    /// tag and a cursor at the next line.
    #[must_use]
    pub fn field(self, tag: &str) -> Option<(&'a str, Self)> {
        let value = self.current_line().strip_prefix(tag)?;
        Some((value, self.skip_line().1))
    }

    /// Match a date field introduced by `tag`.
    ///
    /// Succeeds when the value starts with a QIF date naming a real day; the
    /// date is returned rendered `YYYY/MM/DD`. Anything after the date on the
    /// same line is ignored. Days that do not exist are a non-match.
    #[must_use]
    pub fn date(self, tag: &str) -> Option<(String, Self)> {
        let (value, next) = self.field(tag)?;
        let len = date::lexeme_len(value)?;
        let parsed = date::parse(&value[..len])?;
        Some((date::render(parsed), next))
    }

    /// Match the end of a record: a `^` line, or the end of input.
    #[must_use]
    pub fn end_of_record(self) -> Option<Self> {
        if self.is_empty() {
            Some(self)
        } else if self.current_line().starts_with('^') {
            Some(self.skip_line().1)
        } else {
            None
        }
    }

    /// Whether the current section is over: the next line is a header, or
    /// there is no more input. Consumes nothing.
    #[must_use]
    pub fn end_of_section(&self) -> bool {
        self.is_empty() || self.rest().starts_with('!')
    }

    /// Skip any number of empty lines.
    #[must_use]
    pub fn skip_blank_lines(mut self) -> Self {
        while !self.is_empty() && self.current_line().is_empty() {
            self = self.skip_line().1;
        }
        self
    }

    /// Advance to the start of `line`. Does nothing if `line` is behind.
    #[must_use]
    pub fn seek_line(mut self, line: usize) -> Self {
        while self.line < line && !self.is_empty() {
            self = self.skip_line().1;
        }
        self
    }

    /// Build an error located at this cursor, spanning the current line.
    #[must_use]
    pub fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.position(), self.line_span())
    }
}

#[cfg(test)]
mod tests {
    use crate::Buffer;

    #[test]
    fn test_field_advances_one_line() {
        let buffer = Buffer::from_text("PGrocer\nT-1.00\n^\n");
        let cursor = buffer.cursor();

        assert!(cursor.field("T").is_none());
        let (payee, cursor) = cursor.field("P").unwrap();
        assert_eq!(payee, "Grocer");
        assert_eq!((cursor.line(), cursor.col()), (2, 1));
        assert_eq!(cursor.offset(), 8);

        let (amount, cursor) = cursor.field("T").unwrap();
        assert_eq!(amount, "-1.00");
        assert!(cursor.end_of_record().unwrap().is_empty());
    }

    #[test]
    fn test_field_with_empty_value() {
        let buffer = Buffer::from_text("M\n^\n");
        let (memo, cursor) = buffer.cursor().field("M").unwrap();
        assert_eq!(memo, "");
        assert_eq!(cursor.line(), 2);
    }

    #[test]
    fn test_multi_char_tag() {
        let buffer = Buffer::from_text("L[Savings]\n");
        let cursor = buffer.cursor();
        let (value, _) = cursor.field("L[").unwrap();
        assert_eq!(value, "Savings]");
        let (value, _) = cursor.field("L").unwrap();
        assert_eq!(value, "[Savings]");
    }

    #[test]
    fn test_literal_consumes_header_line() {
        let buffer = Buffer::from_text("!Type:Bank\nD1/ 2'16\n");
        let cursor = buffer.cursor();
        assert!(cursor.literal("!Type:Cat").is_none());
        let cursor = cursor.literal("!Type:Bank").unwrap();
        assert_eq!(cursor.current_line(), "D1/ 2'16");
    }

    #[test]
    fn test_date_matcher() {
        let buffer = Buffer::from_text("D12/25'15\nD2/29'01\nDyesterday\n^\n");
        let cursor = buffer.cursor();

        let (date, cursor) = cursor.date("D").unwrap();
        assert_eq!(date, "2015/12/25");
        assert!(cursor.date("D").is_none());
        let (_, cursor) = cursor.field("D").unwrap();
        assert!(cursor.date("D").is_none());
        assert!(cursor.field("D").is_some());
    }

    #[test]
    fn test_end_of_record_and_section() {
        let buffer = Buffer::from_text("^\n!Type:Cat\n");
        let cursor = buffer.cursor();
        assert!(!cursor.end_of_section());
        let cursor = cursor.end_of_record().unwrap();
        assert!(cursor.end_of_section());
        assert!(cursor.end_of_record().is_none());
    }

    #[test]
    fn test_end_of_input_closes_record_and_section() {
        let buffer = Buffer::from_text("");
        let cursor = buffer.cursor();
        assert!(cursor.is_empty());
        assert!(cursor.end_of_section());
        assert!(cursor.end_of_record().is_some());
    }

    #[test]
    fn test_skip_blank_lines() {
        let buffer = Buffer::from_text("\n\n\nNFood\n");
        let cursor = buffer.cursor().skip_blank_lines();
        assert_eq!(cursor.line(), 4);
        assert_eq!(cursor.current_line(), "NFood");
    }

    #[test]
    fn test_seek_line() {
        let buffer = Buffer::from_text("NA\n^\nNB\n^\n");
        let cursor = buffer.cursor().seek_line(3);
        assert_eq!(cursor.current_line(), "NB");
        assert_eq!(cursor.seek_line(1).line(), 3);
    }

    #[test]
    fn test_error_spans_current_line() {
        let buffer = Buffer::from_text("NFood\nZzz\n");
        let (_, cursor) = buffer.cursor().skip_line();
        let err = cursor.error(crate::ParseErrorKind::AccountCount(0));
        assert_eq!(err.line(), 2);
        assert_eq!(err.span.text(buffer.as_str()), "Zzz");
    }
}
