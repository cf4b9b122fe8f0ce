//! Parse error types.

use crate::{Position, Span};
use qifxlat_core::RecordKind;
use std::fmt;
use thiserror::Error;

/// A parse error with location information.
///
/// Reading stops at the first error; there is no recovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The kind of error.
    pub kind: ParseErrorKind,
    /// Line and column where the error occurred.
    pub position: Position,
    /// The span of the offending text in the normalized buffer.
    pub span: Span,
}

impl ParseError {
    /// Create a new parse error.
    #[must_use]
    pub const fn new(kind: ParseErrorKind, position: Position, span: Span) -> Self {
        Self {
            kind,
            position,
            span,
        }
    }

    /// Line of the error (1-based).
    #[must_use]
    pub const fn line(&self) -> usize {
        self.position.line
    }

    /// Column of the error (1-based).
    #[must_use]
    pub const fn col(&self) -> usize {
        self.position.col
    }

    /// Get a numeric code for the error kind.
    #[must_use]
    pub const fn kind_code(&self) -> u32 {
        match &self.kind {
            ParseErrorKind::InvalidEncoding => 1,
            ParseErrorKind::MissingRequiredField { .. } => 2,
            ParseErrorKind::MissingTerminator(_) => 3,
            ParseErrorKind::UnrecognizedFieldTag { .. } => 4,
            ParseErrorKind::UnrecognizedSection(_) => 5,
            ParseErrorKind::DuplicateAccount(_) => 6,
            ParseErrorKind::AccountCount(_) => 7,
            ParseErrorKind::InvalidPriceEntry(_) => 8,
        }
    }

    /// Get a short label for the error.
    #[must_use]
    pub const fn label(&self) -> &str {
        match &self.kind {
            ParseErrorKind::InvalidEncoding => "invalid UTF-8",
            ParseErrorKind::MissingRequiredField { .. } => "record is incomplete",
            ParseErrorKind::MissingTerminator(_) => "record is not closed with '^'",
            ParseErrorKind::UnrecognizedFieldTag { .. } => "unknown field",
            ParseErrorKind::UnrecognizedSection(_) => "unknown section header",
            ParseErrorKind::DuplicateAccount(_) => "account declared twice",
            ParseErrorKind::AccountCount(_) => "expected a single account",
            ParseErrorKind::InvalidPriceEntry(_) => "malformed price entry",
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Unknown tags are reported as `line:tag`, everything else as `line:col`.
        match &self.kind {
            ParseErrorKind::UnrecognizedFieldTag { tag, .. } => {
                write!(f, "{}:{tag}: {}", self.position.line, self.kind)
            }
            _ => write!(f, "{}: {}", self.position, self.kind),
        }
    }
}

impl std::error::Error for ParseError {}

/// Kinds of parse errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// The input is not valid UTF-8.
    #[error("invalid UTF-8 character")]
    InvalidEncoding,
    /// A record closed without a field its kind requires.
    #[error("{record} record is missing required field: {field}")]
    MissingRequiredField {
        /// The record being decoded.
        record: RecordKind,
        /// Name of the missing field.
        field: &'static str,
    },
    /// A section ended while a record was still open.
    #[error("{0} record is missing its '^' terminator")]
    MissingTerminator(RecordKind),
    /// A field line whose tag the record kind does not know.
    #[error("unrecognized field in {record} record: '{text}'")]
    UnrecognizedFieldTag {
        /// The record being decoded.
        record: RecordKind,
        /// The tag character.
        tag: char,
        /// The whole offending line.
        text: String,
    },
    /// A `!` line that is not a known header, or a field line where a header
    /// was expected.
    #[error("unrecognized section '{0}'")]
    UnrecognizedSection(String),
    /// The same account name declared twice in a roster.
    #[error("duplicate account '{0}'")]
    DuplicateAccount(String),
    /// A single-account `!Account` section held some other number of records.
    #[error("expected exactly one account record, found {0}")]
    AccountCount(usize),
    /// A price line that is not a `"ticker",price,"date"` triple.
    #[error("invalid price entry '{0}'")]
    InvalidPriceEntry(String),
}
