//! Record decoders.
//!
//! Each record kind implements [`RecordDecoder`]; [`read_section`] drives any
//! of them over one section body. A record opens on its first field line,
//! closes on `^`, and the section ends at the next `!` line or end of input.

mod account;
mod category;
mod security;
mod tag;
mod transaction;

pub use account::AccountDecoder;
pub use category::CategoryDecoder;
pub use security::SecurityDecoder;
pub use tag::TagDecoder;
pub use transaction::TransactionDecoder;

use crate::{Cursor, ParseError, ParseErrorKind, Position, Span};
use qifxlat_core::{currency, date, RecordKind};

/// Decodes the field lines of one record kind.
pub trait RecordDecoder {
    /// The record produced.
    type Record;

    /// The record kind, for error messages.
    fn kind(&self) -> RecordKind;

    /// Start a new, empty record at the given position.
    fn begin(&self, position: Position) -> Self::Record;

    /// Decode the field line under `cursor` into `record`, returning a cursor
    /// at the next line.
    ///
    /// # Errors
    ///
    /// Returns [`ParseErrorKind::UnrecognizedFieldTag`] for tags this record
    /// kind does not know.
    fn decode_field<'a>(
        &self,
        record: &mut Self::Record,
        cursor: Cursor<'a>,
    ) -> Result<Cursor<'a>, ParseError>;

    /// Check a closed record for its required fields.
    ///
    /// # Errors
    ///
    /// Returns the missing field as a [`ParseErrorKind::MissingRequiredField`].
    fn finish(&self, record: &Self::Record) -> Result<(), ParseErrorKind>;
}

/// Read records until the end of the current section.
///
/// Blank lines are ignored. Empty records (a `^` with no fields before it)
/// produce nothing.
///
/// # Errors
///
/// Fails if a record is still open when the section ends, if a closed record
/// lacks a required field, or if a field line cannot be decoded.
pub fn read_section<'a, D: RecordDecoder>(
    decoder: &D,
    mut cursor: Cursor<'a>,
) -> Result<(Vec<D::Record>, Cursor<'a>), ParseError> {
    let mut records = Vec::new();
    let mut open: Option<(Position, Span, D::Record)> = None;

    loop {
        cursor = cursor.skip_blank_lines();

        if cursor.end_of_section() {
            if let Some((position, span, _)) = open {
                return Err(ParseError::new(
                    ParseErrorKind::MissingTerminator(decoder.kind()),
                    position,
                    span,
                ));
            }
            return Ok((records, cursor));
        }

        if let Some(next) = cursor.end_of_record() {
            if let Some((position, span, record)) = open.take() {
                decoder
                    .finish(&record)
                    .map_err(|kind| ParseError::new(kind, position, span))?;
                records.push(record);
            }
            cursor = next;
            continue;
        }

        let (_, _, record) = open.get_or_insert_with(|| {
            (
                cursor.position(),
                cursor.line_span(),
                decoder.begin(cursor.position()),
            )
        });
        cursor = decoder.decode_field(record, cursor)?;
    }
}

/// The value of a field whose tag has already been recognized.
fn value<'a>(cursor: Cursor<'a>, tag: &str) -> (&'a str, Cursor<'a>) {
    cursor.field(tag).unwrap_or_else(|| cursor.skip_line())
}

/// Store a free-text field.
fn read_text<'a>(slot: &mut String, cursor: Cursor<'a>, tag: &str) -> Cursor<'a> {
    let (raw, next) = value(cursor, tag);
    raw.clone_into(slot);
    next
}

/// Store a date field, leniently: anything that is not a date becomes the
/// sentinel.
fn read_date<'a>(slot: &mut String, cursor: Cursor<'a>, tag: &str) -> Cursor<'a> {
    if let Some((decoded, next)) = cursor.date(tag) {
        *slot = decoded;
        return next;
    }
    let (raw, next) = value(cursor, tag);
    tracing::debug!(line = cursor.line(), raw, "unparseable date");
    date::INVALID_DATE.clone_into(slot);
    next
}

/// Store a currency field, leniently: anything that is not an amount
/// becomes zero.
fn read_amount<'a>(slot: &mut String, cursor: Cursor<'a>, tag: &str) -> Cursor<'a> {
    let (raw, next) = value(cursor, tag);
    *slot = currency::normalize(raw);
    if !raw.is_empty() && currency::parse(raw).is_none() {
        tracing::debug!(line = cursor.line(), raw, "unparseable amount");
    }
    next
}

/// The error for a field line whose tag `record` does not know.
fn unrecognized(record: RecordKind, cursor: &Cursor<'_>) -> ParseError {
    let text = cursor.current_line();
    cursor.error(ParseErrorKind::UnrecognizedFieldTag {
        record,
        tag: text.chars().next().unwrap_or_default(),
        text: text.to_string(),
    })
}

/// The first character of the line under `cursor`.
fn tag_of(cursor: &Cursor<'_>) -> char {
    cursor.current_line().chars().next().unwrap_or_default()
}
