//! Error reporting with source context.
//!
//! Parse errors are rendered with ariadne against the text they were found
//! in, labelled at the offending line.

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use qifxlat_parser::ParseError;
use std::io::Write;
use std::path::Path;

/// Format the error code shown in reports, `Q0001` and up.
#[must_use]
pub fn error_code(error: &ParseError) -> String {
    format!("Q{:04}", error.kind_code())
}

/// Clamp a byte span to `source` and widen it to character boundaries.
///
/// Encoding errors carry raw byte offsets, and the lossy text they are
/// rendered against holds a three-byte replacement character there.
fn char_span(source: &str, start: usize, end: usize) -> (usize, usize) {
    let mut start = start.min(source.len());
    while !source.is_char_boundary(start) {
        start -= 1;
    }
    let mut end = end.clamp(start, source.len());
    while !source.is_char_boundary(end) {
        end += 1;
    }
    (start, end)
}

/// Report a parse error to the given writer.
///
/// `source` must be the text the error's span refers to: the normalized
/// buffer for structural errors, the lossily decoded input for encoding
/// errors.
pub fn report_parse_error<W: Write>(
    error: &ParseError,
    source_path: &Path,
    source: &str,
    writer: &mut W,
) -> std::io::Result<()> {
    let path_str = source_path.display().to_string();
    let (start, end) = char_span(source, error.span.start, error.span.end);

    Report::build(ReportKind::Error, (&path_str, start..end))
        .with_code(error_code(error))
        .with_message(error.to_string())
        .with_label(
            Label::new((&path_str, start..end))
                .with_message(error.label())
                .with_color(Color::Red),
        )
        .with_config(
            Config::default()
                .with_compact(false)
                .with_index_type(IndexType::Byte),
        )
        .finish()
        .write((&path_str, Source::from(source)), &mut *writer)
}
