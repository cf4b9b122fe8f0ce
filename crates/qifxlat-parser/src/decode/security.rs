use super::{read_text, tag_of, unrecognized, RecordDecoder};
use crate::{Cursor, ParseError, ParseErrorKind, Position};
use qifxlat_core::{RecordKind, SecurityRecord};

/// Decodes `!Type:Security` records: `N` name, `S` ticker, `T` type,
/// `G` goal, `D` description.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecurityDecoder;

impl RecordDecoder for SecurityDecoder {
    type Record = SecurityRecord;

    fn kind(&self) -> RecordKind {
        RecordKind::Security
    }

    fn begin(&self, position: Position) -> SecurityRecord {
        SecurityRecord {
            line: position.line,
            col: position.col,
            ..SecurityRecord::default()
        }
    }

    fn decode_field<'a>(
        &self,
        record: &mut SecurityRecord,
        cursor: Cursor<'a>,
    ) -> Result<Cursor<'a>, ParseError> {
        let next = match tag_of(&cursor) {
            'N' => read_text(&mut record.name, cursor, "N"),
            'S' => read_text(&mut record.ticker, cursor, "S"),
            'T' => read_text(&mut record.security_type, cursor, "T"),
            'G' => read_text(&mut record.risk, cursor, "G"),
            'D' => read_text(&mut record.description, cursor, "D"),
            _ => return Err(unrecognized(self.kind(), &cursor)),
        };
        Ok(next)
    }

    fn finish(&self, record: &SecurityRecord) -> Result<(), ParseErrorKind> {
        if record.name.is_empty() {
            return Err(ParseErrorKind::MissingRequiredField {
                record: self.kind(),
                field: "N",
            });
        }
        Ok(())
    }
}
