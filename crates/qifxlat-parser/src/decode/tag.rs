use super::{read_text, tag_of, unrecognized, RecordDecoder};
use crate::{Cursor, ParseError, ParseErrorKind, Position};
use qifxlat_core::{RecordKind, TagRecord};

/// Decodes `!Type:Tag` records: `N` name, `D` description.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagDecoder;

impl RecordDecoder for TagDecoder {
    type Record = TagRecord;

    fn kind(&self) -> RecordKind {
        RecordKind::Tag
    }

    fn begin(&self, position: Position) -> TagRecord {
        TagRecord {
            line: position.line,
            col: position.col,
            ..TagRecord::default()
        }
    }

    fn decode_field<'a>(
        &self,
        record: &mut TagRecord,
        cursor: Cursor<'a>,
    ) -> Result<Cursor<'a>, ParseError> {
        match tag_of(&cursor) {
            'N' => Ok(read_text(&mut record.name, cursor, "N")),
            'D' => Ok(read_text(&mut record.description, cursor, "D")),
            _ => Err(unrecognized(self.kind(), &cursor)),
        }
    }

    fn finish(&self, record: &TagRecord) -> Result<(), ParseErrorKind> {
        if record.name.is_empty() {
            return Err(ParseErrorKind::MissingRequiredField {
                record: self.kind(),
                field: "N",
            });
        }
        Ok(())
    }
}
