use super::{read_amount, read_text, tag_of, unrecognized, value, RecordDecoder};
use crate::{Cursor, ParseError, ParseErrorKind, Position};
use qifxlat_core::{CategoryRecord, RecordKind};

/// Decodes `!Type:Cat` records.
///
/// `I` and `E` mark income and expense categories, `T` marks the category
/// tax related. Their values are ignored. `B` may repeat, once per budget
/// period.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryDecoder;

impl RecordDecoder for CategoryDecoder {
    type Record = CategoryRecord;

    fn kind(&self) -> RecordKind {
        RecordKind::Category
    }

    fn begin(&self, position: Position) -> CategoryRecord {
        CategoryRecord {
            line: position.line,
            col: position.col,
            ..CategoryRecord::default()
        }
    }

    fn decode_field<'a>(
        &self,
        record: &mut CategoryRecord,
        cursor: Cursor<'a>,
    ) -> Result<Cursor<'a>, ParseError> {
        let next = match tag_of(&cursor) {
            'N' => read_text(&mut record.name, cursor, "N"),
            'D' => read_text(&mut record.description, cursor, "D"),
            'R' => read_text(&mut record.tax_schedule, cursor, "R"),
            'T' => {
                record.is_tax_related = true;
                value(cursor, "T").1
            }
            'I' => {
                record.is_income = true;
                value(cursor, "I").1
            }
            'E' => {
                record.is_income = false;
                value(cursor, "E").1
            }
            'B' => {
                let mut amount = String::new();
                let next = read_amount(&mut amount, cursor, "B");
                record.budget.push(amount);
                next
            }
            _ => return Err(unrecognized(self.kind(), &cursor)),
        };
        Ok(next)
    }

    fn finish(&self, record: &CategoryRecord) -> Result<(), ParseErrorKind> {
        if record.name.is_empty() {
            return Err(ParseErrorKind::MissingRequiredField {
                record: self.kind(),
                field: "N",
            });
        }
        Ok(())
    }
}
