use super::{read_amount, read_date, read_text, tag_of, unrecognized, RecordDecoder};
use crate::{Cursor, ParseError, ParseErrorKind, Position};
use qifxlat_core::{AccountRecord, RecordKind};

/// Decodes `!Account` records.
///
/// | tag | field |
/// |-----|-------|
/// | `N` | name (required) |
/// | `T` | account type |
/// | `D` | description |
/// | `L` | credit limit |
/// | `$` | statement balance |
/// | `/` | statement balance date |
/// | `B` | balance, kept as the statement balance when `$` is absent |
#[derive(Debug, Clone, Copy, Default)]
pub struct AccountDecoder;

impl RecordDecoder for AccountDecoder {
    type Record = AccountRecord;

    fn kind(&self) -> RecordKind {
        RecordKind::Account
    }

    fn begin(&self, position: Position) -> AccountRecord {
        AccountRecord {
            line: position.line,
            col: position.col,
            ..AccountRecord::default()
        }
    }

    fn decode_field<'a>(
        &self,
        record: &mut AccountRecord,
        cursor: Cursor<'a>,
    ) -> Result<Cursor<'a>, ParseError> {
        let next = match tag_of(&cursor) {
            'N' => read_text(&mut record.name, cursor, "N"),
            'T' => read_text(&mut record.account_type, cursor, "T"),
            'D' => read_text(&mut record.description, cursor, "D"),
            'L' => read_amount(&mut record.credit_limit, cursor, "L"),
            '$' => read_amount(&mut record.statement_balance, cursor, "$"),
            '/' => read_date(&mut record.statement_balance_date, cursor, "/"),
            'B' => {
                let mut balance = String::new();
                let next = read_amount(&mut balance, cursor, "B");
                if record.statement_balance.is_empty() {
                    record.statement_balance = balance;
                }
                next
            }
            _ => return Err(unrecognized(self.kind(), &cursor)),
        };
        Ok(next)
    }

    fn finish(&self, record: &AccountRecord) -> Result<(), ParseErrorKind> {
        if record.name.is_empty() {
            return Err(ParseErrorKind::MissingRequiredField {
                record: self.kind(),
                field: "N",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::read_section;
    use crate::Buffer;

    #[test]
    fn test_decode_account() {
        let source = "NVisa\nTCCard\nDRewards card\nL5,000.00\n$-1,234.56\n/12/31'15\n^\n";
        let buffer = Buffer::from_text(source);
        let (accounts, _) = read_section(&AccountDecoder, buffer.cursor()).unwrap();

        assert_eq!(accounts.len(), 1);
        let visa = &accounts[0];
        assert_eq!(visa.name, "Visa");
        assert_eq!(visa.account_type, "CCard");
        assert_eq!(visa.description, "Rewards card");
        assert_eq!(visa.credit_limit, "5000.00");
        assert_eq!(visa.statement_balance, "-1234.56");
        assert_eq!(visa.statement_balance_date, "2015/12/31");
    }

    #[test]
    fn test_balance_does_not_override_statement_balance() {
        let buffer = Buffer::from_text("NA\nB10.00\n^\nNB\n$1.00\nB2.00\n^\n");
        let (accounts, _) = read_section(&AccountDecoder, buffer.cursor()).unwrap();
        assert_eq!(accounts[0].statement_balance, "10.00");
        assert_eq!(accounts[1].statement_balance, "1.00");
    }

    #[test]
    fn test_account_requires_name() {
        let buffer = Buffer::from_text("TBank\n^\n");
        let err = read_section(&AccountDecoder, buffer.cursor()).unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::MissingRequiredField {
                record: RecordKind::Account,
                field: "N"
            }
        );
    }
}
