use super::{read_amount, read_date, read_text, tag_of, unrecognized, value, RecordDecoder};
use crate::{Cursor, ParseError, ParseErrorKind, Position};
use qifxlat_core::{currency, date, RecordKind, SectionKind, SplitRecord, TransactionRecord};

/// Decodes the records of every transaction-bearing section, plus
/// `!Type:Memorized` and `!Type:Prices`.
///
/// Decoded records are tagged with the section they came from and with the
/// name of the account they post against.
#[derive(Debug, Clone)]
pub struct TransactionDecoder {
    section: SectionKind,
    account: String,
}

impl TransactionDecoder {
    /// Create a decoder for one section body.
    #[must_use]
    pub fn new(section: SectionKind, account: impl Into<String>) -> Self {
        Self {
            section,
            account: account.into(),
        }
    }

    /// The split that `$` and `E` lines attach to, opened on demand.
    fn open_split<'r>(record: &'r mut TransactionRecord, line: usize) -> &'r mut SplitRecord {
        if record.splits.is_empty() {
            record.splits.push(SplitRecord {
                line,
                ..SplitRecord::default()
            });
        }
        let last = record.splits.len() - 1;
        &mut record.splits[last]
    }

    fn decode_split<'a>(record: &mut TransactionRecord, cursor: Cursor<'a>) -> Cursor<'a> {
        let (target, next) = value(cursor, "S");
        let mut split = SplitRecord {
            line: cursor.line(),
            ..SplitRecord::default()
        };
        if let Some(target) = target.strip_prefix('[') {
            split.account = transfer_account(target).to_string();
        } else {
            split.category = target.to_string();
        }
        record.splits.push(split);
        next
    }

    fn decode_category<'a>(record: &mut TransactionRecord, cursor: Cursor<'a>) -> Cursor<'a> {
        if let Some((target, next)) = cursor.field("L[") {
            transfer_account(target).clone_into(&mut record.to_account);
            return next;
        }
        read_text(&mut record.category, cursor, "L")
    }

    /// `"TICKER",PRICE,"DATE"`
    fn decode_price<'a>(
        record: &mut TransactionRecord,
        cursor: Cursor<'a>,
    ) -> Result<Cursor<'a>, ParseError> {
        let (entry, next) = value(cursor, "\"");
        let fields: Vec<&str> = entry.trim_end_matches('"').split('"').collect();
        let [ticker, price, when] = fields.as_slice() else {
            return Err(cursor.error(ParseErrorKind::InvalidPriceEntry(
                cursor.current_line().to_string(),
            )));
        };

        (*ticker).clone_into(&mut record.ticker);
        record.price = currency::strip_commas(price);
        record.date = date::decode(when.trim_start());
        Ok(next)
    }
}

impl RecordDecoder for TransactionDecoder {
    type Record = TransactionRecord;

    fn kind(&self) -> RecordKind {
        match self.section {
            SectionKind::Memorized => RecordKind::Memorized,
            SectionKind::Prices => RecordKind::Price,
            _ => RecordKind::Transaction,
        }
    }

    fn begin(&self, position: Position) -> TransactionRecord {
        TransactionRecord::new(self.section, position.line, position.col)
            .with_account(self.account.as_str())
    }

    fn decode_field<'a>(
        &self,
        record: &mut TransactionRecord,
        cursor: Cursor<'a>,
    ) -> Result<Cursor<'a>, ParseError> {
        let tag = tag_of(&cursor);
        let next = match tag {
            'D' => read_date(&mut record.date, cursor, "D"),
            'T' => read_amount(&mut record.amount, cursor, "T"),
            'U' => read_amount(&mut record.amount_u, cursor, "U"),
            'M' => read_text(&mut record.memo, cursor, "M"),
            'C' => read_text(&mut record.cleared, cursor, "C"),
            'N' => read_text(&mut record.ref_no, cursor, "N"),
            'P' => read_text(&mut record.payee, cursor, "P"),
            'A' => {
                let (line, next) = value(cursor, "A");
                record.address.push(line.to_string());
                next
            }
            'L' => Self::decode_category(record, cursor),
            'S' => Self::decode_split(record, cursor),
            '$' => {
                let split = Self::open_split(record, cursor.line());
                read_amount(&mut split.amount, cursor, "$")
            }
            'E' => {
                let split = Self::open_split(record, cursor.line());
                read_text(&mut split.memo, cursor, "E")
            }
            'Y' => read_text(&mut record.ticker, cursor, "Y"),
            'I' => {
                let (price, next) = value(cursor, "I");
                record.price = currency::strip_commas(price);
                next
            }
            'Q' => read_text(&mut record.quantity, cursor, "Q"),
            'O' => read_amount(&mut record.commission, cursor, "O"),
            'K' => read_text(&mut record.memorized_type, cursor, "K"),
            'F' => {
                record.reimbursable = true;
                value(cursor, "F").1
            }
            '1'..='7' if self.section == SectionKind::Memorized => {
                let mut amount = String::new();
                let next = read_amount(&mut amount, cursor, &tag.to_string());
                record.budget.push(amount);
                next
            }
            '"' if self.section == SectionKind::Prices => Self::decode_price(record, cursor)?,
            _ => return Err(unrecognized(self.kind(), &cursor)),
        };
        Ok(next)
    }

    fn finish(&self, record: &TransactionRecord) -> Result<(), ParseErrorKind> {
        let (missing, field) = match self.section {
            SectionKind::Memorized => (record.memorized_type.is_empty(), "K"),
            _ => (record.date.is_empty(), "D"),
        };
        if missing {
            return Err(ParseErrorKind::MissingRequiredField {
                record: self.kind(),
                field,
            });
        }
        Ok(())
    }
}

/// The account of a `[Account]/Class` transfer, with the leading `[`
/// already removed.
fn transfer_account(target: &str) -> &str {
    target.split_once(']').map_or(target, |(account, _class)| account)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::read_section;
    use crate::Buffer;

    fn decode(section: SectionKind, source: &str) -> Result<Vec<TransactionRecord>, ParseError> {
        let buffer = Buffer::from_text(source);
        let decoder = TransactionDecoder::new(section, "Checking");
        read_section(&decoder, buffer.cursor()).map(|(records, _)| records)
    }

    // ===== Bank transactions =====

    #[test]
    fn test_simple_bank_transaction() {
        let source = "D1/ 4'16\nT-1,500.00\nC*\nN1001\nPLandlord\nMJanuary rent\nLHousing:Rent\n^\n";
        let txns = decode(SectionKind::Bank, source).unwrap();

        assert_eq!(txns.len(), 1);
        let txn = &txns[0];
        assert_eq!(txn.kind, SectionKind::Bank);
        assert_eq!(txn.account, "Checking");
        assert_eq!(txn.date, "2016/01/04");
        assert_eq!(txn.amount, "-1500.00");
        assert_eq!(txn.cleared, "*");
        assert_eq!(txn.ref_no, "1001");
        assert_eq!(txn.payee, "Landlord");
        assert_eq!(txn.memo, "January rent");
        assert_eq!(txn.category, "Housing:Rent");
        assert!(txn.to_account.is_empty());
        assert!(txn.splits.is_empty());
    }

    #[test]
    fn test_transfer_strips_brackets_and_class() {
        let txns = decode(SectionKind::Bank, "D1/ 4'16\nT-50.00\nL[Savings]/Emergency\n^\n").unwrap();
        assert_eq!(txns[0].to_account, "Savings");
        assert!(txns[0].category.is_empty());
    }

    #[test]
    fn test_split_transfer_strips_brackets_and_class() {
        let source = "D1/ 4'16\nT-50.00\nL[Savings]/Emergency\nS[Savings]/Emergency\n$-50.00\n^\n";
        let txns = decode(SectionKind::Bank, source).unwrap();
        assert_eq!(txns[0].to_account, "Savings");
        assert_eq!(txns[0].splits[0].account, "Savings");
        assert!(txns[0].splits[0].category.is_empty());
    }

    #[test]
    fn test_address_lines_append() {
        let txns = decode(SectionKind::Bank, "D1/ 4'16\nA1 Main St\nASpringfield\n^\n").unwrap();
        assert_eq!(txns[0].address, vec!["1 Main St", "Springfield"]);
    }

    #[test]
    fn test_invalid_date_and_amount_are_lenient() {
        let txns = decode(SectionKind::Bank, "D2/30'16\nT12.5\nU1.00\n^\n").unwrap();
        assert_eq!(txns[0].date, date::INVALID_DATE);
        assert_eq!(txns[0].amount, "0.00");
        assert_eq!(txns[0].amount_u, "1.00");
    }

    #[test]
    fn test_reimbursable_flag() {
        let txns = decode(SectionKind::CreditCard, "D1/ 4'16\nF\n^\n").unwrap();
        assert!(txns[0].reimbursable);
    }

    // ===== Splits =====

    #[test]
    fn test_explicit_splits() {
        let source = "D3/15'16\nT-100.00\nPCostco\nSGroceries\nEFood\n$-60.00\nS[Savings]\n$-40.00\n^\n";
        let txns = decode(SectionKind::Bank, source).unwrap();
        let splits = &txns[0].splits;

        assert_eq!(splits.len(), 2);
        assert_eq!(splits[0].category, "Groceries");
        assert_eq!(splits[0].memo, "Food");
        assert_eq!(splits[0].amount, "-60.00");
        assert_eq!(splits[0].line, 4);
        assert_eq!(splits[1].account, "Savings");
        assert!(splits[1].category.is_empty());
        assert_eq!(splits[1].amount, "-40.00");
        assert_eq!(splits[1].line, 7);
    }

    #[test]
    fn test_split_amount_without_category_opens_split() {
        let txns = decode(SectionKind::Bank, "D3/15'16\n$-5.00\nEfee\n^\n").unwrap();
        assert_eq!(txns[0].splits.len(), 1);
        assert_eq!(txns[0].splits[0].amount, "-5.00");
        assert_eq!(txns[0].splits[0].memo, "fee");
    }

    // ===== Investment, memorized and prices =====

    #[test]
    fn test_investment_fields() {
        let source = "D6/ 1'16\nNBuy\nYVFINX\nI1,190.25\nQ10\nO9.95\nT11,912.45\n^\n";
        let txns = decode(SectionKind::Investment, source).unwrap();
        let txn = &txns[0];
        assert_eq!(txn.ref_no, "Buy");
        assert_eq!(txn.ticker, "VFINX");
        assert_eq!(txn.price, "1190.25");
        assert_eq!(txn.quantity, "10");
        assert_eq!(txn.commission, "9.95");
        assert_eq!(txn.amount, "11912.45");
    }

    #[test]
    fn test_memorized_budget_amounts() {
        let source = "KC\nPGas Co\nT-45.00\n1-45.00\n2-50.00\n^\n";
        let txns = decode(SectionKind::Memorized, source).unwrap();
        assert_eq!(txns[0].memorized_type, "C");
        assert_eq!(txns[0].budget, vec!["-45.00", "-50.00"]);
    }

    #[test]
    fn test_memorized_requires_type() {
        let err = decode(SectionKind::Memorized, "PGas Co\nT-45.00\n^\n").unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::MissingRequiredField {
                record: RecordKind::Memorized,
                field: "K"
            }
        );
    }

    #[test]
    fn test_budget_tags_only_in_memorized() {
        let err = decode(SectionKind::Bank, "D1/ 4'16\n1-45.00\n^\n").unwrap_err();
        assert_eq!(err.to_string(), "2:1: unrecognized field in transaction record: '1-45.00'");
    }

    #[test]
    fn test_price_entry() {
        let txns = decode(SectionKind::Prices, "\"VFINX\",1,190.25,\" 1/ 4'16\"\n^\n").unwrap();
        let price = &txns[0];
        assert_eq!(price.ticker, "VFINX");
        assert_eq!(price.price, "1190.25");
        assert_eq!(price.date, "2016/01/04");
    }

    #[test]
    fn test_malformed_price_entry() {
        let err = decode(SectionKind::Prices, "\"VFINX\",1.00\n^\n").unwrap_err();
        assert_eq!(err.kind_code(), 8);
    }

    // ===== Errors =====

    #[test]
    fn test_transaction_requires_date() {
        let err = decode(SectionKind::Bank, "T-1.00\n^\n").unwrap_err();
        assert_eq!(err.to_string(), "1:1: transaction record is missing required field: D");
    }

    #[test]
    fn test_stray_field_tag() {
        let err = decode(SectionKind::Bank, "D1/ 4'16\nT-1.00\nZoops\n^\n").unwrap_err();
        assert_eq!(err.line(), 3);
        assert!(err.to_string().starts_with("3:Z:"));
    }
}
