//! Transaction normalization.
//!
//! QIF writes a simple transaction as a single line item spread over the
//! record (`T`, `L`, `M`) and a split transaction as explicit `S`/`$`/`E`
//! groups. Normalizing gives both shapes the same form: a header plus an
//! ordered list of splits.

use qifxlat_core::{currency, SectionKind, TransactionRecord};

/// One line item of a normalized transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Split {
    /// Source line.
    pub line: usize,
    /// Transfer target account, if any.
    pub account: String,
    /// Category, if any.
    pub category: String,
    /// Amount as written in the QIF file.
    pub amount: String,
    /// Memo.
    pub memo: String,
}

impl Split {
    /// Whether the amount is empty or exactly `0.00`.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        currency::is_zero(&self.amount)
    }
}

/// A transaction with its line items made explicit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Source line.
    pub line: usize,
    /// Source column.
    pub col: usize,
    /// The section the record was read from.
    pub kind: SectionKind,
    /// Name of the account the transaction posts against.
    pub account: String,
    /// Date, `YYYY/MM/DD` or the invalid-date sentinel.
    pub date: String,
    /// Payee.
    pub payee: String,
    /// Memo. Moved to the split for single-split transactions.
    pub memo: String,
    /// Cleared status.
    pub cleared: String,
    /// Check or reference number.
    pub ref_no: String,
    /// Security ticker.
    pub ticker: String,
    /// Share price.
    pub price: String,
    /// Share quantity.
    pub quantity: String,
    /// Commission.
    pub commission: String,
    /// Line items, in input order. Never empty.
    pub splits: Vec<Split>,
}

impl Transaction {
    /// Whether every split is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.splits.iter().all(Split::is_zero)
    }

    /// Whether this is the receiving half of a transfer: a single-split
    /// other-liability transaction whose split names an account.
    ///
    /// Both halves of a transfer appear in a QIF export; only the sending
    /// half is written out.
    #[must_use]
    pub fn is_linked(&self) -> bool {
        self.kind == SectionKind::OtherLiability
            && matches!(self.splits.as_slice(), [split] if !split.account.is_empty())
    }
}

/// Normalize raw records, preserving their order.
#[must_use]
pub fn normalize(records: &[TransactionRecord]) -> Vec<Transaction> {
    records.iter().map(normalize_record).collect()
}

/// Normalize one raw record.
#[must_use]
pub fn normalize_record(record: &TransactionRecord) -> Transaction {
    let mut txn = Transaction {
        line: record.line,
        col: record.col,
        kind: record.kind,
        account: record.account.clone(),
        date: record.date.clone(),
        payee: record.payee.clone(),
        memo: record.memo.clone(),
        cleared: record.cleared.clone(),
        ref_no: record.ref_no.clone(),
        ticker: record.ticker.clone(),
        price: record.price.clone(),
        quantity: record.quantity.clone(),
        commission: record.commission.clone(),
        splits: Vec::with_capacity(record.splits.len().max(1)),
    };

    if record.splits.is_empty() {
        let category = if record.category.is_empty() {
            record.ticker.clone()
        } else {
            record.category.clone()
        };
        txn.splits.push(Split {
            line: record.line,
            account: record.to_account.clone(),
            category,
            amount: record.total().to_string(),
            memo: std::mem::take(&mut txn.memo),
        });
        return txn;
    }

    txn.splits.extend(record.splits.iter().map(|split| Split {
        line: split.line,
        account: split.account.clone(),
        category: split.category.clone(),
        amount: split.amount.clone(),
        memo: split.memo.clone(),
    }));
    if let Some(first) = txn.splits.first_mut() {
        if first.account.is_empty() {
            first.account.clone_from(&record.to_account);
        }
    }
    txn
}
