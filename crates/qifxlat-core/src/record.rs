//! Decoded QIF records.
//!
//! Every record remembers the line and column its first field started on.
//! Free-text fields hold the raw field text; an empty string means the field
//! was absent. Dates and amounts hold the normalized strings produced by
//! [`crate::date`] and [`crate::currency`].

use crate::kind::SectionKind;
use serde::{Deserialize, Serialize};

/// An ordered list of records of one kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section<T> {
    /// Line of the section header (1-based).
    pub line: usize,
    /// Column of the section header (1-based).
    pub col: usize,
    /// The records, in input order.
    pub records: Vec<T>,
}

impl<T> Section<T> {
    /// Create an empty section starting at the given position.
    #[must_use]
    pub const fn new(line: usize, col: usize) -> Self {
        Self {
            line,
            col,
            records: Vec::new(),
        }
    }

    /// Number of records in the section.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the section holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// An account from an `!Account` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    /// Source line.
    pub line: usize,
    /// Source column.
    pub col: usize,
    /// `N` - account name.
    pub name: String,
    /// `T` - account type, as written (`Bank`, `CCard`, `Oth L`, ...).
    #[serde(rename = "type")]
    pub account_type: String,
    /// `D` - description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// `L` - credit limit (credit card accounts only).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub credit_limit: String,
    /// `$` - statement balance.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub statement_balance: String,
    /// `/` - statement balance date.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub statement_balance_date: String,
}

/// A category from a `!Type:Cat` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    /// Source line.
    pub line: usize,
    /// Source column.
    pub col: usize,
    /// `N` - category name, `Category:Subcategory`.
    pub name: String,
    /// `D` - description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// `I` - income category. Quicken assumes expense when neither is given.
    pub is_income: bool,
    /// `T` - tax related.
    pub is_tax_related: bool,
    /// `R` - tax schedule information.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tax_schedule: String,
    /// `B` - budget amounts, in input order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub budget: Vec<String>,
}

impl CategoryRecord {
    /// Whether this is an expense category.
    #[must_use]
    pub const fn is_expense(&self) -> bool {
        !self.is_income
    }
}

/// A security from a `!Type:Security` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityRecord {
    /// Source line.
    pub line: usize,
    /// Source column.
    pub col: usize,
    /// `N` - security name.
    pub name: String,
    /// `S` - ticker symbol.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ticker: String,
    /// `T` - security type (`Stock`, `Mutual Fund`, ...).
    #[serde(default, rename = "type", skip_serializing_if = "String::is_empty")]
    pub security_type: String,
    /// `G` - investment goal or risk.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub risk: String,
    /// `D` - description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// A tag from a `!Type:Tag` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRecord {
    /// Source line.
    pub line: usize,
    /// Source column.
    pub col: usize,
    /// `N` - tag name.
    pub name: String,
    /// `D` - description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// One explicit split line (`S` / `$` / `E`) of a transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitRecord {
    /// Line the split started on.
    pub line: usize,
    /// Transfer target, when the `S` value was `[Account]`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub account: String,
    /// Category, when the `S` value was not bracketed.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub category: String,
    /// `$` - split amount.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub amount: String,
    /// `E` - split memo.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub memo: String,
}

/// A transaction as read from a transaction-bearing, memorized or price
/// section, before normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Source line.
    pub line: usize,
    /// Source column.
    pub col: usize,
    /// The section this record was read from.
    pub kind: SectionKind,
    /// Name of the account this transaction posts against, if one was active.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub account: String,
    /// `D` - date, `YYYY/MM/DD` or the invalid-date sentinel.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub date: String,
    /// `P` - payee.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub payee: String,
    /// `M` - memo.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub memo: String,
    /// `C` - cleared status (`*`, `X`, `c`, ...).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cleared: String,
    /// `N` - check or reference number (the action, for investments).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ref_no: String,
    /// `T` - amount.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub amount: String,
    /// `U` - amount, as written by newer Quicken versions.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub amount_u: String,
    /// `L` - category, when not a transfer.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub category: String,
    /// `L[...]` - transfer target account.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub to_account: String,
    /// `A` - address lines; up to five, the sixth is an optional message.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub address: Vec<String>,
    /// `Y` or price entry - security ticker.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ticker: String,
    /// `I` or price entry - share price.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub price: String,
    /// `Q` - share quantity.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub quantity: String,
    /// `O` - commission.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub commission: String,
    /// `K` - memorized transaction type.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub memorized_type: String,
    /// `1`..`7` - amortization and budget amounts of memorized transactions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub budget: Vec<String>,
    /// `F` - flagged as reimbursable.
    #[serde(default)]
    pub reimbursable: bool,
    /// Explicit splits, in input order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub splits: Vec<SplitRecord>,
}

impl TransactionRecord {
    /// Create an empty record of the given section kind.
    #[must_use]
    pub fn new(kind: SectionKind, line: usize, col: usize) -> Self {
        Self {
            line,
            col,
            kind,
            account: String::new(),
            date: String::new(),
            payee: String::new(),
            memo: String::new(),
            cleared: String::new(),
            ref_no: String::new(),
            amount: String::new(),
            amount_u: String::new(),
            category: String::new(),
            to_account: String::new(),
            address: Vec::new(),
            ticker: String::new(),
            price: String::new(),
            quantity: String::new(),
            commission: String::new(),
            memorized_type: String::new(),
            budget: Vec::new(),
            reimbursable: false,
            splits: Vec::new(),
        }
    }

    /// Attach this record to an account.
    #[must_use]
    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.account = account.into();
        self
    }

    /// The top-level amount: `T`, or `U` when `T` is absent.
    #[must_use]
    pub fn total(&self) -> &str {
        if self.amount.is_empty() {
            &self.amount_u
        } else {
            &self.amount
        }
    }
}
