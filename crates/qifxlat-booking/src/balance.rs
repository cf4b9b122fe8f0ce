//! Sign and bucket decisions.
//!
//! QIF amounts are written from the point of view of the account the
//! transaction lives in. A double-entry posting needs the opposite view on
//! the offsetting side, so split amounts are flipped. The one exception is a
//! lone `Opening Balance` split on a cash-like account, which is posted
//! against `Equity:Opening Balances` with its QIF sign.

use crate::normalize::{Split, Transaction};
use qifxlat_core::{currency, AccountType};
use thiserror::Error;

/// Payee Quicken uses for the first transaction of an account.
pub const OPENING_BALANCE_PAYEE: &str = "Opening Balance";

/// Bucket opening balances are posted against.
pub const OPENING_BALANCES_BUCKET: &str = "Equity:Opening Balances";

/// Bucket for splits with no account, category or memo.
pub const MISSING_CATEGORY: &str = "Missing Category";

/// Errors from the sign and balance rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BalanceError {
    /// An opening balance on an account whose type has no sign rule.
    #[error("invalid account type {0:?}")]
    InvalidAccountType(String),
}

/// Where a split's bucket name came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BucketSource {
    /// The split's transfer account.
    Account,
    /// The split's category.
    Category,
    /// The split's memo.
    Memo,
    /// Nothing; the bucket is [`MISSING_CATEGORY`].
    None,
}

/// The offsetting side of one split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket<'a> {
    /// Bucket name.
    pub name: &'a str,
    /// Which split field supplied the name.
    pub source: BucketSource,
}

/// One balanced posting line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posting<'a> {
    /// Source line of the split.
    pub line: usize,
    /// The bucket the split posts to.
    pub bucket: Bucket<'a>,
    /// The split amount, flipped when the entry calls for it.
    pub amount: String,
}

/// A transaction resolved into postings plus the bucket that balances them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<'a> {
    /// The bucket the entry as a whole posts against.
    pub bucket: &'a str,
    /// Whether split amounts were sign-flipped.
    pub flipped: bool,
    /// One posting per split, in split order.
    pub postings: Vec<Posting<'a>>,
}

/// Whether a transaction is a single-split `Opening Balance`.
#[must_use]
pub fn is_opening_balance(txn: &Transaction) -> bool {
    txn.payee == OPENING_BALANCE_PAYEE && txn.splits.len() == 1
}

/// Whether the split amounts of `txn` must be sign-flipped.
///
/// Everything is flipped except a single-split opening balance on a bank,
/// cash, credit card, other asset or other liability account. The account
/// type is only looked at for opening balances.
///
/// # Errors
///
/// Returns [`BalanceError::InvalidAccountType`] for an opening balance on an
/// account of any other type.
pub fn flip_sign_needed(txn: &Transaction, account_type: &str) -> Result<bool, BalanceError> {
    if !is_opening_balance(txn) {
        return Ok(true);
    }
    match account_type.parse::<AccountType>() {
        Ok(ty) if ty.keeps_own_sign() => Ok(false),
        _ => Err(BalanceError::InvalidAccountType(account_type.to_string())),
    }
}

/// The bucket a split posts to: its account, else its category, else its
/// memo, else [`MISSING_CATEGORY`].
#[must_use]
pub fn split_bucket(split: &Split) -> Bucket<'_> {
    let (name, source) = if !split.account.is_empty() {
        (split.account.as_str(), BucketSource::Account)
    } else if !split.category.is_empty() {
        (split.category.as_str(), BucketSource::Category)
    } else if !split.memo.is_empty() {
        (split.memo.as_str(), BucketSource::Memo)
    } else {
        (MISSING_CATEGORY, BucketSource::None)
    };
    Bucket { name, source }
}

/// The bucket that balances the entry: the transaction's account, or
/// [`OPENING_BALANCES_BUCKET`] for opening balances.
#[must_use]
pub fn entry_bucket(txn: &Transaction) -> &str {
    if is_opening_balance(txn) {
        OPENING_BALANCES_BUCKET
    } else {
        &txn.account
    }
}

/// Resolve a transaction into a balanced entry.
///
/// # Errors
///
/// See [`flip_sign_needed`].
pub fn balance<'a>(txn: &'a Transaction, account_type: &str) -> Result<Entry<'a>, BalanceError> {
    let flipped = flip_sign_needed(txn, account_type)?;
    let postings = txn
        .splits
        .iter()
        .map(|split| Posting {
            line: split.line,
            bucket: split_bucket(split),
            amount: if flipped {
                currency::flip_sign(&split.amount)
            } else {
                split.amount.clone()
            },
        })
        .collect();

    Ok(Entry {
        bucket: entry_bucket(txn),
        flipped,
        postings,
    })
}
