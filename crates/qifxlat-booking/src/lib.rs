//! Transaction normalization and double-entry balancing for qifxlat.
//!
//! This crate provides:
//! - [`normalize`] - turn raw transaction records into transactions that
//!   always carry at least one split
//! - [`balance`] - decide signs and offsetting buckets for a transaction so
//!   it can be written as a balanced double-entry posting
//!
//! # Example
//!
//! ```
//! use qifxlat_booking::{balance, normalize};
//! use qifxlat_core::{SectionKind, TransactionRecord};
//!
//! let mut record = TransactionRecord::new(SectionKind::Bank, 12, 1).with_account("Checking");
//! record.date = "2016/09/03".to_string();
//! record.payee = "Coffee Shop".to_string();
//! record.amount = "-4.50".to_string();
//! record.category = "Dining".to_string();
//!
//! let txns = normalize(&[record]);
//! let entry = balance(&txns[0], "Bank").unwrap();
//!
//! assert_eq!(entry.bucket, "Checking");
//! assert_eq!(entry.postings[0].bucket.name, "Dining");
//! assert_eq!(entry.postings[0].amount, "4.50");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod balance;
mod normalize;

pub use balance::{
    balance, entry_bucket, flip_sign_needed, is_opening_balance, split_bucket, BalanceError,
    Bucket, BucketSource, Entry, Posting, MISSING_CATEGORY, OPENING_BALANCES_BUCKET,
    OPENING_BALANCE_PAYEE,
};
pub use normalize::{normalize, normalize_record, Split, Transaction};
