//! Core types for qifxlat
//!
//! This crate provides the fundamental types shared by the QIF reader, the
//! transaction normalizer and the writers:
//!
//! - [`SectionKind`] - Every `!`-header a QIF file may contain
//! - [`AccountType`] - The closed set of Quicken account types
//! - [`AccountRecord`], [`CategoryRecord`], [`SecurityRecord`], [`TagRecord`],
//!   [`TransactionRecord`] - Decoded records, one per `^`-terminated block
//! - [`Section`] - An ordered list of records plus where it started
//! - [`date`] and [`currency`] - Lenient value decoding into normalized strings
//!
//! Dates and amounts stay strings. A QIF date is rendered `YYYY/MM/DD` (or the
//! `****/**/**` sentinel), an amount is a signed decimal with two fraction
//! digits (or `0.00` when the input shape is not a currency).
//!
//! # Example
//!
//! ```
//! use qifxlat_core::{currency, date};
//!
//! assert_eq!(date::decode("9/ 3'16"), "2016/09/03");
//! assert_eq!(date::decode("2/29'01"), date::INVALID_DATE);
//! assert_eq!(currency::flip_sign("12.45"), "-12.45");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod currency;
pub mod date;
pub mod kind;
pub mod record;

pub use kind::{AccountType, RecordKind, SectionKind, UnknownAccountType};
pub use record::{
    AccountRecord, CategoryRecord, Section, SecurityRecord, SplitRecord, TagRecord,
    TransactionRecord,
};
