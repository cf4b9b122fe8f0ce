//! QIF translation tools.
//!
//! This crate provides the `qifxlat` command, which reads a Quicken
//! Interchange Format export and writes it out as:
//!
//! - CSV: one row per non-zero split, with account and sign information
//! - JSON: accounts, categories and transactions as an indented document
//! - Ledger: balanced double-entry postings for the `ledger` CLI
//!
//! # Example Usage
//!
//! ```bash
//! qifxlat --input export.qif --output-ledger-filename export.ledger
//! QIFXLAT_INPUT=export.qif qifxlat --output-csv-filename export.csv
//! qifxlat --config qifxlat.json
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cmd;
pub mod config;
pub mod report;
pub mod writer;
