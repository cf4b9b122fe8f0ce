//! Ledger output: one balanced entry per transaction.
//!
//! Each entry is a header line, an optional memo comment, one posting per
//! split and a final posting to the balancing bucket with the amount left
//! for `ledger` to infer. Trailing `;;` comments point back at QIF lines.

use super::{account_type, WriteError, WriteSummary};
use qifxlat_booking::{balance, BucketSource, Entry, Transaction, OPENING_BALANCES_BUCKET};
use qifxlat_core::currency;
use qifxlat_parser::ReadResult;
use std::io::Write;

const MISSING_PAYEE: &str = "Missing Payee";

const fn source_name(source: BucketSource) -> &'static str {
    match source {
        BucketSource::Account => "account",
        BucketSource::Category => "category",
        BucketSource::Memo => "memo",
        BucketSource::None => "none",
    }
}

/// Cleared flag, reference number and payee, laid out the way `ledger`
/// reads them.
fn crp(txn: &Transaction) -> String {
    let payee = if txn.payee.is_empty() {
        MISSING_PAYEE
    } else {
        &txn.payee
    };
    match (txn.cleared.as_str(), txn.ref_no.as_str()) {
        ("", "") => format!("  {payee}"),
        ("", ref_no) => format!("  ({ref_no}) {payee}"),
        (cleared, "") => format!("{cleared}  {payee}"),
        (cleared, ref_no) => format!("{cleared}  ({ref_no}) {payee}"),
    }
}

/// `ledger` splits account names on double spaces and treats a leading
/// `check` specially.
fn posting_name(name: &str) -> String {
    if name.contains("  ") || name.starts_with("check") {
        name.replace(' ', "_")
    } else {
        name.to_string()
    }
}

fn bucket_name(bucket: &str) -> String {
    if bucket != OPENING_BALANCES_BUCKET && bucket.contains("  ") {
        format!("{bucket:?}")
    } else {
        bucket.to_string()
    }
}

fn write_entry<W: Write>(
    out: &mut W,
    txn: &Transaction,
    account_type: &str,
    entry: &Entry<'_>,
) -> std::io::Result<()> {
    writeln!(
        out,
        "{} {:<59} ;; {:>6} {:<7} {}",
        txn.date,
        crp(txn),
        txn.line,
        account_type,
        txn.account
    )?;
    if !txn.memo.is_empty() {
        writeln!(out, "    ; {}", txn.memo)?;
    }

    let mut postings: Vec<_> = entry.postings.iter().collect();
    postings.sort_by_key(|posting| posting.line);
    for posting in postings {
        let amount = if posting.amount.is_empty() {
            format!("${}", currency::ZERO)
        } else {
            format!("${}", posting.amount)
        };
        writeln!(
            out,
            "    {:<49}  {:>15} ;; {:>6} {}",
            posting_name(posting.bucket.name),
            amount,
            posting.line,
            source_name(posting.bucket.source)
        )?;
    }
    writeln!(out, "    {}", bucket_name(entry.bucket))
}

/// Write transactions as `ledger` entries, sorted by date and line.
///
/// Entries whose splits are all zero are skipped.
///
/// # Errors
///
/// Fails when the sign rules reject a transaction, and on any I/O error.
pub fn write<W: Write>(
    result: &ReadResult,
    transactions: &[Transaction],
    mut writer: W,
) -> Result<WriteSummary, WriteError> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.line.cmp(&b.line)));

    let mut summary = WriteSummary::default();
    for txn in sorted {
        if txn.is_zero() {
            summary.skipped += 1;
            continue;
        }
        let ty = account_type(result, txn);
        let entry = balance(txn, ty).map_err(|source| WriteError::Balance {
            line: txn.line,
            source,
        })?;
        write_entry(&mut writer, txn, ty, &entry)?;
        summary.written += 1;
    }
    writer.flush()?;

    tracing::info!(
        skipped = summary.skipped,
        written = summary.written,
        "ledger: wrote entries"
    );
    Ok(summary)
}
