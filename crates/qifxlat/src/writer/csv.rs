//! CSV output: one row per non-zero split.

use super::{account_line, account_type, WriteError, WriteSummary};
use qifxlat_booking::{is_opening_balance, Transaction};
use qifxlat_core::{currency, AccountType};
use qifxlat_parser::ReadResult;
use std::io::Write;

const HEADER: [&str; 16] = [
    "LINE", "SEQ", "DATE", "STATUS", "REFNO", "PAYEE", "MEMO", "ALINE", "ATYPE", "ANAME",
    "SLINE", "TOACCT", "CATEGORY", "MEMO", "AMOUNT", "FLIPPED",
];

/// Short account type label used in the `ATYPE` column.
#[must_use]
pub fn type_label(account_type: &str) -> Option<&'static str> {
    let label = match account_type.parse::<AccountType>().ok()? {
        AccountType::Bank => "BNK",
        AccountType::CreditCard => "CCD",
        AccountType::Cash => "CSH",
        AccountType::OtherAsset => "ASS",
        AccountType::OtherLiability => "LBT",
        AccountType::Portfolio => "BRK",
        AccountType::Retirement => "RET",
        AccountType::Investment => "INV",
    };
    Some(label)
}

fn label_for(account: &str, account_type: &str) -> Result<&'static str, WriteError> {
    type_label(account_type).ok_or_else(|| WriteError::InvalidAccountType {
        account: account.to_string(),
        account_type: account_type.to_string(),
    })
}

/// Write transactions as CSV, sorted by date, account name and line.
///
/// Zero and linked transactions are skipped, as are zero splits. A lone
/// opening balance split on an other-asset or other-liability account has
/// its sign flipped and is marked in the `FLIPPED` column.
///
/// # Errors
///
/// Fails on a declared or posted-to account whose type has no label, and on
/// any I/O error.
pub fn write<W: Write>(
    result: &ReadResult,
    transactions: &[Transaction],
    writer: W,
) -> Result<WriteSummary, WriteError> {
    for account in result.all_accounts() {
        label_for(&account.name, &account.account_type)?;
    }

    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.account.cmp(&b.account))
            .then_with(|| a.line.cmp(&b.line))
    });

    let mut out = ::csv::Writer::from_writer(writer);
    out.write_record(HEADER)?;

    let mut summary = WriteSummary::default();
    for txn in sorted {
        if txn.is_zero() || txn.is_linked() {
            summary.skipped += 1;
            continue;
        }

        let atype = label_for(&txn.account, account_type(result, txn))?;
        let aline = account_line(result, txn).to_string();
        let flip = is_opening_balance(txn) && matches!(atype, "ASS" | "LBT");

        let mut seq = 0;
        for split in txn.splits.iter().filter(|split| !split.is_zero()) {
            seq += 1;
            let mut amount = currency::strip_commas(&split.amount);
            if flip {
                amount = currency::flip_sign(&amount);
            }
            let line = txn.line.to_string();
            let seq = seq.to_string();
            let sline = split.line.to_string();
            out.write_record([
                line.as_str(),
                seq.as_str(),
                txn.date.as_str(),
                txn.cleared.as_str(),
                txn.ref_no.as_str(),
                txn.payee.as_str(),
                txn.memo.as_str(),
                aline.as_str(),
                atype,
                txn.account.as_str(),
                sline.as_str(),
                split.account.as_str(),
                split.category.as_str(),
                split.memo.as_str(),
                amount.as_str(),
                if flip { "true" } else { "false" },
            ])?;
        }
        summary.written += 1;
    }
    out.flush()?;

    tracing::info!(
        skipped = summary.skipped,
        written = summary.written,
        "csv: wrote transactions"
    );
    Ok(summary)
}
