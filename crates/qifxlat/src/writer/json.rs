//! JSON output: accounts, categories and normalized transactions.

use super::{account_type, WriteError, WriteSummary};
use qifxlat_booking::{Split, Transaction};
use qifxlat_core::{AccountRecord, AccountType, CategoryRecord};
use qifxlat_parser::ReadResult;
use serde::Serialize;
use std::io::Write;

/// The whole output document.
#[derive(Debug, Serialize)]
pub struct Document<'a> {
    /// Declared accounts.
    pub accounts: Vec<Account<'a>>,
    /// Categories.
    pub categories: Vec<Category<'a>>,
    /// Transactions, in input order.
    pub transactions: Vec<JsonTransaction<'a>>,
}

/// An account entry.
#[derive(Debug, Serialize)]
pub struct Account<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    name: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    credit_limit: &'a str,
    #[serde(rename = "descr", skip_serializing_if = "str::is_empty")]
    description: &'a str,
    #[serde(rename = "balance", skip_serializing_if = "str::is_empty")]
    statement_balance: &'a str,
    #[serde(rename = "statement_date", skip_serializing_if = "str::is_empty")]
    statement_balance_date: &'a str,
}

/// A category entry.
#[derive(Debug, Serialize)]
pub struct Category<'a> {
    name: &'a str,
    #[serde(rename = "descr", skip_serializing_if = "str::is_empty")]
    description: &'a str,
    #[serde(skip_serializing_if = "is_false")]
    income: bool,
    #[serde(skip_serializing_if = "is_false")]
    tax_related: bool,
    #[serde(skip_serializing_if = "str::is_empty")]
    tax_schedule: &'a str,
}

/// A transaction entry.
#[derive(Debug, Serialize)]
pub struct JsonTransaction<'a> {
    line: usize,
    #[serde(rename = "type", skip_serializing_if = "str::is_empty")]
    kind: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    date: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    account: &'a str,
    #[serde(rename = "cleared_status", skip_serializing_if = "str::is_empty")]
    cleared: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    memo: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    payee: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    ref_no: &'a str,
    #[serde(rename = "lines", skip_serializing_if = "Vec::is_empty")]
    splits: Vec<JsonSplit<'a>>,
}

/// A split entry.
#[derive(Debug, Serialize)]
pub struct JsonSplit<'a> {
    line: usize,
    #[serde(skip_serializing_if = "str::is_empty")]
    account: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    amount: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    category: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    memo: &'a str,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_false(value: &bool) -> bool {
    !*value
}

/// Camel-case account type label used in the JSON `type` field.
#[must_use]
pub fn type_label(account_type: &str) -> Option<&'static str> {
    let label = match account_type.parse::<AccountType>().ok()? {
        AccountType::Bank => "bank",
        AccountType::CreditCard => "creditCard",
        AccountType::Cash => "cash",
        AccountType::OtherAsset => "asset",
        AccountType::OtherLiability => "liability",
        AccountType::Portfolio => "brokerage",
        AccountType::Retirement => "retirement",
        AccountType::Investment => "investment",
    };
    Some(label)
}

fn account(record: &AccountRecord) -> Result<Account<'_>, WriteError> {
    let kind =
        type_label(&record.account_type).ok_or_else(|| WriteError::InvalidAccountType {
            account: record.name.clone(),
            account_type: record.account_type.clone(),
        })?;
    Ok(Account {
        kind,
        name: &record.name,
        credit_limit: &record.credit_limit,
        description: &record.description,
        statement_balance: &record.statement_balance,
        statement_balance_date: &record.statement_balance_date,
    })
}

fn category(record: &CategoryRecord) -> Category<'_> {
    Category {
        name: &record.name,
        description: &record.description,
        income: record.is_income,
        tax_related: record.is_tax_related,
        tax_schedule: &record.tax_schedule,
    }
}

fn split(split: &Split) -> JsonSplit<'_> {
    JsonSplit {
        line: split.line,
        account: &split.account,
        amount: &split.amount,
        category: &split.category,
        memo: &split.memo,
    }
}

/// Build the output document.
///
/// # Errors
///
/// Fails on a declared account whose type has no label.
pub fn document<'a>(
    result: &'a ReadResult,
    transactions: &'a [Transaction],
) -> Result<Document<'a>, WriteError> {
    let accounts = result.all_accounts().map(account).collect::<Result<_, _>>()?;
    let categories = result
        .categories
        .iter()
        .flat_map(|section| &section.records)
        .map(category)
        .collect();
    let transactions = transactions
        .iter()
        .map(|txn| JsonTransaction {
            line: txn.line,
            kind: account_type(result, txn),
            date: &txn.date,
            account: &txn.account,
            cleared: &txn.cleared,
            memo: &txn.memo,
            payee: &txn.payee,
            ref_no: &txn.ref_no,
            splits: txn.splits.iter().map(split).collect(),
        })
        .collect();

    Ok(Document {
        accounts,
        categories,
        transactions,
    })
}

/// Write the document as indented JSON.
///
/// # Errors
///
/// See [`document`]; also fails on any I/O error.
pub fn write<W: Write>(
    result: &ReadResult,
    transactions: &[Transaction],
    mut writer: W,
) -> Result<WriteSummary, WriteError> {
    let doc = document(result, transactions)?;
    serde_json::to_writer_pretty(&mut writer, &doc)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    tracing::info!(
        accounts = doc.accounts.len(),
        categories = doc.categories.len(),
        transactions = doc.transactions.len(),
        "json: wrote document"
    );
    Ok(WriteSummary {
        written: doc.transactions.len(),
        skipped: 0,
    })
}
