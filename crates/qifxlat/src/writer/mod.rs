//! Output writers.
//!
//! Every writer takes the [`ReadResult`] and the transactions produced by
//! [`qifxlat_booking::normalize`], and returns a [`WriteSummary`] for the
//! command to log.

pub mod csv;
pub mod json;
pub mod ledger;

use qifxlat_booking::{BalanceError, Transaction};
use qifxlat_core::AccountType;
use qifxlat_parser::ReadResult;
use thiserror::Error;

/// Errors raised while writing output.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Writing to the output failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The CSV encoder failed.
    #[error(transparent)]
    Csv(#[from] ::csv::Error),
    /// The JSON encoder failed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// The sign rules rejected a transaction.
    #[error("transaction at line {line}: {source}")]
    Balance {
        /// Source line of the transaction.
        line: usize,
        /// The underlying error.
        #[source]
        source: BalanceError,
    },
    /// An account type the output format has no label for.
    #[error("account '{account}': invalid account type {account_type:?}")]
    InvalidAccountType {
        /// Account name.
        account: String,
        /// The type as written in the QIF file.
        account_type: String,
    },
}

/// Counts reported by a writer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSummary {
    /// Transactions written.
    pub written: usize,
    /// Transactions skipped as zero or linked.
    pub skipped: usize,
}

/// The QIF account type of the account a transaction posts against.
///
/// Declared accounts use their `T` field; anything else falls back to the
/// type of the section the transaction was read from.
pub(crate) fn account_type<'a>(result: &'a ReadResult, txn: &Transaction) -> &'a str {
    match result.find_account(&txn.account) {
        Some(account) => &account.account_type,
        None => txn.kind.account_type().map_or("", AccountType::as_qif),
    }
}

/// Source line of the declaring account record, or 0.
pub(crate) fn account_line(result: &ReadResult, txn: &Transaction) -> usize {
    result
        .find_account(&txn.account)
        .map_or(0, |account| account.line)
}

#[cfg(test)]
pub(crate) mod testing {
    use qifxlat_booking::{normalize, Transaction};
    use qifxlat_parser::{read, Buffer, ReadResult};

    /// A two-account export with a transfer, a split and a zero transaction.
    pub const SAMPLE: &str = "\
!Option:AutoSwitch
!Account
NChecking
TBank
^
NCar Loan
TOth L
^
!Clear:AutoSwitch
!Type:Cat
NGroceries
DFood and household
E
^
NSalary
I
T
RW-2
^
!Account
NChecking
TBank
^
!Type:Bank
D1/ 1'16
POpening Balance
T1,000.00
L[Checking]
^
D1/ 4'16
CX
N101
PCar Loan Co
MJanuary
T-300.00
S[Car Loan]
$-250.00
SInterest Exp
EInterest
$-50.00
^
D1/ 2'16
PGrocer
T-45.10
LGroceries
^
D1/ 3'16
PNothing
T0.00
^
!Account
NCar Loan
TOth L
^
!Type:Oth L
D1/ 4'16
PCar Loan Co
T250.00
L[Checking]
^
";

    pub fn sample() -> (ReadResult, Vec<Transaction>) {
        let result = read(&Buffer::from_text(SAMPLE)).unwrap();
        let txns = normalize(&result.transactions);
        (result, txns)
    }
}
