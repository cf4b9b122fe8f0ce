//! The section loop.

use crate::decode::{
    read_section, AccountDecoder, CategoryDecoder, RecordDecoder, SecurityDecoder, TagDecoder,
    TransactionDecoder,
};
use crate::dispatch::AutoSwitch;
use crate::{Buffer, Cursor, ParseError, ParseErrorKind};
use qifxlat_core::{
    AccountRecord, CategoryRecord, Section, SectionKind, SecurityRecord, TagRecord,
    TransactionRecord,
};
use serde::Serialize;

/// Everything read from one QIF file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReadResult {
    /// The single current account, from an `!Account` section outside of
    /// auto-switch declarations.
    pub account: Option<AccountRecord>,
    /// The account roster declared under `!Option:AutoSwitch`, in input order.
    pub accounts: Vec<AccountRecord>,
    /// Categories from every `!Type:Cat` section.
    pub categories: Option<Section<CategoryRecord>>,
    /// Securities from every `!Type:Security` section.
    pub securities: Option<Section<SecurityRecord>>,
    /// Tags from every `!Type:Tag` section.
    pub tags: Option<Section<TagRecord>>,
    /// Account transactions, in input order.
    pub transactions: Vec<TransactionRecord>,
    /// Memorized transactions.
    pub memorized: Vec<TransactionRecord>,
    /// Price entries.
    pub prices: Vec<TransactionRecord>,
}

impl ReadResult {
    /// Look up an account by name, in the roster first and then the single
    /// current account.
    #[must_use]
    pub fn find_account(&self, name: &str) -> Option<&AccountRecord> {
        self.accounts
            .iter()
            .chain(self.account.as_ref())
            .find(|account| account.name == name)
    }

    /// Every known account: the roster, then the current account if the
    /// roster does not already hold it.
    pub fn all_accounts(&self) -> impl Iterator<Item = &AccountRecord> {
        let current = self
            .account
            .as_ref()
            .filter(|current| !self.accounts.iter().any(|a| a.name == current.name));
        self.accounts.iter().chain(current)
    }

    /// Number of accounts known, roster and current.
    #[must_use]
    pub fn account_count(&self) -> usize {
        self.all_accounts().count()
    }
}

/// Reads sections one at a time, tracking auto-switch state and the active
/// account between them.
#[derive(Debug, Default)]
pub struct Reader {
    state: AutoSwitch,
    active: Option<String>,
    result: ReadResult,
}

impl Reader {
    /// Create a reader in the undeclared state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current auto-switch state.
    #[must_use]
    pub const fn state(&self) -> AutoSwitch {
        self.state
    }

    /// Name of the account transactions currently post against.
    #[must_use]
    pub fn active_account(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Read the section whose header is under `cursor`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseErrorKind::UnrecognizedSection`] if the line is not a
    /// known header, and any error from decoding the section body.
    pub fn read_section<'a>(&mut self, cursor: Cursor<'a>) -> Result<Cursor<'a>, ParseError> {
        let header = cursor.current_line();
        let Some((kind, body)) = SectionKind::from_header(header)
            .and_then(|kind| Some((kind, cursor.literal(kind.header())?)))
        else {
            return Err(cursor.error(ParseErrorKind::UnrecognizedSection(header.to_string())));
        };
        tracing::debug!(line = cursor.line(), section = %kind, state = %self.state, "section");

        match kind {
            SectionKind::OptionAutoSwitch => {
                self.state = self.state.option();
                Ok(body)
            }
            SectionKind::ClearAutoSwitch => {
                self.state = self.state.clear();
                Ok(body)
            }
            SectionKind::Account => self.read_accounts(cursor, body),
            SectionKind::Bank
            | SectionKind::Cash
            | SectionKind::CreditCard
            | SectionKind::Investment
            | SectionKind::OtherAsset
            | SectionKind::OtherLiability => {
                let account = self.active.clone().unwrap_or_default();
                let decoder = TransactionDecoder::new(kind, account);
                let (records, next) = read_section(&decoder, body)?;
                self.result.transactions.extend(records);
                Ok(next)
            }
            SectionKind::Memorized => {
                let decoder = TransactionDecoder::new(kind, "");
                let (records, next) = read_section(&decoder, body)?;
                self.result.memorized.extend(records);
                Ok(next)
            }
            SectionKind::Prices => {
                let decoder = TransactionDecoder::new(kind, "");
                let (records, next) = read_section(&decoder, body)?;
                self.result.prices.extend(records);
                Ok(next)
            }
            SectionKind::Category => {
                accumulate(&mut self.result.categories, &CategoryDecoder, cursor, body)
            }
            SectionKind::Security => {
                accumulate(&mut self.result.securities, &SecurityDecoder, cursor, body)
            }
            SectionKind::Tag => accumulate(&mut self.result.tags, &TagDecoder, cursor, body),
        }
    }

    fn read_accounts<'a>(
        &mut self,
        header: Cursor<'a>,
        body: Cursor<'a>,
    ) -> Result<Cursor<'a>, ParseError> {
        let (records, next) = read_section(&AccountDecoder, body)?;

        if self.state.is_declaring() {
            for record in records {
                if self.result.accounts.iter().any(|a| a.name == record.name) {
                    return Err(body
                        .seek_line(record.line)
                        .error(ParseErrorKind::DuplicateAccount(record.name)));
                }
                tracing::debug!(account = %record.name, "declared account");
                self.result.accounts.push(record);
            }
            return Ok(next);
        }

        let found = records.len();
        let mut records = records.into_iter();
        let (Some(record), None) = (records.next(), records.next()) else {
            return Err(header.error(ParseErrorKind::AccountCount(found)));
        };

        tracing::debug!(account = %record.name, state = %self.state, "active account");
        self.active = Some(record.name.clone());
        if self.state == AutoSwitch::Switching {
            if self.result.find_account(&record.name).is_none() {
                tracing::debug!(account = %record.name, "switched to undeclared account");
                self.result.accounts.push(record);
            }
        } else {
            self.result.account = Some(record);
        }
        Ok(next)
    }

    /// Finish reading and hand over the result.
    #[must_use]
    pub fn finish(self) -> ReadResult {
        self.result
    }
}

/// Decode a section body into a file-level section, creating it on first use.
fn accumulate<'a, D: RecordDecoder>(
    section: &mut Option<Section<D::Record>>,
    decoder: &D,
    header: Cursor<'a>,
    body: Cursor<'a>,
) -> Result<Cursor<'a>, ParseError> {
    let (records, next) = read_section(decoder, body)?;
    section
        .get_or_insert_with(|| Section::new(header.line(), header.col()))
        .records
        .extend(records);
    Ok(next)
}

/// Read a whole buffer.
///
/// # Errors
///
/// Returns the first error found. No partial result is produced.
pub fn read(buffer: &Buffer) -> Result<ReadResult, ParseError> {
    let mut reader = Reader::new();
    let mut cursor = buffer.cursor().skip_blank_lines();
    while !cursor.is_empty() {
        cursor = reader.read_section(cursor)?.skip_blank_lines();
    }
    let result = reader.finish();
    tracing::debug!(
        accounts = result.account_count(),
        transactions = result.transactions.len(),
        memorized = result.memorized.len(),
        prices = result.prices.len(),
        "read complete"
    );
    Ok(result)
}
