//! QIF reader for qifxlat.
//!
//! This crate turns the bytes of a Quicken Interchange Format export into a
//! [`ReadResult`]: the accounts, categories, securities, tags, transactions,
//! memorized transactions and prices the file holds.
//!
//! Reading happens in three layers:
//!
//! - [`Buffer`] validates UTF-8 and normalizes line endings and whitespace
//! - [`Cursor`] provides line matchers (`field`, `date`, `end_of_record`, ...)
//! - [`Reader`] dispatches on section headers, tracks the auto-switch state
//!   and runs one [`decode::RecordDecoder`] per section body
//!
//! The first structural error stops the read. Malformed dates and amounts are
//! not structural: they decode to `****/**/**` and `0.00`.
//!
//! # Example
//!
//! ```
//! use qifxlat_parser::{read, Buffer};
//!
//! let source = b"!Type:Bank\nD9/ 3'16\nPCoffee Shop\nT-4.50\n^\n";
//! let buffer = Buffer::new(source).unwrap();
//! let result = read(&buffer).unwrap();
//!
//! assert_eq!(result.transactions.len(), 1);
//! assert_eq!(result.transactions[0].date, "2016/09/03");
//! assert_eq!(result.transactions[0].amount, "-4.50");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod buffer;
mod cursor;
pub mod decode;
mod dispatch;
mod error;
mod reader;
mod span;

pub use buffer::Buffer;
pub use cursor::Cursor;
pub use dispatch::AutoSwitch;
pub use error::{ParseError, ParseErrorKind};
pub use reader::{read, ReadResult, Reader};
pub use span::{Position, Span};

/// Validate, normalize and read raw QIF bytes.
///
/// # Errors
///
/// Returns the first encoding or structural error.
pub fn read_bytes(input: &[u8]) -> Result<ReadResult, ParseError> {
    read(&Buffer::new(input)?)
}
