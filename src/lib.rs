//! `ringwidth` - Reader and writer for RWL tree-ring width files
//!
//! RWL (the "Tucson" decadal format) is the fixed-width text format most
//! dendrochronology software uses to exchange ring-width series. A file is a
//! sequence of series, each spread over several lines with no explicit record
//! delimiter.
//!
//! # Example
//! ```
//! use ringwidth::{Record, RwlReader, RwlWriter, WriteOptions};
//!
//! let records = vec![Record::new("ABC001", 1995, vec![1.2, 1.35, 0.98])];
//!
//! let bytes = RwlWriter::new(WriteOptions::default()).encode(&records).unwrap();
//! assert_eq!(
//!     String::from_utf8_lossy(&bytes),
//!     "ABC001  1995  1200  1350   980 -9999\r\n"
//! );
//!
//! let decoded = RwlReader::default().decode(&bytes, "example").unwrap();
//! assert_eq!(decoded, records);
//! ```
//!
//! # File Format
//!
//! ## Line Layout
//!
//! | Columns | Field | Description |
//! |---------|-------|-------------|
//! | 1-6 | name | Series name, left justified (up to 8 characters tolerated) |
//! | 7-8 | separator | Two spaces |
//! | 9-12 | year | Year of the first value on this line |
//! | 13- | values | Up to ten 6-column right justified integers |
//!
//! A new line starts whenever the next year is a multiple of ten, so every
//! line but the first of a series begins on a decade. Lines end in CRLF.
//!
//! ## Precision and Terminator
//!
//! Values are stored as `round(width * 10^(digits-1))`. After the last value
//! of a series comes a terminator made of `digits` nines: `-9999` for
//! 0.001 mm data (4 digits) and `-999` for 0.01 mm data (3 digits). Readers
//! infer the precision of a series from its terminator unless told otherwise.
//!
//! ## Series Boundaries
//!
//! A series ends at, in order of precedence:
//! - a negative value,
//! - a `999` / `9999` at the end of a row, when legacy marker mode is on,
//! - a line starting with a different name,
//! - the end of the file.
//!
//! In the last two cases the final value read is taken as the terminator.
//!
//! ## Column Repair
//!
//! Some writers let an 8 character name run into the year
//! (`ABCDEFGH1950`). When the 8th character of a line is not a space, a space
//! is inserted after it before the line is split into fields.

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]

pub mod accumulator;
mod constants;
mod error;
pub mod precision;
mod reader;
mod record;
pub mod scanner;
mod writer;

#[cfg(test)]
mod tests;

// Re-export public API
pub use accumulator::{Completion, RawSeries, SeriesAccumulator};
pub use constants::{DEFAULT_DIGITS, LEGACY_MARKERS, MAX_DIGITS, MAX_WRITE_DIGITS};
pub use error::{Result, RwlError};
pub use precision::SentinelSign;
pub use reader::{read, ReadOptions, RwlReader};
pub use record::Record;
pub use scanner::{scan, ScannedLine};
pub use writer::{write, Comparator, RwlWriter, WriteOptions};
