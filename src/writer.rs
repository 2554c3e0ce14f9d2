//! Writing records as RWL text.
//!
//! Each series is laid out as header lines of `name  year` followed by up
//! to ten 6-column values, breaking to a new header whenever the next year
//! is a multiple of ten. The terminator is written after the last width.
//!
//! ```text
//! ABC001  1995   120   135   140   128   131
//! ABC001  2000   142   118 -9999
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::constants::{
    DECADE, DEFAULT_DIGITS, LINE_ENDING, MAX_NAME_LEN, MAX_WRITE_DIGITS, NAME_WIDTH, VALUE_WIDTH, YEAR_WIDTH,
};
use crate::error::{Result, RwlError};
use crate::precision::{self, SentinelSign};
use crate::record::Record;

/// Custom ordering for records before they are written
pub type Comparator = dyn Fn(&Record, &Record) -> Ordering;

/// Layout options for [`RwlWriter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteOptions {
    /// Sort records before writing (by name unless a sort key is set)
    pub sort: bool,
    /// Precision used to scale widths, `1..=4`
    pub digits: u8,
    /// Sign of the synthesized terminator
    pub sentinel: SentinelSign,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            sort: true,
            digits: DEFAULT_DIGITS,
            sentinel: SentinelSign::Negative,
        }
    }
}

impl WriteOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_sort(mut self, sort: bool) -> Self {
        self.sort = sort;
        self
    }

    #[must_use]
    pub fn with_digits(mut self, digits: u8) -> Self {
        self.digits = digits;
        self
    }

    #[must_use]
    pub fn with_sentinel(mut self, sentinel: SentinelSign) -> Self {
        self.sentinel = sentinel;
        self
    }
}

/// Writes records in RWL layout
///
/// Validation happens before any output is produced, so a failed write
/// never leaves partial data behind.
#[derive(Clone, Copy, Default)]
pub struct RwlWriter<'a> {
    options: WriteOptions,
    sort_key: Option<&'a Comparator>,
}

impl fmt::Debug for RwlWriter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RwlWriter")
            .field("options", &self.options)
            .field("sort_key", &self.sort_key.is_some())
            .finish()
    }
}

impl<'a> RwlWriter<'a> {
    #[must_use]
    pub fn new(options: WriteOptions) -> Self {
        Self { options, sort_key: None }
    }

    /// Order records with `compare` instead of by name when sorting
    #[must_use]
    pub fn with_sort_key(mut self, compare: &'a Comparator) -> Self {
        self.sort_key = Some(compare);
        self
    }

    #[must_use]
    pub fn options(&self) -> &WriteOptions {
        &self.options
    }

    /// Render `records` to RWL bytes
    ///
    /// # Errors
    /// `InvalidDigits`, `InvalidName`, `EmptySeries`, `InvalidWidth` or
    /// `ColumnOverflow` when a record cannot be represented.
    pub fn encode(&self, records: &[Record]) -> Result<Vec<u8>> {
        let digits = precision::validate_digits_up_to(self.options.digits, MAX_WRITE_DIGITS)?;
        let terminator = precision::terminator(digits, self.options.sentinel)?;

        let mut ordered: Vec<&Record> = records.iter().collect();
        if self.options.sort {
            match self.sort_key {
                Some(compare) => ordered.sort_by(|a, b| compare(a, b)),
                None => ordered.sort_by(|a, b| a.name.cmp(&b.name)),
            }
        }

        let mut out = String::new();
        for record in ordered {
            format_series(&mut out, record, digits, terminator)?;
        }
        Ok(out.into_bytes())
    }

    /// Write `records` to `writer`
    ///
    /// # Errors
    /// Any [`encode`](Self::encode) error, or `Io` from the writer.
    pub fn write_to(&self, mut writer: impl Write, records: &[Record]) -> Result<()> {
        let bytes = self.encode(records)?;
        writer.write_all(&bytes)?;
        writer.flush()?;
        Ok(())
    }

    /// Atomically replace the file at `path` with `records`
    ///
    /// The data is written to a temporary file in the same directory,
    /// synced and closed, then renamed over `path`. On any error the
    /// temporary file is removed and `path` is left untouched.
    ///
    /// # Errors
    /// Any [`encode`](Self::encode) error, or `Io` from the file system.
    pub fn write_path(&self, path: impl AsRef<Path>, records: &[Record]) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.encode(records)?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;

        let (file, temp_path) = tmp.into_parts();
        drop(file);
        temp_path.persist(path).map_err(|e| RwlError::Io(e.error))?;

        debug!(file = %path.display(), records = records.len(), bytes = bytes.len(), "wrote RWL file");
        Ok(())
    }
}

/// Append one series to `out`
fn format_series(out: &mut String, record: &Record, digits: u8, terminator: i64) -> Result<()> {
    if record.name.is_empty() || record.name.chars().any(char::is_whitespace) {
        return Err(RwlError::InvalidName {
            name: record.name.clone(),
        });
    }
    if record.widths.is_empty() {
        return Err(RwlError::EmptySeries {
            name: record.name.clone(),
        });
    }
    let name = truncate_name(&record.name);
    let first_header = year_text(name, record.first_year)?;

    let mut values = Vec::with_capacity(record.widths.len() + 1);
    for (offset, &width) in record.widths.iter().enumerate() {
        let raw = precision::encode(width, digits)
            .filter(|raw| *raw >= 0)
            .ok_or_else(|| RwlError::InvalidWidth {
                name: record.name.clone(),
                year: year_at(record.first_year, offset),
                value: width,
            })?;
        values.push(raw);
    }
    values.push(terminator);

    let mut year = record.first_year;
    push_name(out, name, &first_header);
    for (i, value) in values.iter().enumerate() {
        push_value(out, name, year, *value)?;
        if i + 1 == values.len() {
            break;
        }
        year = year.checked_add(1).ok_or_else(|| overflow(name, year, year.to_string()))?;
        if year.rem_euclid(DECADE) == 0 {
            out.push_str(LINE_ENDING);
            push_header(out, name, year)?;
        }
    }
    out.push_str(LINE_ENDING);
    Ok(())
}

/// Names longer than the repairable width would be split on read
fn truncate_name(name: &str) -> &str {
    match name.char_indices().nth(MAX_NAME_LEN) {
        Some((cut, _)) => {
            let short = &name[..cut];
            warn!(series = name, truncated = short, "series name truncated");
            short
        }
        None => name,
    }
}

/// Year of the width at `offset`, saturating past the `i32` range
fn year_at(first_year: i32, offset: usize) -> i32 {
    i32::try_from(offset)
        .ok()
        .and_then(|offset| first_year.checked_add(offset))
        .unwrap_or(i32::MAX)
}

/// Right-justified year, rejected when it does not fit the year column
fn year_text(name: &str, year: i32) -> Result<String> {
    let text = format!("{year:>YEAR_WIDTH$}");
    if text.len() > YEAR_WIDTH {
        return Err(overflow(name, year, text));
    }
    Ok(text)
}

fn push_header(out: &mut String, name: &str, year: i32) -> Result<()> {
    let text = year_text(name, year)?;
    push_name(out, name, &text);
    Ok(())
}

fn push_name(out: &mut String, name: &str, year_text: &str) {
    out.push_str(&format!("{name:<NAME_WIDTH$}  {year_text}"));
}

/// Values must leave at least one blank column so neighbours never touch
fn push_value(out: &mut String, name: &str, year: i32, value: i64) -> Result<()> {
    let text = format!("{value:>VALUE_WIDTH$}");
    if !text.starts_with(' ') {
        return Err(overflow(name, year, text));
    }
    out.push_str(&text);
    Ok(())
}

fn overflow(name: &str, year: i32, text: String) -> RwlError {
    RwlError::ColumnOverflow {
        name: name.to_owned(),
        year,
        text,
    }
}

/// Write `records` to `path` atomically
///
/// `sort` orders records by name, or by `sort_key` when given; `digits`
/// sets the precision (4 is the usual 0.001 mm resolution, and the most
/// the value columns can hold).
///
/// # Errors
/// See [`RwlWriter::write_path`].
pub fn write(
    path: impl AsRef<Path>,
    records: &[Record],
    sort: bool,
    sort_key: Option<&Comparator>,
    digits: u8,
) -> Result<()> {
    let options = WriteOptions::new().with_sort(sort).with_digits(digits);
    let mut writer = RwlWriter::new(options);
    if let Some(compare) = sort_key {
        writer = writer.with_sort_key(compare);
    }
    writer.write_path(path, records)
}
