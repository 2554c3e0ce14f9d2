//! Reading RWL files into records.

use std::fs;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::accumulator::{RawSeries, SeriesAccumulator};
use crate::constants::LEGACY_MARKERS;
use crate::error::Result;
use crate::precision;
use crate::record::Record;
use crate::scanner;

/// Options controlling how series boundaries and precision are resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadOptions {
    /// Fixed precision; inferred per series from its terminator when `None`
    pub digits: Option<u8>,
    /// Accept a legacy marker at the end of a row as a terminator
    pub legacy_marker_mode: bool,
    /// Values treated as legacy markers, `999` and `9999` by default
    pub legacy_markers: Vec<i64>,
    /// Fail on series that end without a sentinel or legacy marker
    pub require_terminator: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            digits: None,
            legacy_marker_mode: false,
            legacy_markers: LEGACY_MARKERS.to_vec(),
            require_terminator: false,
        }
    }
}

impl ReadOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_digits(mut self, digits: Option<u8>) -> Self {
        self.digits = digits;
        self
    }

    #[must_use]
    pub fn with_legacy_markers(mut self, enabled: bool) -> Self {
        self.legacy_marker_mode = enabled;
        self
    }

    #[must_use]
    pub fn with_legacy_marker_values(mut self, markers: impl Into<Vec<i64>>) -> Self {
        self.legacy_markers = markers.into();
        self
    }

    #[must_use]
    pub fn with_required_terminator(mut self, enabled: bool) -> Self {
        self.require_terminator = enabled;
        self
    }
}

/// Reads whole RWL files
///
/// A file is one unit of work: any error aborts the read and no records
/// are returned.
///
/// # Example
/// ```
/// use ringwidth::RwlReader;
///
/// let text = b"ABC001  1995   120   135   140   128   131 -9999\r\n";
/// let records = RwlReader::default().decode(text, "inline").unwrap();
/// assert_eq!(records[0].name, "ABC001");
/// assert_eq!(records[0].widths, vec![0.12, 0.135, 0.14, 0.128, 0.131]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RwlReader {
    options: ReadOptions,
}

impl RwlReader {
    #[must_use]
    pub fn new(options: ReadOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> &ReadOptions {
        &self.options
    }

    /// Read the file at `path`
    ///
    /// # Errors
    /// `Io` if the file cannot be read, otherwise any decode error.
    pub fn read_path(&self, path: impl AsRef<Path>) -> Result<Vec<Record>> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        self.decode(&bytes, &path.display().to_string())
    }

    /// Read everything from `reader`; `source` names it in errors
    ///
    /// # Errors
    /// `Io` on read failure, otherwise any decode error.
    pub fn read_from(&self, mut reader: impl Read, source: &str) -> Result<Vec<Record>> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        self.decode(&bytes, source)
    }

    /// Decode RWL text held in memory
    ///
    /// # Errors
    /// `MalformedRow` or `TruncatedRecord` with the offending line,
    /// `InvalidDigits` for an unusable precision.
    pub fn decode(&self, bytes: &[u8], source: &str) -> Result<Vec<Record>> {
        if let Some(digits) = self.options.digits {
            precision::validate_digits(digits)?;
        }

        let mut accumulator = SeriesAccumulator::new(source)
            .with_legacy_markers(self.options.legacy_marker_mode)
            .with_marker_values(self.options.legacy_markers.clone())
            .with_required_terminator(self.options.require_terminator);
        let mut records = Vec::new();
        let mut lines = scanner::scan(bytes).peekable();

        while let Some(line) = lines.next() {
            if let Some(raw) = accumulator.push(&line, lines.peek())? {
                records.push(self.finish_series(raw)?);
            }
        }
        if let Some(raw) = accumulator.finish()? {
            records.push(self.finish_series(raw)?);
        }

        debug!(file = source, records = records.len(), "read RWL data");
        Ok(records)
    }

    fn finish_series(&self, raw: RawSeries) -> Result<Record> {
        let (widths, digits) = precision::decode(&raw.values, self.options.digits)?;
        trace!(
            series = %raw.name,
            first_year = raw.first_year,
            years = widths.len(),
            digits,
            completion = ?raw.completion,
            "decoded series"
        );
        Ok(Record {
            name: raw.name,
            first_year: raw.first_year,
            widths,
        })
    }
}

/// Read an RWL file
///
/// `digits` fixes the precision (inferred from each terminator when
/// `None`); `legacy_marker_mode` accepts `999` / `9999` row endings as
/// terminators.
///
/// # Errors
/// See [`RwlReader::read_path`].
pub fn read(path: impl AsRef<Path>, digits: Option<u8>, legacy_marker_mode: bool) -> Result<Vec<Record>> {
    let options = ReadOptions::new()
        .with_digits(digits)
        .with_legacy_markers(legacy_marker_mode);
    RwlReader::new(options).read_path(path)
}
