//! Per-sample state machine that groups scanned lines into raw series.
//!
//! RWL has no record delimiter. A sample ends when, in order of precedence:
//!
//! 1. a negative value (the classic `-9999` / `-999` sentinel) is read,
//! 2. a row ends in a legacy marker (`999`, `9999` unless configured) and
//!    legacy mode is on,
//! 3. the next line starts with a different name,
//! 4. the input ends.
//!
//! Rules 3 and 4 leave the terminator implicit: the last value read is
//! taken as the terminator.

use tracing::warn;

use crate::constants::LEGACY_MARKERS;
use crate::error::{Result, RwlError};
use crate::scanner::ScannedLine;

/// Why a sample was considered complete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Negative terminator value
    Sentinel,
    /// Positive legacy marker at the end of a row
    LegacyMarker,
    /// Next line belongs to another series
    NameChange,
    /// No more input
    EndOfInput,
}

impl Completion {
    /// Whether the sample carried an explicit end marker
    #[must_use]
    pub fn is_explicit(self) -> bool {
        matches!(self, Self::Sentinel | Self::LegacyMarker)
    }
}

/// A completed sample before precision decoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSeries {
    pub name: String,
    pub first_year: i32,
    /// Stored integers, terminator last
    pub values: Vec<i64>,
    pub completion: Completion,
    /// Line on which the sample ended
    pub line: usize,
}

#[derive(Debug)]
struct Pending {
    name: String,
    first_year: i32,
    values: Vec<i64>,
    line: usize,
}

#[derive(Debug, Default)]
enum State {
    #[default]
    AwaitingHeader,
    Accumulating(Pending),
}

/// Groups scanned lines into [`RawSeries`]
#[derive(Debug)]
pub struct SeriesAccumulator {
    source: String,
    legacy_marker_mode: bool,
    legacy_markers: Vec<i64>,
    require_terminator: bool,
    state: State,
}

impl SeriesAccumulator {
    /// Create an accumulator; `source` names the input in error messages
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            legacy_marker_mode: false,
            legacy_markers: LEGACY_MARKERS.to_vec(),
            require_terminator: false,
            state: State::AwaitingHeader,
        }
    }

    /// Treat rows ending in a legacy marker as terminated
    #[must_use]
    pub fn with_legacy_markers(mut self, enabled: bool) -> Self {
        self.legacy_marker_mode = enabled;
        self
    }

    /// Replace the default `999` / `9999` marker set
    #[must_use]
    pub fn with_marker_values(mut self, markers: impl Into<Vec<i64>>) -> Self {
        self.legacy_markers = markers.into();
        self
    }

    /// Reject samples that end without a sentinel or marker
    #[must_use]
    pub fn with_required_terminator(mut self, enabled: bool) -> Self {
        self.require_terminator = enabled;
        self
    }

    /// Whether a sample is currently open
    #[must_use]
    pub fn is_accumulating(&self) -> bool {
        matches!(self.state, State::Accumulating(_))
    }

    /// Feed one line, with the following line as look-ahead when known
    ///
    /// Passing `None` for `next` defers the end-of-input decision to
    /// [`finish`](Self::finish).
    ///
    /// # Errors
    /// `MalformedRow` for unparseable fields, `TruncatedRecord` when a
    /// sample ends without measurements.
    pub fn push(&mut self, line: &ScannedLine, next: Option<&ScannedLine>) -> Result<Option<RawSeries>> {
        let mut fields = line.fields();
        let mut pending = match std::mem::take(&mut self.state) {
            State::AwaitingHeader => self.open(line, &mut fields)?,
            State::Accumulating(pending) => {
                self.check_continuation(line, &mut fields, &pending)?;
                pending
            }
        };
        pending.line = line.number;

        let mut row_len = 0;
        while let Some(field) = fields.next() {
            let value = self.parse_int(field, line.number)?;
            pending.values.push(value);
            row_len += 1;
            if value < 0 {
                if let Some(extra) = fields.next() {
                    return Err(RwlError::malformed(
                        &self.source,
                        line.number,
                        format!("value '{extra}' after terminator {value}"),
                    ));
                }
                return self.complete(pending, Completion::Sentinel).map(Some);
            }
        }

        if self.legacy_marker_mode && row_len > 0 {
            if let Some(last) = pending.values.last() {
                if self.legacy_markers.contains(last) {
                    return self.complete(pending, Completion::LegacyMarker).map(Some);
                }
            }
        }

        if let Some(next) = next {
            if next.leading_token() != Some(pending.name.as_str()) {
                return self.complete(pending, Completion::NameChange).map(Some);
            }
        }

        self.state = State::Accumulating(pending);
        Ok(None)
    }

    /// Signal end of input, completing any open sample
    ///
    /// # Errors
    /// `TruncatedRecord` when the open sample cannot be completed.
    pub fn finish(&mut self) -> Result<Option<RawSeries>> {
        match std::mem::take(&mut self.state) {
            State::AwaitingHeader => Ok(None),
            State::Accumulating(pending) => self.complete(pending, Completion::EndOfInput).map(Some),
        }
    }

    fn open(&self, line: &ScannedLine, fields: &mut std::str::SplitWhitespace<'_>) -> Result<Pending> {
        let name = fields
            .next()
            .ok_or_else(|| RwlError::malformed(&self.source, line.number, "missing series name"))?;
        let year = fields
            .next()
            .ok_or_else(|| RwlError::malformed(&self.source, line.number, "missing first year"))?;
        let first_year = self.parse_year(year, line.number)?;
        Ok(Pending {
            name: name.to_owned(),
            first_year,
            values: Vec::new(),
            line: line.number,
        })
    }

    /// Skip name and year of a continuation row, checking the year parses
    fn check_continuation(
        &self,
        line: &ScannedLine,
        fields: &mut std::str::SplitWhitespace<'_>,
        pending: &Pending,
    ) -> Result<()> {
        let (Some(_), Some(year)) = (fields.next(), fields.next()) else {
            return Err(RwlError::malformed(&self.source, line.number, "missing year"));
        };
        let year = self.parse_year(year, line.number)?;
        let expected = i64::from(pending.first_year) + pending.values.len() as i64;
        if i64::from(year) != expected {
            warn!(
                file = %self.source,
                line = line.number,
                series = %pending.name,
                year,
                expected,
                "continuation year does not match number of values read"
            );
        }
        Ok(())
    }

    fn complete(&self, pending: Pending, completion: Completion) -> Result<RawSeries> {
        let truncated = pending.values.len() < 2 || (self.require_terminator && !completion.is_explicit());
        if truncated {
            return Err(RwlError::TruncatedRecord {
                file: self.source.clone(),
                line: pending.line,
                name: pending.name,
            });
        }
        Ok(RawSeries {
            name: pending.name,
            first_year: pending.first_year,
            values: pending.values,
            completion,
            line: pending.line,
        })
    }

    fn parse_int(&self, field: &str, line: usize) -> Result<i64> {
        field
            .parse()
            .map_err(|_| RwlError::malformed(&self.source, line, format!("'{field}' is not an integer")))
    }

    fn parse_year(&self, field: &str, line: usize) -> Result<i32> {
        field
            .parse()
            .map_err(|_| RwlError::malformed(&self.source, line, format!("'{field}' is not a year")))
    }
}
