//! Error types for RWL reading and writing.

use thiserror::Error;

/// Error returned by the RWL reader, writer and precision codec
#[derive(Debug, Error)]
pub enum RwlError {
    /// A field that must be an integer could not be parsed
    #[error("unable to parse '{file}' near line {line}: {reason}")]
    MalformedRow {
        file: String,
        line: usize,
        reason: String,
    },

    /// A sample ended without any measurement, or without a terminator in strict mode
    #[error("truncated series '{name}' in '{file}' near line {line}")]
    TruncatedRecord {
        file: String,
        line: usize,
        name: String,
    },

    /// Underlying file system failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Digit count is zero or too large to scale with
    #[error("invalid digit count {digits}, expected 1..={max}")]
    InvalidDigits { digits: u32, max: u8 },

    /// Raw series is empty, so there is no terminator to strip
    #[error("series has no terminator value")]
    MissingTerminator,

    /// Series name is empty or contains whitespace
    #[error("invalid series name {name:?}")]
    InvalidName { name: String },

    /// Series has no ring widths to write
    #[error("series '{name}' has no ring widths")]
    EmptySeries { name: String },

    /// Width cannot be stored as a non-negative scaled integer
    #[error("series '{name}' has an unencodable width {value} in year {year}")]
    InvalidWidth { name: String, year: i32, value: f64 },

    /// Year or value does not fit its fixed-width column
    #[error("series '{name}': '{text}' for year {year} does not fit its column")]
    ColumnOverflow {
        name: String,
        year: i32,
        text: String,
    },
}

impl RwlError {
    pub(crate) fn malformed(file: &str, line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRow {
            file: file.to_owned(),
            line,
            reason: reason.into(),
        }
    }

    /// 1-based line number this error points at, if any
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::MalformedRow { line, .. } | Self::TruncatedRecord { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, RwlError>;
