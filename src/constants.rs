//! Column layout and precision constants of the RWL format.

/// Largest digit count accepted for scaling
pub const MAX_DIGITS: u8 = 9;

/// Largest digit count the writer accepts; a longer terminator cannot keep
/// a blank column in front of it
pub const MAX_WRITE_DIGITS: u8 = 4;

/// Digit count used by the writer when none is given (0.001 mm resolution)
pub const DEFAULT_DIGITS: u8 = 4;

/// Width of the name column in a header
pub(crate) const NAME_WIDTH: usize = 6;

/// Longest name that survives the column repair on read
pub(crate) const MAX_NAME_LEN: usize = 8;

/// Width of the year column in a header
pub(crate) const YEAR_WIDTH: usize = 4;

/// Width of each value column
pub(crate) const VALUE_WIDTH: usize = 6;

/// Character index of the separator between name and year
pub(crate) const SEPARATOR_INDEX: usize = 7;

/// Positive end-of-series markers written by older tools, used unless configured
pub const LEGACY_MARKERS: [i64; 2] = [999, 9999];

/// Canonical line ending
pub(crate) const LINE_ENDING: &str = "\r\n";

/// Number of years on a full line
pub(crate) const DECADE: i32 = 10;
