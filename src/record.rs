//! Record struct for decoded ring-width series.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// A named series of annual ring widths
///
/// `widths[i]` is the width for year `first_year + i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Series identifier, conventionally at most 8 characters
    pub name: String,
    /// Year of the first measured ring
    pub first_year: i32,
    /// One width per consecutive year
    pub widths: Vec<f64>,
}

impl Record {
    #[must_use]
    pub fn new(name: impl Into<String>, first_year: i32, widths: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            first_year,
            widths,
        }
    }

    /// Number of measured years
    #[inline]
    #[must_use]
    pub fn nyears(&self) -> usize {
        self.widths.len()
    }

    /// Year of the last measured ring
    ///
    /// For an empty series this is `first_year - 1`. Saturates at the ends
    /// of the `i32` range.
    #[must_use]
    pub fn last_year(&self) -> i32 {
        let last = i64::from(self.first_year) + self.widths.len() as i64 - 1;
        i32::try_from(last).unwrap_or(if last < 0 { i32::MIN } else { i32::MAX })
    }

    /// All measured years
    ///
    /// Years past `i32::MAX` are not representable, so the range can be
    /// shorter than `widths` near the top of the range.
    #[must_use]
    pub fn years(&self) -> RangeInclusive<i32> {
        self.first_year..=self.last_year()
    }

    /// Width measured in `year`, if covered
    #[must_use]
    pub fn width_at(&self, year: i32) -> Option<f64> {
        let offset = usize::try_from(i64::from(year) - i64::from(self.first_year)).ok()?;
        self.widths.get(offset).copied()
    }

    /// Iterate `(year, width)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.years().zip(self.widths.iter().copied())
    }
}
