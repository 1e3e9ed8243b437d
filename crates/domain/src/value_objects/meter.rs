//! Bounded pet stat meters

use serde::{Deserialize, Serialize};
use std::fmt;

/// A pet stat meter, always within `[0, 100]`.
///
/// Hunger and mood are meters. Out-of-range input is clamped rather than
/// rejected: meters carry display state, not business invariants, and a
/// value outside the range never makes a request unprocessable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub struct Meter(u8);

impl Meter {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 100;

    /// Create a meter, clamping the value into `[0, 100]`.
    pub fn new(value: i64) -> Self {
        Self(value.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    /// A completely filled meter.
    pub fn full() -> Self {
        Self(Self::MAX)
    }

    /// Returns the meter value.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Meter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Meter {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<Meter> for u8 {
    fn from(meter: Meter) -> u8 {
        meter.0
    }
}
