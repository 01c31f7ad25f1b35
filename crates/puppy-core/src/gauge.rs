//! Bounded resource gauges.
//!
//! Mood and energy both live on a 0..=5 scale. [`Gauge`] saturates at both
//! ends on every constructor and mutator, so an out-of-range value can never
//! be observed, not even between two steps of a transition.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Upper bound shared by mood and energy.
pub const GAUGE_MAX: u8 = 5;

/// Which gauge a gate looked at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Mood,
    Energy,
}

impl Resource {
    pub fn as_str(self) -> &'static str {
        match self {
            Resource::Mood => "mood",
            Resource::Energy => "energy",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value in `0..=GAUGE_MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Gauge(u8);

impl Gauge {
    pub const EMPTY: Gauge = Gauge(0);
    pub const FULL: Gauge = Gauge(GAUGE_MAX);

    /// Clamp `value` into range.
    pub fn saturating(value: u8) -> Self {
        Self(value.min(GAUGE_MAX))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn raise(self, amount: u8) -> Self {
        Self::saturating(self.0.saturating_add(amount))
    }

    #[must_use]
    pub fn lower(self, amount: u8) -> Self {
        Self(self.0.saturating_sub(amount))
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn is_full(self) -> bool {
        self.0 == GAUGE_MAX
    }
}

impl Default for Gauge {
    fn default() -> Self {
        Gauge::FULL
    }
}

impl TryFrom<u8> for Gauge {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > GAUGE_MAX {
            return Err(ValidationError::GaugeOutOfRange {
                value,
                max: GAUGE_MAX,
            });
        }
        Ok(Self(value))
    }
}

impl From<Gauge> for u8 {
    fn from(gauge: Gauge) -> Self {
        gauge.0
    }
}

impl fmt::Display for Gauge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
