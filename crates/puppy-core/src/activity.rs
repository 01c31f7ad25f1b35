//! The five behavior modes and the daily plan that picks one from the clock.
//!
//! ```text
//! 23:00-12:00  sleep
//! 12:00-19:00  study
//! 19:00-20:00  guitar
//! 20:00-23:00  game
//! ```

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use chrono::{DateTime, TimeZone, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{ParseActivityError, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activity {
    Sleep,
    Study,
    Guitar,
    Game,
    Idle,
}

/// Hour ranges in match order. The first range containing the hour wins.
pub const DAY_PLAN: [(Range<u32>, Activity); 5] = [
    (23..24, Activity::Sleep),
    (0..12, Activity::Sleep),
    (12..19, Activity::Study),
    (19..20, Activity::Guitar),
    (20..23, Activity::Game),
];

impl Activity {
    /// Menu order.
    pub const ALL: [Activity; 5] = [
        Activity::Study,
        Activity::Guitar,
        Activity::Game,
        Activity::Sleep,
        Activity::Idle,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Activity::Sleep => "sleep",
            Activity::Study => "study",
            Activity::Guitar => "guitar",
            Activity::Game => "game",
            Activity::Idle => "idle",
        }
    }

    /// Capitalized name for menus.
    pub fn label(self) -> &'static str {
        match self {
            Activity::Sleep => "Sleep",
            Activity::Study => "Study",
            Activity::Guitar => "Guitar",
            Activity::Game => "Game",
            Activity::Idle => "Idle",
        }
    }

    /// Tip shown when the pet is asked to do what it is already doing.
    pub fn already_message(self) -> &'static str {
        match self {
            Activity::Study => "You are studying now!",
            Activity::Guitar => "Immersing in music...",
            Activity::Game => "Don't play too much game!",
            Activity::Sleep => "Already Zzz",
            Activity::Idle => "Do something...",
        }
    }

    /// Activity the daily plan assigns to `hour` (24h clock).
    ///
    /// Hours outside `0..24` match nothing and fall back to `Idle`.
    pub fn for_hour(hour: u32) -> Activity {
        DAY_PLAN
            .iter()
            .find(|(range, _)| range.contains(&hour))
            .map(|(_, activity)| *activity)
            .unwrap_or(Activity::Idle)
    }

    /// Like [`Activity::for_hour`], but rejects hours outside `0..24`.
    ///
    /// # Errors
    ///
    /// Returns `HourOutOfRange` for hours above 23.
    pub fn try_for_hour(hour: u32) -> Result<Activity, ValidationError> {
        if hour > 23 {
            return Err(ValidationError::HourOutOfRange(hour));
        }
        Ok(Activity::for_hour(hour))
    }
}

/// Default activity for the wall-clock time `now`. Pure; used at startup and
/// on reset.
pub fn derive_default_activity<Tz: TimeZone>(now: &DateTime<Tz>) -> Activity {
    Activity::for_hour(now.hour())
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Activity {
    type Err = ParseActivityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sleep" => Ok(Activity::Sleep),
            "study" => Ok(Activity::Study),
            "guitar" => Ok(Activity::Guitar),
            "game" => Ok(Activity::Game),
            "idle" => Ok(Activity::Idle),
            _ => Err(ParseActivityError(s.to_string())),
        }
    }
}
