use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::activity::Activity;
use crate::gauge::Gauge;
use crate::mood::{AnimationKey, MoodTier};

/// Resets granted per calendar day.
pub const DAILY_RESETS: u8 = 1;

/// Everything the activity controller owns.
///
/// Fields are only writable from inside the crate; hosts read them through
/// [`ActivityController`](super::ActivityController) or a [`Snapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetState {
    pub(crate) activity: Activity,
    pub(crate) mood: Gauge,
    pub(crate) energy: Gauge,
    /// Only ever `Some` while `activity` is `Sleep`.
    pub(crate) sleep_started_at: Option<DateTime<Local>>,
    pub(crate) reset_quota_remaining: u8,
    pub(crate) reset_quota_date: NaiveDate,
}

impl PetState {
    /// Startup state: the given activity, full gauges, a full reset quota
    /// dated `today`.
    pub fn new(activity: Activity, today: NaiveDate) -> Self {
        Self::with_gauges(activity, Gauge::FULL, Gauge::FULL, today)
    }

    /// Arbitrary gauges, e.g. to resume a scenario in tests or tools.
    pub fn with_gauges(activity: Activity, mood: Gauge, energy: Gauge, today: NaiveDate) -> Self {
        Self {
            activity,
            mood,
            energy,
            sleep_started_at: None,
            reset_quota_remaining: DAILY_RESETS,
            reset_quota_date: today,
        }
    }

    pub fn activity(&self) -> Activity {
        self.activity
    }

    pub fn mood(&self) -> Gauge {
        self.mood
    }

    pub fn energy(&self) -> Gauge {
        self.energy
    }

    pub fn sleep_started_at(&self) -> Option<DateTime<Local>> {
        self.sleep_started_at
    }

    pub fn reset_quota_remaining(&self) -> u8 {
        self.reset_quota_remaining
    }

    pub fn reset_quota_date(&self) -> NaiveDate {
        self.reset_quota_date
    }

    pub fn mood_tier(&self) -> MoodTier {
        MoodTier::from_mood(self.mood)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            activity: self.activity,
            mood: self.mood,
            energy: self.energy,
            tier: self.mood_tier(),
        }
    }

    /// Enter Sleep bookkeeping: start the sleep clock unless it is running.
    pub(crate) fn start_sleep_clock(&mut self, now: DateTime<Local>) {
        if self.sleep_started_at.is_none() {
            self.sleep_started_at = Some(now);
        }
    }
}

/// What the renderer and "Show Status" need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub activity: Activity,
    pub mood: Gauge,
    pub energy: Gauge,
    pub tier: MoodTier,
}

impl Snapshot {
    pub fn animation(&self) -> AnimationKey {
        AnimationKey::select(self.activity, self.tier)
    }

    /// Multi-line text for a status dialog.
    pub fn status_text(&self) -> String {
        format!(
            "Mood: {}\nEnergy: {}\n{}\n    {}",
            self.mood,
            self.energy,
            self.tier.headline(),
            self.tier.face()
        )
    }
}
