use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::activity::Activity;
use crate::gauge::{Gauge, Resource};
use crate::mood::MoodTier;

/// Every state change of the pet produces an Event.
/// The host drains them after each command and re-renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// The pet switched activity, possibly to one it was not asked for.
    ActivityChanged {
        from: Activity,
        requested: Activity,
        to: Activity,
        mood: Gauge,
        energy: Gauge,
        tier: MoodTier,
        overridden: bool,
        at: DateTime<Utc>,
    },
    /// Requested the activity already in progress.
    AlreadyActive {
        activity: Activity,
        at: DateTime<Utc>,
    },
    /// A gated activity was refused; nothing changed.
    TransitionRejected {
        requested: Activity,
        resource: Resource,
        at: DateTime<Utc>,
    },
    Reset {
        activity: Activity,
        quota_remaining: u8,
        at: DateTime<Utc>,
    },
    ResetDenied {
        at: DateTime<Utc>,
    },
    PetAccumulated {
        touch_count: u32,
        threshold: u32,
        at: DateTime<Utc>,
    },
    /// Threshold reached: the host plays the heart animation.
    PetRewarded {
        mood: Gauge,
        tier: MoodTier,
        at: DateTime<Utc>,
    },
    /// Pet swallowed by the reward cooldown.
    PetIgnored {
        remaining_secs: i64,
        at: DateTime<Utc>,
    },
    /// The bubble text changed; `None` hides the bubble.
    MessageChanged {
        text: Option<String>,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            Event::ActivityChanged { at, .. }
            | Event::AlreadyActive { at, .. }
            | Event::TransitionRejected { at, .. }
            | Event::Reset { at, .. }
            | Event::ResetDenied { at }
            | Event::PetAccumulated { at, .. }
            | Event::PetRewarded { at, .. }
            | Event::PetIgnored { at, .. }
            | Event::MessageChanged { at, .. } => *at,
        }
    }

    /// Whether the host should pick a new animation after this event.
    pub fn needs_redraw(&self) -> bool {
        matches!(
            self,
            Event::ActivityChanged { .. } | Event::Reset { .. } | Event::PetRewarded { .. }
        )
    }
}
