//! Mood tiers and the animation group a renderer should show.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::activity::Activity;
use crate::gauge::{Gauge, GAUGE_MAX};

/// Coarse mood classification. Depends on mood only, never on activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodTier {
    Bad,
    Normal,
    Happy,
}

impl MoodTier {
    pub fn from_mood(mood: Gauge) -> Self {
        match mood.value() {
            0..=1 => MoodTier::Bad,
            v if v >= GAUGE_MAX => MoodTier::Happy,
            _ => MoodTier::Normal,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MoodTier::Bad => "bad",
            MoodTier::Normal => "normal",
            MoodTier::Happy => "happy",
        }
    }

    pub fn headline(self) -> &'static str {
        match self {
            MoodTier::Happy => "Your puppy is happy now",
            MoodTier::Normal => "Your puppy is at a good mood",
            MoodTier::Bad => "Please pet your puppy",
        }
    }

    pub fn face(self) -> &'static str {
        match self {
            MoodTier::Happy => "｡:ﾟ૮ ˶ˆ ﻌ ˆ˶ ა ﾟ:｡",
            MoodTier::Normal => "૮ ˶′ﻌ ‵˶ ა",
            MoodTier::Bad => "૮ ◞ ﻌ ◟ ა",
        }
    }

    /// One-line status message, e.g. after a transition.
    pub fn message(self) -> String {
        format!("{} {}", self.headline(), self.face())
    }
}

impl fmt::Display for MoodTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Asset group to display. Study and Game come in three moods; the rest have
/// a single group. Resolving a key to files is the renderer's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationKey {
    Study(MoodTier),
    Game(MoodTier),
    Guitar,
    Sleep,
    Idle,
}

impl AnimationKey {
    pub fn select(activity: Activity, tier: MoodTier) -> Self {
        match activity {
            Activity::Study => AnimationKey::Study(tier),
            Activity::Game => AnimationKey::Game(tier),
            Activity::Guitar => AnimationKey::Guitar,
            Activity::Sleep => AnimationKey::Sleep,
            Activity::Idle => AnimationKey::Idle,
        }
    }
}

impl fmt::Display for AnimationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnimationKey::Study(tier) => write!(f, "study_{tier}"),
            AnimationKey::Game(tier) => write!(f, "game_{tier}"),
            AnimationKey::Guitar => f.write_str("guitar"),
            AnimationKey::Sleep => f.write_str("sleep"),
            AnimationKey::Idle => f.write_str("idle"),
        }
    }
}
