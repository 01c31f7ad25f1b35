//! Activity controller.
//!
//! Owns the pet's activity, its two gauges, sleep timing and the daily reset
//! quota. Every public command is a single atomic step: it either commits a
//! complete new [`PetState`] or leaves the old one untouched.
//!
//! ## Transition order
//!
//! ```text
//! same activity?  -> canned tip, nothing changes
//! leaving Sleep   -> recovery bonus (full after an hour, partial before)
//! target gate     -> Study needs mood>=2 and energy>=2, Guitar/Game need energy>0
//! target effect   -> gauge changes for the target
//! override        -> mood==0 forces Idle, else energy==0 forces Sleep
//! ```

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::state::{PetState, Snapshot, DAILY_RESETS};
use crate::activity::{derive_default_activity, Activity};
use crate::error::{ResetError, TransitionError};
use crate::gauge::{Gauge, Resource};
use crate::mood::MoodTier;
use crate::storage::SleepConfig;

const STUDY_MIN_MOOD: u8 = 2;
const STUDY_MIN_ENERGY: u8 = 2;

/// Bonus granted when the pet is woken up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SleepRecovery {
    /// Slept long enough: energy refilled, mood +2.
    Full,
    /// Short nap: energy +2.
    Partial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// Target equals the current activity; nothing changed.
    AlreadyActive,
    /// The pet is now doing what was asked.
    Switched,
    /// An empty gauge forced a different activity than the one requested.
    Overridden,
}

/// Outcome of a successful `request_activity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub kind: TransitionKind,
    pub from: Activity,
    pub requested: Activity,
    pub activity: Activity,
    pub mood: Gauge,
    pub energy: Gauge,
    pub recovery: Option<SleepRecovery>,
    /// Already-active tip, or the mood-tier status line.
    pub message: String,
}

impl Transition {
    pub fn changed(&self) -> bool {
        self.kind != TransitionKind::AlreadyActive
    }
}

/// Outcome of a successful `request_reset`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetOutcome {
    pub activity: Activity,
    pub mood: Gauge,
    pub energy: Gauge,
    pub quota_remaining: u8,
    pub message: String,
}

/// Core pet state machine.
#[derive(Debug, Clone)]
pub struct ActivityController {
    state: PetState,
    sleep: SleepConfig,
}

impl ActivityController {
    /// Startup: activity from the daily plan, full gauges, one reset.
    pub fn new(now: DateTime<Local>) -> Self {
        Self::from_state(PetState::new(
            derive_default_activity(&now),
            now.date_naive(),
        ))
    }

    pub fn from_state(state: PetState) -> Self {
        Self {
            state,
            sleep: SleepConfig::default(),
        }
    }

    pub fn with_config(mut self, sleep: SleepConfig) -> Self {
        self.sleep = sleep;
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &PetState {
        &self.state
    }

    pub fn activity(&self) -> Activity {
        self.state.activity
    }

    pub fn mood(&self) -> Gauge {
        self.state.mood
    }

    pub fn energy(&self) -> Gauge {
        self.state.energy
    }

    pub fn mood_tier(&self) -> MoodTier {
        self.state.mood_tier()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Resets a call to `request_reset(now)` would find, counting the
    /// day-rollover refill. Does not consume or refill anything.
    pub fn reset_quota(&self, now: DateTime<Local>) -> u8 {
        if now.date_naive() != self.state.reset_quota_date {
            DAILY_RESETS
        } else {
            self.state.reset_quota_remaining
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Ask the pet to switch to `target`.
    ///
    /// # Errors
    ///
    /// `InsufficientResource` when the target's gate fails. Nothing is
    /// mutated in that case, not even the sleep recovery bonus.
    pub fn request_activity(
        &mut self,
        target: Activity,
        now: DateTime<Local>,
    ) -> Result<Transition, TransitionError> {
        let from = self.state.activity;
        if target == from {
            debug!(activity = %target, "already active");
            return Ok(Transition {
                kind: TransitionKind::AlreadyActive,
                from,
                requested: target,
                activity: from,
                mood: self.state.mood,
                energy: self.state.energy,
                recovery: None,
                message: target.already_message().to_string(),
            });
        }

        let mut next = self.state.clone();
        let recovery = self.wake_up(&mut next, now);

        if let Err(err) = apply_effects(&mut next, target, now) {
            info!(
                requested = %target,
                resource = %err.resource(),
                mood = %self.state.mood,
                energy = %self.state.energy,
                "transition refused"
            );
            return Err(err);
        }

        next.activity = if next.mood.is_empty() {
            Activity::Idle
        } else if next.energy.is_empty() {
            next.start_sleep_clock(now);
            Activity::Sleep
        } else {
            target
        };
        if next.activity != Activity::Sleep {
            next.sleep_started_at = None;
        }

        let kind = if next.activity == target {
            TransitionKind::Switched
        } else {
            TransitionKind::Overridden
        };
        info!(
            %from,
            requested = %target,
            to = %next.activity,
            mood = %next.mood,
            energy = %next.energy,
            ?recovery,
            "activity changed"
        );

        self.state = next;
        Ok(Transition {
            kind,
            from,
            requested: target,
            activity: self.state.activity,
            mood: self.state.mood,
            energy: self.state.energy,
            recovery,
            message: self.state.mood_tier().message(),
        })
    }

    /// Refill mood and energy and re-derive the activity from the clock.
    /// One reset per calendar day; the caller confirms intent beforehand.
    ///
    /// # Errors
    ///
    /// `Exhausted` when today's reset has already been used.
    pub fn request_reset(&mut self, now: DateTime<Local>) -> Result<ResetOutcome, ResetError> {
        self.refill_quota(now.date_naive());
        if self.state.reset_quota_remaining == 0 {
            info!(date = %self.state.reset_quota_date, "reset refused, quota spent");
            return Err(ResetError::Exhausted);
        }

        let was = self.state.activity;
        let activity = derive_default_activity(&now);
        self.state.mood = Gauge::FULL;
        self.state.energy = Gauge::FULL;
        self.state.activity = activity;
        if activity != Activity::Sleep {
            self.state.sleep_started_at = None;
        } else if was != Activity::Sleep {
            self.state.sleep_started_at = Some(now);
        }
        self.state.reset_quota_remaining -= 1;

        info!(%activity, quota_remaining = self.state.reset_quota_remaining, "pet reset");
        Ok(ResetOutcome {
            activity,
            mood: self.state.mood,
            energy: self.state.energy,
            quota_remaining: self.state.reset_quota_remaining,
            message: "Reset successfully!".to_string(),
        })
    }

    /// Petting reward: mood +1, clamped. Activity is left alone.
    pub(crate) fn reward_pet(&mut self) -> Gauge {
        self.state.mood = self.state.mood.raise(1);
        self.state.mood
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn wake_up(&self, next: &mut PetState, now: DateTime<Local>) -> Option<SleepRecovery> {
        if next.activity != Activity::Sleep {
            return None;
        }
        let started = next.sleep_started_at.take()?;
        let slept = now.signed_duration_since(started);
        if slept >= self.sleep.full_recovery() {
            next.energy = Gauge::FULL;
            next.mood = next.mood.raise(2);
            debug!(slept_secs = slept.num_seconds(), "full sleep recovery");
            Some(SleepRecovery::Full)
        } else {
            next.energy = next.energy.raise(2);
            debug!(slept_secs = slept.num_seconds(), "partial sleep recovery");
            Some(SleepRecovery::Partial)
        }
    }

    fn refill_quota(&mut self, today: NaiveDate) {
        if today != self.state.reset_quota_date {
            debug!(%today, previous = %self.state.reset_quota_date, "reset quota refilled");
            self.state.reset_quota_remaining = DAILY_RESETS;
            self.state.reset_quota_date = today;
        }
    }
}

/// Gate and gauge effects for `target`, applied to a working copy.
fn apply_effects(
    state: &mut PetState,
    target: Activity,
    now: DateTime<Local>,
) -> Result<(), TransitionError> {
    let refuse = |resource| TransitionError::InsufficientResource {
        requested: target,
        resource,
    };
    match target {
        Activity::Study => {
            if state.mood.value() < STUDY_MIN_MOOD {
                return Err(refuse(Resource::Mood));
            }
            if state.energy.value() < STUDY_MIN_ENERGY {
                return Err(refuse(Resource::Energy));
            }
            state.mood = state.mood.lower(2);
            state.energy = state.energy.lower(1);
        }
        Activity::Guitar => {
            if state.energy.is_empty() {
                return Err(refuse(Resource::Energy));
            }
            state.mood = state.mood.raise(1);
            state.energy = state.energy.lower(1);
        }
        Activity::Game => {
            if state.energy.is_empty() {
                return Err(refuse(Resource::Energy));
            }
            state.mood = state.mood.raise(2);
        }
        Activity::Sleep => state.start_sleep_clock(now),
        Activity::Idle => state.energy = state.energy.raise(1),
    }
    Ok(())
}
