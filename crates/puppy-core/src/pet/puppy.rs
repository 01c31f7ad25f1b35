//! The handle a host holds: one controller, one petting accumulator and the
//! speech-bubble text, plus an event queue the host drains.

use std::collections::VecDeque;

use chrono::{DateTime, Local, Utc};
use tracing::debug;

use super::controller::{ActivityController, ResetOutcome, Transition, TransitionKind};
use super::petting::{PetOutcome, PettingAccumulator};
use super::state::Snapshot;
use crate::activity::Activity;
use crate::error::{ConfigError, ResetError, TransitionError};
use crate::events::Event;
use crate::mood::MoodTier;
use crate::storage::PuppyConfig;

#[derive(Debug, Clone)]
pub struct Puppy {
    controller: ActivityController,
    petting: PettingAccumulator,
    bubble: Option<String>,
    events: VecDeque<Event>,
}

impl Puppy {
    /// A fresh pet with default tunables.
    pub fn new(now: DateTime<Local>) -> Self {
        Self {
            controller: ActivityController::new(now),
            petting: PettingAccumulator::new(),
            bubble: None,
            events: VecDeque::new(),
        }
    }

    /// # Errors
    ///
    /// Returns `InvalidValue` if the petting section fails validation.
    pub fn with_config(now: DateTime<Local>, config: &PuppyConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            controller: ActivityController::new(now).with_config(config.sleep.clone()),
            petting: PettingAccumulator::with_config(config.petting.clone())?,
            bubble: None,
            events: VecDeque::new(),
        })
    }

    pub fn controller(&self) -> &ActivityController {
        &self.controller
    }

    pub fn petting(&self) -> &PettingAccumulator {
        &self.petting
    }

    pub fn activity(&self) -> Activity {
        self.controller.activity()
    }

    pub fn mood_tier(&self) -> MoodTier {
        self.controller.mood_tier()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.controller.snapshot()
    }

    pub fn reset_quota(&self, now: DateTime<Local>) -> u8 {
        self.controller.reset_quota(now)
    }

    /// See [`ActivityController::request_activity`].
    pub fn request_activity(
        &mut self,
        target: Activity,
        now: DateTime<Local>,
    ) -> Result<Transition, TransitionError> {
        let at = now.with_timezone(&Utc);
        match self.controller.request_activity(target, now) {
            Ok(transition) => {
                let event = match transition.kind {
                    TransitionKind::AlreadyActive => Event::AlreadyActive {
                        activity: transition.activity,
                        at,
                    },
                    kind => Event::ActivityChanged {
                        from: transition.from,
                        requested: transition.requested,
                        to: transition.activity,
                        mood: transition.mood,
                        energy: transition.energy,
                        tier: MoodTier::from_mood(transition.mood),
                        overridden: kind == TransitionKind::Overridden,
                        at,
                    },
                };
                self.events.push_back(event);
                Ok(transition)
            }
            Err(err) => {
                self.events.push_back(Event::TransitionRejected {
                    requested: target,
                    resource: err.resource(),
                    at,
                });
                Err(err)
            }
        }
    }

    /// See [`ActivityController::request_reset`].
    pub fn request_reset(&mut self, now: DateTime<Local>) -> Result<ResetOutcome, ResetError> {
        let at = now.with_timezone(&Utc);
        let result = self.controller.request_reset(now);
        self.events.push_back(match &result {
            Ok(outcome) => Event::Reset {
                activity: outcome.activity,
                quota_remaining: outcome.quota_remaining,
                at,
            },
            Err(_) => Event::ResetDenied { at },
        });
        result
    }

    /// Register a pet and apply the reward to mood when one is earned.
    pub fn register_pet(&mut self, now: DateTime<Local>) -> PetOutcome {
        let at = now.with_timezone(&Utc);
        let outcome = self.petting.register_pet(now);
        let event = match outcome {
            PetOutcome::CooldownActive { remaining_secs } => Event::PetIgnored { remaining_secs, at },
            PetOutcome::Accumulating {
                touch_count,
                threshold,
            } => Event::PetAccumulated {
                touch_count,
                threshold,
                at,
            },
            PetOutcome::Rewarded { .. } => {
                let mood = self.controller.reward_pet();
                Event::PetRewarded {
                    mood,
                    tier: MoodTier::from_mood(mood),
                    at,
                }
            }
        };
        self.events.push_back(event);
        outcome
    }

    /// Show `text` in the bubble. Blank input is ignored and returns false.
    /// Length limits are the host's concern.
    pub fn say(&mut self, text: &str, now: DateTime<Local>) -> bool {
        if text.trim().is_empty() {
            debug!("ignoring blank bubble text");
            return false;
        }
        self.bubble = Some(text.to_string());
        self.events.push_back(Event::MessageChanged {
            text: self.bubble.clone(),
            at: now.with_timezone(&Utc),
        });
        true
    }

    pub fn clear_message(&mut self, now: DateTime<Local>) {
        if self.bubble.take().is_some() {
            self.events.push_back(Event::MessageChanged {
                text: None,
                at: now.with_timezone(&Utc),
            });
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.bubble.as_deref()
    }

    /// Take every event queued since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<Event> {
        self.events.drain(..).collect()
    }
}
