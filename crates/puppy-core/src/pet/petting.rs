//! Petting accumulator.
//!
//! Counts qualifying pets (double-clicks) towards a randomly drawn threshold.
//! Reaching it earns one mood point, after which a hard cooldown applies.
//! A long gap between pets makes the pet forget the streak.

use chrono::{DateTime, Local};
use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::storage::PettingConfig;

/// Result of a single `register_pet`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PetOutcome {
    /// A reward was granted too recently; the pet was ignored entirely.
    CooldownActive { remaining_secs: i64 },
    /// Counted, but the threshold is not reached yet.
    Accumulating { touch_count: u32, threshold: u32 },
    /// Threshold reached: the caller raises mood by one.
    Rewarded { threshold: u32 },
}

impl PetOutcome {
    pub fn is_rewarded(&self) -> bool {
        matches!(self, PetOutcome::Rewarded { .. })
    }
}

/// Petting streak bookkeeping.
#[derive(Debug, Clone)]
pub struct PettingAccumulator {
    touch_count: u32,
    threshold: u32,
    last_click_at: Option<DateTime<Local>>,
    last_reward_at: Option<DateTime<Local>>,
    config: PettingConfig,
    rng: Mcg128Xsl64,
}

impl Default for PettingAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl PettingAccumulator {
    /// Default windows (60s cooldown, 600s streak) and thresholds in 3..=8,
    /// seeded from entropy.
    pub fn new() -> Self {
        Self::build(PettingConfig::default(), Mcg128Xsl64::from_entropy())
    }

    /// # Errors
    ///
    /// Returns `InvalidValue` if the config fails validation.
    pub fn with_config(config: PettingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
            None => Mcg128Xsl64::from_entropy(),
        };
        Ok(Self::build(config, rng))
    }

    fn build(config: PettingConfig, rng: Mcg128Xsl64) -> Self {
        let mut accumulator = Self {
            touch_count: 0,
            threshold: config.threshold_min,
            last_click_at: None,
            last_reward_at: None,
            config,
            rng,
        };
        accumulator.regenerate_threshold();
        accumulator
    }

    pub fn touch_count(&self) -> u32 {
        self.touch_count
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn last_reward_at(&self) -> Option<DateTime<Local>> {
        self.last_reward_at
    }

    pub fn config(&self) -> &PettingConfig {
        &self.config
    }

    /// Whether a pet at `now` would be swallowed by the reward cooldown.
    /// Never rewarded means no cooldown.
    pub fn cooldown_active(&self, now: DateTime<Local>) -> bool {
        self.cooldown_remaining(now).is_some()
    }

    /// Record one pet at `now`.
    pub fn register_pet(&mut self, now: DateTime<Local>) -> PetOutcome {
        if let Some(remaining_secs) = self.cooldown_remaining(now) {
            debug!(remaining_secs, "pet ignored, cooldown active");
            return PetOutcome::CooldownActive { remaining_secs };
        }

        if let Some(last) = self.last_click_at {
            if now.signed_duration_since(last) > self.config.streak_window() {
                debug!(
                    forgotten = self.touch_count,
                    "petting streak expired"
                );
                self.touch_count = 0;
                self.regenerate_threshold();
            }
        }

        self.touch_count += 1;
        self.last_click_at = Some(now);

        if self.touch_count < self.threshold {
            return PetOutcome::Accumulating {
                touch_count: self.touch_count,
                threshold: self.threshold,
            };
        }

        let threshold = self.threshold;
        self.last_reward_at = Some(now);
        self.touch_count = 0;
        self.regenerate_threshold();
        info!(threshold, next_threshold = self.threshold, "petting rewarded");
        PetOutcome::Rewarded { threshold }
    }

    /// Ceiling of the seconds left on the cooldown, or `None` when inactive.
    fn cooldown_remaining(&self, now: DateTime<Local>) -> Option<i64> {
        let last = self.last_reward_at?;
        let remaining = self.config.cooldown() - now.signed_duration_since(last);
        if remaining > chrono::Duration::zero() {
            Some((remaining.num_milliseconds() + 999) / 1000)
        } else {
            None
        }
    }

    /// The only place a threshold is drawn.
    fn regenerate_threshold(&mut self) {
        self.threshold = self
            .rng
            .gen_range(self.config.threshold_min..=self.config.threshold_max);
    }
}
