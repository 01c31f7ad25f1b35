//! # Desktop Puppy Core Library
//!
//! The state machine behind a desktop pet: which activity the puppy is doing,
//! its mood and energy gauges, petting rewards and a once-per-day reset.
//! Hosts (the CLI in this workspace, or any windowed shell) forward user
//! input into [`Puppy`] and render what comes back; they never decide game
//! logic themselves.
//!
//! ## Architecture
//!
//! - **Activity controller**: time-of-day default activity, resource-gated
//!   transitions with side effects, sleep recovery and the daily reset quota
//! - **Petting accumulator**: randomized click threshold with a reward
//!   cooldown and streak decay
//! - **Events**: every operation on [`Puppy`] queues an [`Event`] for the host
//! - **Storage**: TOML settings (the pet itself is never persisted)
//!
//! All time-dependent operations take `now` explicitly, so callers and tests
//! control the clock.

pub mod activity;
pub mod error;
pub mod events;
pub mod gauge;
pub mod mood;
pub mod pet;
pub mod storage;

pub use activity::{derive_default_activity, Activity, DAY_PLAN};
pub use error::{
    ConfigError, CoreError, ParseActivityError, ResetError, Result, TransitionError, ValidationError,
};
pub use events::Event;
pub use gauge::{Gauge, Resource, GAUGE_MAX};
pub use mood::{AnimationKey, MoodTier};
pub use pet::{
    ActivityController, PetOutcome, PetState, PettingAccumulator, Puppy, ResetOutcome, Snapshot,
    SleepRecovery, Transition, TransitionKind, DAILY_RESETS,
};
pub use storage::{BubbleConfig, PettingConfig, PuppyConfig, SleepConfig};
