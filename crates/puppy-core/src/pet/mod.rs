//! The pet itself: state, activity controller, petting accumulator and the
//! `Puppy` handle that composes them.

mod controller;
mod petting;
mod puppy;
mod state;

pub use controller::{ActivityController, ResetOutcome, SleepRecovery, Transition, TransitionKind};
pub use petting::{PetOutcome, PettingAccumulator};
pub use puppy::Puppy;
pub use state::{PetState, Snapshot, DAILY_RESETS};
