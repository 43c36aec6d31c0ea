//! Core conversation state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions.

pub mod criteria;
mod effect;
pub mod event;
pub mod messages;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use criteria::SearchCriteria;
pub use effect::Effect;
pub use event::{Event, SearchOutcome, GO_LABEL};
pub use state::{ConvState, UserId, UserPreferences};
pub use transition::transition;
