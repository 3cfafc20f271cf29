//! Core state machine types.
//!
//! This module contains the leaf abstractions every definition is built from:
//! - State and Event traits
//! - Guard predicates over a caller-owned context
//! - Action and signal types
//! - Immutable history tracking used by drivers

mod action;
mod guard;
mod history;
mod state;

pub use action::{Action, ActionError, Signal, SignalAction};
pub use guard::{all_pass, Guard};
pub use history::{StateHistory, StateTransition};
pub use state::{Event, State};
