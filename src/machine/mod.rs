//! State machine definitions and dispatch.
//!
//! # Key Concepts
//!
//! - **Definition**: a named registry of per-state behavior, built once and
//!   shared read-only afterwards
//! - **Transitions**: normal transitions change state, internal transitions
//!   run an action in place
//! - **Dispatch**: first-match resolution with ordered, short-circuiting guards
//! - **Recovery**: a hook that re-derives an entity's state from its context

mod definition;
mod dispatch;
mod recovery;
mod transition;

pub use definition::{RecoverFn, StateDefinition, StateMachineDefinition};
pub use dispatch::Fired;
pub use recovery::RecoveryError;
pub use transition::{select, Transition, TransitionKind};
