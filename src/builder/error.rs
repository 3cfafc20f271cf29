//! Build errors for state builders.

use thiserror::Error;

/// Errors captured while building a state. The first one poisons the chain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("Transition on {event} from state '{state}' can never fire: an earlier unguarded transition handles the same event")]
    UnreachableTransition { state: String, event: String },

    #[error("State '{state}' is final and cannot declare a transition on {event}")]
    TransitionFromFinalState { state: String, event: String },

    #[error("State '{state}' cannot be its own parent")]
    SelfParent { state: String },
}
