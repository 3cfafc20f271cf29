//! State transition history tracking.
//!
//! Drivers record every committed normal transition here. History is an
//! immutable value: recording returns a new history and leaves the old one
//! untouched.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single committed transition.
///
/// # Example
///
/// ```rust
/// use hsm::core::{State, StateTransition};
/// use serde::{Deserialize, Serialize};
/// use chrono::Utc;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum TaskState {
///     Pending,
///     Running,
/// }
///
/// impl State for TaskState {
///     type Context = ();
///
///     fn name(&self) -> &str {
///         match self {
///             Self::Pending => "Pending",
///             Self::Running => "Running",
///         }
///     }
/// }
///
/// let transition = StateTransition {
///     from: TaskState::Pending,
///     to: TaskState::Running,
///     event: "Start".to_string(),
///     timestamp: Utc::now(),
/// };
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// Debug rendering of the event that triggered the transition
    pub event: String,
    /// When the transition was committed
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of state transitions.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: Vec<StateTransition<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// ```rust
    /// use hsm::core::{State, StateHistory, StateTransition};
    /// use serde::{Deserialize, Serialize};
    /// use chrono::Utc;
    ///
    /// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    /// enum Step { A, B }
    ///
    /// impl State for Step {
    ///     type Context = ();
    ///
    ///     fn name(&self) -> &str {
    ///         match self {
    ///             Self::A => "A",
    ///             Self::B => "B",
    ///         }
    ///     }
    /// }
    ///
    /// let history = StateHistory::new();
    /// let new_history = history.record(StateTransition {
    ///     from: Step::A,
    ///     to: Step::B,
    ///     event: "Next".to_string(),
    ///     timestamp: Utc::now(),
    /// });
    ///
    /// assert_eq!(new_history.transitions().len(), 1);
    /// assert_eq!(history.transitions().len(), 0); // Original unchanged
    /// ```
    pub fn record(&self, transition: StateTransition<S>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Append a transition in place, dropping the oldest entries beyond `limit`.
    pub fn push_bounded(&mut self, transition: StateTransition<S>, limit: Option<usize>) {
        self.transitions.push(transition);
        if let Some(limit) = limit {
            let excess = self.transitions.len().saturating_sub(limit);
            self.transitions.drain(..excess);
        }
    }

    /// Keep only the most recent `limit` transitions, returning a new history.
    pub fn retain_last(&self, limit: usize) -> Self {
        let skip = self.transitions.len().saturating_sub(limit);
        Self {
            transitions: self.transitions[skip..].to_vec(),
        }
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the first transition followed by the `to`
    /// state of each transition.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Calculate total duration from first to last transition.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Most recent transition, if any.
    pub fn last(&self) -> Option<&StateTransition<S>> {
        self.transitions.last()
    }

    /// Get all transitions in order.
    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }
}
