//! Core State and Event traits.
//!
//! A state is an opaque, comparable key that also names the context type its
//! guards and actions operate on. Events are plain comparable tokens.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state machine states.
///
/// States are keys in a definition's registry, so they must be hashable and
/// comparable. They are also serializable so that drivers can persist the
/// last known label of an entity.
///
/// # Example
///
/// ```rust
/// use hsm::core::State;
/// use serde::{Deserialize, Serialize};
///
/// struct Job {
///     retries: u32,
/// }
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum JobState {
///     Pending,
///     Running,
///     Done,
/// }
///
/// impl State for JobState {
///     type Context = Job;
///
///     fn name(&self) -> &str {
///         match self {
///             Self::Pending => "Pending",
///             Self::Running => "Running",
///             Self::Done => "Done",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Done)
///     }
/// }
/// ```
pub trait State:
    Clone + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// The caller-owned value threaded through every guard and action.
    type Context;

    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a final (terminal) state.
    ///
    /// Final states may not declare outgoing transitions. They can still be
    /// reached and can still carry entry actions.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if this is an error state.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}

/// Trait for events that trigger transitions.
///
/// Events carry no payload the engine looks at; any data travels through
/// the context. Implemented for every type with the required bounds.
pub trait Event: PartialEq + Debug + Send + Sync + 'static {}

impl<T> Event for T where T: PartialEq + Debug + Send + Sync + 'static {}
