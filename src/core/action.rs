//! Actions run on entry, on exit, or as the body of an internal transition.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error returned by user actions and the recovery hook.
///
/// The engine never wraps or inspects it; dispatch hands it back to the
/// caller as-is.
pub type ActionError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Entry or exit action.
pub type Action<C> = Box<dyn Fn(&mut C) -> Result<(), ActionError> + Send + Sync>;

/// Body of an internal transition or a template state's default action.
pub type SignalAction<C> =
    Box<dyn Fn(&mut C) -> Result<Option<Signal>, ActionError> + Send + Sync>;

/// Informational value returned by internal actions.
///
/// A signal is not a state. The engine passes it through untouched and the
/// driver decides what, if anything, it means.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Signal(String);

impl Signal {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Signal {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Signal {
    fn from(value: String) -> Self {
        Self(value)
    }
}
