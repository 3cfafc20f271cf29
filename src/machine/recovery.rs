//! Context-driven recovery of an entity's current state.

use crate::core::{ActionError, Event, State};
use crate::machine::definition::StateMachineDefinition;
use thiserror::Error;

/// The recovery hook could not derive a state for one entity.
///
/// Fatal for that entity only. Drivers should mark it for manual
/// intervention instead of retrying.
#[derive(Debug, Error)]
#[error("state machine '{machine}' could not recover entity state: {source}")]
pub struct RecoveryError {
    pub machine: String,
    #[source]
    pub source: ActionError,
}

impl<S: State, E: Event> StateMachineDefinition<S, E> {
    /// Ask the recovery hook for the entity's actual state.
    ///
    /// Returns `Ok(None)` when no hook is registered, in which case the
    /// driver has nothing better than its persisted label.
    pub fn recover(&self, context: &S::Context) -> Result<Option<S>, RecoveryError> {
        let Some(recover) = &self.recover_fn else {
            return Ok(None);
        };

        match recover(context) {
            Ok(state) => {
                tracing::debug!(machine = %self.id(), state = state.name(), "recovered state");
                Ok(Some(state))
            }
            Err(source) => {
                tracing::warn!(machine = %self.id(), error = %source, "recovery failed");
                Err(RecoveryError {
                    machine: self.id().to_string(),
                    source,
                })
            }
        }
    }
}
