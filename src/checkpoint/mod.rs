//! Checkpoint and resume support for driven entities.
//!
//! A checkpoint captures the last known label of one entity plus its
//! transition history. It never contains the machine definition or the
//! context; both are supplied again when the entity is restored, and the
//! definition's recovery hook gets the final word on the actual state.

use crate::core::{State, StateHistory};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of one entity's position in a machine.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Checkpoint<S: State> {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// Id of the machine definition the entity was driven by
    pub machine: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Current state label at checkpoint time
    pub current_state: S,

    /// Transition history
    pub history: StateHistory<S>,
}

impl<S: State> Checkpoint<S> {
    pub fn new(machine: impl Into<String>, current_state: S, history: StateHistory<S>) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            id: uuid::Uuid::new_v4().to_string(),
            machine: machine.into(),
            timestamp: Utc::now(),
            current_state,
            history,
        }
    }

    /// Check that this checkpoint can be restored into machine `machine`.
    pub fn validate(&self, machine: &str) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        if self.machine != machine {
            return Err(CheckpointError::ValidationFailed(format!(
                "checkpoint belongs to machine '{}', not '{}'",
                self.machine, machine
            )));
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        serde_json::from_str(json).map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StateTransition;

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum Phase {
        Creating,
        Running,
    }

    impl State for Phase {
        type Context = ();

        fn name(&self) -> &str {
            match self {
                Self::Creating => "Creating",
                Self::Running => "Running",
            }
        }
    }

    fn checkpoint() -> Checkpoint<Phase> {
        let history = StateHistory::new().record(StateTransition {
            from: Phase::Creating,
            to: Phase::Running,
            event: "Ready".to_string(),
            timestamp: Utc::now(),
        });
        Checkpoint::new("cluster", Phase::Running, history)
    }

    #[test]
    fn new_checkpoint_has_current_version_and_id() {
        let cp = checkpoint();
        assert_eq!(cp.version, CHECKPOINT_VERSION);
        assert!(uuid::Uuid::parse_str(&cp.id).is_ok());
        assert!(cp.validate("cluster").is_ok());
    }

    #[test]
    fn json_keeps_label_and_history() {
        let cp = checkpoint();
        let restored = Checkpoint::<Phase>::from_json(&cp.to_json().unwrap()).unwrap();

        assert_eq!(restored.id, cp.id);
        assert_eq!(restored.current_state, Phase::Running);
        assert_eq!(restored.history.transitions().len(), 1);
    }

    #[test]
    fn binary_keeps_label_and_history() {
        let cp = checkpoint();
        let restored = Checkpoint::<Phase>::from_binary(&cp.to_binary().unwrap()).unwrap();

        assert_eq!(restored.machine, "cluster");
        assert_eq!(restored.current_state, Phase::Running);
        assert_eq!(restored.timestamp, cp.timestamp);
    }

    #[test]
    fn malformed_json_is_rejected() {
        let result = Checkpoint::<Phase>::from_json("{ not json");
        assert!(matches!(
            result,
            Err(CheckpointError::DeserializationFailed(_))
        ));
    }

    #[test]
    fn validate_rejects_other_version() {
        let mut cp = checkpoint();
        cp.version = 99;

        assert!(matches!(
            cp.validate("cluster"),
            Err(CheckpointError::UnsupportedVersion {
                found: 99,
                supported: CHECKPOINT_VERSION
            })
        ));
    }

    #[test]
    fn validate_rejects_other_machine() {
        let cp = checkpoint();
        assert!(matches!(
            cp.validate("component"),
            Err(CheckpointError::ValidationFailed(_))
        ));
    }
}
