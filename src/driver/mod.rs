//! Reference driver owning one entity's state and context.
//!
//! The engine itself never holds per-entity data. [`Instance`] is a small
//! driver for embedders that do not need their own: it keeps the current
//! state and context together, records committed transitions, produces
//! checkpoints and resumes through the definition's recovery hook.
//!
//! One instance serves one entity. `fire` takes `&mut self`, so dispatch on
//! the same entity is serialized by construction; the definition itself is
//! shared between instances through an `Arc`.

use crate::checkpoint::{Checkpoint, CheckpointError};
use crate::core::{ActionError, Event, State, StateHistory, StateTransition};
use crate::machine::{Fired, RecoveryError, StateMachineDefinition};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// History entries kept per instance unless configured otherwise.
pub const DEFAULT_HISTORY_LIMIT: usize = 256;

/// Driver settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceConfig {
    /// Maximum number of transitions kept in history; `None` keeps all and
    /// grows for the lifetime of the instance.
    #[serde(default = "default_history_limit")]
    pub history_limit: Option<usize>,
}

fn default_history_limit() -> Option<usize> {
    Some(DEFAULT_HISTORY_LIMIT)
}

impl Default for InstanceConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
        }
    }
}

/// One entity driven by a shared definition.
pub struct Instance<S: State, E: Event> {
    definition: Arc<StateMachineDefinition<S, E>>,
    current: S,
    context: S::Context,
    history: StateHistory<S>,
    config: InstanceConfig,
}

impl<S: State, E: Event> Instance<S, E> {
    /// Start tracking a new entity in the definition's initial state.
    ///
    /// Entry actions of the initial state are not run.
    pub fn new(definition: Arc<StateMachineDefinition<S, E>>, context: S::Context) -> Self {
        let current = definition.initial_state().clone();
        Self::at(definition, current, context)
    }

    /// Resume an entity whose last persisted label is `persisted`.
    ///
    /// When the definition has a recovery hook its answer wins over the
    /// label, since the managed system may have moved on while nobody was
    /// watching. Without a hook the label is trusted.
    pub fn resume(
        definition: Arc<StateMachineDefinition<S, E>>,
        context: S::Context,
        persisted: S,
    ) -> Result<Self, RecoveryError> {
        let current = match definition.recover(&context)? {
            Some(recovered) => {
                if recovered != persisted {
                    tracing::info!(
                        machine = %definition.id(),
                        persisted = persisted.name(),
                        recovered = recovered.name(),
                        "recovered state overrides persisted label"
                    );
                }
                recovered
            }
            None => persisted,
        };
        Ok(Self::at(definition, current, context))
    }

    /// Resume from a checkpoint, keeping its history.
    pub fn restore(
        definition: Arc<StateMachineDefinition<S, E>>,
        checkpoint: Checkpoint<S>,
        context: S::Context,
    ) -> Result<Self, CheckpointError> {
        checkpoint.validate(definition.id())?;
        let mut instance = Self::resume(definition, context, checkpoint.current_state)?;
        instance.history = checkpoint.history;
        Ok(instance)
    }

    fn at(definition: Arc<StateMachineDefinition<S, E>>, current: S, context: S::Context) -> Self {
        Self {
            definition,
            current,
            context,
            history: StateHistory::new(),
            config: InstanceConfig::default(),
        }
    }

    pub fn with_config(mut self, config: InstanceConfig) -> Self {
        self.config = config;
        self
    }

    /// Dispatch one event. See [`StateMachineDefinition::fire`] for the
    /// ordering contract; a transition is recorded in history whenever the
    /// state pointer was replaced, including when an entry action then failed.
    pub fn fire(&mut self, event: &E) -> Result<Fired<S>, ActionError> {
        let dispatched = self
            .definition
            .dispatch(&mut self.current, event, &mut self.context);

        if let Some(from) = dispatched.committed_from {
            self.record(from, event);
        }
        dispatched.result
    }

    fn record(&mut self, from: S, event: &E) {
        let transition = StateTransition {
            from,
            to: self.current.clone(),
            event: format!("{event:?}"),
            timestamp: Utc::now(),
        };
        self.history.push_bounded(transition, self.config.history_limit);
    }

    /// Snapshot the current label and history.
    pub fn checkpoint(&self) -> Checkpoint<S> {
        Checkpoint::new(self.definition.id(), self.current.clone(), self.history.clone())
    }

    pub fn current_state(&self) -> &S {
        &self.current
    }

    pub fn context(&self) -> &S::Context {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut S::Context {
        &mut self.context
    }

    pub fn history(&self) -> &StateHistory<S> {
        &self.history
    }

    pub fn definition(&self) -> &Arc<StateMachineDefinition<S, E>> {
        &self.definition
    }

    pub fn is_final(&self) -> bool {
        self.current.is_final()
    }

    /// Stop tracking the entity and hand back its context.
    pub fn into_context(self) -> S::Context {
        self.context
    }
}
