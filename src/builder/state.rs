//! Fluent builder for one state's definition.

use crate::builder::error::BuildError;
use crate::core::{ActionError, Event, Guard, Signal, State};
use crate::machine::{StateDefinition, StateMachineDefinition, Transition};

/// Accumulates one state's behavior and commits it on [`build`](Self::build).
///
/// The first construction error poisons the builder: every later call is a
/// no-op that hands back the same builder, and `build()` returns that first
/// error without touching the registry.
pub struct StateBuilder<'d, S: State, E: Event> {
    machine: &'d mut StateMachineDefinition<S, E>,
    definition: StateDefinition<S, E>,
    error: Option<BuildError>,
}

impl<'d, S: State, E: Event> StateBuilder<'d, S, E> {
    pub(crate) fn new(machine: &'d mut StateMachineDefinition<S, E>, state: S) -> Self {
        Self {
            machine,
            definition: StateDefinition::new(state),
            error: None,
        }
    }

    /// The error that poisoned this builder, if any.
    pub fn error(&self) -> Option<&BuildError> {
        self.error.as_ref()
    }

    /// Append an action run whenever a normal transition enters this state.
    pub fn on_enter<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut S::Context) -> Result<(), ActionError> + Send + Sync + 'static,
    {
        if self.error.is_none() {
            self.definition.entry_actions.push(Box::new(action));
        }
        self
    }

    /// Append an action run whenever a normal transition leaves this state.
    pub fn on_exit<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut S::Context) -> Result<(), ActionError> + Send + Sync + 'static,
    {
        if self.error.is_none() {
            self.definition.exit_actions.push(Box::new(action));
        }
        self
    }

    /// Register a normal transition to `destination` on `event`.
    pub fn transition<G>(self, event: E, destination: S, guards: G) -> Self
    where
        G: IntoIterator<Item = Guard<S::Context>>,
    {
        if self.error.is_some() {
            return self;
        }
        let guards = guards.into_iter().collect();
        self.push(Transition::normal(event, destination, guards))
    }

    /// Register an internal transition running `action` on `event` without
    /// leaving the state.
    pub fn internal_transition<F, G>(self, event: E, action: F, guards: G) -> Self
    where
        F: Fn(&mut S::Context) -> Result<Option<Signal>, ActionError> + Send + Sync + 'static,
        G: IntoIterator<Item = Guard<S::Context>>,
    {
        if self.error.is_some() {
            return self;
        }
        let guards = guards.into_iter().collect();
        self.push(Transition::internal(event, action, guards))
    }

    /// Declare `parent` as this state's parent. Events this state does not
    /// handle are resolved against the parent's transitions.
    pub fn substate_of(mut self, parent: S) -> Self {
        if self.error.is_some() {
            return self;
        }
        if parent == self.definition.state {
            let state = self.definition.state.name().to_string();
            return self.poison(BuildError::SelfParent { state });
        }
        self.definition.parent = Some(parent);
        self
    }

    /// Commit everything accumulated so far, replacing any earlier
    /// registration of this state.
    pub fn build(self) -> Result<(), BuildError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        self.machine.commit(self.definition);
        Ok(())
    }

    fn push(mut self, transition: Transition<S, E>) -> Self {
        let state = &self.definition.state;
        if state.is_final() {
            let err = BuildError::TransitionFromFinalState {
                state: state.name().to_string(),
                event: format!("{:?}", transition.event()),
            };
            return self.poison(err);
        }

        let shadowed = self
            .definition
            .transitions
            .iter()
            .any(|t| t.is_unconditional() && t.event() == transition.event());
        if shadowed {
            let err = BuildError::UnreachableTransition {
                state: state.name().to_string(),
                event: format!("{:?}", transition.event()),
            };
            return self.poison(err);
        }

        self.definition.transitions.push(transition);
        self
    }

    fn poison(mut self, err: BuildError) -> Self {
        tracing::debug!(
            machine = %self.machine.id(),
            state = self.definition.state.name(),
            error = %err,
            "state builder poisoned"
        );
        self.error = Some(err);
        self
    }
}
