//! Event dispatch: transition resolution and action ordering.

use crate::core::{ActionError, Event, Signal, State};
use crate::machine::definition::{StateDefinition, StateMachineDefinition};
use crate::machine::transition::{Transition, TransitionKind};

/// Outcome of a successful dispatch.
#[derive(Clone, Debug, PartialEq)]
pub enum Fired<S> {
    /// Nothing matched; the current state is unchanged.
    Unhandled,
    /// A normal transition committed.
    Transitioned { from: S, to: S },
    /// An internal transition ran in place.
    Internal { signal: Option<Signal> },
    /// No transition matched and the state's default action ran in place.
    Default { signal: Option<Signal> },
}

impl<S> Fired<S> {
    pub fn is_unhandled(&self) -> bool {
        matches!(self, Self::Unhandled)
    }

    /// Signal returned by an internal or default action, if any.
    pub fn signal(&self) -> Option<&Signal> {
        match self {
            Self::Internal { signal } | Self::Default { signal } => signal.as_ref(),
            _ => None,
        }
    }
}

/// Dispatch result plus the state that was left, when a normal transition
/// replaced the state pointer.
pub(crate) struct Dispatched<S> {
    pub(crate) committed_from: Option<S>,
    pub(crate) result: Result<Fired<S>, ActionError>,
}

impl<S: State, E: Event> StateMachineDefinition<S, E> {
    /// Dispatch `event` against the entity whose state is `current`.
    ///
    /// For a normal transition the current state's exit actions run first.
    /// If one fails, its error is returned and `current` is untouched.
    /// Otherwise `current` is switched to the destination and then the
    /// destination's entry actions run; an entry failure is returned with
    /// `current` already switched. The engine never retries or rolls back.
    ///
    /// States without a registry entry, and events no transition accepts,
    /// are no-ops reported as [`Fired::Unhandled`].
    ///
    /// Callers must not dispatch concurrently for the same entity.
    pub fn fire(
        &self,
        current: &mut S,
        event: &E,
        context: &mut S::Context,
    ) -> Result<Fired<S>, ActionError> {
        self.dispatch(current, event, context).result
    }

    /// Like [`fire`](Self::fire), but also reports whether the state pointer
    /// was replaced, which stays observable when an entry action fails
    /// afterwards (including self-transitions, where the label is unchanged).
    pub(crate) fn dispatch(
        &self,
        current: &mut S,
        event: &E,
        context: &mut S::Context,
    ) -> Dispatched<S> {
        let mut committed_from = None;
        let result = self.dispatch_inner(current, event, context, &mut committed_from);
        Dispatched {
            committed_from,
            result,
        }
    }

    fn dispatch_inner(
        &self,
        current: &mut S,
        event: &E,
        context: &mut S::Context,
        committed_from: &mut Option<S>,
    ) -> Result<Fired<S>, ActionError> {
        let Some(origin) = self.states.get(&*current) else {
            tracing::trace!(
                machine = %self.id(),
                state = current.name(),
                ?event,
                "state has no definition, ignoring event"
            );
            return Ok(Fired::Unhandled);
        };

        if let Some(transition) = self.resolve(origin, event, context) {
            return match &transition.kind {
                TransitionKind::Normal { destination } => {
                    self.transfer(origin, current, destination, context, committed_from)
                }
                TransitionKind::Internal { action } => {
                    let signal = action(context).inspect_err(|err| {
                        tracing::warn!(
                            machine = %self.id(),
                            state = current.name(),
                            ?event,
                            error = %err,
                            "internal transition action failed"
                        );
                    })?;
                    tracing::debug!(
                        machine = %self.id(),
                        state = current.name(),
                        ?event,
                        "internal transition"
                    );
                    Ok(Fired::Internal { signal })
                }
            };
        }

        if let Some(action) = &origin.default_action {
            let signal = action(context).inspect_err(|err| {
                tracing::warn!(
                    machine = %self.id(),
                    state = current.name(),
                    ?event,
                    error = %err,
                    "default action failed"
                );
            })?;
            tracing::debug!(
                machine = %self.id(),
                state = current.name(),
                ?event,
                "default action ran"
            );
            return Ok(Fired::Default { signal });
        }

        tracing::trace!(
            machine = %self.id(),
            state = current.name(),
            ?event,
            "no transition accepted event"
        );
        Ok(Fired::Unhandled)
    }

    /// Find the first accepting transition on `origin`, then on each
    /// ancestor in turn.
    fn resolve<'a>(
        &'a self,
        origin: &'a StateDefinition<S, E>,
        event: &E,
        context: &S::Context,
    ) -> Option<&'a Transition<S, E>> {
        let mut visited = 0;
        let mut next = Some(origin);
        while let Some(definition) = next {
            if let Some(transition) = definition.select(event, context) {
                return Some(transition);
            }
            visited += 1;
            if visited > self.states.len() {
                tracing::warn!(
                    machine = %self.id(),
                    state = origin.state.name(),
                    "parent chain loops back on itself"
                );
                return None;
            }
            next = definition.parent.as_ref().and_then(|p| self.states.get(p));
        }
        None
    }

    fn transfer(
        &self,
        origin: &StateDefinition<S, E>,
        current: &mut S,
        destination: &S,
        context: &mut S::Context,
        committed_from: &mut Option<S>,
    ) -> Result<Fired<S>, ActionError> {
        for exit in &origin.exit_actions {
            exit(context).inspect_err(|err| {
                tracing::warn!(
                    machine = %self.id(),
                    state = current.name(),
                    error = %err,
                    "exit action failed, staying in state"
                );
            })?;
        }

        let from = std::mem::replace(current, destination.clone());
        tracing::debug!(
            machine = %self.id(),
            from = from.name(),
            to = destination.name(),
            "transition committed"
        );
        *committed_from = Some(from.clone());

        if let Some(target) = self.states.get(destination) {
            for entry in &target.entry_actions {
                entry(context).inspect_err(|err| {
                    tracing::warn!(
                        machine = %self.id(),
                        state = destination.name(),
                        error = %err,
                        "entry action failed after state switch"
                    );
                })?;
            }
        }

        Ok(Fired::Transitioned {
            from,
            to: destination.clone(),
        })
    }
}
