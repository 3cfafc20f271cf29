//! Transition variants and first-match selection.

use crate::core::{all_pass, ActionError, Event, Guard, Signal, SignalAction, State};
use std::fmt;

/// What a transition does once selected.
pub enum TransitionKind<S: State> {
    /// Leave the current state for `destination`.
    Normal { destination: S },
    /// Run `action` in place; the current state never changes.
    Internal { action: SignalAction<S::Context> },
}

/// A trigger event plus an ordered guard list bound to a target behavior.
pub struct Transition<S: State, E: Event> {
    pub(crate) event: E,
    pub(crate) guards: Vec<Guard<S::Context>>,
    pub(crate) kind: TransitionKind<S>,
}

impl<S: State, E: Event> Transition<S, E> {
    pub fn normal(event: E, destination: S, guards: Vec<Guard<S::Context>>) -> Self {
        Self {
            event,
            guards,
            kind: TransitionKind::Normal { destination },
        }
    }

    pub fn internal<F>(event: E, action: F, guards: Vec<Guard<S::Context>>) -> Self
    where
        F: Fn(&mut S::Context) -> Result<Option<Signal>, ActionError> + Send + Sync + 'static,
    {
        Self {
            event,
            guards,
            kind: TransitionKind::Internal {
                action: Box::new(action),
            },
        }
    }

    pub fn event(&self) -> &E {
        &self.event
    }

    pub fn kind(&self) -> &TransitionKind<S> {
        &self.kind
    }

    /// Destination of a normal transition, `None` for internal ones.
    pub fn destination(&self) -> Option<&S> {
        match &self.kind {
            TransitionKind::Normal { destination } => Some(destination),
            TransitionKind::Internal { .. } => None,
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self.kind, TransitionKind::Internal { .. })
    }

    /// A transition without guards always passes once its event matches.
    pub fn is_unconditional(&self) -> bool {
        self.guards.is_empty()
    }

    /// Check whether this transition is selected for `event` (guards in
    /// order, AND semantics, short-circuit).
    pub fn accepts(&self, event: &E, context: &S::Context) -> bool {
        self.event == *event && all_pass(&self.guards, context)
    }
}

impl<S: State, E: Event> fmt::Debug for Transition<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("Transition");
        out.field("event", &self.event).field("guards", &self.guards.len());
        match &self.kind {
            TransitionKind::Normal { destination } => out.field("destination", destination),
            TransitionKind::Internal { .. } => out.field("internal", &true),
        };
        out.finish()
    }
}

/// Pick the first transition whose event matches and whose guards all pass.
///
/// Ties are broken by registration order only.
pub fn select<'t, S: State, E: Event>(
    transitions: &'t [Transition<S, E>],
    event: &E,
    context: &S::Context,
) -> Option<&'t Transition<S, E>> {
    transitions.iter().find(|t| t.accepts(event, context))
}
