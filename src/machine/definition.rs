//! State machine definitions: the registry of per-state behavior.

use crate::builder::StateBuilder;
use crate::core::{Action, ActionError, Event, Signal, SignalAction, State};
use crate::machine::transition::{self, Transition};
use std::collections::HashMap;
use std::fmt;

/// Recovery hook deriving an entity's actual state from its context.
pub type RecoverFn<S> =
    Box<dyn Fn(&<S as State>::Context) -> Result<S, ActionError> + Send + Sync>;

/// Everything one state does: entry and exit actions, outgoing transitions,
/// an optional default action and an optional parent.
pub struct StateDefinition<S: State, E: Event> {
    pub(crate) state: S,
    pub(crate) entry_actions: Vec<Action<S::Context>>,
    pub(crate) exit_actions: Vec<Action<S::Context>>,
    pub(crate) transitions: Vec<Transition<S, E>>,
    pub(crate) default_action: Option<SignalAction<S::Context>>,
    pub(crate) parent: Option<S>,
}

impl<S: State, E: Event> StateDefinition<S, E> {
    pub(crate) fn new(state: S) -> Self {
        Self {
            state,
            entry_actions: Vec::new(),
            exit_actions: Vec::new(),
            transitions: Vec::new(),
            default_action: None,
            parent: None,
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn transitions(&self) -> &[Transition<S, E>] {
        &self.transitions
    }

    pub fn entry_action_count(&self) -> usize {
        self.entry_actions.len()
    }

    pub fn exit_action_count(&self) -> usize {
        self.exit_actions.len()
    }

    pub fn parent(&self) -> Option<&S> {
        self.parent.as_ref()
    }

    pub fn has_default_action(&self) -> bool {
        self.default_action.is_some()
    }

    /// A state with no transitions and no default action ignores every event.
    pub fn is_sink(&self) -> bool {
        self.transitions.is_empty() && self.default_action.is_none()
    }

    /// First transition of this state (parents excluded) accepting `event`.
    pub fn select(&self, event: &E, context: &S::Context) -> Option<&Transition<S, E>> {
        transition::select(&self.transitions, event, context)
    }
}

impl<S: State, E: Event> fmt::Debug for StateDefinition<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateDefinition")
            .field("state", &self.state)
            .field("entry_actions", &self.entry_actions.len())
            .field("exit_actions", &self.exit_actions.len())
            .field("transitions", &self.transitions)
            .field("default_action", &self.default_action.is_some())
            .field("parent", &self.parent)
            .finish()
    }
}

/// Named registry mapping each state to its definition.
///
/// A definition is populated once through [`StateBuilder`] chains and is
/// read-only afterwards: dispatch only needs `&self`, so one definition can
/// be wrapped in an `Arc` and shared by every driver in the process.
///
/// # Example
///
/// ```rust
/// use hsm::core::Guard;
/// use hsm::machine::{Fired, StateMachineDefinition};
/// use hsm::state_enum;
///
/// pub struct Quota {
///     remaining: u32,
/// }
///
/// state_enum! {
///     enum Phase {
///         Idle,
///         Running,
///     }
///     context: Quota;
/// }
///
/// #[derive(Debug, PartialEq)]
/// enum Ev {
///     Start,
/// }
///
/// let mut machine = StateMachineDefinition::<Phase, Ev>::new("job", Phase::Idle);
/// machine
///     .state(Phase::Idle)
///     .transition(Ev::Start, Phase::Running, [Guard::new(|q: &Quota| q.remaining > 0)])
///     .build()
///     .unwrap();
///
/// let mut current = Phase::Idle;
/// let mut quota = Quota { remaining: 1 };
/// let fired = machine.fire(&mut current, &Ev::Start, &mut quota).unwrap();
///
/// assert_eq!(current, Phase::Running);
/// assert!(matches!(fired, Fired::Transitioned { .. }));
/// ```
pub struct StateMachineDefinition<S: State, E: Event> {
    name: String,
    initial_state: S,
    pub(crate) states: HashMap<S, StateDefinition<S, E>>,
    pub(crate) recover_fn: Option<RecoverFn<S>>,
}

impl<S: State, E: Event> StateMachineDefinition<S, E> {
    /// Create an empty definition.
    ///
    /// The initial state is not registered; it may be built later or stay a
    /// sink.
    pub fn new(id: impl Into<String>, initial_state: S) -> Self {
        Self {
            name: id.into(),
            initial_state,
            states: HashMap::new(),
            recover_fn: None,
        }
    }

    /// Stable identifier used in diagnostics and by drivers handling
    /// several machines.
    pub fn id(&self) -> &str {
        &self.name
    }

    pub fn initial_state(&self) -> &S {
        &self.initial_state
    }

    /// Start a builder chain for `state`.
    ///
    /// Nothing is registered until the chain's `build()` succeeds, and a
    /// later successful chain for the same state replaces this one.
    pub fn state(&mut self, state: S) -> StateBuilder<'_, S, E> {
        StateBuilder::new(self, state)
    }

    /// Register `state` with a single unconditional default action and no
    /// transitions.
    ///
    /// The action runs for every event the state receives, in place, like
    /// an internal transition. Any earlier registration of `state` is
    /// replaced.
    pub fn template_state<F>(&mut self, state: S, action: F) -> &mut Self
    where
        F: Fn(&mut S::Context) -> Result<Option<Signal>, ActionError> + Send + Sync + 'static,
    {
        let mut definition = StateDefinition::new(state);
        definition.default_action = Some(Box::new(action));
        self.commit(definition);
        self
    }

    /// Attach the recovery hook consulted by drivers when they resume an
    /// entity after a restart.
    pub fn on_recover<F>(&mut self, recover: F) -> &mut Self
    where
        F: Fn(&S::Context) -> Result<S, ActionError> + Send + Sync + 'static,
    {
        self.recover_fn = Some(Box::new(recover));
        self
    }

    pub fn has_recovery(&self) -> bool {
        self.recover_fn.is_some()
    }

    /// Whether `state` has a registry entry. Unregistered states are sinks.
    pub fn contains(&self, state: &S) -> bool {
        self.states.contains_key(state)
    }

    pub fn definition(&self, state: &S) -> Option<&StateDefinition<S, E>> {
        self.states.get(state)
    }

    /// Iterate over registered states in no particular order.
    pub fn states(&self) -> impl Iterator<Item = &S> {
        self.states.keys()
    }

    pub(crate) fn commit(&mut self, definition: StateDefinition<S, E>) {
        tracing::debug!(
            machine = %self.name,
            state = definition.state.name(),
            transitions = definition.transitions.len(),
            "registered state"
        );
        self.states.insert(definition.state.clone(), definition);
    }
}

impl<S: State, E: Event> fmt::Debug for StateMachineDefinition<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachineDefinition")
            .field("name", &self.name)
            .field("initial_state", &self.initial_state)
            .field("states", &self.states.len())
            .field("recover_fn", &self.recover_fn.is_some())
            .finish()
    }
}
