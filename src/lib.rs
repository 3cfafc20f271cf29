//! HSM: an embeddable finite state machine engine
//!
//! A definition is built once at startup: for each state you declare entry
//! and exit actions, guarded transitions and internal transitions, then
//! commit them. At run time a driver feeds `(event, context)` pairs into the
//! definition, which picks the first accepting transition and runs the
//! actions in a fixed order. Contexts and current states belong to the
//! driver, so one definition serves any number of entities.
//!
//! # Core Concepts
//!
//! - **State**: comparable key bound to a context type via the `State` trait
//! - **Guards**: side-effect free predicates over the context
//! - **Transitions**: normal (change state) or internal (act in place)
//! - **Recovery**: a hook that re-derives an entity's state from its context
//!   after a restart
//!
//! # Example
//!
//! ```rust
//! use hsm::core::Guard;
//! use hsm::machine::StateMachineDefinition;
//! use hsm::state_enum;
//!
//! #[derive(Default)]
//! pub struct Worker {
//!     quota: u32,
//!     failures: u32,
//! }
//!
//! state_enum! {
//!     enum Phase {
//!         Idle,
//!         Running,
//!         Failed,
//!     }
//!     context: Worker;
//!     error: [Failed]
//! }
//!
//! #[derive(Debug, PartialEq)]
//! enum Ev {
//!     Start,
//!     Fail,
//! }
//!
//! let mut machine = StateMachineDefinition::new("worker", Phase::Idle);
//! machine
//!     .state(Phase::Idle)
//!     .transition(Ev::Start, Phase::Running, [Guard::new(|w: &Worker| w.quota > 0)])
//!     .build()
//!     .unwrap();
//! machine
//!     .state(Phase::Running)
//!     .transition(Ev::Fail, Phase::Failed, [])
//!     .build()
//!     .unwrap();
//! machine
//!     .state(Phase::Failed)
//!     .on_enter(|w: &mut Worker| {
//!         w.failures += 1;
//!         Ok(())
//!     })
//!     .build()
//!     .unwrap();
//!
//! let mut current = Phase::Idle;
//! let mut worker = Worker { quota: 1, ..Worker::default() };
//! machine.fire(&mut current, &Ev::Start, &mut worker).unwrap();
//! machine.fire(&mut current, &Ev::Fail, &mut worker).unwrap();
//!
//! assert_eq!(current, Phase::Failed);
//! assert_eq!(worker.failures, 1);
//! ```

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod dcs;
pub mod driver;
pub mod machine;

// Re-export commonly used types
pub use builder::{BuildError, StateBuilder};
pub use checkpoint::{Checkpoint, CheckpointError};
pub use crate::core::{ActionError, Event, Guard, Signal, State, StateHistory, StateTransition};
pub use driver::{Instance, InstanceConfig, DEFAULT_HISTORY_LIMIT};
pub use machine::{Fired, RecoveryError, StateMachineDefinition};
