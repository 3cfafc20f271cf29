//! Builder API for state machine definitions.
//!
//! Definitions are populated one state at a time. Each
//! [`StateMachineDefinition::state`](crate::machine::StateMachineDefinition::state)
//! call opens a [`StateBuilder`] chain; `build()` commits it.
//!
//! ```
//! use hsm::machine::StateMachineDefinition;
//! use hsm::state_enum;
//!
//! pub struct Job {
//!     attempts: u32,
//! }
//!
//! state_enum! {
//!     enum JobState {
//!         Queued,
//!         Running,
//!         Done,
//!     }
//!     context: Job;
//!     final: [Done]
//! }
//!
//! #[derive(Debug, PartialEq)]
//! enum JobEvent {
//!     Start,
//!     Finish,
//! }
//!
//! let mut machine = StateMachineDefinition::new("job", JobState::Queued);
//! machine
//!     .state(JobState::Queued)
//!     .on_exit(|job: &mut Job| {
//!         job.attempts += 1;
//!         Ok(())
//!     })
//!     .transition(JobEvent::Start, JobState::Running, [])
//!     .build()
//!     .unwrap();
//! machine
//!     .state(JobState::Running)
//!     .transition(JobEvent::Finish, JobState::Done, [])
//!     .build()
//!     .unwrap();
//! ```

pub mod error;
pub mod macros;
pub mod state;

pub use error::BuildError;
pub use state::StateBuilder;
