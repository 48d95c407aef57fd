//! Grid-world simulator core
//!
//! All the simulation logic lives here, free of I/O and rendering concerns.
//! External collaborators (an agent picking actions, a renderer drawing the
//! observation grid) consume this module through `step`/`reset`/`observe`.

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod observation;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, ACTION_COUNT};
pub use config::EnvConfig;
pub use engine::{GridWorld, StepInfo, StepOutcome};
pub use error::EnvError;
pub use observation::{Observation, ACTOR_MARKER, EMPTY_MARKER, PRIZE_MARKER};
pub use state::{Actor, CollisionKind, EnvState, Phase, Position};
