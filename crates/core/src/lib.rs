//! # Petal Core
//!
//! Domain types, traits, and error definitions for the Petal assistant
//! runtime. A petal pursues one task at a time; the task tracks which
//! objectives still have to be collected from the user.
//!
//! ## Design Philosophy
//!
//! Collaborators at the edges (model token streams, task persistence) are
//! defined as traits here. Implementations live in their respective crates,
//! so the domain model can be tested in isolation.

pub mod error;
pub mod objective;
pub mod petal;
pub mod registry;
pub mod store;
pub mod task;
pub mod token;

// Re-export key types at crate root for ergonomics
pub use error::{Error, RegistryError, Result, StoreError, TaskError};
pub use objective::{ADDITIONAL_PREFIX, ObjectiveState, Objectives};
pub use petal::{Petal, petal_hash};
pub use registry::PetalRegistry;
pub use store::{ConversationId, TaskStore};
pub use task::{Task, TaskRecord};
pub use token::{TokenSource, VecTokenSource};
