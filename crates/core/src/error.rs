//! Error types for the Petal domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all Petal operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Task errors ---
    #[error("Task error: {0}")]
    Task(#[from] TaskError),

    // --- Registry errors ---
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    // --- Store errors ---
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    /// An update named an objective the task never declared.
    #[error("No such objective: {name}")]
    NoSuchObjective { name: String },

    #[error("Invalid task record: {0}")]
    InvalidRecord(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Petal already registered: {0}")]
    DuplicatePetal(String),

    #[error("Petal not found: {0}")]
    PetalNotFound(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("No stored task for key: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),
}
