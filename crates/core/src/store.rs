//! Task store trait — persistence of task records between turns.
//!
//! The runtime only ever hands the store a `TaskRecord`, the flat
//! four-field shape. Backends decide how to keep it: in memory for tests and
//! ephemeral sessions, or an external key-value store.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StoreError;
use crate::task::TaskRecord;

/// Unique identifier for a conversation; the key a task is stored under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationId(pub String);

impl ConversationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from(s: &str) -> Self {
        Self(s.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ConversationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConversationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The core TaskStore trait.
///
/// Implementations: in-memory (for testing). External stores live outside
/// this workspace.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// The backend name (e.g., "in_memory").
    fn name(&self) -> &str;

    /// Store a record, replacing any previous one under the same key.
    async fn save(&self, key: &ConversationId, record: &TaskRecord)
    -> Result<(), StoreError>;

    /// Load the record for a key.
    async fn load(&self, key: &ConversationId) -> Result<Option<TaskRecord>, StoreError>;

    /// Delete the record for a key. Returns whether one existed.
    async fn delete(&self, key: &ConversationId) -> Result<bool, StoreError>;

    /// Number of stored records.
    async fn count(&self) -> Result<usize, StoreError>;
}
