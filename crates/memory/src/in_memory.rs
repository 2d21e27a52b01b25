//! In-memory task store — useful for testing and ephemeral sessions.

use async_trait::async_trait;
use petal_core::error::StoreError;
use petal_core::store::{ConversationId, TaskStore};
use petal_core::task::TaskRecord;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// A task store that keeps records in a map.
/// Useful for testing and sessions where persistence isn't needed.
#[derive(Clone, Default)]
pub struct InMemoryTaskStore {
    records: Arc<RwLock<HashMap<ConversationId, TaskRecord>>>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn save(&self, key: &ConversationId, record: &TaskRecord) -> Result<(), StoreError> {
        debug!(conversation = %key, finished = record.finished, "Saving task record");
        self.records
            .write()
            .await
            .insert(key.clone(), record.clone());
        Ok(())
    }

    async fn load(&self, key: &ConversationId) -> Result<Option<TaskRecord>, StoreError> {
        Ok(self.records.read().await.get(key).cloned())
    }

    async fn delete(&self, key: &ConversationId) -> Result<bool, StoreError> {
        Ok(self.records.write().await.remove(key).is_some())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.records.read().await.len())
    }
}
