//! Conversation sessions — one petal task per conversation.
//!
//! A session resumes the stored task for its conversation (or starts from
//! the petal's task), applies the user's answers, and persists the task
//! after every change. A change only reaches the session's task once the
//! store has accepted it. One session per conversation at a time; the session
//! does no locking of its own.

use std::sync::Arc;

use petal_core::error::Result;
use petal_core::petal::Petal;
use petal_core::store::{ConversationId, TaskStore};
use petal_core::task::Task;
use tracing::{debug, info};

use crate::prompt::PromptBuilder;

/// What the orchestrator should do next for a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextStep {
    /// Objectives are missing; send this prompt to the model.
    AskUser { prompt: String },
    /// Everything is collected; run the named controller.
    RunController { controller: String },
    /// The controller already marked the task finished.
    Finished,
}

/// Decide the next step from the task's current state.
pub fn next_step(prompts: &PromptBuilder, task: &Task) -> NextStep {
    if task.is_finished() {
        NextStep::Finished
    } else if task.all_collected() {
        NextStep::RunController {
            controller: task.controller_ref().to_string(),
        }
    } else {
        NextStep::AskUser {
            prompt: prompts.objective_prompt(task),
        }
    }
}

/// A conversation bound to one petal and a task store.
pub struct Session {
    id: ConversationId,
    petal_name: String,
    prompts: PromptBuilder,
    task: Task,
    store: Arc<dyn TaskStore>,
}

impl Session {
    /// Load the task stored for `id`, or start from the petal's own task.
    pub async fn resume(
        id: ConversationId,
        petal: &Petal,
        store: Arc<dyn TaskStore>,
    ) -> Result<Self> {
        let task = match store.load(&id).await? {
            Some(record) => {
                debug!(conversation = %id, "Resumed stored task");
                Task::from_record(&record)?
            }
            None => {
                info!(conversation = %id, petal = petal.name(), "Starting new task");
                petal.task.clone()
            }
        };

        Ok(Self {
            id,
            petal_name: petal.name().to_string(),
            prompts: PromptBuilder::new(petal.name()),
            task,
            store,
        })
    }

    pub fn id(&self) -> &ConversationId {
        &self.id
    }

    pub fn petal_name(&self) -> &str {
        &self.petal_name
    }

    pub fn task(&self) -> &Task {
        &self.task
    }

    pub fn next_step(&self) -> NextStep {
        next_step(&self.prompts, &self.task)
    }

    /// Collect one objective, persist, and report what comes next.
    pub async fn record_answer(&mut self, objective: &str, value: &str) -> Result<NextStep> {
        let mut task = self.task.clone();
        task.update_objective(objective, value)?;
        self.commit(task).await?;
        Ok(self.next_step())
    }

    /// Store extra information the user volunteered, then persist.
    pub async fn record_additional(&mut self, name: &str, value: &str) -> Result<()> {
        let mut task = self.task.clone();
        task.add_additional_objective(name, value);
        self.commit(task).await
    }

    /// Called by the controller once it has done its work.
    pub async fn finish(&mut self) -> Result<()> {
        let mut task = self.task.clone();
        task.set_finished(true);
        self.commit(task).await?;
        info!(conversation = %self.id, petal = %self.petal_name, "Task finished");
        Ok(())
    }

    pub async fn save(&self) -> Result<()> {
        let record = self.task.to_record()?;
        self.store.save(&self.id, &record).await?;
        Ok(())
    }

    /// Persist `task`, and only then make it the session's task.
    async fn commit(&mut self, task: Task) -> Result<()> {
        let record = task.to_record()?;
        self.store.save(&self.id, &record).await?;
        self.task = task;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use petal_core::error::{Error, StoreError, TaskError};
    use petal_core::objective::Objectives;
    use petal_core::task::TaskRecord;
    use petal_memory::InMemoryTaskStore;

    /// A store whose writes always fail.
    struct ReadOnlyStore;

    #[async_trait]
    impl TaskStore for ReadOnlyStore {
        fn name(&self) -> &str {
            "read_only"
        }

        async fn save(&self, _key: &ConversationId, _record: &TaskRecord) -> std::result::Result<(), StoreError> {
            Err(StoreError::Storage("store is read-only".into()))
        }

        async fn load(&self, _key: &ConversationId) -> std::result::Result<Option<TaskRecord>, StoreError> {
            Ok(None)
        }

        async fn delete(&self, _key: &ConversationId) -> std::result::Result<bool, StoreError> {
            Ok(false)
        }

        async fn count(&self) -> std::result::Result<usize, StoreError> {
            Ok(0)
        }
    }

    fn florist() -> Petal {
        Petal::new(
            "florist",
            Task::new(
                "order flowers",
                "flower_order",
                Objectives::uncollected(["recipient", "address"]),
            ),
        )
    }

    #[tokio::test]
    async fn new_session_asks_for_missing_objectives() {
        let store = Arc::new(InMemoryTaskStore::new());
        let session = Session::resume(ConversationId::new(), &florist(), store)
            .await
            .unwrap();

        match session.next_step() {
            NextStep::AskUser { prompt } => {
                assert!(prompt.ends_with("- recipient\n- address"));
            }
            other => panic!("unexpected step: {other:?}"),
        }
    }

    #[tokio::test]
    async fn answers_persist_and_lead_to_controller() {
        let store = Arc::new(InMemoryTaskStore::new());
        let id = ConversationId::from("conv-1");
        let petal = florist();

        let mut session = Session::resume(id.clone(), &petal, store.clone())
            .await
            .unwrap();
        let step = session.record_answer("recipient", "Ada").await.unwrap();
        assert!(matches!(step, NextStep::AskUser { .. }));

        // A later turn picks up where the last one left off.
        let mut session = Session::resume(id.clone(), &petal, store.clone())
            .await
            .unwrap();
        assert_eq!(session.task().required_objectives_text().as_deref(), Some("- address"));

        let step = session.record_answer("address", "1 Main St").await.unwrap();
        assert_eq!(
            step,
            NextStep::RunController {
                controller: "flower_order".into()
            }
        );

        session.finish().await.unwrap();
        let stored = store.load(&id).await.unwrap().unwrap();
        assert!(stored.finished);
        assert_eq!(session.next_step(), NextStep::Finished);
    }

    #[tokio::test]
    async fn unknown_objective_is_not_persisted() {
        let store = Arc::new(InMemoryTaskStore::new());
        let mut session = Session::resume(ConversationId::new(), &florist(), store.clone())
            .await
            .unwrap();

        let err = session.record_answer("colour", "red").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Task(TaskError::NoSuchObjective { ref name }) if name == "colour"
        ));
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn additional_objectives_are_saved() {
        let store = Arc::new(InMemoryTaskStore::new());
        let id = ConversationId::new();
        let mut session = Session::resume(id.clone(), &florist(), store.clone())
            .await
            .unwrap();
        session.record_additional("note", "ring twice").await.unwrap();

        let stored = store.load(&id).await.unwrap().unwrap();
        assert!(stored.objectives.contains(r#""additional_note":"ring twice""#));
    }

    #[tokio::test]
    async fn failed_save_leaves_session_unchanged() {
        let mut session = Session::resume(ConversationId::new(), &florist(), Arc::new(ReadOnlyStore))
            .await
            .unwrap();

        let err = session.record_answer("recipient", "Ada").await.unwrap_err();
        assert!(matches!(err, Error::Store(StoreError::Storage(_))));
        assert_eq!(
            session.task().required_objectives_text().as_deref(),
            Some("- recipient\n- address")
        );

        assert!(session.record_additional("note", "ring twice").await.is_err());
        assert!(session.task().objectives().get("additional_note").is_none());

        assert!(session.finish().await.is_err());
        assert!(!session.task().is_finished());
    }
}
