//! Task — the unit of work a petal is pursuing.
//!
//! A task holds the objectives that must be collected from the user before
//! its controller can run. The task never marks itself finished; that is left
//! to the controller logic.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::TaskError;
use crate::objective::{ADDITIONAL_PREFIX, ObjectiveState, Objectives};

/// A task and its objective state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    goal: String,
    controller_ref: String,
    objectives: Objectives,
    finished: bool,
}

impl Task {
    pub fn new(
        goal: impl Into<String>,
        controller_ref: impl Into<String>,
        objectives: Objectives,
    ) -> Self {
        Self {
            goal: goal.into(),
            controller_ref: controller_ref.into(),
            objectives,
            finished: false,
        }
    }

    pub fn goal(&self) -> &str {
        &self.goal
    }

    pub fn controller_ref(&self) -> &str {
        &self.controller_ref
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Set by the controller once it decides the task is complete.
    pub fn set_finished(&mut self, finished: bool) {
        self.finished = finished;
    }

    pub fn objectives(&self) -> &Objectives {
        &self.objectives
    }

    /// Every objective with its value, `None` where not yet collected.
    pub fn objectives_snapshot(&self) -> Vec<(String, Option<String>)> {
        self.objectives
            .iter()
            .map(|(name, state)| (name.to_string(), state.value().map(str::to_string)))
            .collect()
    }

    /// Collect a declared objective.
    ///
    /// Fails without touching the map when `name` was never declared.
    pub fn update_objective(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), TaskError> {
        if !self.objectives.collect(name, value.into()) {
            return Err(TaskError::NoSuchObjective { name: name.into() });
        }
        debug!(objective = name, "Collected objective");
        Ok(())
    }

    /// Add (or overwrite) `additional_<name>`. Never fails.
    pub fn add_additional_objective(&mut self, name: &str, value: impl Into<String>) {
        let key = format!("{ADDITIONAL_PREFIX}{name}");
        debug!(objective = %key, "Added additional objective");
        self.objectives
            .upsert(key, ObjectiveState::Collected(value.into()));
    }

    /// Whether every objective has been collected. Recomputed on each call.
    pub fn all_collected(&self) -> bool {
        self.objectives.missing().next().is_none()
    }

    /// Bullet list of the objectives still missing, one `- name` per line.
    ///
    /// `None` once nothing is missing. The text is meant to be embedded
    /// verbatim into a prompt.
    pub fn required_objectives_text(&self) -> Option<String> {
        let lines: Vec<String> = self
            .objectives
            .missing()
            .map(|name| format!("- {name}"))
            .collect();
        if lines.is_empty() {
            None
        } else {
            Some(lines.join("\n"))
        }
    }

    /// Flatten into the four-field storage shape.
    pub fn to_record(&self) -> Result<TaskRecord, serde_json::Error> {
        Ok(TaskRecord {
            goal: self.goal.clone(),
            controller: self.controller_ref.clone(),
            objectives: serde_json::to_string(&self.objectives)?,
            finished: self.finished,
        })
    }

    /// Rebuild a task from its storage shape.
    pub fn from_record(record: &TaskRecord) -> Result<Self, TaskError> {
        let objectives: Objectives = serde_json::from_str(&record.objectives)
            .map_err(|e| TaskError::InvalidRecord(e.to_string()))?;
        Ok(Self {
            goal: record.goal.clone(),
            controller_ref: record.controller.clone(),
            objectives,
            finished: record.finished,
        })
    }
}

/// Storage shape of a task.
///
/// `objectives` is a JSON-encoded string rather than a nested object so that
/// flat key-value stores can hold it as a plain field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub goal: String,
    pub controller: String,
    pub objectives: String,
    pub finished: bool,
}

impl TryFrom<&Task> for TaskRecord {
    type Error = serde_json::Error;

    fn try_from(task: &Task) -> Result<Self, Self::Error> {
        task.to_record()
    }
}

impl TryFrom<&TaskRecord> for Task {
    type Error = TaskError;

    fn try_from(record: &TaskRecord) -> Result<Self, Self::Error> {
        Task::from_record(record)
    }
}
