//! Prompt construction from task state.
//!
//! The required-objectives list is embedded verbatim: no quoting, no extra
//! framing around the bullet lines.

use petal_core::task::Task;

/// Builds the system prompts a petal sends to the model.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    petal_name: String,
}

impl PromptBuilder {
    pub fn new(petal_name: impl Into<String>) -> Self {
        Self {
            petal_name: petal_name.into(),
        }
    }

    /// Prompt asking the user for whatever the task still needs.
    ///
    /// Falls back to the handoff prompt once nothing is missing.
    pub fn objective_prompt(&self, task: &Task) -> String {
        match task.required_objectives_text() {
            Some(required) => format!(
                "You are {name}, an assistant helping the user to {goal}.\n\
                 Politely ask the user for the following information:\n\
                 {required}",
                name = self.petal_name,
                goal = task.goal(),
            ),
            None => self.handoff_prompt(task),
        }
    }

    /// Prompt used once every objective is collected.
    pub fn handoff_prompt(&self, task: &Task) -> String {
        let collected = task
            .objectives()
            .iter()
            .filter_map(|(name, state)| state.value().map(|v| format!("- {name}: {v}")))
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            "You are {name}, an assistant helping the user to {goal}.\n\
             All required information has been collected:\n\
             {collected}\n\
             Confirm these details with the user before continuing.",
            name = self.petal_name,
            goal = task.goal(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petal_core::{ObjectiveState, Objectives};

    fn task() -> Task {
        let objectives: Objectives = vec![
            ("recipient", ObjectiveState::Uncollected),
            ("budget", ObjectiveState::Collected("50".into())),
            ("address", ObjectiveState::Uncollected),
        ]
        .into_iter()
        .collect();
        Task::new("order flowers", "flower_order", objectives)
    }

    #[test]
    fn objective_prompt_embeds_list_verbatim() {
        let prompt = PromptBuilder::new("Florist").objective_prompt(&task());
        assert!(prompt.starts_with("You are Florist"));
        assert!(prompt.ends_with("information:\n- recipient\n- address"));
        assert!(!prompt.contains('"'));
    }

    #[test]
    fn complete_task_gets_handoff_prompt() {
        let mut task = task();
        task.update_objective("recipient", "Ada").unwrap();
        task.update_objective("address", "1 Main St").unwrap();

        let prompt = PromptBuilder::new("Florist").objective_prompt(&task);
        assert!(prompt.contains("- recipient: Ada\n- budget: 50\n- address: 1 Main St"));
        assert!(prompt.contains("Confirm these details"));
    }
}
