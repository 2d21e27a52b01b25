//! `petal objectives` — Show a petal's objectives, optionally collecting some.

use petal_agent::{NextStep, PromptBuilder, next_step};
use petal_config::{AppConfig, registry_from_definitions};

pub async fn run(
    petal_name: &str,
    set: &[String],
    add: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let definitions = config.load_petals()?;
    let mut registry = registry_from_definitions(&definitions)?;

    let petal = registry
        .get_mut(petal_name)
        .ok_or_else(|| format!("Petal not found: {petal_name}"))?;

    for pair in set {
        let (name, value) = split_pair(pair)?;
        petal.task.update_objective(name, value)?;
    }
    for pair in add {
        let (name, value) = split_pair(pair)?;
        petal.task.add_additional_objective(name, value);
    }

    println!("Petal:  {}", petal.name());
    println!("Goal:   {}", petal.task.goal());
    println!();
    for (name, value) in petal.task.objectives_snapshot() {
        let shown = match value {
            Some(_) if config.redact_values => "[REDACTED]".to_string(),
            Some(v) => v,
            None => "(missing)".to_string(),
        };
        println!("  {name:<20} {shown}");
    }
    println!();

    let prompts = PromptBuilder::new(petal.name());
    match next_step(&prompts, &petal.task) {
        NextStep::AskUser { .. } => {
            if let Some(required) = petal.task.required_objectives_text() {
                println!("Still required:");
                println!("{required}");
            }
        }
        NextStep::RunController { controller } => {
            println!("Ready — hand off to controller `{controller}`");
        }
        NextStep::Finished => println!("Task finished"),
    }

    Ok(())
}

/// Split `NAME=VALUE`. The value may itself contain `=`.
fn split_pair(pair: &str) -> Result<(&str, &str), String> {
    match pair.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name, value)),
        _ => Err(format!("Expected NAME=VALUE, got `{pair}`")),
    }
}
