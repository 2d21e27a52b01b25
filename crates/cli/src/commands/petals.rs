//! `petal petals` — List the configured petals.

use petal_config::{AppConfig, registry_from_definitions};

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let definitions = config.load_petals()?;
    let registry = registry_from_definitions(&definitions)?;

    if registry.is_empty() {
        println!("No petals found in {}", config.petals_dir.display());
        return Ok(());
    }

    println!("{} petal(s) in {}", registry.len(), config.petals_dir.display());
    println!();
    for name in registry.names() {
        let petal = registry.require(name)?;
        let task = &petal.task;
        let missing = task.objectives().missing().count();
        println!("  {name}  [{}]", &petal.hash()[..12]);
        println!("    Goal:        {}", task.goal());
        println!("    Controller:  {}", task.controller_ref());
        println!(
            "    Objectives:  {} ({} to collect)",
            task.objectives().len(),
            missing
        );
    }

    Ok(())
}
