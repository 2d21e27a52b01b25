//! `petal status` — Show configuration.

use petal_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    println!("🌸 Petal Status");
    println!("===============");
    println!("  Config dir:     {}", AppConfig::config_dir().display());
    println!("  Petals dir:     {}", config.petals_dir.display());
    println!("  Model:          {}", config.default_model);
    println!("  Stream buffer:  {}", config.stream_buffer);
    println!("  Values:         {}", if config.redact_values { "redacted" } else { "shown" });

    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("\n  ✅ Config file found");
    } else {
        println!("\n  ⚠️  No config file — using defaults");
    }

    if config.petals_dir.is_dir() {
        println!("  ✅ Petals directory found");
    } else {
        println!("  ⚠️  No petals directory at {}", config.petals_dir.display());
    }

    Ok(())
}
