//! Petal definitions loaded from YAML.
//!
//! Each `*.yml` / `*.yaml` file in the petals directory describes one petal:
//!
//! ```yaml
//! name: florist
//! goal: Order a bouquet for delivery
//! controller: flower_order
//! objectives:
//!   - recipient
//!   - address
//!   - budget
//! seed:
//!   budget: "50"
//! ```
//!
//! Objectives keep the listed order. `seed` pre-collects some of them.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use petal_core::{ObjectiveState, Objectives, Petal, PetalRegistry, RegistryError, Task};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::ConfigError;

/// A petal as described on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetalDefinition {
    pub name: String,

    pub goal: String,

    /// Controller to run once every objective is collected
    pub controller: String,

    /// Objective names, in the order they are asked for
    #[serde(default)]
    pub objectives: Vec<String>,

    /// Pre-collected objective values
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub seed: HashMap<String, String>,
}

impl PetalDefinition {
    /// Parse and validate a single YAML document.
    pub fn from_yaml(content: &str) -> Result<Self, String> {
        let definition: Self = serde_yaml::from_str(content).map_err(|e| e.to_string())?;
        definition.validate()?;
        Ok(definition)
    }

    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("petal name must not be empty".into());
        }
        if self.controller.trim().is_empty() {
            return Err(format!("petal '{}' has no controller", self.name));
        }

        let mut seen = HashSet::new();
        for objective in &self.objectives {
            if objective.trim().is_empty() {
                return Err(format!("petal '{}' has an empty objective name", self.name));
            }
            if !seen.insert(objective.as_str()) {
                return Err(format!(
                    "petal '{}' declares objective '{}' twice",
                    self.name, objective
                ));
            }
        }

        if let Some(unknown) = self.seed.keys().find(|k| !seen.contains(k.as_str())) {
            return Err(format!(
                "petal '{}' seeds undeclared objective '{}'",
                self.name, unknown
            ));
        }

        Ok(())
    }

    /// Build a fresh task from this definition.
    pub fn to_task(&self) -> Task {
        let objectives: Objectives = self
            .objectives
            .iter()
            .map(|name| {
                let state = match self.seed.get(name) {
                    Some(value) => ObjectiveState::Collected(value.clone()),
                    None => ObjectiveState::Uncollected,
                };
                (name.as_str(), state)
            })
            .collect();
        Task::new(&self.goal, &self.controller, objectives)
    }

    pub fn to_petal(&self) -> Petal {
        Petal::new(&self.name, self.to_task())
    }
}

/// Load a single petal definition file.
pub fn load_file(path: &Path) -> Result<PetalDefinition, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    PetalDefinition::from_yaml(&content).map_err(|reason| ConfigError::ParseError {
        path: path.to_path_buf(),
        reason,
    })
}

/// Load every petal definition in `dir`, sorted by file name.
///
/// A missing directory yields no petals. Files that fail to parse or
/// validate are skipped with a warning.
pub fn load_dir(dir: &Path) -> Result<Vec<PetalDefinition>, ConfigError> {
    if !dir.exists() {
        info!("No petals directory at {}, no petals loaded", dir.display());
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(dir).map_err(|e| ConfigError::ReadError {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut paths: Vec<_> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext == "yml" || ext == "yaml")
        })
        .collect();
    paths.sort();

    let mut definitions = Vec::with_capacity(paths.len());
    for path in paths {
        match load_file(&path) {
            Ok(definition) => {
                debug!(petal = %definition.name, path = %path.display(), "Loaded petal");
                definitions.push(definition);
            }
            Err(e) => warn!("Skipping petal file: {e}"),
        }
    }

    info!(count = definitions.len(), dir = %dir.display(), "Loaded petal definitions");
    Ok(definitions)
}

/// Build a registry holding one petal per definition.
pub fn registry_from_definitions(
    definitions: &[PetalDefinition],
) -> Result<PetalRegistry, RegistryError> {
    let mut registry = PetalRegistry::new();
    for definition in definitions {
        registry.register(definition.to_petal())?;
    }
    Ok(registry)
}
