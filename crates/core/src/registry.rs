//! Petal registry — an explicitly owned lookup of petals by name.
//!
//! The registry is a plain value handed to whoever needs it. There is no
//! process-wide instance.

use std::collections::HashMap;

use tracing::info;

use crate::error::RegistryError;
use crate::petal::Petal;

/// Holds every loaded petal, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct PetalRegistry {
    petals: HashMap<String, Petal>,
}

impl PetalRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a petal. Names must be unique.
    pub fn register(&mut self, petal: Petal) -> Result<(), RegistryError> {
        let name = petal.name().to_string();
        if self.petals.contains_key(&name) {
            return Err(RegistryError::DuplicatePetal(name));
        }
        info!(petal = %name, hash = %petal.hash(), "Registered petal");
        self.petals.insert(name, petal);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Petal> {
        self.petals.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Petal> {
        self.petals.get_mut(name)
    }

    /// Like `get`, but a missing petal is an error.
    pub fn require(&self, name: &str) -> Result<&Petal, RegistryError> {
        self.get(name)
            .ok_or_else(|| RegistryError::PetalNotFound(name.to_string()))
    }

    /// Look a petal up by its hash identifier.
    pub fn find_by_hash(&self, hash: &str) -> Option<&Petal> {
        self.petals.values().find(|p| p.hash() == hash)
    }

    /// All petal names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.petals.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.petals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.petals.is_empty()
    }
}
