//! Petal — a configured conversational unit with a name, a stable hash
//! identifier, and the task it is currently pursuing.

use sha2::{Digest, Sha256};

use crate::task::Task;

/// A named conversational unit and its current task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Petal {
    name: String,
    hash: String,
    pub task: Task,
}

impl Petal {
    pub fn new(name: impl Into<String>, task: Task) -> Self {
        let name = name.into();
        let hash = petal_hash(&name);
        Self { name, hash, task }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Hex SHA-256 of the petal name.
    pub fn hash(&self) -> &str {
        &self.hash
    }
}

/// Compute the identifier a petal with this name will carry.
pub fn petal_hash(name: &str) -> String {
    hex::encode(Sha256::digest(name.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objective::Objectives;

    #[test]
    fn hash_is_stable_hex_sha256() {
        let petal = Petal::new("abc", Task::new("g", "c", Objectives::new()));
        assert_eq!(
            petal.hash(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(petal.hash(), petal_hash("abc"));
    }

    #[test]
    fn different_names_different_hashes() {
        assert_ne!(petal_hash("florist"), petal_hash("baker"));
    }
}
