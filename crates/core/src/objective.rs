//! Objective state — the per-key piece of the task state machine.
//!
//! Each objective independently moves `Uncollected -> Collected(value)`.
//! There is no transition back. A collected empty string is still collected.
//!
//! `Objectives` keeps declaration order, which is the order missing
//! objectives are listed back to the user. Objective maps are small (a handful
//! of keys per task), so lookups are linear scans over a `Vec`.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Prefix for objectives introduced after construction.
pub const ADDITIONAL_PREFIX: &str = "additional_";

/// The state of a single objective.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ObjectiveState {
    /// Not yet supplied by the user.
    #[default]
    Uncollected,
    /// Supplied; holds the collected value.
    Collected(String),
}

impl ObjectiveState {
    pub fn is_collected(&self) -> bool {
        matches!(self, Self::Collected(_))
    }

    /// The collected value, if any.
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Uncollected => None,
            Self::Collected(v) => Some(v),
        }
    }
}

impl From<Option<String>> for ObjectiveState {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Uncollected, Self::Collected)
    }
}

impl Serialize for ObjectiveState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ObjectiveState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<String>::deserialize(deserializer).map(Self::from)
    }
}

/// Ordered map from objective name to its state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Objectives {
    entries: Vec<(String, ObjectiveState)>,
}

impl Objectives {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare every name as uncollected, in order.
    pub fn uncollected<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names
            .into_iter()
            .map(|n| (n.into(), ObjectiveState::Uncollected))
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&ObjectiveState> {
        self.entries.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ObjectiveState)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Names of objectives still uncollected, in declaration order.
    pub fn missing(&self) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(|(_, state)| !state.is_collected())
            .map(|(name, _)| name)
    }

    /// Collect an existing objective. Returns `false` if `name` is not declared.
    pub(crate) fn collect(&mut self, name: &str, value: String) -> bool {
        match self.entries.iter_mut().find(|(k, _)| k == name) {
            Some((_, state)) => {
                *state = ObjectiveState::Collected(value);
                true
            }
            None => false,
        }
    }

    /// Insert or overwrite, keeping the original position of an existing key.
    pub(crate) fn upsert(&mut self, name: String, state: ObjectiveState) {
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some((_, existing)) => *existing = state,
            None => self.entries.push((name, state)),
        }
    }
}

impl<S: Into<String>> FromIterator<(S, ObjectiveState)> for Objectives {
    fn from_iter<I: IntoIterator<Item = (S, ObjectiveState)>>(iter: I) -> Self {
        let mut objectives = Self::new();
        for (name, state) in iter {
            objectives.upsert(name.into(), state);
        }
        objectives
    }
}

impl Serialize for Objectives {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, state) in &self.entries {
            map.serialize_entry(name, state)?;
        }
        map.end()
    }
}

struct ObjectivesVisitor;

impl<'de> Visitor<'de> for ObjectivesVisitor {
    type Value = Objectives;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of objective names to null or string values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut objectives = Objectives::new();
        while let Some((name, state)) = access.next_entry::<String, ObjectiveState>()? {
            objectives.upsert(name, state);
        }
        Ok(objectives)
    }
}

impl<'de> Deserialize<'de> for Objectives {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ObjectivesVisitor)
    }
}
