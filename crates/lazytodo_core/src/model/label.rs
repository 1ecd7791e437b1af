//! User-defined label set.
//!
//! # Invariants
//! - Names are unique (exact, case-sensitive match).
//! - Insertion order is preserved; labels are never removed implicitly.

use serde::Serialize;

/// Ordered set of unique label names, persisted under the `labels` key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LabelSet {
    names: Vec<String>,
}

impl LabelSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from stored names, collapsing duplicates and blanks.
    pub fn from_names(names: impl IntoIterator<Item = String>) -> Self {
        let mut set = Self::new();
        for name in names {
            set.insert(&name);
        }
        set
    }

    /// Inserts `name` when it is non-blank and not present yet.
    ///
    /// Returns `true` only when the set changed.
    pub fn insert(&mut self, name: &str) -> bool {
        let trimmed = name.trim();
        if trimmed.is_empty() || self.contains(trimmed) {
            return false;
        }
        self.names.push(trimmed.to_string());
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|existing| existing == name)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
