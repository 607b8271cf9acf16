//! Candidate indices chosen along one enumeration path.

use std::collections::BTreeMap;

/// Chosen candidate index per replacement key.
///
/// Keys that were never chosen resolve to their first candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Selection {
    indices: BTreeMap<String, usize>,
}

impl Selection {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with the key set to the given candidate index.
    #[must_use]
    pub fn with_choice(&self, key: impl Into<String>, index: usize) -> Self {
        let mut next = self.clone();
        next.indices.insert(key.into(), index);
        next
    }

    /// Returns the chosen index of a key.
    #[must_use]
    pub fn index(&self, key: &str) -> Option<usize> {
        self.indices.get(key).copied()
    }

    /// Iterates over (key, index) pairs sorted by key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.indices.iter().map(|(key, index)| (key.as_str(), *index))
    }

    /// Returns the number of chosen keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns true if no key was chosen.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}
