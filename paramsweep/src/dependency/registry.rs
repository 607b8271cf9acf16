//! Process-wide registry of submitted grid jobs.

use crate::core::{JobId, JobIds};
use std::collections::BTreeMap;

/// Job ids of every task submitted so far, keyed by job tag.
///
/// Merging a task's job ids overwrites entries with the same tag, so each
/// tag resolves to its most recent job. Entries are never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobRegistry {
    jobs: BTreeMap<String, JobId>,
}

impl JobRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the job ids returned for one task.
    pub fn merge(&mut self, job_ids: &JobIds) {
        self.jobs
            .extend(job_ids.iter().map(|(tag, id)| (tag.clone(), *id)));
    }

    /// Returns the job registered under a tag.
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<JobId> {
        self.jobs.get(tag).copied()
    }

    /// Iterates over (tag, job id) pairs sorted by tag.
    pub fn iter(&self) -> impl Iterator<Item = (&str, JobId)> {
        self.jobs.iter().map(|(tag, id)| (tag.as_str(), *id))
    }

    /// Returns the number of registered tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Returns true if no job has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
