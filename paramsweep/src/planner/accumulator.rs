//! Directory fragments chosen along one enumeration path.

use crate::core::{ArtifactKind, PipelineStep};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Directory fragments chosen per step, in the order they were chosen.
///
/// This is a value type: [`with_fragment`](Self::with_fragment) returns a new
/// accumulator, so sibling branches of the enumeration never observe each
/// other's choices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DirectoryAccumulator {
    fragments: BTreeMap<PipelineStep, Vec<String>>,
}

impl DirectoryAccumulator {
    /// Creates an accumulator without any fragment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with the fragment appended to the step.
    #[must_use]
    pub fn with_fragment(&self, step: PipelineStep, fragment: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.fragments.entry(step).or_default().push(fragment.into());
        next
    }

    /// Returns the fragments chosen for a step.
    #[must_use]
    pub fn fragments(&self, step: PipelineStep) -> &[String] {
        self.fragments.get(&step).map_or(&[][..], Vec::as_slice)
    }

    /// Joins all fragments of the steps up to and including `step`.
    ///
    /// Returns an empty path if none of those steps has a fragment.
    #[must_use]
    pub fn path_through(&self, step: PipelineStep) -> PathBuf {
        PipelineStep::ALL[..=step.index()]
            .iter()
            .flat_map(|s| self.fragments(*s))
            .collect()
    }

    /// Returns the nested path of an artifact.
    #[must_use]
    pub fn artifact_path(&self, kind: ArtifactKind) -> PathBuf {
        self.path_through(kind.owning_step()).join(kind.default_name())
    }

    /// Returns the last step in pipeline order that has any fragment.
    #[must_use]
    pub fn deepest_step(&self) -> Option<PipelineStep> {
        PipelineStep::ALL
            .iter()
            .rev()
            .copied()
            .find(|step| !self.fragments(*step).is_empty())
    }
}
