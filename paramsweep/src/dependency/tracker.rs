//! Dependency levels and the skip/dependency decisions derived from them.

use super::JobRegistry;
use crate::core::{JobId, PipelineStep};
use std::fmt;

static STEPS: [PipelineStep; PipelineStep::COUNT] = PipelineStep::ALL;

/// How far down the pipeline a combination shares artifacts with the
/// combination enumerated before it.
///
/// A level of `n` means the steps before step `n` are unchanged: they are
/// skipped and the task depends on the jobs already submitted for them.
/// Level 0 shares nothing; preprocessing is never skipped by level alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DependencyLevel(usize);

impl DependencyLevel {
    /// The level of a combination that shares nothing.
    pub const NONE: Self = Self(0);

    /// Creates a level, clamped to the number of pipeline steps.
    #[must_use]
    pub fn new(level: usize) -> Self {
        Self(level.min(PipelineStep::COUNT))
    }

    /// The level of a combination that re-enters `step` with another
    /// candidate: everything before `step` is shared.
    #[must_use]
    pub const fn at(step: PipelineStep) -> Self {
        Self(step.index())
    }

    /// Returns the numeric level.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }

    /// Returns the steps whose artifacts are shared and can be skipped.
    #[must_use]
    pub fn shared_steps(self) -> &'static [PipelineStep] {
        &STEPS[..self.0]
    }

    /// Returns the skip flags for the shared steps, in pipeline order.
    #[must_use]
    pub fn skip_flags(self) -> Vec<&'static str> {
        self.shared_steps()
            .iter()
            .flat_map(|step| step.skip_flags().iter().copied())
            .collect()
    }

    /// Returns the registered jobs of the shared steps.
    ///
    /// Every registered job whose tag contains the dependency tag of a shared
    /// step is listed once, in tag order.
    #[must_use]
    pub fn dependencies(self, registry: &JobRegistry) -> Vec<JobId> {
        let tags: Vec<&str> = self
            .shared_steps()
            .iter()
            .filter_map(|step| step.dependency_tag())
            .collect();
        registry
            .iter()
            .filter(|(tag, _)| tags.iter().any(|shared| tag.contains(*shared)))
            .map(|(_, id)| id)
            .collect()
    }
}

impl fmt::Display for DependencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
