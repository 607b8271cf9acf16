//! Pipeline step enum.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the five ordered phases of a verification experiment.
///
/// The declaration order is the execution order, so `Ord` sorts steps the
/// way the pipeline runs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStep {
    /// Image preprocessing.
    Preprocessing,
    /// Feature extractor training and feature extraction.
    Extraction,
    /// Projector training and feature projection.
    Projection,
    /// Enroller training and model enrollment.
    Enrollment,
    /// Score computation.
    Scoring,
}

impl PipelineStep {
    /// All steps in execution order.
    pub const ALL: [Self; 5] = [
        Self::Preprocessing,
        Self::Extraction,
        Self::Projection,
        Self::Enrollment,
        Self::Scoring,
    ];

    /// Number of pipeline steps.
    pub const COUNT: usize = Self::ALL.len();

    /// Returns the position of this step in the pipeline.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Preprocessing => 0,
            Self::Extraction => 1,
            Self::Projection => 2,
            Self::Enrollment => 3,
            Self::Scoring => 4,
        }
    }

    /// Returns the step at the given position.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Returns the configuration name of the step.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Preprocessing => "preprocessing",
            Self::Extraction => "extraction",
            Self::Projection => "projection",
            Self::Enrollment => "enrollment",
            Self::Scoring => "scoring",
        }
    }

    /// Flags telling the verification tool that this step's artifacts
    /// already exist.
    #[must_use]
    pub const fn skip_flags(self) -> &'static [&'static str] {
        match self {
            Self::Preprocessing => &["--skip-preprocessing"],
            Self::Extraction => &["--skip-extractor-training", "--skip-extraction"],
            Self::Projection => &["--skip-projector-training", "--skip-projection"],
            Self::Enrollment => &["--skip-enroller-training", "--skip-enrollment"],
            Self::Scoring => &[],
        }
    }

    /// Substring identifying this step's jobs in a job registry.
    ///
    /// Scoring is never shared with a later combination, so its jobs are
    /// never dependencies and it has no tag.
    #[must_use]
    pub const fn dependency_tag(self) -> Option<&'static str> {
        match self {
            Self::Preprocessing => Some("preprocess"),
            Self::Extraction => Some("extract"),
            Self::Projection => Some("project"),
            Self::Enrollment => Some("enroll"),
            Self::Scoring => None,
        }
    }
}

impl fmt::Display for PipelineStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
