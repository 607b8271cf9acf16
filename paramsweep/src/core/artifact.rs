//! Artifacts produced by the pipeline steps.

use super::PipelineStep;
use std::fmt;

/// File name of the job-tracking database.
pub const SUBMIT_DATABASE_NAME: &str = "submitted.db";

/// An on-disk artifact written by one pipeline step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Directory of preprocessed images.
    PreprocessedImages,
    /// Directory of extracted features.
    Features,
    /// Trained feature extractor.
    ExtractorFile,
    /// Directory of projected features.
    ProjectedFeatures,
    /// Trained projector.
    ProjectorFile,
    /// Directory of enrolled client models.
    Models,
    /// Directory of enrolled T-norm models.
    TNormModels,
    /// Trained enroller.
    EnrollerFile,
    /// Directory of score files.
    Scores,
}

impl ArtifactKind {
    /// All artifact kinds in pipeline order.
    pub const ALL: [Self; 9] = [
        Self::PreprocessedImages,
        Self::Features,
        Self::ExtractorFile,
        Self::ProjectedFeatures,
        Self::ProjectorFile,
        Self::Models,
        Self::TNormModels,
        Self::EnrollerFile,
        Self::Scores,
    ];

    /// Returns the step that writes this artifact.
    #[must_use]
    pub const fn owning_step(self) -> PipelineStep {
        match self {
            Self::PreprocessedImages => PipelineStep::Preprocessing,
            Self::Features | Self::ExtractorFile => PipelineStep::Extraction,
            Self::ProjectedFeatures | Self::ProjectorFile => PipelineStep::Projection,
            Self::Models | Self::TNormModels | Self::EnrollerFile => PipelineStep::Enrollment,
            Self::Scores => PipelineStep::Scoring,
        }
    }

    /// Returns the default file or directory name.
    #[must_use]
    pub const fn default_name(self) -> &'static str {
        match self {
            Self::PreprocessedImages => "preprocessed",
            Self::Features => "features",
            Self::ExtractorFile => "Extractor.hdf5",
            Self::ProjectedFeatures => "projected",
            Self::ProjectorFile => "Projector.hdf5",
            Self::Models => "N-Models",
            Self::TNormModels => "T-Models",
            Self::EnrollerFile => "Enroler.hdf5",
            Self::Scores => "scores",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_name())
    }
}
