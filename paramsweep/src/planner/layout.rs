//! Concrete artifact paths and the job-tracking database location.

use super::DirectoryAccumulator;
use crate::config::SweepOptions;
use crate::core::{ArtifactKind, PipelineStep, SUBMIT_DATABASE_NAME};
use crate::errors::SweepError;
use std::path::{Path, PathBuf};

/// All directory and file paths handed to one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryPlan {
    /// Preprocessed image directory, below the user's source if one is given.
    pub preprocessed_image_directory: PathBuf,
    /// Whether the preprocessed images come from an external source.
    pub external_preprocessing: bool,
    /// Extracted feature directory.
    pub features_directory: PathBuf,
    /// Trained extractor file.
    pub extractor_file: PathBuf,
    /// Projected feature directory.
    pub projected_features_directory: PathBuf,
    /// Trained projector file.
    pub projector_file: PathBuf,
    /// Client model directory.
    pub models_directory: PathBuf,
    /// T-norm model directory.
    pub tnorm_models_directory: PathBuf,
    /// Trained enroller file.
    pub enroller_file: PathBuf,
    /// Score directory.
    pub score_directory: PathBuf,
    /// Job-tracking database file.
    pub submit_db_file: PathBuf,
}

impl DirectoryPlan {
    /// Plans every path for the given fragments.
    ///
    /// The database file is placed inside the nested directory of the deepest
    /// step that has any fragment, below the grid database root; with no
    /// fragments at all it sits directly in the root.
    #[must_use]
    pub fn new(directories: &DirectoryAccumulator, options: &SweepOptions) -> Self {
        let preprocessed = directories.artifact_path(ArtifactKind::PreprocessedImages);
        let preprocessed_image_directory = match &options.preprocessed_image_directory {
            Some(source) => source.join(preprocessed),
            None => preprocessed,
        };

        let database_directory = directories.deepest_step().map_or_else(
            || options.grid_database_directory.clone(),
            |step| options.grid_database_directory.join(directories.path_through(step)),
        );

        Self {
            preprocessed_image_directory,
            external_preprocessing: options.preprocessed_image_directory.is_some(),
            features_directory: directories.artifact_path(ArtifactKind::Features),
            extractor_file: directories.artifact_path(ArtifactKind::ExtractorFile),
            projected_features_directory: directories.artifact_path(ArtifactKind::ProjectedFeatures),
            projector_file: directories.artifact_path(ArtifactKind::ProjectorFile),
            models_directory: directories.artifact_path(ArtifactKind::Models),
            tnorm_models_directory: directories.artifact_path(ArtifactKind::TNormModels),
            enroller_file: directories.artifact_path(ArtifactKind::EnrollerFile),
            score_directory: directories.artifact_path(ArtifactKind::Scores),
            submit_db_file: database_directory.join(SUBMIT_DATABASE_NAME),
        }
    }

    /// Returns the directory holding the job-tracking database.
    #[must_use]
    pub fn database_directory(&self) -> &Path {
        self.submit_db_file.parent().unwrap_or_else(|| Path::new("."))
    }

    /// Creates the database directory. Safe to call repeatedly.
    pub fn ensure_database_directory(&self) -> Result<(), SweepError> {
        let dir = self.database_directory();
        std::fs::create_dir_all(dir).map_err(|e| SweepError::io(dir, e))
    }

    /// Returns the verification tool arguments that select these paths.
    ///
    /// An external preprocessed image source is followed directly by the
    /// preprocessing skip flag.
    #[must_use]
    pub fn arguments(&self, sub_directory: &str) -> Vec<String> {
        let path = |p: &Path| p.to_string_lossy().into_owned();
        let mut arguments = vec![
            "--preprocessed-image-directory".to_string(),
            path(&self.preprocessed_image_directory),
        ];
        if self.external_preprocessing {
            arguments.extend(
                PipelineStep::Preprocessing
                    .skip_flags()
                    .iter()
                    .map(ToString::to_string),
            );
        }
        arguments.extend([
            "--features-directory".to_string(),
            path(&self.features_directory),
            "--extractor-file".to_string(),
            path(&self.extractor_file),
            "--projected-features-directory".to_string(),
            path(&self.projected_features_directory),
            "--projector-file".to_string(),
            path(&self.projector_file),
            "--models-directories".to_string(),
            path(&self.models_directory),
            path(&self.tnorm_models_directory),
            "--enroller-file".to_string(),
            path(&self.enroller_file),
            "--score-sub-directory".to_string(),
            path(&self.score_directory),
            "--sub-directory".to_string(),
            sub_directory.to_string(),
            "--submit-db-file".to_string(),
            path(&self.submit_db_file),
        ]);
        arguments
    }
}
