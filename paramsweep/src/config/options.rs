//! Run options of a sweep.

use std::path::PathBuf;

/// Options that apply to every task of a sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepOptions {
    /// Database the experiments run on.
    pub database: String,
    /// Sub-directory naming the experiment.
    pub sub_directory: String,
    /// Grid configuration selector.
    pub grid: Option<String>,
    /// Directory with already preprocessed images.
    pub preprocessed_image_directory: Option<PathBuf>,
    /// Root directory for job-tracking database files.
    pub grid_database_directory: PathBuf,
    /// File name to dump each task's command line into.
    pub write_commands: Option<String>,
    /// Print commands instead of submitting them.
    pub dry_run: bool,
    /// Result root; tasks whose score directory exists below it are skipped.
    pub non_existent_only: Option<PathBuf>,
    /// Verbosity level forwarded to every task.
    pub verbosity: u8,
    /// Arguments forwarded verbatim to every task.
    pub parameters: Vec<String>,
}

impl SweepOptions {
    /// Creates options with defaults for everything but the database and
    /// the sub-directory.
    #[must_use]
    pub fn new(database: impl Into<String>, sub_directory: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            sub_directory: sub_directory.into(),
            grid: None,
            preprocessed_image_directory: None,
            grid_database_directory: PathBuf::from("."),
            write_commands: None,
            dry_run: false,
            non_existent_only: None,
            verbosity: 0,
            parameters: Vec::new(),
        }
    }

    /// Sets the grid configuration.
    #[must_use]
    pub fn with_grid(mut self, grid: impl Into<String>) -> Self {
        self.grid = Some(grid.into());
        self
    }

    /// Sets the preprocessed image directory.
    #[must_use]
    pub fn with_preprocessed_image_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.preprocessed_image_directory = Some(dir.into());
        self
    }

    /// Sets the job-tracking database root.
    #[must_use]
    pub fn with_grid_database_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.grid_database_directory = dir.into();
        self
    }

    /// Sets the command dump file name.
    #[must_use]
    pub fn with_write_commands(mut self, file_name: impl Into<String>) -> Self {
        self.write_commands = Some(file_name.into());
        self
    }

    /// Enables or disables dry-run mode.
    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Only submit tasks whose results do not exist below the given root.
    #[must_use]
    pub fn with_non_existent_only(mut self, result_root: impl Into<PathBuf>) -> Self {
        self.non_existent_only = Some(result_root.into());
        self
    }

    /// Sets the verbosity level.
    #[must_use]
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Sets the pass-through arguments. A leading `--` separator is dropped.
    #[must_use]
    pub fn with_parameters(mut self, parameters: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let mut parameters: Vec<String> = parameters.into_iter().map(Into::into).collect();
        if parameters.first().is_some_and(|p| p == "--") {
            parameters.remove(0);
        }
        self.parameters = parameters;
        self
    }

    /// Returns the verbosity flag forwarded to tasks, e.g. `-vv`.
    #[must_use]
    pub fn verbosity_flag(&self) -> Option<String> {
        (self.verbosity > 0).then(|| format!("-{}", "v".repeat(usize::from(self.verbosity))))
    }
}
