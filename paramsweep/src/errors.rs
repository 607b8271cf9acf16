//! Error types for the paramsweep driver.
//!
//! Configuration and placeholder errors are fatal and abort the sweep before
//! or during setup. Submission errors are scoped to a single task: they are
//! recorded and the enumeration continues.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for sweep operations.
#[derive(Debug, Error)]
pub enum SweepError {
    /// The configuration is invalid.
    #[error("{0}")]
    Configuration(#[from] ConfigurationError),

    /// A template could not be resolved.
    #[error("{0}")]
    Placeholder(#[from] PlaceholderError),

    /// An output location could not be created or written.
    #[error("IO error at '{}': {source}", path.display())]
    Io {
        /// The path that was being created or written.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl SweepError {
    /// Wraps an IO error with the path it occurred at.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Error raised while loading or validating a sweep configuration.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// A required attribute is missing from the configuration document.
    #[error("The given configuration file '{}' does not contain the required attribute '{attribute}'", file.display())]
    MissingAttribute {
        /// The configuration file.
        file: PathBuf,
        /// The missing attribute.
        attribute: String,
    },

    /// A replacement key appears in more than one step.
    #[error("The replacement key '{key}' was defined multiple times. Please use each key only once.")]
    DuplicateKey {
        /// The duplicated key.
        key: String,
    },

    /// A designator is claimed by more than one replacement key.
    #[error("The replacement key '{designator}' was defined multiple times (again in '{key}'). Please use each key only once.")]
    DuplicateDesignator {
        /// The designator character.
        designator: char,
        /// The replacement key that claimed it a second time.
        key: String,
    },

    /// A template refers to a designator no replacement key provides.
    #[error("The place holder '{designator}' used in {template} is not defined by any replacement key")]
    UnresolvedDesignator {
        /// The designator character.
        designator: char,
        /// The template attribute that uses it.
        template: String,
    },

    /// A multi-designator key has a candidate without enough tuple values.
    #[error("Candidate '{candidate}' of replacement key '{key}' must provide {expected} values, found {found}")]
    TupleArity {
        /// The replacement key.
        key: String,
        /// The candidate name.
        candidate: String,
        /// The number of designators in the key.
        expected: usize,
        /// The number of values the candidate provides.
        found: usize,
    },

    /// A replacement key or template is malformed.
    #[error("{0}")]
    Placeholder(#[from] PlaceholderError),

    /// The configuration document could not be parsed.
    #[error("Could not parse configuration file '{}': {message}", file.display())]
    Parse {
        /// The configuration file.
        file: PathBuf,
        /// The parser message.
        message: String,
    },

    /// The configuration document could not be read.
    #[error("Could not read configuration file '{}': {source}", file.display())]
    Read {
        /// The configuration file.
        file: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Error raised while resolving placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaceholderError {
    /// The template uses a designator that has no value.
    #[error("No value for place holder '{marker}{designator}' in '{template}'")]
    Lookup {
        /// The marker character.
        marker: char,
        /// The designator character.
        designator: char,
        /// The template being resolved.
        template: String,
    },

    /// A marker at the end of a template has no designator.
    #[error("Place holder marker '{marker}' without designator at the end of '{template}'")]
    MissingDesignator {
        /// The marker character.
        marker: char,
        /// The template being resolved.
        template: String,
    },

    /// Two replacement keys claim the same designator.
    #[error("The replacement key '{designator}' was defined multiple times. Please use each key only once.")]
    DuplicateDesignator {
        /// The designator character.
        designator: char,
    },

    /// A selection index is out of range for the key's candidates.
    #[error("Selection index {index} is out of range for replacement key '{key}'")]
    SelectionOutOfRange {
        /// The replacement key.
        key: String,
        /// The selected index.
        index: usize,
    },

    /// A multi-designator candidate value is not a long enough list.
    #[error("Candidate '{candidate}' of replacement key '{key}' does not provide a value for '{designator}'")]
    MissingTupleValue {
        /// The replacement key.
        key: String,
        /// The candidate name.
        candidate: String,
        /// The designator without a value.
        designator: char,
    },
}

/// Error raised by a [`Submitter`](crate::executor::Submitter) for one task.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// The submission backend rejected the task.
    #[error("{message}")]
    Rejected {
        /// The rejection reason.
        message: String,
    },

    /// The verification program could not be started.
    #[error("Could not start '{program}': {source}")]
    Spawn {
        /// The program that was started.
        program: String,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The verification program returned output that is not a job id map.
    #[error("Invalid job id output: {message}")]
    InvalidOutput {
        /// Description of the problem.
        message: String,
    },
}

impl SubmissionError {
    /// Creates a rejection error.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_attribute_names_file_and_attribute() {
        let err = ConfigurationError::MissingAttribute {
            file: PathBuf::from("sweep.yaml"),
            attribute: "tool".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("sweep.yaml"));
        assert!(message.contains("'tool'"));
    }

    #[test]
    fn test_sweep_error_from_configuration() {
        let err: SweepError = ConfigurationError::DuplicateKey {
            key: "#a".to_string(),
        }
        .into();
        assert!(matches!(err, SweepError::Configuration(_)));
        assert!(err.to_string().contains("defined multiple times"));
    }

    #[test]
    fn test_io_error_includes_path() {
        let err = SweepError::io(
            "/tmp/out",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("/tmp/out"));
    }
}
