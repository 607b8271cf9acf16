//! Submission through the verification program as a child process.

use super::{SubmissionRequest, Submitter};
use crate::core::JobIds;
use crate::errors::SubmissionError;
use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

/// Verification program invoked when none is configured.
pub const DEFAULT_VERIFY_PROGRAM: &str = "bin/faceverify.py";

/// Runs the verification program once per task.
///
/// The program receives the task arguments followed by
/// `--external-fake-job-id <n>` and, if there are any,
/// `--external-dependencies <id>...`. It must print the created jobs as a
/// JSON object mapping job tags to numeric ids; empty output means no jobs.
#[derive(Debug, Clone)]
pub struct ProcessSubmitter {
    program: String,
}

impl Default for ProcessSubmitter {
    fn default() -> Self {
        Self::new(DEFAULT_VERIFY_PROGRAM)
    }
}

impl ProcessSubmitter {
    /// Creates a submitter for the given program.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Returns the program this submitter runs.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Returns the full argument list passed to the program.
    #[must_use]
    pub fn arguments(request: &SubmissionRequest) -> Vec<String> {
        let mut arguments = request.arguments.clone();
        arguments.push("--external-fake-job-id".to_string());
        arguments.push(request.fake_job_id.to_string());
        if !request.dependencies.is_empty() {
            arguments.push("--external-dependencies".to_string());
            arguments.extend(request.dependencies.iter().map(ToString::to_string));
        }
        arguments
    }

    fn parse_job_ids(stdout: &[u8]) -> Result<JobIds, SubmissionError> {
        let text = String::from_utf8_lossy(stdout);
        let text = text.trim();
        if text.is_empty() {
            return Ok(JobIds::new());
        }
        serde_json::from_str(text).map_err(|e| SubmissionError::InvalidOutput {
            message: format!("{e}: {text}"),
        })
    }
}

#[async_trait]
impl Submitter for ProcessSubmitter {
    async fn submit(&self, request: &SubmissionRequest) -> Result<JobIds, SubmissionError> {
        let arguments = Self::arguments(request);
        debug!(program = %self.program, args = arguments.len(), "Starting verification program");

        let output = Command::new(&self.program)
            .args(&arguments)
            .output()
            .await
            .map_err(|source| SubmissionError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = if stderr.trim().is_empty() {
                format!("{} exited with {}", self.program, output.status)
            } else {
                stderr.trim().to_string()
            };
            return Err(SubmissionError::rejected(message));
        }

        Self::parse_job_ids(&output.stdout)
    }
}
