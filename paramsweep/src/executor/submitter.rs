//! The submission interface consumed by the executor.

use crate::core::{JobId, JobIds};
use crate::errors::SubmissionError;
use async_trait::async_trait;

/// Everything the verification interface needs to submit one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    /// Assembled verification tool arguments.
    pub arguments: Vec<String>,
    /// Jobs the new jobs must wait for.
    pub dependencies: Vec<JobId>,
    /// First fake job id available to the task.
    pub fake_job_id: u64,
}

/// Submits one task to the verification/grid backend.
///
/// Each call is independent: ordering constraints are expressed only through
/// [`SubmissionRequest::dependencies`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Submitter: Send + Sync {
    /// Submits the task and returns the created jobs keyed by job tag.
    async fn submit(&self, request: &SubmissionRequest) -> Result<JobIds, SubmissionError>;
}
