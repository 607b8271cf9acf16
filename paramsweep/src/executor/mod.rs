//! Task execution for leaf combinations.
//!
//! This module provides:
//! - The [`Submitter`] seam to the external verification/grid interface
//! - A process-based submitter running the verification program
//! - The [`TaskExecutor`] that assembles, submits and accounts for tasks
//! - Run statistics and the final sweep report

mod process;
mod stats;
mod submitter;
mod task;

pub use process::{ProcessSubmitter, DEFAULT_VERIFY_PROGRAM};
pub use stats::{RunStatistics, SweepReport, TaskFailure};
#[cfg(test)]
pub use submitter::MockSubmitter;
pub use submitter::{SubmissionRequest, Submitter};
pub use task::{TaskExecutor, TaskOutcome, TaskPlan, FAKE_JOB_ID_STEP};
