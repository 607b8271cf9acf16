//! Run statistics and the final report of a sweep.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Counters accumulated over a whole sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStatistics {
    /// Leaf combinations processed, including failed submissions.
    pub tasks: usize,
    /// Grid jobs created by successful submissions.
    pub jobs: usize,
    /// Leaf combinations skipped because their results already exist.
    pub skipped: usize,
}

/// A task whose submission failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFailure {
    /// Position of the leaf combination in the sweep, skipped leaves included.
    pub task: usize,
    /// The full command line of the task.
    pub command_line: String,
    /// Why the submission failed.
    pub reason: String,
    /// When the failure was recorded.
    pub occurred_at: DateTime<Utc>,
}

impl TaskFailure {
    /// Creates a failure record stamped with the current time.
    #[must_use]
    pub fn new(task: usize, command_line: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            task,
            command_line: command_line.into(),
            reason: reason.into(),
            occurred_at: Utc::now(),
        }
    }
}

/// Outcome of a complete sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepReport {
    /// Identifier of the sweep run.
    pub run_id: Uuid,
    /// When the sweep started.
    pub started_at: DateTime<Utc>,
    /// When the sweep finished.
    pub finished_at: DateTime<Utc>,
    /// Whether tasks were only printed.
    pub dry_run: bool,
    /// Final counters.
    pub statistics: RunStatistics,
    /// Failed submissions, in task order.
    pub failures: Vec<TaskFailure>,
}

impl SweepReport {
    /// Returns true if any submission failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Returns the human-readable summary of the counters.
    #[must_use]
    pub fn summary_line(&self) -> String {
        format!(
            "The number of executed tasks is: {}, which are split up into {} jobs that are executed in the grid",
            self.statistics.tasks, self.statistics.jobs
        )
    }
}
