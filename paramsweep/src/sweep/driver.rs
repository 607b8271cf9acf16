//! Runs every leaf combination of a configuration through the executor.

use super::leaves;
use crate::config::{Configuration, SweepOptions};
use crate::errors::SweepError;
use crate::executor::{Submitter, SweepReport, TaskExecutor};
use chrono::Utc;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

/// Drives a complete parameter sweep.
#[derive(Debug, Clone)]
pub struct SweepDriver {
    configuration: Configuration,
    options: SweepOptions,
}

impl SweepDriver {
    /// Creates a driver for a validated configuration.
    #[must_use]
    pub fn new(configuration: Configuration, options: SweepOptions) -> Self {
        Self {
            configuration,
            options,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Returns the run options.
    #[must_use]
    pub fn options(&self) -> &SweepOptions {
        &self.options
    }

    /// Enumerates the leaves lazily and executes each one as it is produced.
    ///
    /// Each task sees the jobs registered by every task before it. A failed
    /// submission is recorded in the report and the sweep goes on; template
    /// and filesystem errors abort the sweep.
    pub async fn run<S>(&self, submitter: &S) -> Result<SweepReport, SweepError>
    where
        S: Submitter + ?Sized,
    {
        let run_id = Uuid::new_v4();
        let span = info_span!(
            "sweep",
            run_id = %run_id,
            database = %self.options.database,
            dry_run = self.options.dry_run
        );

        async move {
            let started_at = Utc::now();
            info!(
                combinations = ?self.configuration.replace.combination_count(),
                config = %self.configuration.source.display(),
                "Expanding replacement space"
            );

            let mut executor = TaskExecutor::new(&self.configuration, &self.options);
            for leaf in leaves(&self.configuration.replace) {
                executor.execute(&leaf, submitter).await?;
            }

            let report = executor.into_report(run_id, started_at);
            info!(
                tasks = report.statistics.tasks,
                jobs = report.statistics.jobs,
                skipped = report.statistics.skipped,
                failures = report.failures.len(),
                "Sweep finished"
            );
            Ok::<_, SweepError>(report)
        }
        .instrument(span)
        .await
    }
}
