//! Assembly, submission and bookkeeping of one task per leaf combination.

use super::{RunStatistics, SubmissionRequest, Submitter, SweepReport, TaskFailure};
use crate::config::{Configuration, SweepOptions};
use crate::core::{JobId, JobIds, PipelineStep};
use crate::dependency::JobRegistry;
use crate::errors::{PlaceholderError, SweepError};
use crate::placeholder::extract_values;
use crate::planner::DirectoryPlan;
use crate::sweep::{LeafCombination, Selection};
use chrono::{DateTime, Utc};
use std::io::Write;
use tracing::{debug, error, info};
use uuid::Uuid;

/// Fake job ids reserved per task.
pub const FAKE_JOB_ID_STEP: u64 = 100;

/// Program name written in front of dumped command lines.
const COMMAND_PREFIX: &str = "bin/faceverify.py";

/// A fully assembled task, ready to submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPlan {
    /// Verification tool arguments.
    pub arguments: Vec<String>,
    /// Paths used by the task.
    pub directories: DirectoryPlan,
    /// Steps whose artifacts are reused instead of recomputed.
    pub skipped_steps: Vec<PipelineStep>,
    /// Jobs the task must wait for.
    pub dependencies: Vec<JobId>,
    /// First fake job id available to the task.
    pub fake_job_id: u64,
}

impl TaskPlan {
    /// Returns the arguments joined into one command line.
    #[must_use]
    pub fn command_line(&self) -> String {
        self.arguments.join(" ")
    }
}

/// What happened to one leaf combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    /// The task was submitted and created these jobs.
    Submitted(JobIds),
    /// The task was only printed.
    DryRun,
    /// The task's results already exist.
    Skipped,
    /// The submission failed; the sweep continues.
    Failed(TaskFailure),
}

/// Executes leaf combinations one after another.
///
/// Owns the job registry, the run counters and the fake job id counter, so
/// all mutable sweep state lives in one place.
#[derive(Debug)]
pub struct TaskExecutor<'a> {
    configuration: &'a Configuration,
    options: &'a SweepOptions,
    registry: JobRegistry,
    statistics: RunStatistics,
    failures: Vec<TaskFailure>,
    fake_job_id: u64,
    leaf_index: usize,
}

impl<'a> TaskExecutor<'a> {
    /// Creates an executor with an empty registry.
    #[must_use]
    pub fn new(configuration: &'a Configuration, options: &'a SweepOptions) -> Self {
        Self {
            configuration,
            options,
            registry: JobRegistry::new(),
            statistics: RunStatistics::default(),
            failures: Vec::new(),
            fake_job_id: 0,
            leaf_index: 0,
        }
    }

    /// Returns the jobs registered so far.
    #[must_use]
    pub fn registry(&self) -> &JobRegistry {
        &self.registry
    }

    /// Returns the counters so far.
    #[must_use]
    pub fn statistics(&self) -> RunStatistics {
        self.statistics
    }

    /// Returns the number of leaves handed to [`execute`](Self::execute),
    /// skipped ones included.
    #[must_use]
    pub fn leaves_seen(&self) -> usize {
        self.leaf_index
    }

    /// Returns the fake job id the next task will receive.
    #[must_use]
    pub fn next_fake_job_id(&self) -> u64 {
        self.fake_job_id
    }

    /// Resolves the templates for a selection into the leading arguments.
    pub fn template_arguments(&self, selection: &Selection) -> Result<Vec<String>, PlaceholderError> {
        let configuration = self.configuration;
        let syntax = &configuration.syntax;
        let values = extract_values(syntax, &configuration.replace, selection)?;

        let mut arguments = vec![
            "--database".to_string(),
            self.options.database.clone(),
            "--preprocessing".to_string(),
            syntax.resolve(&configuration.preprocessor, &values)?,
            "--features".to_string(),
            syntax.resolve(&configuration.feature_extractor, &values)?,
            "--tool".to_string(),
            syntax.resolve(&configuration.tool, &values)?,
            "--imports".to_string(),
        ];
        arguments.extend(configuration.imports.iter().cloned());
        Ok(arguments)
    }

    /// Assembles the task of a leaf without submitting it.
    pub fn plan(&self, leaf: &LeafCombination) -> Result<TaskPlan, SweepError> {
        let options = self.options;
        let directories = DirectoryPlan::new(&leaf.directories, options);

        let mut skipped_steps = leaf.dependency_level.shared_steps().to_vec();
        if directories.external_preprocessing
            && !skipped_steps.contains(&PipelineStep::Preprocessing)
        {
            skipped_steps.insert(0, PipelineStep::Preprocessing);
        }

        let mut arguments = self.template_arguments(&leaf.selection)?;
        arguments.extend(options.parameters.iter().cloned());
        if let Some(grid) = &options.grid {
            arguments.push("--grid".to_string());
            arguments.push(grid.clone());
        }
        if let Some(flag) = options.verbosity_flag() {
            arguments.push(flag);
        }
        arguments.extend(directories.arguments(&options.sub_directory));
        // the directory arguments already skip externally preprocessed images
        arguments.extend(
            skipped_steps
                .iter()
                .filter(|step| {
                    !directories.external_preprocessing || **step != PipelineStep::Preprocessing
                })
                .flat_map(|step| step.skip_flags().iter().map(ToString::to_string)),
        );

        Ok(TaskPlan {
            arguments,
            directories,
            skipped_steps,
            dependencies: leaf.dependency_level.dependencies(&self.registry),
            fake_job_id: self.fake_job_id,
        })
    }

    /// Plans, records and submits the task of one leaf.
    ///
    /// Submission failures are logged and returned as
    /// [`TaskOutcome::Failed`]; only filesystem and template errors abort.
    pub async fn execute<S>(
        &mut self,
        leaf: &LeafCombination,
        submitter: &S,
    ) -> Result<TaskOutcome, SweepError>
    where
        S: Submitter + ?Sized,
    {
        let plan = self.plan(leaf)?;
        let task = self.leaf_index;
        self.leaf_index += 1;

        if self.results_exist(&plan) {
            info!(task, scores = %plan.directories.score_directory.display(), "Results exist, skipping task");
            self.statistics.skipped += 1;
            return Ok(TaskOutcome::Skipped);
        }

        plan.directories.ensure_database_directory()?;
        if let Some(file_name) = &self.options.write_commands {
            self.write_command(&plan, file_name)?;
        }

        let outcome = if self.options.dry_run {
            println!("Would have executed job {}", plan.command_line());
            println!("with dependencies {:?}", dependency_list(&plan.dependencies));
            self.registry.merge(&mimic_job_ids(&plan));
            TaskOutcome::DryRun
        } else {
            let request = SubmissionRequest {
                arguments: plan.arguments.clone(),
                dependencies: plan.dependencies.clone(),
                fake_job_id: plan.fake_job_id,
            };
            match submitter.submit(&request).await {
                Ok(job_ids) => {
                    debug!(task, jobs = job_ids.len(), dependencies = ?plan.dependencies, "Task submitted");
                    self.statistics.jobs += job_ids.len();
                    self.registry.merge(&job_ids);
                    TaskOutcome::Submitted(job_ids)
                }
                Err(e) => {
                    error!(
                        task,
                        "The execution of job was rejected!\n{}\n Reason:\n{}",
                        plan.command_line(),
                        e
                    );
                    let failure = TaskFailure::new(task, plan.command_line(), e.to_string());
                    self.failures.push(failure.clone());
                    TaskOutcome::Failed(failure)
                }
            }
        };

        self.statistics.tasks += 1;
        self.fake_job_id += FAKE_JOB_ID_STEP;
        Ok(outcome)
    }

    /// Consumes the executor into the sweep report.
    #[must_use]
    pub fn into_report(self, run_id: Uuid, started_at: DateTime<Utc>) -> SweepReport {
        SweepReport {
            run_id,
            started_at,
            finished_at: Utc::now(),
            dry_run: self.options.dry_run,
            statistics: self.statistics,
            failures: self.failures,
        }
    }

    fn results_exist(&self, plan: &TaskPlan) -> bool {
        self.options.non_existent_only.as_ref().is_some_and(|root| {
            root.join(&self.options.sub_directory)
                .join(&plan.directories.score_directory)
                .exists()
        })
    }

    fn write_command(&self, plan: &TaskPlan, file_name: &str) -> Result<(), SweepError> {
        let path = plan.directories.database_directory().join(file_name);
        let mut file = std::fs::File::create(&path).map_err(|e| SweepError::io(&path, e))?;

        let mut content = format!("{COMMAND_PREFIX} ");
        for argument in &plan.arguments {
            content.push_str(argument);
            content.push(' ');
        }
        file.write_all(content.as_bytes())
            .map_err(|e| SweepError::io(&path, e))?;

        info!("Wrote command line into file '{}'", path.display());
        Ok(())
    }
}

/// Synthesizes the job ids a live run would register for a task, one per
/// step that is not skipped, so dry runs print realistic dependencies.
fn mimic_job_ids(plan: &TaskPlan) -> JobIds {
    PipelineStep::ALL
        .iter()
        .filter(|step| !plan.skipped_steps.contains(*step))
        .map(|step| {
            (
                step.as_str().to_string(),
                JobId(plan.fake_job_id + step.index() as u64),
            )
        })
        .collect()
}

fn dependency_list(dependencies: &[JobId]) -> Vec<u64> {
    dependencies.iter().map(|id| id.get()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::MockSubmitter;
    use crate::sweep::enumerate_leaves;
    use crate::testing::fixtures;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plan_resolves_templates() {
        let configuration = fixtures::scoring_sweep();
        let options = SweepOptions::new("atnt", "exp");
        let executor = TaskExecutor::new(&configuration, &options);
        let leaves = enumerate_leaves(&configuration.replace);

        let plan = executor.plan(&leaves[1]).unwrap();
        assert_eq!(
            &plan.arguments[..10],
            &[
                "--database",
                "atnt",
                "--preprocessing",
                "facereclib.preprocessing.FaceCrop()",
                "--features",
                "facereclib.features.DCTBlocks()",
                "--tool",
                "\"facereclib.tools.PCA(distance = val2)\"",
                "--imports",
                "facereclib",
            ]
        );
        assert_eq!(plan.directories.score_directory, std::path::PathBuf::from("y/scores"));
        assert_eq!(plan.skipped_steps.len(), 4);
        assert!(plan.arguments.ends_with(&[
            "--skip-enroller-training".to_string(),
            "--skip-enrollment".to_string(),
        ]));
    }

    #[test]
    fn test_plan_forwards_options() {
        let configuration = fixtures::scoring_sweep();
        let options = SweepOptions::new("atnt", "exp")
            .with_parameters(["--", "--protocol", "P1"])
            .with_grid("demanding")
            .with_verbosity(2)
            .with_preprocessed_image_directory("/prep");
        let executor = TaskExecutor::new(&configuration, &options);
        let leaves = enumerate_leaves(&configuration.replace);

        let plan = executor.plan(&leaves[0]).unwrap();
        let args = plan.arguments;
        let imports_end = args.iter().position(|a| a == "facereclib").unwrap() + 1;
        assert_eq!(
            &args[imports_end..imports_end + 5],
            &["--protocol", "P1", "--grid", "demanding", "-vv"]
        );
        assert_eq!(plan.skipped_steps, vec![PipelineStep::Preprocessing]);
        assert_eq!(args.iter().filter(|a| *a == "--skip-preprocessing").count(), 1);
        let source = args.iter().position(|a| a == "/prep/preprocessed").unwrap();
        assert_eq!(args[source - 1], "--preprocessed-image-directory");
        assert_eq!(args[source + 1], "--skip-preprocessing");
    }

    #[test]
    fn test_preprocessed_source_with_shared_upstream() {
        let configuration = fixtures::scoring_sweep();
        let options = SweepOptions::new("atnt", "exp").with_preprocessed_image_directory("/prep");
        let executor = TaskExecutor::new(&configuration, &options);
        let leaves = enumerate_leaves(&configuration.replace);

        let plan = executor.plan(&leaves[1]).unwrap();
        assert_eq!(plan.skipped_steps.len(), 4);
        assert_eq!(
            plan.arguments.iter().filter(|a| *a == "--skip-preprocessing").count(),
            1
        );
        assert_eq!(plan.arguments.last().map(String::as_str), Some("--skip-enrollment"));
    }

    #[tokio::test]
    async fn test_live_submission_updates_registry() {
        let root = tempfile::tempdir().unwrap();
        let configuration = fixtures::scoring_sweep();
        let options = SweepOptions::new("atnt", "exp").with_grid_database_directory(root.path());
        let mut executor = TaskExecutor::new(&configuration, &options);
        let leaves = enumerate_leaves(&configuration.replace);

        let mut submitter = MockSubmitter::new();
        submitter
            .expect_submit()
            .withf(|request| request.fake_job_id == 0 && request.dependencies.is_empty())
            .times(1)
            .returning(|_| {
                Ok([
                    ("preprocessing".to_string(), JobId(1)),
                    ("scoring".to_string(), JobId(2)),
                ]
                .into_iter()
                .collect())
            });
        submitter
            .expect_submit()
            .withf(|request| request.fake_job_id == 100)
            .times(1)
            .returning(|request| {
                assert_eq!(request.dependencies, vec![JobId(1)]);
                Ok([("scoring".to_string(), JobId(3))].into_iter().collect())
            });

        executor.execute(&leaves[0], &submitter).await.unwrap();
        let outcome = executor.execute(&leaves[1], &submitter).await.unwrap();

        assert!(matches!(outcome, TaskOutcome::Submitted(ref ids) if ids.len() == 1));
        assert_eq!(executor.statistics().tasks, 2);
        assert_eq!(executor.statistics().jobs, 3);
        assert_eq!(executor.registry().get("scoring"), Some(JobId(3)));
        assert_eq!(executor.next_fake_job_id(), 200);
        assert!(root.path().join("x").is_dir());
        assert!(root.path().join("y").is_dir());
    }

    #[tokio::test]
    async fn test_submission_failure_is_recorded() {
        let root = tempfile::tempdir().unwrap();
        let configuration = fixtures::scoring_sweep();
        let options = SweepOptions::new("atnt", "exp").with_grid_database_directory(root.path());
        let mut executor = TaskExecutor::new(&configuration, &options);
        let leaves = enumerate_leaves(&configuration.replace);

        let mut submitter = MockSubmitter::new();
        submitter
            .expect_submit()
            .returning(|_| Err(crate::errors::SubmissionError::rejected("queue full")));

        let outcome = executor.execute(&leaves[0], &submitter).await.unwrap();
        match outcome {
            TaskOutcome::Failed(failure) => {
                assert_eq!(failure.task, 0);
                assert_eq!(failure.reason, "queue full");
                assert!(failure.command_line.starts_with("--database atnt"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
        assert_eq!(executor.statistics().tasks, 1);
        assert_eq!(executor.statistics().jobs, 0);
        assert!(executor.registry().is_empty());

        let report = executor.into_report(Uuid::new_v4(), Utc::now());
        assert!(report.has_failures());
    }

    #[tokio::test]
    async fn test_dry_run_never_submits() {
        let root = tempfile::tempdir().unwrap();
        let configuration = fixtures::scoring_sweep();
        let options = SweepOptions::new("atnt", "exp")
            .with_grid_database_directory(root.path())
            .dry_run(true);
        let mut executor = TaskExecutor::new(&configuration, &options);
        let leaves = enumerate_leaves(&configuration.replace);

        let mut submitter = MockSubmitter::new();
        submitter.expect_submit().never();

        let first = executor.plan(&leaves[0]).unwrap();
        assert_eq!(first.fake_job_id, 0);
        assert_eq!(executor.execute(&leaves[0], &submitter).await.unwrap(), TaskOutcome::DryRun);

        let second = executor.plan(&leaves[1]).unwrap();
        assert_eq!(second.fake_job_id, 100);
        // mimicked upstream jobs of the first task
        assert_eq!(
            second.dependencies,
            vec![JobId(3), JobId(1), JobId(0), JobId(2)]
        );
        executor.execute(&leaves[1], &submitter).await.unwrap();

        assert_eq!(executor.statistics().tasks, 2);
        assert_eq!(executor.statistics().jobs, 0);
    }

    #[tokio::test]
    async fn test_write_commands() {
        let root = tempfile::tempdir().unwrap();
        let configuration = fixtures::scoring_sweep();
        let options = SweepOptions::new("atnt", "exp")
            .with_grid_database_directory(root.path())
            .with_write_commands("command.txt")
            .dry_run(true);
        let mut executor = TaskExecutor::new(&configuration, &options);
        let leaves = enumerate_leaves(&configuration.replace);

        executor.execute(&leaves[0], &MockSubmitter::new()).await.unwrap();

        let written = std::fs::read_to_string(root.path().join("x").join("command.txt")).unwrap();
        assert!(written.starts_with("bin/faceverify.py --database atnt "));
        assert!(written.ends_with(' '));
    }

    #[tokio::test]
    async fn test_existing_results_are_skipped() {
        let root = tempfile::tempdir().unwrap();
        let results = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(results.path().join("exp").join("x").join("scores")).unwrap();

        let configuration = fixtures::scoring_sweep();
        let options = SweepOptions::new("atnt", "exp")
            .with_grid_database_directory(root.path())
            .with_non_existent_only(results.path());
        let mut executor = TaskExecutor::new(&configuration, &options);
        let leaves = enumerate_leaves(&configuration.replace);

        let mut submitter = MockSubmitter::new();
        submitter
            .expect_submit()
            .times(1)
            .returning(|_| Ok(JobIds::new()));

        assert_eq!(executor.execute(&leaves[0], &submitter).await.unwrap(), TaskOutcome::Skipped);
        assert_eq!(
            executor.execute(&leaves[1], &submitter).await.unwrap(),
            TaskOutcome::Submitted(JobIds::new())
        );
        assert_eq!(executor.statistics().skipped, 1);
        assert_eq!(executor.statistics().tasks, 1);
        assert_eq!(executor.next_fake_job_id(), 100);
    }

    #[tokio::test]
    async fn test_failure_records_leaf_position_after_skips() {
        let root = tempfile::tempdir().unwrap();
        let results = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(results.path().join("exp").join("c0").join("scores")).unwrap();

        let configuration = fixtures::scoring_sweep_with(3);
        let options = SweepOptions::new("atnt", "exp")
            .with_grid_database_directory(root.path())
            .with_non_existent_only(results.path());
        let mut executor = TaskExecutor::new(&configuration, &options);
        let leaves = enumerate_leaves(&configuration.replace);

        let mut submitter = MockSubmitter::new();
        submitter
            .expect_submit()
            .returning(|_| Err(crate::errors::SubmissionError::rejected("queue full")));

        assert_eq!(executor.execute(&leaves[0], &submitter).await.unwrap(), TaskOutcome::Skipped);
        let outcome = executor.execute(&leaves[1], &submitter).await.unwrap();

        assert!(matches!(outcome, TaskOutcome::Failed(ref failure) if failure.task == 1));
        assert_eq!(executor.statistics().tasks, 1);
        assert_eq!(executor.leaves_seen(), 2);
    }

    #[test]
    fn test_unwritable_database_directory_is_fatal() {
        let root = tempfile::tempdir().unwrap();
        let blocker = root.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();

        let configuration = fixtures::scoring_sweep();
        let options = SweepOptions::new("atnt", "exp").with_grid_database_directory(&blocker);
        let executor = TaskExecutor::new(&configuration, &options);
        let leaves = enumerate_leaves(&configuration.replace);

        let plan = executor.plan(&leaves[0]).unwrap();
        assert!(matches!(
            plan.directories.ensure_database_directory(),
            Err(SweepError::Io { .. })
        ));
    }
}
