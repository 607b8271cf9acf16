//! # Paramsweep
//!
//! A parameter sweep driver for staged face recognition experiments.
//!
//! A templated configuration names placeholder keys per pipeline step and a
//! set of named candidates per key. Paramsweep expands the Cartesian product
//! of all candidates, plans a directory layout that shares upstream artifacts
//! between combinations, derives grid job dependencies, and hands each
//! combination to a [`Submitter`](executor::Submitter):
//!
//! - **Placeholder resolution**: marker + designator substitution in templates
//! - **Directory planning**: nested artifact paths per pipeline step
//! - **Dependency tracking**: skip flags and upstream job ids per combination
//! - **Task execution**: dry-run, command dumps and live submission
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use paramsweep::prelude::*;
//!
//! let configuration = Configuration::load("sweep.yaml", PlaceholderSyntax::new('#'))?;
//! let options = SweepOptions::new("atnt", "gabor-sweep").dry_run(true);
//! let report = SweepDriver::new(configuration, options)
//!     .run(&ProcessSubmitter::default())
//!     .await?;
//! println!("{}", report.summary_line());
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod config;
pub mod core;
pub mod dependency;
pub mod errors;
pub mod executor;
pub mod observability;
pub mod placeholder;
pub mod planner;
pub mod sweep;
pub mod testing;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{Configuration, ReplacementSpace, SweepOptions};
    pub use crate::core::{ArtifactKind, JobId, JobIds, PipelineStep};
    pub use crate::dependency::{DependencyLevel, JobRegistry};
    pub use crate::errors::{
        ConfigurationError, PlaceholderError, SubmissionError, SweepError,
    };
    pub use crate::executor::{
        ProcessSubmitter, RunStatistics, SubmissionRequest, Submitter, SweepReport,
        TaskExecutor, TaskFailure,
    };
    pub use crate::placeholder::PlaceholderSyntax;
    pub use crate::planner::{DirectoryAccumulator, DirectoryPlan};
    pub use crate::sweep::{
        enumerate_leaves, leaves, LeafCombination, Leaves, Selection, SweepDriver,
    };
}
