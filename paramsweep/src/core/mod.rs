//! Core domain model types for paramsweep.
//!
//! This module contains the fundamental types used throughout the driver:
//! - The five ordered pipeline steps
//! - Artifact kinds and their default names
//! - Grid job identifiers

mod artifact;
mod job;
mod step;

pub use artifact::{ArtifactKind, SUBMIT_DATABASE_NAME};
pub use job::{JobId, JobIds};
pub use step::PipelineStep;
