//! Testing utilities for paramsweep.
//!
//! This module provides:
//! - Submitter doubles that record requests or fail on demand
//! - Configuration fixtures
//! - In-memory capture of log output

pub mod fixtures;
mod logs;
mod mocks;

pub use logs::CapturedLogs;
pub use mocks::{FailingSubmitter, RecordingSubmitter};
