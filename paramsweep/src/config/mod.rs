//! Sweep configuration.
//!
//! This module provides:
//! - The raw configuration document schema (JSON or YAML)
//! - The replacement space: step → key → named candidates
//! - The validated, typed [`Configuration`]
//! - Run options taken from the command line

mod configuration;
mod options;
mod schema;
mod space;

pub use configuration::{ConfigFormat, Configuration, DEFAULT_IMPORTS};
pub use options::SweepOptions;
pub use schema::RawConfiguration;
pub use space::{Candidates, ReplacementSpace, StepReplacements};
