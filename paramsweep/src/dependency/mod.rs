//! Job dependency tracking between sweep combinations.
//!
//! Consecutive combinations that only differ in a downstream step share all
//! upstream artifacts. Their tasks skip the shared steps and depend on the
//! grid jobs that were already submitted for them.

mod registry;
mod tracker;

pub use registry::JobRegistry;
pub use tracker::DependencyLevel;
