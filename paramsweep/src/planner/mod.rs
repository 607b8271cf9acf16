//! Directory planning for pipeline artifacts.
//!
//! Artifact paths nest the directory fragments chosen for every step up to
//! and including the artifact's owning step. Combinations that agree on all
//! upstream choices therefore share upstream directories, and diverge from
//! the first step where their choices differ.

mod accumulator;
mod layout;

pub use accumulator::DirectoryAccumulator;
pub use layout::DirectoryPlan;
