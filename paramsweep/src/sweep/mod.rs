//! Combinatorial expansion and execution of a sweep.
//!
//! This module provides:
//! - The per-branch [`Selection`] of candidate indices
//! - Lazy depth-first enumeration of every leaf combination
//! - The [`SweepDriver`] that executes the leaves in order

mod driver;
mod enumerate;
mod selection;

pub use driver::SweepDriver;
pub use enumerate::{enumerate_leaves, leaves, LeafCombination, Leaves};
pub use selection::Selection;
