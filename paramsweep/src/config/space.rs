//! The combinatorial replacement space.

use crate::core::PipelineStep;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Named candidates of one replacement key. The candidate name doubles as
/// the directory fragment; the value is substituted into templates.
pub type Candidates = BTreeMap<String, Value>;

/// Replacement keys of one pipeline step.
pub type StepReplacements = BTreeMap<String, Candidates>;

/// Replacement keys per pipeline step.
///
/// Ordered maps throughout, so steps iterate in pipeline order and keys and
/// candidates iterate sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReplacementSpace(BTreeMap<PipelineStep, StepReplacements>);

impl ReplacementSpace {
    /// Creates an empty replacement space.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a key of the given step.
    pub fn insert(&mut self, step: PipelineStep, key: impl Into<String>, candidates: Candidates) {
        self.0.entry(step).or_default().insert(key.into(), candidates);
    }

    /// Returns the keys of a step, if it has any.
    #[must_use]
    pub fn step(&self, step: PipelineStep) -> Option<&StepReplacements> {
        self.0.get(&step).filter(|replacements| !replacements.is_empty())
    }

    /// Iterates over steps with their keys, in pipeline order.
    pub fn iter(&self) -> impl Iterator<Item = (PipelineStep, &StepReplacements)> {
        self.0.iter().map(|(step, replacements)| (*step, replacements))
    }

    /// Iterates over every (step, key, candidates) triple.
    pub fn keys(&self) -> impl Iterator<Item = (PipelineStep, &str, &Candidates)> {
        self.iter().flat_map(|(step, replacements)| {
            replacements
                .iter()
                .map(move |(key, candidates)| (step, key.as_str(), candidates))
        })
    }

    /// Returns the number of leaf combinations the space expands to, or
    /// `None` if the count does not fit in a `usize`.
    #[must_use]
    pub fn combination_count(&self) -> Option<usize> {
        self.keys()
            .try_fold(1usize, |count, (_, _, candidates)| count.checked_mul(candidates.len()))
    }

    /// Returns true if no step has any key.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_from_json() {
        let space: ReplacementSpace = serde_json::from_value(json!({
            "scoring": {"#a": {"x": "val1", "y": "val2"}},
            "preprocessing": {"#p": {"small": 32}}
        }))
        .unwrap();

        let steps: Vec<_> = space.iter().map(|(step, _)| step).collect();
        assert_eq!(steps, vec![PipelineStep::Preprocessing, PipelineStep::Scoring]);
        assert_eq!(space.combination_count(), Some(2));
    }

    #[test]
    fn test_unknown_step_is_rejected() {
        let result: Result<ReplacementSpace, _> =
            serde_json::from_value(json!({"training": {"#a": {"x": 1}}}));
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_step_is_absent() {
        let space: ReplacementSpace = serde_json::from_value(json!({"projection": {}})).unwrap();
        assert!(space.step(PipelineStep::Projection).is_none());
        assert!(space.is_empty());
        assert_eq!(space.combination_count(), Some(1));
    }

    #[test]
    fn test_combination_count_overflow_is_none() {
        let mut space = ReplacementSpace::new();
        for i in 0..70 {
            let candidates: Candidates =
                [("a".to_string(), json!(1)), ("b".to_string(), json!(2))].into_iter().collect();
            space.insert(PipelineStep::Scoring, format!("k{i:02}"), candidates);
        }
        assert_eq!(space.combination_count(), None);
    }
}
