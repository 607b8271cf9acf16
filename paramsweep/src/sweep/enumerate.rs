//! Depth-first enumeration of the replacement space.

use super::Selection;
use crate::config::ReplacementSpace;
use crate::core::PipelineStep;
use crate::dependency::DependencyLevel;
use crate::planner::DirectoryAccumulator;

/// One fully resolved combination of candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafCombination {
    /// Candidate index per replacement key.
    pub selection: Selection,
    /// Directory fragments per step.
    pub directories: DirectoryAccumulator,
    /// Steps shared with the previously enumerated combination.
    pub dependency_level: DependencyLevel,
}

/// Lazily enumerates every combination of candidates, step by step in
/// pipeline order and key by key within a step.
///
/// The last key varies fastest. The first candidate of a key inherits the
/// dependency level of its parent branch; every further candidate gets the
/// level of the key's step, since everything upstream of that step is
/// identical to its previous sibling.
///
/// Leaves are produced one at a time, so a sweep never holds more than the
/// current combination in memory.
#[must_use]
pub fn leaves(space: &ReplacementSpace) -> Leaves<'_> {
    let keys: Vec<KeySlot<'_>> = space
        .keys()
        .map(|(step, key, candidates)| KeySlot {
            step,
            key,
            fragments: candidates.keys().map(String::as_str).collect(),
        })
        .collect();
    let empty = keys.iter().any(|slot| slot.fragments.is_empty());

    Leaves {
        indices: vec![0; keys.len()],
        keys,
        next_level: (!empty).then_some(DependencyLevel::NONE),
    }
}

/// Collects all leaves of a space. Prefer [`leaves`] for large spaces.
#[must_use]
pub fn enumerate_leaves(space: &ReplacementSpace) -> Vec<LeafCombination> {
    leaves(space).collect()
}

#[derive(Debug, Clone)]
struct KeySlot<'a> {
    step: PipelineStep,
    key: &'a str,
    fragments: Vec<&'a str>,
}

/// Iterator over the leaf combinations of a replacement space.
#[derive(Debug, Clone)]
pub struct Leaves<'a> {
    keys: Vec<KeySlot<'a>>,
    indices: Vec<usize>,
    next_level: Option<DependencyLevel>,
}

impl Leaves<'_> {
    fn current(&self, level: DependencyLevel) -> LeafCombination {
        let mut selection = Selection::new();
        let mut directories = DirectoryAccumulator::new();
        for (slot, &index) in self.keys.iter().zip(&self.indices) {
            selection = selection.with_choice(slot.key, index);
            directories = directories.with_fragment(slot.step, slot.fragments[index]);
        }
        LeafCombination {
            selection,
            directories,
            dependency_level: level,
        }
    }

    /// Moves to the next selection and returns its dependency level, or
    /// `None` once every combination was produced.
    fn advance(&mut self) -> Option<DependencyLevel> {
        for position in (0..self.keys.len()).rev() {
            self.indices[position] += 1;
            if self.indices[position] < self.keys[position].fragments.len() {
                return Some(DependencyLevel::at(self.keys[position].step));
            }
            self.indices[position] = 0;
        }
        None
    }
}

impl Iterator for Leaves<'_> {
    type Item = LeafCombination;

    fn next(&mut self) -> Option<Self::Item> {
        let level = self.next_level?;
        let leaf = self.current(level);
        self.next_level = self.advance();
        Some(leaf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::HashSet;

    fn space(value: serde_json::Value) -> ReplacementSpace {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_empty_space_has_one_leaf() {
        let leaves = enumerate_leaves(&ReplacementSpace::new());
        assert_eq!(leaves.len(), 1);
        assert!(leaves[0].selection.is_empty());
        assert_eq!(leaves[0].dependency_level, DependencyLevel::NONE);
    }

    #[test]
    fn test_single_scoring_key() {
        let leaves = enumerate_leaves(&space(json!({
            "scoring": {"#a": {"x": "val1", "y": "val2"}}
        })));

        assert_eq!(leaves.len(), 2);
        assert_eq!(leaves[0].selection.index("#a"), Some(0));
        assert_eq!(leaves[1].selection.index("#a"), Some(1));
        assert_eq!(leaves[0].directories.fragments(PipelineStep::Scoring), ["x"]);
        assert_eq!(leaves[1].directories.fragments(PipelineStep::Scoring), ["y"]);
        assert_eq!(leaves[0].dependency_level, DependencyLevel::NONE);
        assert_eq!(leaves[1].dependency_level, DependencyLevel::at(PipelineStep::Scoring));
    }

    #[test]
    fn test_leaf_count_is_product_and_selections_unique() {
        let space = space(json!({
            "preprocessing": {"#p": {"p1": 1, "p2": 2}},
            "extraction": {"#e": {"e1": 1, "e2": 2, "e3": 3}, "#f": {"f1": 1, "f2": 2}},
            "scoring": {"#s": {"s1": 1, "s2": 2}}
        }));
        let leaves = enumerate_leaves(&space);

        assert_eq!(leaves.len(), 2 * 3 * 2 * 2);
        assert_eq!(Some(leaves.len()), space.combination_count());
        let unique: HashSet<_> = leaves.iter().map(|leaf| leaf.selection.clone()).collect();
        assert_eq!(unique.len(), leaves.len());
    }

    #[test]
    fn test_dependency_levels_follow_varied_step() {
        let leaves = enumerate_leaves(&space(json!({
            "preprocessing": {"#p": {"p1": 1, "p2": 2}},
            "enrollment": {"#e": {"e1": 1, "e2": 2}}
        })));

        let levels: Vec<usize> = leaves.iter().map(|leaf| leaf.dependency_level.get()).collect();
        // (p1,e1) (p1,e2) (p2,e1) (p2,e2)
        assert_eq!(levels, vec![0, 3, 0, 3]);
    }

    #[test]
    fn test_second_key_of_same_step() {
        let leaves = enumerate_leaves(&space(json!({
            "extraction": {"#a": {"a1": 1, "a2": 2}, "#b": {"b1": 1, "b2": 2}}
        })));

        let levels: Vec<usize> = leaves.iter().map(|leaf| leaf.dependency_level.get()).collect();
        assert_eq!(levels, vec![0, 1, 1, 1]);
        assert_eq!(
            leaves[3].directories.fragments(PipelineStep::Extraction),
            ["a2", "b2"]
        );
    }

    #[test]
    fn test_leaves_sharing_upstream_share_paths() {
        use crate::core::ArtifactKind;

        let leaves = enumerate_leaves(&space(json!({
            "extraction": {"#e": {"e1": 1}},
            "scoring": {"#s": {"s1": 1, "s2": 2}}
        })));

        for kind in ArtifactKind::ALL {
            let same = leaves[0].directories.artifact_path(kind) == leaves[1].directories.artifact_path(kind);
            assert_eq!(same, kind.owning_step() != PipelineStep::Scoring, "{kind}");
        }
    }

    #[test]
    fn test_empty_candidate_set_yields_no_leaves() {
        let leaves = enumerate_leaves(&space(json!({
            "preprocessing": {"#p": {"p1": 1}},
            "scoring": {"#s": {}}
        })));
        assert!(leaves.is_empty());
    }

    #[test]
    fn test_leaves_are_lazy_for_huge_spaces() {
        let mut space = ReplacementSpace::new();
        for i in 0..70 {
            space.insert(
                PipelineStep::Scoring,
                format!("#{i:02}"),
                [("a".to_string(), json!(1)), ("b".to_string(), json!(2))]
                    .into_iter()
                    .collect(),
            );
        }
        assert_eq!(space.combination_count(), None);

        let first: Vec<LeafCombination> = leaves(&space).take(3).collect();
        assert_eq!(first.len(), 3);
        assert_eq!(first[0].selection.len(), 70);
        assert_eq!(first[0].dependency_level, DependencyLevel::NONE);
        assert_eq!(first[1].selection.index("#69"), Some(1));
        assert_eq!(first[2].selection.index("#68"), Some(1));
        assert_eq!(first[2].selection.index("#69"), Some(0));
        assert_eq!(first[2].dependency_level, DependencyLevel::at(PipelineStep::Scoring));
    }
}
