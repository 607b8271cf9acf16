//! Configuration fixtures for sweep tests.

use crate::config::{Configuration, RawConfiguration};
use crate::placeholder::PlaceholderSyntax;
use serde_json::json;

/// Builds a configuration from a JSON value, panicking on invalid input.
#[must_use]
pub fn configuration(value: serde_json::Value) -> Configuration {
    let raw: RawConfiguration = serde_json::from_value(value).expect("valid raw configuration");
    Configuration::from_raw(raw, "fixture.json", PlaceholderSyntax::default())
        .expect("valid configuration")
}

/// One scoring key `#a` with candidates `x` = "val1" and `y` = "val2".
#[must_use]
pub fn scoring_sweep() -> Configuration {
    configuration(json!({
        "preprocessor": "facereclib.preprocessing.FaceCrop()",
        "feature_extractor": "facereclib.features.DCTBlocks()",
        "tool": "facereclib.tools.PCA(distance = #a)",
        "replace": {
            "scoring": {"#a": {"x": "val1", "y": "val2"}}
        }
    }))
}

/// A preprocessing key with two candidates and an extraction key with two
/// designators and two candidates.
#[must_use]
pub fn two_step_sweep() -> Configuration {
    configuration(json!({
        "preprocessor": "facereclib.preprocessing.TanTriggs(gamma = #g)",
        "feature_extractor": "facereclib.features.GridGraph(distance = #d, directions = #n)",
        "tool": "facereclib.tools.GaborJets()",
        "imports": ["facereclib"],
        "replace": {
            "preprocessing": {"#g": {"gamma02": 0.2, "gamma04": 0.4}},
            "extraction": {"#d #n": {"dense": [2, 8], "sparse": [6, 4]}}
        }
    }))
}

/// A scoring key with the given number of candidates `c0`, `c1`, ...
#[must_use]
pub fn scoring_sweep_with(candidates: usize) -> Configuration {
    let candidates: serde_json::Map<String, serde_json::Value> = (0..candidates)
        .map(|i| (format!("c{i}"), json!(i)))
        .collect();
    configuration(json!({
        "preprocessor": "p",
        "feature_extractor": "f",
        "tool": "t(#a)",
        "replace": {"scoring": {"#a": candidates}}
    }))
}
