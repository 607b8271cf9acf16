//! Extraction of designator values from the selected candidates.

use super::PlaceholderSyntax;
use crate::config::ReplacementSpace;
use crate::errors::PlaceholderError;
use crate::sweep::Selection;
use serde_json::Value;
use std::collections::BTreeMap;

/// Rendered substitution value per designator.
pub type DesignatorValues = BTreeMap<char, String>;

/// Collects the value of every designator for the given selection.
///
/// For each replacement key, the selected candidate (by index into the
/// name-sorted candidates) supplies the value. A key with a single
/// designator uses the candidate value as a whole; a key with several
/// designators treats the value as a list and hands out its elements in
/// order. Keys without any designator contribute nothing.
///
/// # Errors
///
/// Fails if two keys claim the same designator, if a selection index is out
/// of range, or if a multi-designator candidate is not a long enough list.
pub fn extract_values(
    syntax: &PlaceholderSyntax,
    space: &ReplacementSpace,
    selection: &Selection,
) -> Result<DesignatorValues, PlaceholderError> {
    let mut values = DesignatorValues::new();

    for (_, replacements) in space.iter() {
        for (key, candidates) in replacements {
            let designators = syntax.designators(key)?;
            if designators.is_empty() {
                continue;
            }

            let index = selection.index(key).unwrap_or(0);
            let (candidate, value) = candidates.iter().nth(index).ok_or_else(|| {
                PlaceholderError::SelectionOutOfRange {
                    key: key.clone(),
                    index,
                }
            })?;

            if let Some(&designator) = designators.iter().find(|d| values.contains_key(*d)) {
                return Err(PlaceholderError::DuplicateDesignator { designator });
            }

            if let [designator] = designators.as_slice() {
                values.insert(*designator, render_value(value));
                continue;
            }

            for (position, designator) in designators.iter().enumerate() {
                let element = value
                    .as_array()
                    .and_then(|items| items.get(position))
                    .ok_or_else(|| PlaceholderError::MissingTupleValue {
                        key: key.clone(),
                        candidate: candidate.clone(),
                        designator: *designator,
                    })?;
                values.insert(*designator, render_value(element));
            }
        }
    }

    Ok(values)
}

/// Renders a candidate value the way the verification tool expects literals:
/// strings verbatim, booleans and null as `True`/`False`/`None`, lists with
/// quoted string elements.
#[must_use]
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => render_literal(other),
    }
}

fn render_literal(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("'{s}'"),
        Value::Array(items) => {
            let inner: Vec<String> = items.iter().map(render_literal).collect();
            format!("[{}]", inner.join(", "))
        }
        Value::Object(map) => {
            let inner: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("'{k}': {}", render_literal(v)))
                .collect();
            format!("{{{}}}", inner.join(", "))
        }
    }
}
