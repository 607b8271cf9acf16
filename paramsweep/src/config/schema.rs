//! Raw configuration document as written by the user.

use super::space::ReplacementSpace;
use serde::{Deserialize, Serialize};

/// The configuration document before validation.
///
/// Every attribute is optional here so that a missing one can be reported
/// by name instead of as a generic parse error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawConfiguration {
    /// Preprocessor template.
    #[serde(default)]
    pub preprocessor: Option<String>,
    /// Feature extractor template.
    #[serde(default)]
    pub feature_extractor: Option<String>,
    /// Verification tool template.
    #[serde(default)]
    pub tool: Option<String>,
    /// Modules the verification tool imports.
    #[serde(default)]
    pub imports: Option<Vec<String>>,
    /// Replacements per pipeline step.
    #[serde(default)]
    pub replace: Option<ReplacementSpace>,
}
