//! Placeholder resolution for templated configuration strings.
//!
//! A placeholder is the configured marker character followed by a single
//! designator character, e.g. `#a`. Replacement keys name one or more
//! designators; the selected candidate of a key supplies their values.

mod resolver;
mod values;

pub use resolver::{PlaceholderSyntax, DEFAULT_MARKER};
pub use values::{extract_values, render_value, DesignatorValues};
