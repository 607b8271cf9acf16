//! Marker and designator parsing and template substitution.

use crate::errors::PlaceholderError;
use std::collections::BTreeMap;

/// Marker character used when none is configured.
pub const DEFAULT_MARKER: char = '#';

/// The placeholder syntax of one sweep: which character starts a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderSyntax {
    marker: char,
}

impl Default for PlaceholderSyntax {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER)
    }
}

impl PlaceholderSyntax {
    /// Creates a syntax with the given marker character.
    #[must_use]
    pub const fn new(marker: char) -> Self {
        Self { marker }
    }

    /// Returns the marker character.
    #[must_use]
    pub const fn marker(&self) -> char {
        self.marker
    }

    /// Returns true if the text contains at least one marker.
    #[must_use]
    pub fn has_placeholders(&self, text: &str) -> bool {
        text.contains(self.marker)
    }

    /// Returns the designators of every placeholder in the text, in order of
    /// appearance. Repeated designators are reported repeatedly.
    ///
    /// # Errors
    ///
    /// Returns an error if a marker is the last character of the text.
    pub fn designators(&self, text: &str) -> Result<Vec<char>, PlaceholderError> {
        self.segments(text)
            .map(|segments| segments.into_iter().map(|(designator, _)| designator).collect())
    }

    /// Substitutes every placeholder in the template and quotes the result.
    ///
    /// A template without any marker is returned unchanged and unquoted.
    ///
    /// # Errors
    ///
    /// Returns [`PlaceholderError::Lookup`] if a designator has no value.
    pub fn resolve(
        &self,
        template: &str,
        values: &BTreeMap<char, String>,
    ) -> Result<String, PlaceholderError> {
        if !self.has_placeholders(template) {
            return Ok(template.to_string());
        }

        let prefix_end = template.find(self.marker).unwrap_or(template.len());
        let mut resolved = String::with_capacity(template.len() + 2);
        resolved.push('"');
        resolved.push_str(&template[..prefix_end]);

        for (designator, rest) in self.segments(template)? {
            let value = values.get(&designator).ok_or_else(|| PlaceholderError::Lookup {
                marker: self.marker,
                designator,
                template: template.to_string(),
            })?;
            resolved.push_str(value);
            resolved.push_str(rest);
        }

        resolved.push('"');
        Ok(resolved)
    }

    /// Splits the text after its first marker into (designator, trailing text)
    /// pairs.
    fn segments<'a>(&self, text: &'a str) -> Result<Vec<(char, &'a str)>, PlaceholderError> {
        text.split(self.marker)
            .skip(1)
            .map(|part| {
                let mut chars = part.chars();
                chars
                    .next()
                    .map(|designator| (designator, chars.as_str()))
                    .ok_or_else(|| PlaceholderError::MissingDesignator {
                        marker: self.marker,
                        template: text.to_string(),
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(char, &str)]) -> BTreeMap<char, String> {
        pairs.iter().map(|(k, v)| (*k, (*v).to_string())).collect()
    }

    #[test]
    fn test_template_without_marker_is_unchanged() {
        let syntax = PlaceholderSyntax::default();
        let resolved = syntax.resolve("facereclib.tools.PCA()", &BTreeMap::new()).unwrap();
        assert_eq!(resolved, "facereclib.tools.PCA()");
    }

    #[test]
    fn test_single_placeholder_is_substituted_and_quoted() {
        let syntax = PlaceholderSyntax::default();
        let resolved = syntax
            .resolve("PCA(subspace_dimension = #a)", &values(&[('a', "100")]))
            .unwrap();
        assert_eq!(resolved, "\"PCA(subspace_dimension = 100)\"");
    }

    #[test]
    fn test_multiple_placeholders_keep_surrounding_text() {
        let syntax = PlaceholderSyntax::default();
        let resolved = syntax
            .resolve("Gabor(#b, k=#c)#d", &values(&[('b', "8"), ('c', "2.5"), ('d', "")]))
            .unwrap();
        assert_eq!(resolved, "\"Gabor(8, k=2.5)\"");
    }

    #[test]
    fn test_repeated_designator_uses_same_value() {
        let syntax = PlaceholderSyntax::default();
        let resolved = syntax.resolve("#x-#x", &values(&[('x', "7")])).unwrap();
        assert_eq!(resolved, "\"7-7\"");
    }

    #[test]
    fn test_missing_value_is_lookup_error() {
        let syntax = PlaceholderSyntax::default();
        let err = syntax.resolve("tool(#z)", &values(&[('a', "1")])).unwrap_err();
        assert_eq!(
            err,
            PlaceholderError::Lookup {
                marker: '#',
                designator: 'z',
                template: "tool(#z)".to_string(),
            }
        );
    }

    #[test]
    fn test_trailing_marker_has_no_designator() {
        let syntax = PlaceholderSyntax::default();
        assert!(matches!(
            syntax.designators("value#"),
            Err(PlaceholderError::MissingDesignator { .. })
        ));
    }

    #[test]
    fn test_custom_marker() {
        let syntax = PlaceholderSyntax::new('$');
        assert_eq!(syntax.designators("$a and $b, not #c").unwrap(), vec!['a', 'b']);
        let resolved = syntax.resolve("x=$a", &values(&[('a', "1")])).unwrap();
        assert_eq!(resolved, "\"x=1\"");
    }

    #[test]
    fn test_multibyte_designator() {
        let syntax = PlaceholderSyntax::default();
        assert_eq!(syntax.designators("#é!").unwrap(), vec!['é']);
        let resolved = syntax.resolve("#é!", &values(&[('é', "v")])).unwrap();
        assert_eq!(resolved, "\"v!\"");
    }
}
