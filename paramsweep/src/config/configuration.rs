//! Loading and validation of the sweep configuration.

use super::schema::RawConfiguration;
use super::space::ReplacementSpace;
use crate::errors::ConfigurationError;
use crate::placeholder::PlaceholderSyntax;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Imports used when the configuration does not name any.
pub const DEFAULT_IMPORTS: &[&str] = &["facereclib"];

/// Document format of a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON document.
    Json,
    /// YAML document.
    Yaml,
}

impl ConfigFormat {
    /// Picks the format from the file extension. Unknown extensions are
    /// read as JSON.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

/// A validated sweep configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    /// File the configuration was read from.
    pub source: PathBuf,
    /// Placeholder syntax used by templates and keys.
    pub syntax: PlaceholderSyntax,
    /// Preprocessor template.
    pub preprocessor: String,
    /// Feature extractor template.
    pub feature_extractor: String,
    /// Verification tool template.
    pub tool: String,
    /// Modules the verification tool imports.
    pub imports: Vec<String>,
    /// Replacements per pipeline step.
    pub replace: ReplacementSpace,
}

impl Configuration {
    /// Reads and validates a configuration file.
    pub fn load(path: impl AsRef<Path>, syntax: PlaceholderSyntax) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigurationError::Read {
            file: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, ConfigFormat::from_path(path), path, syntax)
    }

    /// Parses and validates a configuration document.
    pub fn parse(
        content: &str,
        format: ConfigFormat,
        source: impl Into<PathBuf>,
        syntax: PlaceholderSyntax,
    ) -> Result<Self, ConfigurationError> {
        let source = source.into();
        let raw: RawConfiguration = match format {
            ConfigFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            ConfigFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        }
        .map_err(|message| ConfigurationError::Parse {
            file: source.clone(),
            message,
        })?;
        Self::from_raw(raw, source, syntax)
    }

    /// Validates a raw document into a typed configuration.
    pub fn from_raw(
        raw: RawConfiguration,
        source: impl Into<PathBuf>,
        syntax: PlaceholderSyntax,
    ) -> Result<Self, ConfigurationError> {
        let source = source.into();
        let missing = |attribute: &str| ConfigurationError::MissingAttribute {
            file: source.clone(),
            attribute: attribute.to_string(),
        };

        let preprocessor = raw.preprocessor.ok_or_else(|| missing("preprocessor"))?;
        let feature_extractor = raw.feature_extractor.ok_or_else(|| missing("feature_extractor"))?;
        let tool = raw.tool.ok_or_else(|| missing("tool"))?;
        let replace = raw.replace.ok_or_else(|| missing("replace"))?;

        let imports = raw.imports.unwrap_or_else(|| {
            let imports: Vec<String> = DEFAULT_IMPORTS.iter().map(ToString::to_string).collect();
            info!(
                "No 'imports' specified in configuration file '{}' -> using default {:?}",
                source.display(),
                imports
            );
            imports
        });

        let configuration = Self {
            source,
            syntax,
            preprocessor,
            feature_extractor,
            tool,
            imports,
            replace,
        };
        configuration.validate()?;
        Ok(configuration)
    }

    /// Returns the three templated attributes with their names.
    #[must_use]
    pub fn templates(&self) -> [(&'static str, &str); 3] {
        [
            ("preprocessor", self.preprocessor.as_str()),
            ("feature_extractor", self.feature_extractor.as_str()),
            ("tool", self.tool.as_str()),
        ]
    }

    /// Checks the replacement space against the templates.
    ///
    /// # Errors
    ///
    /// Fails if a key is defined in two steps, a designator is claimed by two
    /// keys, a template designator is unclaimed, or a multi-designator
    /// candidate does not provide one value per designator.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let mut seen_keys = BTreeSet::new();
        let mut claimed: BTreeMap<char, &str> = BTreeMap::new();

        for (step, key, candidates) in self.replace.keys() {
            if !seen_keys.insert(key) {
                return Err(ConfigurationError::DuplicateKey {
                    key: key.to_string(),
                });
            }

            let designators = self.syntax.designators(key)?;
            for designator in &designators {
                match claimed.get(designator) {
                    Some(owner) if *owner != key => {
                        return Err(ConfigurationError::DuplicateDesignator {
                            designator: *designator,
                            key: key.to_string(),
                        });
                    }
                    _ => {
                        claimed.insert(*designator, key);
                    }
                }
            }

            if designators.len() > 1 {
                for (candidate, value) in candidates {
                    let found = value.as_array().map_or(0, Vec::len);
                    if found < designators.len() {
                        return Err(ConfigurationError::TupleArity {
                            key: key.to_string(),
                            candidate: candidate.clone(),
                            expected: designators.len(),
                            found,
                        });
                    }
                }
            }

            if candidates.is_empty() {
                warn!(step = %step, key = %key, "Replacement key has no candidates; the sweep is empty");
            }
        }

        for (name, template) in self.templates() {
            for designator in self.syntax.designators(template)? {
                if !claimed.contains_key(&designator) {
                    return Err(ConfigurationError::UnresolvedDesignator {
                        designator,
                        template: name.to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}
