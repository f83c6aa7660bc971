//! Configuration types for the JSON extractor.

use crate::node::FractionalNumbers;
use crate::path::DottedPath;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Property key listing dotted paths to copy into metadata.
pub const HEADER_PROPERTIES_KEY: &str = "extractHeaderProperties";
/// Property key naming the dotted path that replaces the body.
pub const BODY_PROPERTY_KEY: &str = "extractBodyProperty";
/// Property key of the earlier top-level-only extractor. Merged into the
/// header paths.
pub const LEGACY_PROPERTIES_KEY: &str = "extractProperties";
/// Property key selecting how fractional numbers are read.
pub const FRACTIONAL_NUMBERS_KEY: &str = "fractionalNumbers";

/// Raw extractor settings as supplied by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtractorSettings {
    /// Comma-separated dotted paths copied into metadata
    pub extract_header_properties: Option<String>,
    /// Dotted path whose value replaces the body
    pub extract_body_property: Option<String>,
    /// Comma-separated top-level fields (legacy)
    pub extract_properties: Option<String>,
    /// Representation of fractional numbers in the parsed payload
    pub fractional_numbers: FractionalNumbers,
}

impl ExtractorSettings {
    /// Parse settings from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse settings from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read settings from a flat key/value property map. Unknown keys are
    /// ignored.
    pub fn from_properties(properties: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let fractional_numbers = match properties.get(FRACTIONAL_NUMBERS_KEY) {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                key: FRACTIONAL_NUMBERS_KEY.to_string(),
                value: value.clone(),
            })?,
            None => FractionalNumbers::default(),
        };

        Ok(Self {
            extract_header_properties: properties.get(HEADER_PROPERTIES_KEY).cloned(),
            extract_body_property: properties.get(BODY_PROPERTY_KEY).cloned(),
            extract_properties: properties.get(LEGACY_PROPERTIES_KEY).cloned(),
            fractional_numbers,
        })
    }
}

/// Frozen extraction configuration.
///
/// Built once and shared read-only by every event an extractor processes.
/// There are no setters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionConfig {
    header_paths: BTreeSet<DottedPath>,
    body_path: Option<DottedPath>,
    fractional_numbers: FractionalNumbers,
}

impl ExtractionConfig {
    /// Create a configuration from header paths and an optional body path.
    /// Paths are trimmed; blank entries are dropped and duplicates collapse.
    pub fn new<I, S>(header_paths: I, body_path: Option<&str>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let header_paths = header_paths
            .into_iter()
            .filter_map(|p| non_blank(p.as_ref()).map(DottedPath::new))
            .collect();

        Self {
            header_paths,
            body_path: body_path.and_then(non_blank).map(DottedPath::new),
            fractional_numbers: FractionalNumbers::default(),
        }
    }

    /// Select how fractional numbers are read.
    pub fn with_fractional_numbers(mut self, fractional_numbers: FractionalNumbers) -> Self {
        self.fractional_numbers = fractional_numbers;
        self
    }

    /// Build from host settings. Legacy and current header lists are merged.
    pub fn from_settings(settings: &ExtractorSettings) -> Self {
        let header_paths = [
            settings.extract_header_properties.as_deref(),
            settings.extract_properties.as_deref(),
        ]
        .into_iter()
        .flatten()
        .flat_map(split_path_list);

        Self::new(header_paths, settings.extract_body_property.as_deref())
            .with_fractional_numbers(settings.fractional_numbers)
    }

    pub fn header_paths(&self) -> impl Iterator<Item = &DottedPath> {
        self.header_paths.iter()
    }

    pub fn body_path(&self) -> Option<&DottedPath> {
        self.body_path.as_ref()
    }

    pub fn fractional_numbers(&self) -> FractionalNumbers {
        self.fractional_numbers
    }

    /// True when neither header nor body extraction is configured.
    pub fn is_empty(&self) -> bool {
        self.header_paths.is_empty() && self.body_path.is_none()
    }
}

/// Split a comma-separated path list, trimming entries and skipping blanks.
pub fn split_path_list(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').filter_map(non_blank)
}

fn non_blank(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid value '{value}' for '{key}'")]
    InvalidValue { key: String, value: String },
}
