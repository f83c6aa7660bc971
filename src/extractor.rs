//! JSON extractor implementation.

use crate::config::{ConfigError, ExtractionConfig, ExtractorSettings};
use crate::event::Event;
use crate::node::{FractionalNumbers, JsonNode};
use crate::transformer::{
    BodyExtraction, HeaderExtraction, Outcome, Transformer, UnchangedReason,
};
use std::collections::HashMap;
use tracing::{debug, info};

/// Lifts fields of a JSON event body into metadata and/or the body.
///
/// The body is parsed once per event. Header extractions run first, then
/// the optional body replacement. Anything that cannot be parsed or
/// resolved leaves the event as it was.
pub struct JsonExtractor {
    /// Metadata extraction
    headers: HeaderExtraction,
    /// Body replacement
    body: Option<BodyExtraction>,
    /// How fractional numbers are read
    fractional_numbers: FractionalNumbers,
}

impl JsonExtractor {
    /// Create a new extractor from configuration.
    pub fn new(config: &ExtractionConfig) -> Self {
        let headers = HeaderExtraction::new(config.header_paths());
        let body = config.body_path().map(BodyExtraction::new);

        info!(
            header_paths = config.header_paths().count(),
            body_path = config.body_path().map(|p| p.as_str()),
            fractional_numbers = ?config.fractional_numbers(),
            "JSON extractor initialized"
        );

        Self {
            headers,
            body,
            fractional_numbers: config.fractional_numbers(),
        }
    }

    /// Create from host settings.
    pub fn from_settings(settings: &ExtractorSettings) -> Self {
        Self::new(&ExtractionConfig::from_settings(settings))
    }

    /// Create from a YAML settings string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        ExtractorSettings::from_yaml(yaml).map(|settings| Self::from_settings(&settings))
    }

    /// Create from a JSON settings string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        ExtractorSettings::from_json(json).map(|settings| Self::from_settings(&settings))
    }

    fn is_configured(&self) -> bool {
        !self.headers.is_empty() || self.body.is_some()
    }
}

impl Transformer for JsonExtractor {
    fn apply(&self, event: &mut Event) -> Outcome {
        if !self.is_configured() {
            return Outcome::Unchanged(UnchangedReason::NothingConfigured);
        }
        if event.body.is_empty() {
            return Outcome::Unchanged(UnchangedReason::EmptyBody);
        }

        let root = match JsonNode::parse_object(&event.body, self.fractional_numbers) {
            Ok(root) => root,
            Err(e) => {
                debug!(error = %e, "Passing event through unparsed");
                return Outcome::Unchanged(UnchangedReason::MalformedPayload);
            }
        };

        let headers_written = self.headers.apply(&root, &mut event.metadata);
        let body_replaced = self
            .body
            .as_ref()
            .is_some_and(|body| body.apply(&root, &mut event.body));

        if headers_written == 0 && !body_replaced {
            debug!("No configured path produced a value");
            return Outcome::Unchanged(UnchangedReason::NothingExtracted);
        }

        Outcome::Transformed {
            headers_written,
            body_replaced,
        }
    }

    fn name(&self) -> &'static str {
        "json_extractor"
    }
}

/// Two-step construction for hosts that hand over a flat property map.
#[derive(Debug, Clone, Default)]
pub struct ExtractorBuilder {
    settings: ExtractorSettings,
}

impl ExtractorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read extractor properties, replacing any previously configured ones.
    pub fn configure(
        &mut self,
        properties: &HashMap<String, String>,
    ) -> Result<&mut Self, ConfigError> {
        self.settings = ExtractorSettings::from_properties(properties)?;
        Ok(self)
    }

    pub fn settings(&self) -> &ExtractorSettings {
        &self.settings
    }

    /// Build an extractor from the configured properties.
    pub fn build(&self) -> JsonExtractor {
        JsonExtractor::from_settings(&self.settings)
    }
}
