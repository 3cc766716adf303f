use serde::Deserialize;

use crate::error::EngineError;
use crate::template::TemplateSpec;

/// What to do with an input the template does not expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputPolicy {
    /// Drop it, logging at debug level.
    Ignore,
    /// Drop it with a warning.
    Warn,
    /// Record a `CollectError`.
    Reject,
}

/// How a caller settles a collection that has errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordErrorMode {
    /// Any error fails the whole submission.
    FailSubmission,
    /// Records named by an error are dropped; the rest are kept.
    DropRecord,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    pub unknown_fields: InputPolicy,
    /// Only the first value is ever applied; this controls what happens to the rest.
    pub duplicate_values: InputPolicy,
    pub skip_blank_values: bool,
    pub on_error: RecordErrorMode,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            unknown_fields: InputPolicy::Reject,
            duplicate_values: InputPolicy::Warn,
            skip_blank_values: false,
            on_error: RecordErrorMode::FailSubmission,
        }
    }
}

impl CollectorConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, EngineError> {
        toml::from_str(source).map_err(|e| EngineError::Config(e.to_string()))
    }
}

/// Top-level form configuration: collector policies plus any record
/// templates declared in data rather than code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub collector: CollectorConfig,
    pub templates: Vec<TemplateSpec>,
}

impl FormConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, EngineError> {
        toml::from_str(source).map_err(|e| EngineError::Config(e.to_string()))
    }

    pub fn template(&self, record_type: &str) -> Option<&TemplateSpec> {
        self.templates.iter().find(|t| t.record_type == record_type)
    }
}
