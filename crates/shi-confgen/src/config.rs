//! Generator configuration

use crate::eligibility::{DEFAULT_MARKER, MarkerFilter};
use crate::error::GenerateError;
use crate::layout::OutputLayout;
use crate::unit::DEFAULT_COPYRIGHT;
use serde::{Deserialize, Serialize};

/// What a run does when a configuration class has an immutable public field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Abort the whole run at the first violation. Outputs written for
    /// earlier inputs stay on disk.
    #[default]
    FailFast,

    /// Skip the offending file, keep going, and fail at the end listing
    /// every violation.
    PerFile,
}

/// Settings for a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Qualified name of the base that marks configuration classes
    pub marker_base: String,

    /// Accept the doubly prefixed marker spelling
    pub accept_legacy_marker: bool,

    pub layout: OutputLayout,

    /// Notice lines for the banner comment; empty omits the comment
    pub copyright: Vec<String>,

    pub failure_policy: FailurePolicy,

    /// Generate everything but write nothing
    #[serde(skip)]
    pub dry_run: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            marker_base: DEFAULT_MARKER.to_string(),
            accept_legacy_marker: false,
            layout: OutputLayout::default(),
            copyright: DEFAULT_COPYRIGHT.iter().map(|line| line.to_string()).collect(),
            failure_policy: FailurePolicy::default(),
            dry_run: false,
        }
    }
}

impl GeneratorConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// The eligibility filter these settings describe.
    pub fn marker_filter(&self) -> MarkerFilter {
        MarkerFilter::new(&self.marker_base).with_legacy_spelling(self.accept_legacy_marker)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), GenerateError> {
        let marker = self.marker_base.trim_start_matches("::");
        if marker.is_empty() {
            return Err(GenerateError::Config("marker base cannot be empty".to_string()));
        }
        if marker.split("::").any(|segment| segment.trim().is_empty()) {
            return Err(GenerateError::Config(format!(
                "marker base `{}` has an empty namespace segment",
                self.marker_base
            )));
        }

        let layout = &self.layout;
        if layout.source_segment.is_empty() || layout.generated_segment.is_empty() {
            return Err(GenerateError::Config(
                "layout segments cannot be empty".to_string(),
            ));
        }
        if layout.source_segment.contains(['/', '\\'])
            || layout.generated_segment.contains(['/', '\\'])
        {
            return Err(GenerateError::Config(
                "layout segments must be single directory names".to_string(),
            ));
        }
        if !layout.suffix.contains('.') {
            return Err(GenerateError::Config(format!(
                "output suffix `{}` has no file extension",
                layout.suffix
            )));
        }
        if layout.header_extension.is_empty() || layout.header_extension.starts_with('.') {
            return Err(GenerateError::Config(format!(
                "header extension `{}` must be given without a leading dot",
                layout.header_extension
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "config/config_tests.rs"]
mod config_tests;
