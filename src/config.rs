//! Configuration for the chart facade

use std::path::PathBuf;

use crate::paper::PaperSize;
use crate::template::TemplateSource;

/// Configuration options for [`crate::ClimateVis`]
#[derive(Debug, Clone)]
pub struct ClimateVisConfig {
    /// Where built-in template sources are read from
    pub template_source: TemplateSource,

    /// Template used when a caller does not name one
    pub default_template: String,

    /// Paper size used when a caller does not name one
    pub default_paper_size: PaperSize,
}

impl Default for ClimateVisConfig {
    fn default() -> Self {
        Self {
            template_source: TemplateSource::Embedded,
            default_template: "base".to_string(),
            default_paper_size: PaperSize::A4Landscape,
        }
    }
}

impl ClimateVisConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Read built-in templates from a directory instead of the embedded copies
    pub fn with_template_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.template_source = TemplateSource::Directory(dir.into());
        self
    }

    pub fn with_default_template(mut self, name: impl Into<String>) -> Self {
        self.default_template = name.into();
        self
    }

    pub fn with_default_paper_size(mut self, paper: PaperSize) -> Self {
        self.default_paper_size = paper;
        self
    }
}
