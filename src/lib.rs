//! ClimateVis - chart styling for weather and climate data
//!
//! This library resolves named style templates and paper sizes into chart
//! configurations, and validates the time series handed to plotting calls.
//!
//! # Example
//!
//! ```rust
//! use climatevis::{ClimateVis, ClimateVisConfig};
//!
//! let vis = ClimateVis::new(ClimateVisConfig::default());
//! let config = vis.resolve("base", "A4_LANDSCAPE").unwrap();
//! assert_eq!(config.width, 1123);
//! assert_eq!(config.layout.font_family(), Some("Arial, sans-serif"));
//! ```

pub mod config;
pub mod error;
pub mod paper;
pub mod shared;
pub mod template;
pub mod validation;
pub mod widgets;

use std::path::Path;
use std::sync::Arc;

pub use config::ClimateVisConfig;
pub use error::{Error, Result};
pub use paper::PaperSize;
pub use shared::SharedRegistry;
pub use template::{
    resolve, ChartConfig, LoadOutcome, LoadReport, TemplateDefinition, TemplateError,
    TemplateRegistry,
};
pub use validation::{SeriesReadError, TimeSeries, ValidationError};
pub use widgets::Dropdown;

/// Entry point for plotting code: owns the template registry
///
/// Construction loads every built-in template and never fails; templates
/// whose bundled source could not be used are listed in
/// [`ClimateVis::load_report`].
#[derive(Debug)]
pub struct ClimateVis {
    registry: SharedRegistry,
    config: ClimateVisConfig,
    load_report: LoadReport,
}

impl Default for ClimateVis {
    fn default() -> Self {
        Self::new(ClimateVisConfig::default())
    }
}

impl ClimateVis {
    pub fn new(config: ClimateVisConfig) -> Self {
        let (registry, load_report) =
            TemplateRegistry::with_builtins(config.template_source.clone());
        Self {
            registry: registry.into(),
            config,
            load_report,
        }
    }

    pub fn config(&self) -> &ClimateVisConfig {
        &self.config
    }

    /// Outcome of the most recent built-in load
    pub fn load_report(&self) -> &LoadReport {
        &self.load_report
    }

    pub fn registry(&self) -> Arc<TemplateRegistry> {
        self.registry.snapshot()
    }

    /// Resolve a template and paper size into a fresh chart configuration
    pub fn resolve(&self, template_name: &str, paper_size: &str) -> Result<ChartConfig> {
        Ok(self.registry.resolve(template_name, paper_size)?)
    }

    /// Resolve the configured default template and paper size
    pub fn resolve_default(&self) -> Result<ChartConfig> {
        self.resolve(
            &self.config.default_template,
            self.config.default_paper_size.name(),
        )
    }

    pub fn get_available_templates(&self) -> Vec<String> {
        self.registry.get_available_templates()
    }

    pub fn get_builtin_template_names(&self) -> Vec<&'static str> {
        template::builtin_template_names()
    }

    pub fn get_loaded_template_names(&self) -> Vec<String> {
        self.registry.snapshot().get_loaded_template_names()
    }

    /// Reload every built-in, keeping runtime-registered templates
    pub fn load_all_builtin_templates(&mut self) -> &LoadReport {
        self.load_report = self.registry.reload_builtins();
        &self.load_report
    }

    pub fn load_template_file(&self, path: &Path, name: &str) -> Result<()> {
        Ok(self.registry.load_template_file(path, name)?)
    }

    pub fn register_template(&self, name: impl Into<String>, def: TemplateDefinition) {
        self.registry.register(name, def);
    }

    /// Validate the inputs of a plotting call
    pub fn validate_plot(
        &self,
        series: &[TimeSeries],
        template_name: &str,
        paper_size: &str,
        function: &str,
        require_attributes: bool,
    ) -> Result<PaperSize> {
        Ok(validation::validate_plot_parameters(
            series,
            &self.registry.snapshot(),
            template_name,
            paper_size,
            function,
            require_attributes,
        )?)
    }

    pub fn template_dropdown(&self, value: &str, label: &str) -> Dropdown {
        widgets::template_dropdown(&self.registry.snapshot(), value, label)
    }

    pub fn paper_size_dropdown(&self, value: &str, label: &str) -> Dropdown {
        widgets::paper_size_dropdown(value, label)
    }
}
