//! Template resolution - turns a template name and paper size into a chart configuration

use std::collections::BTreeMap;

use serde::Serialize;

use super::definition::LayoutStyle;
use super::registry::{TemplateError, TemplateRegistry};
use crate::paper::PaperSize;

/// A ready-to-apply chart configuration
///
/// Each call to [`resolve`] returns a fresh copy; mutating one never affects
/// the registry or other callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    pub template: String,
    pub paper_size: PaperSize,
    pub width: u32,
    pub height: u32,
    pub layout: LayoutStyle,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, Vec<toml::Table>>,
}

impl ChartConfig {
    /// Dimensions to export at, or `None` when the template autosizes
    pub fn export_dimensions(&self) -> Option<(u32, u32)> {
        if self.layout.is_autosize() {
            None
        } else {
            Some((self.width, self.height))
        }
    }

    /// Render as a TOML document
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Resolve a template and paper size from the registry
///
/// Unknown names are errors; there is no fallback at this layer.
pub fn resolve(
    registry: &TemplateRegistry,
    template_name: &str,
    paper_size: &str,
) -> Result<ChartConfig, TemplateError> {
    let def = registry.require(template_name)?;
    let paper = PaperSize::lookup(paper_size)?;
    Ok(resolve_definition(template_name, def.layout.clone(), def.data.clone(), paper))
}

fn resolve_definition(
    template_name: &str,
    mut layout: LayoutStyle,
    data: BTreeMap<String, Vec<toml::Table>>,
    paper: PaperSize,
) -> ChartConfig {
    let (width, height) = paper.dimensions();
    layout.width = Some(width);
    layout.height = Some(height);
    ChartConfig {
        template: template_name.to_string(),
        paper_size: paper,
        width,
        height,
        layout,
        data,
    }
}
