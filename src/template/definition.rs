//! Template definitions: typed chart layout plus per-trace style overrides

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::TemplateError;

/// Font settings shared by the chart, titles and axes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FontStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Plot-area margins in pixels
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pad: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegendStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xanchor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yanchor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bgcolor: Option<String>,
}

/// Styling for a single axis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub showgrid: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gridcolor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gridwidth: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linecolor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linewidth: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zeroline: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticks: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mirror: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_font: Option<FontStyle>,
}

/// Global chart layout defaults
///
/// Keys without a typed field are kept in `extra` so that no styling from
/// the source document is dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autosize: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paper_bgcolor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plot_bgcolor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hovermode: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub colorway: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<FontStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_font: Option<FontStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend: Option<LegendStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<AxisStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<AxisStyle>,
    #[serde(flatten)]
    pub extra: toml::Table,
}

impl LayoutStyle {
    /// True when the layout carries no styling at all
    pub fn is_empty(&self) -> bool {
        *self == LayoutStyle::default()
    }

    /// Whether the chart should fill its container instead of a fixed size
    pub fn is_autosize(&self) -> bool {
        self.autosize.unwrap_or(false)
    }

    pub fn font_family(&self) -> Option<&str> {
        self.font.as_ref().and_then(|f| f.family.as_deref())
    }
}

/// A complete template: layout defaults and per-trace-type overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateDefinition {
    pub layout: LayoutStyle,
    /// Trace type (`bar`, `scatter`, `histogram`, ...) -> style overrides
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, Vec<toml::Table>>,
}

impl TemplateDefinition {
    /// Load a definition from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, TemplateError> {
        if !path.exists() {
            return Err(TemplateError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path).map_err(|e| TemplateError::FileRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_str(&content)
    }

    /// Parse a definition from a TOML document
    ///
    /// The document must contain a `[layout]` table.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, TemplateError> {
        Ok(toml::from_str(content)?)
    }

    /// Trace types that have style overrides
    pub fn trace_types(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(|s| s.as_str())
    }

    /// Style overrides for one trace type
    pub fn trace_styles(&self, trace_type: &str) -> &[toml::Table] {
        self.data.get(trace_type).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_layout_and_data() {
        let doc = r##"
[layout]
paper_bgcolor = "white"
autosize = false

[layout.font]
family = "Arial, sans-serif"
size = 12

[[data.bar]]
opacity = 0.5
"##;
        let def = TemplateDefinition::from_str(doc).expect("Should parse");
        assert_eq!(def.layout.paper_bgcolor.as_deref(), Some("white"));
        assert_eq!(def.layout.font_family(), Some("Arial, sans-serif"));
        assert_eq!(def.layout.font.as_ref().and_then(|f| f.size), Some(12.0));
        assert!(!def.layout.is_autosize());
        assert_eq!(def.trace_types().collect::<Vec<_>>(), vec!["bar"]);
        assert_eq!(def.trace_styles("bar").len(), 1);
        assert!(def.trace_styles("scatter").is_empty());
    }

    #[test]
    fn test_unknown_layout_keys_are_kept() {
        let doc = r#"
[layout]
bargap = 0.1
separators = ".,"
"#;
        let def = TemplateDefinition::from_str(doc).expect("Should parse");
        assert_eq!(
            def.layout.extra.get("bargap").and_then(|v| v.as_float()),
            Some(0.1)
        );
        assert!(def.layout.extra.contains_key("separators"));
        assert!(!def.layout.is_empty());
    }

    #[test]
    fn test_missing_layout_is_malformed() {
        let result = TemplateDefinition::from_str("[[data.bar]]\nopacity = 1.0\n");
        assert!(matches!(result, Err(TemplateError::Parse(_))));
    }

    #[test]
    fn test_invalid_toml_error() {
        let result = TemplateDefinition::from_str("layout = {{{{");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file() {
        let result = TemplateDefinition::from_file(Path::new("/nonexistent/template.toml"));
        assert!(matches!(result, Err(TemplateError::FileNotFound { .. })));
    }

    #[test]
    fn test_empty_layout_table() {
        let def = TemplateDefinition::from_str("[layout]\n").expect("Should parse");
        assert!(def.layout.is_empty());
        assert!(def.data.is_empty());
    }
}
