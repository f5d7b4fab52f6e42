//! Built-in templates shipped with the crate
//!
//! Each built-in has a bundled TOML source and a hardcoded fallback that is
//! used whenever the source cannot be read or parsed.

use std::fmt;
use std::path::PathBuf;

use super::definition::{AxisStyle, FontStyle, LayoutStyle, Margin, TemplateDefinition};
use super::TemplateError;

const BASE_SOURCE: &str = include_str!("../../templates/plotly_template_base.toml");
const BASE_AUTOSIZE_SOURCE: &str =
    include_str!("../../templates/plotly_template_base_autosize.toml");
const TEST_SOURCE: &str = include_str!("../../templates/plotly_template_test.toml");

/// A template the crate ships with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinTemplate {
    Base,
    BaseAutosize,
    Test,
}

impl BuiltinTemplate {
    pub const ALL: [BuiltinTemplate; 3] = [
        BuiltinTemplate::Base,
        BuiltinTemplate::BaseAutosize,
        BuiltinTemplate::Test,
    ];

    /// Registry name
    pub fn name(self) -> &'static str {
        match self {
            BuiltinTemplate::Base => "base",
            BuiltinTemplate::BaseAutosize => "base_autosize",
            BuiltinTemplate::Test => "test",
        }
    }

    /// File name of the bundled source
    pub fn file_name(self) -> &'static str {
        match self {
            BuiltinTemplate::Base => "plotly_template_base.toml",
            BuiltinTemplate::BaseAutosize => "plotly_template_base_autosize.toml",
            BuiltinTemplate::Test => "plotly_template_test.toml",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|b| b.name() == name)
    }

    fn embedded_source(self) -> &'static str {
        match self {
            BuiltinTemplate::Base => BASE_SOURCE,
            BuiltinTemplate::BaseAutosize => BASE_AUTOSIZE_SOURCE,
            BuiltinTemplate::Test => TEST_SOURCE,
        }
    }

    /// Minimal definition used when the bundled source is unusable
    pub fn fallback(self) -> TemplateDefinition {
        let mut layout = LayoutStyle {
            autosize: Some(false),
            paper_bgcolor: Some("white".to_string()),
            plot_bgcolor: Some("white".to_string()),
            font: Some(FontStyle {
                family: Some("Arial, sans-serif".to_string()),
                size: Some(12.0),
                color: Some("#333333".to_string()),
            }),
            margin: Some(Margin {
                l: Some(60),
                r: Some(30),
                t: Some(60),
                b: Some(60),
                pad: None,
            }),
            xaxis: Some(fallback_axis()),
            yaxis: Some(fallback_axis()),
            ..LayoutStyle::default()
        };

        match self {
            BuiltinTemplate::Base => {}
            BuiltinTemplate::BaseAutosize => layout.autosize = Some(true),
            BuiltinTemplate::Test => {
                layout.font = Some(FontStyle {
                    family: Some("Courier New, monospace".to_string()),
                    size: Some(14.0),
                    color: Some("#000000".to_string()),
                });
            }
        }

        TemplateDefinition {
            layout,
            data: Default::default(),
        }
    }
}

impl fmt::Display for BuiltinTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn fallback_axis() -> AxisStyle {
    AxisStyle {
        showgrid: Some(true),
        gridcolor: Some("#e5e5e5".to_string()),
        zeroline: Some(false),
        ..AxisStyle::default()
    }
}

/// Names of every built-in template, independent of what is loaded
pub fn builtin_template_names() -> Vec<&'static str> {
    BuiltinTemplate::ALL.iter().map(|b| b.name()).collect()
}

/// Where built-in sources are read from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TemplateSource {
    /// Sources compiled into the binary
    #[default]
    Embedded,
    /// `<dir>/<file_name>` for each built-in
    Directory(PathBuf),
}

impl TemplateSource {
    /// Read and parse one built-in from this source
    ///
    /// A source whose `[layout]` table carries no styling is rejected.
    pub fn load(&self, builtin: BuiltinTemplate) -> Result<TemplateDefinition, TemplateError> {
        let def = match self {
            TemplateSource::Embedded => TemplateDefinition::from_str(builtin.embedded_source())?,
            TemplateSource::Directory(dir) => {
                TemplateDefinition::from_file(&dir.join(builtin.file_name()))?
            }
        };
        if def.layout.is_empty() {
            return Err(TemplateError::EmptyLayout {
                source_name: builtin.file_name().to_string(),
            });
        }
        Ok(def)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_names() {
        assert_eq!(builtin_template_names(), vec!["base", "base_autosize", "test"]);
    }

    #[test]
    fn test_from_name_round_trip() {
        for builtin in BuiltinTemplate::ALL {
            assert_eq!(BuiltinTemplate::from_name(builtin.name()), Some(builtin));
        }
        assert_eq!(BuiltinTemplate::from_name("plotly_dark"), None);
    }

    #[test]
    fn test_embedded_sources_parse() {
        for builtin in BuiltinTemplate::ALL {
            let def = TemplateSource::Embedded
                .load(builtin)
                .unwrap_or_else(|e| panic!("{} should parse: {}", builtin, e));
            assert!(!def.layout.is_empty());
        }
    }

    #[test]
    fn test_embedded_base_matches_documented_styling() {
        let def = TemplateSource::Embedded
            .load(BuiltinTemplate::Base)
            .expect("Should parse");
        assert_eq!(def.layout.font_family(), Some("Arial, sans-serif"));
        assert_eq!(def.layout.paper_bgcolor.as_deref(), Some("white"));
        assert_eq!(def.layout.plot_bgcolor.as_deref(), Some("white"));
        assert!(def.trace_types().any(|t| t == "histogram"));
    }

    #[test]
    fn test_autosize_only_on_autosize_template() {
        let base = TemplateSource::Embedded.load(BuiltinTemplate::Base).unwrap();
        let auto = TemplateSource::Embedded
            .load(BuiltinTemplate::BaseAutosize)
            .unwrap();
        assert!(!base.layout.is_autosize());
        assert!(auto.layout.is_autosize());
    }

    #[test]
    fn test_fallbacks_are_non_empty() {
        for builtin in BuiltinTemplate::ALL {
            let def = builtin.fallback();
            assert!(!def.layout.is_empty());
            assert!(def.layout.font_family().is_some());
        }
        assert!(BuiltinTemplate::BaseAutosize.fallback().layout.is_autosize());
    }

    #[test]
    fn test_directory_source_rejects_empty_layout() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join(BuiltinTemplate::Base.file_name()), "[layout]\n").unwrap();
        let source = TemplateSource::Directory(dir.path().to_path_buf());
        let result = source.load(BuiltinTemplate::Base);
        assert!(matches!(result, Err(TemplateError::EmptyLayout { .. })));
    }

    #[test]
    fn test_directory_source_missing_file() {
        let source = TemplateSource::Directory(PathBuf::from("/nonexistent/templates"));
        let result = source.load(BuiltinTemplate::Base);
        assert!(matches!(result, Err(TemplateError::FileNotFound { .. })));
    }
}
