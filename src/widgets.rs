//! Option models for template and paper-size pickers

use crate::paper::PaperSize;
use crate::template::{builtin_template_names, TemplateRegistry};

/// Paper sizes offered in pickers
pub const PICKER_PAPER_SIZES: [PaperSize; 8] = [
    PaperSize::A4Landscape,
    PaperSize::A4Portrait,
    PaperSize::A5Landscape,
    PaperSize::A5Portrait,
    PaperSize::A3Landscape,
    PaperSize::A3Portrait,
    PaperSize::A6Landscape,
    PaperSize::A6Portrait,
];

/// A single-choice dropdown: options, current value and label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dropdown {
    pub options: Vec<String>,
    pub value: Option<String>,
    pub label: String,
}

impl Dropdown {
    /// Build a dropdown, selecting the first option if `value` is not one
    pub fn new(options: Vec<String>, value: &str, label: impl Into<String>) -> Self {
        let value = if options.iter().any(|o| o == value) {
            Some(value.to_string())
        } else {
            options.first().cloned()
        };
        Self {
            options,
            value,
            label: label.into(),
        }
    }

    pub fn select(&mut self, value: &str) -> bool {
        if self.options.iter().any(|o| o == value) {
            self.value = Some(value.to_string());
            true
        } else {
            false
        }
    }
}

/// Template names for a picker; the built-in names if nothing is loaded
pub fn template_options(registry: &TemplateRegistry) -> Vec<String> {
    let available = registry.get_available_templates();
    if available.is_empty() {
        return builtin_template_names().into_iter().map(String::from).collect();
    }
    available
}

pub fn paper_size_options() -> Vec<String> {
    PICKER_PAPER_SIZES.iter().map(|p| p.name().to_string()).collect()
}

pub fn template_dropdown(registry: &TemplateRegistry, value: &str, label: &str) -> Dropdown {
    Dropdown::new(template_options(registry), value, label)
}

pub fn paper_size_dropdown(value: &str, label: &str) -> Dropdown {
    Dropdown::new(paper_size_options(), value, label)
}
