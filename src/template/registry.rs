//! Template registry for storing and retrieving template definitions

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::{info, warn};
use thiserror::Error;

use super::builtin::{builtin_template_names, BuiltinTemplate, TemplateSource};
use super::definition::TemplateDefinition;

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Template not found in registry
    #[error("template not found: '{name}'. Available templates: {}", .available.join(", "))]
    NotFound {
        name: String,
        available: Vec<String>,
    },

    /// Paper size not in the catalog
    #[error("paper size not found: '{name}'. Available sizes: {}", .available.join(", "))]
    PaperSizeNotFound {
        name: String,
        available: Vec<String>,
    },

    /// File not found for file-based template
    #[error("template file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Error reading template file
    #[error("error reading template file {path}: {message}")]
    FileRead { path: PathBuf, message: String },

    /// Template document is not valid TOML or lacks a layout table
    #[error("invalid template definition: {0}")]
    Parse(#[from] toml::de::Error),

    /// Built-in source parsed but its layout table has no styling
    #[error("template definition has an empty layout: {source_name}")]
    EmptyLayout { source_name: String },
}

/// What happened when one built-in was loaded
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The source parsed and was registered
    Loaded(TemplateDefinition),
    /// The source was unusable; the hardcoded fallback was registered instead
    FallbackUsed {
        definition: TemplateDefinition,
        reason: String,
    },
}

impl LoadOutcome {
    pub fn definition(&self) -> &TemplateDefinition {
        match self {
            LoadOutcome::Loaded(def) => def,
            LoadOutcome::FallbackUsed { definition, .. } => definition,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, LoadOutcome::FallbackUsed { .. })
    }
}

/// Result of a bulk load, keyed by registered name in load order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub outcomes: Vec<(String, LoadOutcome)>,
}

impl LoadReport {
    pub fn get(&self, name: &str) -> Option<&LoadOutcome> {
        self.outcomes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, outcome)| outcome)
    }

    /// Names that had to fall back, with the reason
    pub fn fallbacks(&self) -> impl Iterator<Item = (&str, &str)> {
        self.outcomes.iter().filter_map(|(name, outcome)| match outcome {
            LoadOutcome::FallbackUsed { reason, .. } => Some((name.as_str(), reason.as_str())),
            LoadOutcome::Loaded(_) => None,
        })
    }

    pub fn has_fallbacks(&self) -> bool {
        self.fallbacks().next().is_some()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Registry mapping template names to definitions
///
/// Every registration path is last-write-wins.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, TemplateDefinition>,
    /// Where built-in sources are read from
    source: TemplateSource,
}

impl TemplateRegistry {
    /// Create a new empty registry reading built-ins from the embedded sources
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty registry reading built-ins from `source`
    pub fn with_source(source: TemplateSource) -> Self {
        Self {
            templates: HashMap::new(),
            source,
        }
    }

    /// Create a registry with every built-in loaded
    pub fn with_builtins(source: TemplateSource) -> (Self, LoadReport) {
        let mut registry = Self::with_source(source);
        let report = registry.load_all_builtin_templates();
        (registry, report)
    }

    pub fn source(&self) -> &TemplateSource {
        &self.source
    }

    /// Load one built-in and register it under `register_as`
    ///
    /// Never fails: an unreadable or malformed source is replaced by the
    /// built-in's fallback definition.
    pub fn load_builtin_template(
        &mut self,
        builtin: BuiltinTemplate,
        register_as: &str,
    ) -> LoadOutcome {
        let outcome = match self.source.load(builtin) {
            Ok(def) => {
                info!("Loaded template '{}' from {}", register_as, builtin.file_name());
                LoadOutcome::Loaded(def)
            }
            Err(e) => {
                warn!(
                    "Failed to load template '{}' ({}), using fallback: {}",
                    register_as,
                    builtin.file_name(),
                    e
                );
                LoadOutcome::FallbackUsed {
                    definition: builtin.fallback(),
                    reason: e.to_string(),
                }
            }
        };
        self.register(register_as, outcome.definition().clone());
        outcome
    }

    /// Load every built-in under its own name
    ///
    /// Re-invocation re-parses and overwrites the same names.
    pub fn load_all_builtin_templates(&mut self) -> LoadReport {
        let outcomes = BuiltinTemplate::ALL
            .iter()
            .map(|&builtin| {
                let outcome = self.load_builtin_template(builtin, builtin.name());
                (builtin.name().to_string(), outcome)
            })
            .collect();
        LoadReport { outcomes }
    }

    /// Load a template from a TOML file and register it under `name`
    pub fn load_template_file(
        &mut self,
        path: &Path,
        name: &str,
    ) -> Result<&TemplateDefinition, TemplateError> {
        let def = TemplateDefinition::from_file(path)?;
        info!("Loaded template '{}' from {}", name, path.display());
        self.register(name, def);
        Ok(&self.templates[name])
    }

    /// Register a definition, replacing any previous one with the same name
    pub fn register(&mut self, name: impl Into<String>, def: TemplateDefinition) {
        self.templates.insert(name.into(), def);
    }

    /// Get a template by name
    pub fn get(&self, name: &str) -> Option<&TemplateDefinition> {
        self.templates.get(name)
    }

    /// Get a template by name, failing with the list of available names
    pub fn require(&self, name: &str) -> Result<&TemplateDefinition, TemplateError> {
        self.templates
            .get(name)
            .ok_or_else(|| TemplateError::NotFound {
                name: name.to_string(),
                available: self.get_available_templates(),
            })
    }

    /// Check if a template exists
    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Names currently registered, in no particular order
    pub fn get_loaded_template_names(&self) -> Vec<String> {
        self.templates.keys().cloned().collect()
    }

    /// Sorted names currently registered
    pub fn get_available_templates(&self) -> Vec<String> {
        let mut names = self.get_loaded_template_names();
        names.sort();
        names
    }

    /// Names the crate ships fallbacks for
    pub fn get_builtin_template_names(&self) -> Vec<&'static str> {
        builtin_template_names()
    }
}
