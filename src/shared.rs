//! Thread-safe registry handle
//!
//! Readers take a snapshot `Arc` and never block a reload for longer than the
//! pointer swap. Writers are serialized by a separate mutex; each one builds a
//! complete new registry off to the side, without holding the read/write lock,
//! and then replaces the old one.

use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use log::info;

use crate::template::{
    resolve, ChartConfig, LoadReport, TemplateDefinition, TemplateError, TemplateRegistry,
};

#[derive(Debug)]
pub struct SharedRegistry {
    current: RwLock<Arc<TemplateRegistry>>,
    writer: Mutex<()>,
}

impl SharedRegistry {
    pub fn new(registry: TemplateRegistry) -> Self {
        Self {
            current: RwLock::new(Arc::new(registry)),
            writer: Mutex::new(()),
        }
    }

    /// The registry as of now; later reloads do not affect it
    pub fn snapshot(&self) -> Arc<TemplateRegistry> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    pub fn resolve(&self, template_name: &str, paper_size: &str) -> Result<ChartConfig, TemplateError> {
        resolve(&self.snapshot(), template_name, paper_size)
    }

    pub fn get_available_templates(&self) -> Vec<String> {
        self.snapshot().get_available_templates()
    }

    /// Re-run the built-in load on a copy and swap it in
    ///
    /// Runtime-registered templates survive; built-in names are overwritten.
    pub fn reload_builtins(&self) -> LoadReport {
        self.update(|registry| registry.load_all_builtin_templates())
    }

    /// Register a definition, last-write-wins
    pub fn register(&self, name: impl Into<String>, def: TemplateDefinition) {
        let name = name.into();
        self.update(|registry| registry.register(name, def));
    }

    /// Parse a TOML template file and register it under `name`
    pub fn load_template_file(&self, path: &Path, name: &str) -> Result<(), TemplateError> {
        let def = TemplateDefinition::from_file(path)?;
        info!("Loaded template '{}' from {}", name, path.display());
        self.register(name, def);
        Ok(())
    }

    fn update<R>(&self, f: impl FnOnce(&mut TemplateRegistry) -> R) -> R {
        let _writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let mut next = TemplateRegistry::clone(&self.snapshot());
        let result = f(&mut next);
        let len = next.len();
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(next);
        info!("Swapped template registry ({} templates)", len);
        result
    }
}

impl From<TemplateRegistry> for SharedRegistry {
    fn from(registry: TemplateRegistry) -> Self {
        Self::new(registry)
    }
}
