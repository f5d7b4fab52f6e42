//! Chart style templates
//!
//! Templates are named bundles of layout defaults (fonts, colors, grid and
//! axis styling) plus per-trace-type overrides. The crate ships three
//! built-ins; each is parsed from a bundled TOML document and replaced by a
//! hardcoded fallback if that document cannot be used, so loading the
//! built-ins never fails. Looking up a name that was never registered does
//! fail, with the list of names that would have worked.
//!
//! # Example
//!
//! ```rust
//! use climatevis::template::{resolve, TemplateRegistry, TemplateSource};
//!
//! let (registry, report) = TemplateRegistry::with_builtins(TemplateSource::Embedded);
//! assert!(!report.has_fallbacks());
//!
//! let config = resolve(&registry, "base", "A4_LANDSCAPE").unwrap();
//! assert_eq!((config.width, config.height), (1123, 794));
//! ```

mod builtin;
mod definition;
mod registry;
mod resolver;

pub use builtin::{builtin_template_names, BuiltinTemplate, TemplateSource};
pub use definition::{AxisStyle, FontStyle, LayoutStyle, LegendStyle, Margin, TemplateDefinition};
pub use registry::{LoadOutcome, LoadReport, TemplateError, TemplateRegistry};
pub use resolver::{resolve, ChartConfig};
