//! Supported-language registry and the validated `Language` type.
//!
//! - `registry`: the curated set of languages both external services accept,
//!   plus the display-name alias table
//! - `language`: registry-validated `Language` values and free-text
//!   resolution

mod language;
mod registry;

pub use language::Language;
pub use registry::{LanguageConfig, LanguageRegistry, DISPLAY_ALIASES};
