//! Locale identifiers and the registry of supported locales.

mod code;
mod registry;

pub use code::{Language, Locale, Region};
pub use registry::{LanguageStatus, LocaleRegistry};
