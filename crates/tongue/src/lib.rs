pub mod cache;
pub mod error;
#[cfg(feature = "global-translator")]
pub mod global;
pub mod locale;
pub mod plural;
pub mod repository;
pub mod template;
pub mod translator;
pub mod types;

pub use cache::{
    CacheKey, CacheMonitor, CacheStats, CachedTemplate, DEFAULT_MAX_SIZE_BYTES, TemplateOrigin,
    TranslationCache,
};
pub use error::{InvalidLocaleError, TemplateSyntaxError, compute_suggestions};
pub use locale::{Language, LanguageStatus, Locale, LocaleRegistry, Region};
pub use plural::{PluralCategory, PluralRule};
pub use repository::{Forms, MemoryRepository, TranslationEntry, TranslationRepository};
pub use translator::{Translator, TranslatorConfig};
pub use types::{Args, SourceKey, Value};

/// Creates a `HashMap<String, Value>` from key-value pairs, for `%{name}`
/// placeholders.
///
/// Values are automatically converted via `Into<Value>`, so you can pass
/// integers, floats, or strings directly. Convert the map into [`Args`]
/// with `.into()`.
///
/// # Example
///
/// ```
/// use tongue::{params, Value};
///
/// let p = params! { "arg1" => 3, "arg2" => "Alice" };
/// assert_eq!(p.len(), 2);
/// assert_eq!(p["arg1"].as_number(), Some(3));
/// assert_eq!(p["arg2"].as_string(), Some("Alice"));
/// ```
#[macro_export]
macro_rules! params {
    {} => {
        ::std::collections::HashMap::<String, $crate::Value>::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = ::std::collections::HashMap::<String, $crate::Value>::new();
            $(
                map.insert($key.to_string(), ::std::convert::Into::<$crate::Value>::into($value));
            )+
            map
        }
    };
}

/// Creates an [`Args::Sequence`] from positional values.
///
/// # Example
///
/// ```
/// use tongue::{Args, Value, args};
///
/// let a = args!["Nicola", 3];
/// assert_eq!(
///     a,
///     Args::Sequence(vec![Value::String("Nicola".to_string()), Value::Number(3)])
/// );
/// ```
#[macro_export]
macro_rules! args {
    [] => {
        $crate::Args::Sequence(::std::vec::Vec::new())
    };
    [ $($value:expr),+ $(,)? ] => {
        $crate::Args::Sequence(::std::vec![
            $(::std::convert::Into::<$crate::Value>::into($value)),+
        ])
    };
}
