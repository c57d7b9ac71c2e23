//! Process-wide translator for the `global-translator` feature.
//!
//! Provides thread-safe access to a shared [`Translator`], for callers that
//! would rather not thread a translation context through their code. Every
//! translation updates cache statistics, so access is serialized by a mutex.

use std::sync::{LazyLock, Mutex};

use crate::{Args, InvalidLocaleError, Locale, SourceKey, TemplateSyntaxError, Translator};

static GLOBAL_TRANSLATOR: LazyLock<Mutex<Translator>> =
    LazyLock::new(|| Mutex::new(Translator::default()));

/// Provides shared access to the global translator.
pub fn with_translator<T>(f: impl FnOnce(&Translator) -> T) -> T {
    let guard = GLOBAL_TRANSLATOR
        .lock()
        .expect("global translator lock poisoned");
    f(&guard)
}

/// Provides mutable access to the global translator.
pub fn with_translator_mut<T>(f: impl FnOnce(&mut Translator) -> T) -> T {
    let mut guard = GLOBAL_TRANSLATOR
        .lock()
        .expect("global translator lock poisoned");
    f(&mut guard)
}

/// Sets the active locale of the global translator.
pub fn set_active(code: &str) -> Result<Locale, InvalidLocaleError> {
    with_translator_mut(|translator| translator.set_active(code))
}

/// Returns the active locale of the global translator.
pub fn active() -> Locale {
    with_translator(Translator::active)
}

/// Translates through the global translator.
pub fn translate(
    key: impl Into<SourceKey>,
    count: Option<i64>,
    args: impl Into<Args>,
) -> Result<String, TemplateSyntaxError> {
    with_translator_mut(|translator| translator.translate(key, count, args))
}

/// Translates a key without count or arguments through the global translator.
pub fn t(key: impl Into<SourceKey>) -> String {
    with_translator_mut(|translator| translator.t(key))
}
