//! The resolver: plural selection, repository lookup with fallback, caching,
//! and substitution for one translation context.

use bon::{Builder, bon};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::cache::{CacheKey, CachedTemplate, DEFAULT_MAX_SIZE_BYTES, TemplateOrigin, TranslationCache};
use crate::error::{InvalidLocaleError, TemplateSyntaxError};
use crate::locale::{Language, Locale, LocaleRegistry};
use crate::plural::{PluralCategory, PluralRule};
use crate::repository::{Forms, MemoryRepository, TranslationEntry, TranslationRepository};
use crate::template::substitute;
use crate::types::{Args, SourceKey};

/// Settings for constructing a [`Translator`].
///
/// # Example
///
/// ```
/// use tongue::TranslatorConfig;
///
/// let config = TranslatorConfig::builder()
///     .locale("he-IL")
///     .base_language("en-US")
///     .max_cache_size_bytes(4096)
///     .build();
/// assert_eq!(config.locale, "he-IL");
/// assert_eq!(TranslatorConfig::default().locale, "en");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Initial active locale code.
    #[builder(into, default = "en".to_string())]
    pub locale: String,

    /// Fallback language code, if any.
    #[builder(into)]
    pub base_language: Option<String>,

    /// Cache budget in bytes.
    #[builder(default = DEFAULT_MAX_SIZE_BYTES)]
    pub max_cache_size_bytes: usize,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        TranslatorConfig::builder().build()
    }
}

/// A translation context: active locale, repository, and cache.
///
/// Resolution runs per request as
/// 1. compute the plural category from the active language's rule and count
/// 2. return the cached template for (key, language, category) if present
/// 3. otherwise look the key up in the active language, then the base
///    language, then fall back to the key's literal text and record a miss
/// 4. cache the chosen template
/// 5. substitute the count and arguments
///
/// Only [`TemplateSyntaxError`] is surfaced from a translation; a missing
/// translation is never an error.
///
/// # Example
///
/// ```
/// use tongue::{Forms, Translator, MemoryRepository};
///
/// let mut translator = Translator::builder()
///     .repository(MemoryRepository::new())
///     .locale("pl-PL")
///     .build()
///     .unwrap();
///
/// translator
///     .set_translation("%d file", None, Forms::plural(["%d plik", "%d pliki", "%d plików"]))
///     .unwrap();
///
/// assert_eq!(translator.t_count("%d file", 3).unwrap(), "3 pliki");
/// assert_eq!(translator.t_count("%d file", 13).unwrap(), "13 plików");
/// ```
#[derive(Debug)]
pub struct Translator<R = MemoryRepository> {
    locales: LocaleRegistry,
    repository: R,
    cache: TranslationCache,
}

impl<R: TranslationRepository + Default> Default for Translator<R> {
    fn default() -> Self {
        Self {
            locales: LocaleRegistry::new(),
            repository: R::default(),
            cache: TranslationCache::default(),
        }
    }
}

#[bon]
impl<R: TranslationRepository> Translator<R> {
    /// Build a translator, validating the locale codes against `registry`
    /// (the built-in tables by default).
    #[builder]
    pub fn new(
        repository: R,
        #[builder(default)] registry: LocaleRegistry,
        #[builder(into)] locale: Option<String>,
        #[builder(into)] base_language: Option<String>,
        #[builder(default = DEFAULT_MAX_SIZE_BYTES)] max_cache_size_bytes: usize,
    ) -> Result<Self, InvalidLocaleError> {
        let mut locales = registry;
        if let Some(code) = locale {
            locales.set_active(&code)?;
        }
        if let Some(code) = base_language {
            locales.set_base_language(&code)?;
        }
        Ok(Self {
            locales,
            repository,
            cache: TranslationCache::new(max_cache_size_bytes),
        })
    }

    /// Build a translator from deserialized settings.
    pub fn from_config(
        config: TranslatorConfig,
        registry: LocaleRegistry,
        repository: R,
    ) -> Result<Self, InvalidLocaleError> {
        Self::builder()
            .repository(repository)
            .registry(registry)
            .locale(config.locale)
            .maybe_base_language(config.base_language)
            .max_cache_size_bytes(config.max_cache_size_bytes)
            .build()
    }

    // =========================================================================
    // Locale Management
    // =========================================================================

    /// Change the active locale. On error the active locale is unchanged.
    pub fn set_active(&mut self, code: &str) -> Result<Locale, InvalidLocaleError> {
        self.locales.set_active(code)
    }

    pub fn active(&self) -> Locale {
        self.locales.active()
    }

    /// Set the language consulted when the active language has no entry.
    pub fn set_base_language(&mut self, code: &str) -> Result<Language, InvalidLocaleError> {
        self.locales.set_base_language(code)
    }

    pub fn locales(&self) -> &LocaleRegistry {
        &self.locales
    }

    // =========================================================================
    // Collaborators
    // =========================================================================

    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    /// Mutable cache access for budget, monitor, and reset.
    pub fn cache_mut(&mut self) -> &mut TranslationCache {
        &mut self.cache
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Direct repository access. Writes made here bypass cache
    /// invalidation; use [`Translator::set_translation`] instead.
    pub fn repository_mut(&mut self) -> &mut R {
        &mut self.repository
    }

    // =========================================================================
    // Translation
    // =========================================================================

    /// Translate `key` for the active locale.
    pub fn translate(
        &mut self,
        key: impl Into<SourceKey>,
        count: Option<i64>,
        args: impl Into<Args>,
    ) -> Result<String, TemplateSyntaxError> {
        let key = key.into();
        let template = self.resolve(&key, count, None);
        substitute(&template, count, &args.into())
    }

    /// Like [`Translator::translate`], but an untranslated key renders
    /// `default` instead of its own text.
    pub fn translate_or(
        &mut self,
        key: impl Into<SourceKey>,
        default: &str,
        count: Option<i64>,
        args: impl Into<Args>,
    ) -> Result<String, TemplateSyntaxError> {
        let key = key.into();
        let template = self.resolve(&key, count, Some(default));
        substitute(&template, count, &args.into())
    }

    /// Translate without count or arguments. The template is returned
    /// verbatim, so this cannot fail.
    pub fn t(&mut self, key: impl Into<SourceKey>) -> String {
        self.resolve(&key.into(), None, None)
    }

    /// Translate with a count and no other arguments.
    pub fn t_count(
        &mut self,
        key: impl Into<SourceKey>,
        count: i64,
    ) -> Result<String, TemplateSyntaxError> {
        self.translate(key, Some(count), Args::None)
    }

    /// Find the template for a request, through the cache.
    ///
    /// The cache always holds the key's literal text for a miss; `default`
    /// replaces it on the way out so callers never see each other's defaults.
    fn resolve(&mut self, key: &SourceKey, count: Option<i64>, default: Option<&str>) -> String {
        let language = self.locales.language();
        let rule = self.locales.plural_rule(language);
        let category = rule.category(count);
        let cache_key = CacheKey::new(key, language, category);

        let template = match self.cache.get(&cache_key) {
            Some(template) => template.clone(),
            None => {
                let template = self.lookup(key, language, rule, category);
                self.cache.put(cache_key, template.clone());
                template
            }
        };

        match (template.origin, default) {
            (TemplateOrigin::Fallback, Some(default)) => default.to_string(),
            _ => template.text,
        }
    }

    /// Repository lookup with base-language and literal fallbacks.
    ///
    /// Both languages are asked for the form at the active `category`, so
    /// every count that shares a cache entry also shares its template.
    fn lookup(
        &mut self,
        key: &SourceKey,
        language: Language,
        rule: PluralRule,
        category: PluralCategory,
    ) -> CachedTemplate {
        if let Some(text) = self
            .repository
            .lookup(key, language)
            .and_then(|entry| entry.select(category, rule.general()).map(str::to_string))
        {
            return CachedTemplate::new(text, TemplateOrigin::Active);
        }

        if let Some(base) = self.locales.base_language().filter(|b| *b != language) {
            let base_general = self.locales.plural_rule(base).general();
            if let Some(text) = self
                .repository
                .lookup(key, base)
                .and_then(|entry| entry.select(category, base_general).map(str::to_string))
            {
                trace!(key = %key, %language, %base, "resolved through base language");
                return CachedTemplate::new(text, TemplateOrigin::Base);
            }
        }

        self.repository.record_miss(key, language);
        CachedTemplate::new(key.as_str(), TemplateOrigin::Fallback)
    }

    // =========================================================================
    // Administration
    // =========================================================================

    /// Store `forms` for `key` in `language` (the active language when
    /// `None`) and drop every cached template that depended on it.
    pub fn set_translation(
        &mut self,
        key: impl Into<SourceKey>,
        language: Option<Language>,
        forms: impl Into<Forms>,
    ) -> Result<(), InvalidLocaleError> {
        let key = key.into();
        let language = self.target_language(language)?;
        let entry = forms.into().into_entry(self.locales.plural_rule(language));
        self.store(&key, language, entry);
        Ok(())
    }

    /// Replace the form of a single plural category, keeping the others.
    pub fn set_pluralized_translation(
        &mut self,
        key: impl Into<SourceKey>,
        language: Option<Language>,
        category: PluralCategory,
        form: impl Into<String>,
    ) -> Result<(), InvalidLocaleError> {
        let key = key.into();
        let language = self.target_language(language)?;
        let mut entry = self
            .repository
            .lookup(&key, language)
            .unwrap_or_default();
        entry.set_form(category, form);
        self.store(&key, language, entry);
        Ok(())
    }

    fn target_language(&self, language: Option<Language>) -> Result<Language, InvalidLocaleError> {
        let language = language.unwrap_or_else(|| self.locales.language());
        if self.locales.supports(language) {
            Ok(language)
        } else {
            Err(InvalidLocaleError::UnknownLanguage {
                code: language.to_string(),
                language: language.to_string(),
            })
        }
    }

    fn store(&mut self, key: &SourceKey, language: Language, entry: TranslationEntry) {
        debug!(key = %key, %language, "translation updated");
        self.repository.set_translation(key, language, entry);
        self.cache.invalidate_source(key, language);
        if self.locales.base_language() == Some(language) {
            self.cache.invalidate_fallbacks(key);
        }
    }
}
