//! Supported locale table plus the active locale and base language.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use super::{Language, Locale, Region};
use crate::error::InvalidLocaleError;
use crate::plural::PluralRule;

/// Languages enabled in [`LocaleRegistry::new`].
const DEFAULT_LANGUAGES: &[&str] = &[
    "ar", "cs", "da", "de", "el", "en", "es", "fi", "fr", "he", "hu", "it", "ja", "ko", "nl", "pl",
    "pt", "ro", "ru", "sv", "tr", "uk", "ur", "zh",
];

/// Languages known to [`LocaleRegistry::new`] but refused.
const DEFAULT_DISALLOWED: &[&str] = &["tw"];

/// Regions accepted by [`LocaleRegistry::new`].
const DEFAULT_REGIONS: &[&str] = &[
    "AR", "AT", "AU", "BE", "BR", "CA", "CH", "CN", "CZ", "DE", "DK", "EG", "ES", "FI", "FR", "GB",
    "GR", "HU", "IE", "IL", "IN", "IT", "JP", "KR", "MX", "NL", "PK", "PL", "PT", "RO", "RU", "SA",
    "SE", "TR", "TW", "UA", "US",
];

/// Whether a known language may be selected.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LanguageStatus {
    Enabled,
    Disallowed,
}

#[derive(Copy, Clone, Debug)]
struct LanguageSpec {
    rule: PluralRule,
    status: LanguageStatus,
}

/// Validates locale codes and holds the active locale and base language.
///
/// Every translation request reads the active locale from here. It only
/// changes through [`LocaleRegistry::set_active`], which leaves it untouched
/// when the new code is rejected.
///
/// # Example
///
/// ```
/// use tongue::LocaleRegistry;
///
/// let mut registry = LocaleRegistry::new();
/// registry.set_active("pl-PL").unwrap();
/// assert_eq!(registry.active().to_string(), "pl-PL");
///
/// // Rejected codes leave the active locale unchanged.
/// assert!(registry.set_active("ba").is_err());
/// assert_eq!(registry.active().to_string(), "pl-PL");
/// ```
#[derive(Debug, Clone)]
pub struct LocaleRegistry {
    languages: BTreeMap<Language, LanguageSpec>,
    regions: BTreeSet<Region>,
    active: Locale,
    base_language: Option<Language>,
}

impl Default for LocaleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LocaleRegistry {
    /// Registry with the built-in language and region tables, active locale `en`.
    pub fn new() -> Self {
        let mut registry = Self::empty(Language::ENGLISH);
        for code in DEFAULT_LANGUAGES {
            if let Ok(language) = Language::parse(code) {
                registry = registry.with_language(language, default_rule(language));
            }
        }
        for code in DEFAULT_DISALLOWED {
            if let Ok(language) = Language::parse(code) {
                registry = registry.with_disallowed(language);
            }
        }
        for code in DEFAULT_REGIONS {
            if let Ok(region) = Region::parse(code) {
                registry = registry.with_region(region);
            }
        }
        registry
    }

    /// Registry that supports only `language`, which is also active.
    pub fn empty(language: Language) -> Self {
        let mut languages = BTreeMap::new();
        languages.insert(
            language,
            LanguageSpec {
                rule: default_rule(language),
                status: LanguageStatus::Enabled,
            },
        );
        Self {
            languages,
            regions: BTreeSet::new(),
            active: Locale::new(language, None),
            base_language: None,
        }
    }

    /// Support `language` with the given plural rule.
    pub fn with_language(mut self, language: Language, rule: PluralRule) -> Self {
        self.languages.insert(
            language,
            LanguageSpec {
                rule,
                status: LanguageStatus::Enabled,
            },
        );
        self
    }

    /// Know `language` but refuse to select it.
    pub fn with_disallowed(mut self, language: Language) -> Self {
        self.languages.insert(
            language,
            LanguageSpec {
                rule: default_rule(language),
                status: LanguageStatus::Disallowed,
            },
        );
        self
    }

    /// Accept `region` as a locale's country component.
    pub fn with_region(mut self, region: Region) -> Self {
        self.regions.insert(region);
        self
    }

    /// Check format and membership, returning the parsed locale.
    pub fn validate(&self, code: &str) -> Result<Locale, InvalidLocaleError> {
        let locale = Locale::parse(code)?;
        let language = locale.language();
        match self.languages.get(&language).map(|spec| spec.status) {
            Some(LanguageStatus::Enabled) => {}
            Some(LanguageStatus::Disallowed) => {
                return Err(InvalidLocaleError::DisallowedLanguage {
                    code: code.to_string(),
                    language: language.to_string(),
                });
            }
            None => {
                return Err(InvalidLocaleError::UnknownLanguage {
                    code: code.to_string(),
                    language: language.to_string(),
                });
            }
        }
        if let Some(region) = locale.region() {
            if !self.regions.contains(&region) {
                return Err(InvalidLocaleError::UnknownRegion {
                    code: code.to_string(),
                    region: region.to_string(),
                });
            }
        }
        Ok(locale)
    }

    /// Make `code` the active locale.
    pub fn set_active(&mut self, code: &str) -> Result<Locale, InvalidLocaleError> {
        let locale = self.validate(code)?;
        debug!(from = %self.active, to = %locale, "active locale changed");
        self.active = locale;
        Ok(locale)
    }

    /// The locale every resolution reads.
    pub fn active(&self) -> Locale {
        self.active
    }

    /// The active locale's language.
    pub fn language(&self) -> Language {
        self.active.language()
    }

    /// Set the fallback language for translations absent in the active
    /// language. Accepts a full locale code; only its language is kept.
    /// Last write wins.
    pub fn set_base_language(&mut self, code: &str) -> Result<Language, InvalidLocaleError> {
        let language = self.validate(code)?.language();
        debug!(base = %language, "base language set");
        self.base_language = Some(language);
        Ok(language)
    }

    /// Remove the fallback language.
    pub fn clear_base_language(&mut self) {
        self.base_language = None;
    }

    pub fn base_language(&self) -> Option<Language> {
        self.base_language
    }

    /// The plural rule of `language`, or the default rule if it is unknown.
    pub fn plural_rule(&self, language: Language) -> PluralRule {
        self.languages
            .get(&language)
            .map_or_else(PluralRule::default, |spec| spec.rule)
    }

    /// Whether `language` is known and enabled.
    pub fn supports(&self, language: Language) -> bool {
        self.languages
            .get(&language)
            .is_some_and(|spec| spec.status == LanguageStatus::Enabled)
    }

    /// Enabled languages in code order.
    pub fn languages(&self) -> impl Iterator<Item = Language> + '_ {
        self.languages
            .iter()
            .filter(|(_, spec)| spec.status == LanguageStatus::Enabled)
            .map(|(language, _)| *language)
    }
}

/// The built-in plural rule for a language code.
fn default_rule(language: Language) -> PluralRule {
    match language.as_str() {
        "it" | "es" | "pt" | "de" | "nl" | "sv" | "da" | "fi" | "el" | "hu" | "tr" => {
            PluralRule::OneOther
        }
        "pl" => PluralRule::Polish,
        "ru" | "uk" | "cs" | "ar" | "fr" | "ro" | "ja" | "ko" | "zh" => PluralRule::Cldr(language),
        _ => PluralRule::ZeroOneOther,
    }
}
