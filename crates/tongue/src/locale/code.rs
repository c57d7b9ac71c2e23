//! Language, region, and locale identifiers.

use std::cmp::Ordering;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use icu_locale_core::subtags::{self, language};

use crate::error::InvalidLocaleError;

/// The linguistic component of a locale, e.g. `en`, `pl`, `he`.
///
/// Always a lowercase two-letter code. `Copy`, so it is cheap to embed in
/// cache keys.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub struct Language(subtags::Language);

impl Language {
    /// English, the default active language.
    pub const ENGLISH: Language = Language(language!("en"));

    /// Parse a bare two-letter language code.
    ///
    /// Only the format is checked here; membership in the supported set is
    /// the registry's concern.
    pub fn parse(code: &str) -> Result<Self, InvalidLocaleError> {
        if !is_two_letters(code) {
            return Err(InvalidLocaleError::Malformed {
                code: code.to_string(),
            });
        }
        subtags::Language::try_from_str(&code.to_ascii_lowercase())
            .map(Self)
            .map_err(|_| InvalidLocaleError::Malformed {
                code: code.to_string(),
            })
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub(crate) fn subtag(&self) -> subtags::Language {
        self.0
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl Ord for Language {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for Language {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for Language {
    type Err = InvalidLocaleError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        Self::parse(code)
    }
}

/// The optional country component of a locale, e.g. `US`, `IL`.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub struct Region(subtags::Region);

impl Region {
    /// Parse a two-letter region code.
    pub fn parse(code: &str) -> Result<Self, InvalidLocaleError> {
        if !is_two_letters(code) {
            return Err(InvalidLocaleError::Malformed {
                code: code.to_string(),
            });
        }
        subtags::Region::try_from_str(&code.to_ascii_uppercase())
            .map(Self)
            .map_err(|_| InvalidLocaleError::Malformed {
                code: code.to_string(),
            })
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl Ord for Region {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for Region {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A language plus an optional region.
///
/// Constructing a `Locale` through [`Locale::parse`] only checks the format.
/// A locale that passed [`LocaleRegistry::validate`](super::LocaleRegistry::validate)
/// is also known to be supported.
///
/// # Example
///
/// ```
/// use tongue::Locale;
///
/// let locale = Locale::parse("he-IL").unwrap();
/// assert_eq!(locale.language().as_str(), "he");
/// assert_eq!(locale.region().map(|r| r.to_string()).as_deref(), Some("IL"));
/// assert_eq!(locale.to_string(), "he-IL");
///
/// assert!(Locale::parse("english").is_err());
/// ```
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub struct Locale {
    language: Language,
    region: Option<Region>,
}

impl Locale {
    pub fn new(language: Language, region: Option<Region>) -> Self {
        Self { language, region }
    }

    /// Parse `ll` or `ll-RR`.
    pub fn parse(code: &str) -> Result<Self, InvalidLocaleError> {
        let malformed = || InvalidLocaleError::Malformed {
            code: code.to_string(),
        };
        let (language, region) = match code.split_once('-') {
            Some((language, region)) => (language, Some(region)),
            None => (code, None),
        };
        let language = Language::parse(language).map_err(|_| malformed())?;
        let region = region
            .map(Region::parse)
            .transpose()
            .map_err(|_| malformed())?;
        Ok(Self { language, region })
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn region(&self) -> Option<Region> {
        self.region
    }
}

impl Display for Locale {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.region {
            Some(region) => write!(f, "{}-{}", self.language, region),
            None => write!(f, "{}", self.language),
        }
    }
}

impl FromStr for Locale {
    type Err = InvalidLocaleError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        Self::parse(code)
    }
}

fn is_two_letters(code: &str) -> bool {
    code.len() == 2 && code.bytes().all(|b| b.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_is_lowercased() {
        assert_eq!(Language::parse("PL").unwrap().as_str(), "pl");
    }

    #[test]
    fn region_is_uppercased() {
        assert_eq!(Region::parse("il").unwrap().as_str(), "IL");
    }

    #[test]
    fn locale_rejects_extra_segments() {
        assert!(Locale::parse("en-US-x").is_err());
        assert!(Locale::parse("en-").is_err());
        assert!(Locale::parse("-US").is_err());
        assert!(Locale::parse("eng").is_err());
        assert!(Locale::parse("e1").is_err());
        assert!(Locale::parse("").is_err());
    }

    #[test]
    fn malformed_error_keeps_full_code() {
        let err = Locale::parse("en-USA").unwrap_err();
        assert_eq!(err.code(), "en-USA");
    }
}
