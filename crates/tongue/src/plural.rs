//! Plural category resolution.
//!
//! Each language owns one [`PluralRule`] that partitions the non-negative
//! integers into plural categories. Three families are built in with fixed
//! partitions (English-like, Italian-like, Polish); any other language can
//! use [`PluralRule::Cldr`], which defers to the CLDR cardinal rules shipped
//! with `icu_plurals`.
//!
//! CLDR rules are cached per thread per language to avoid re-creating
//! `PluralRules` instances on every call. The cache is initialized lazily
//! on first access within each thread.

use std::cell::RefCell;
use std::fmt::{Display, Formatter, Result as FmtResult};

use icu_locale_core::{Locale as IcuLocale, subtags};
use icu_plurals::{PluralCategory as IcuCategory, PluralRuleType, PluralRules};
use serde::{Deserialize, Serialize};

use crate::locale::Language;

/// A plural category.
///
/// The variant order is the canonical order in which a rule lists its
/// categories and in which plural form lists are assigned.
#[derive(
    Copy, Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PluralCategory {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl PluralCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PluralCategory::Zero => "zero",
            PluralCategory::One => "one",
            PluralCategory::Two => "two",
            PluralCategory::Few => "few",
            PluralCategory::Many => "many",
            PluralCategory::Other => "other",
        }
    }
}

impl Display for PluralCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// A language family's partition of counts into plural categories.
///
/// # Examples
///
/// ```
/// use tongue::{PluralCategory, PluralRule};
///
/// let polish = PluralRule::Polish;
/// assert_eq!(polish.category(Some(1)), PluralCategory::One);
/// assert_eq!(polish.category(Some(22)), PluralCategory::Few);
/// assert_eq!(polish.category(Some(13)), PluralCategory::Many);
///
/// // A request without a count shares the general bucket.
/// assert_eq!(polish.category(None), polish.general());
/// ```
#[derive(Copy, Clone, Debug, Default, Hash, Eq, PartialEq)]
pub enum PluralRule {
    /// `zero` for 0, `one` for 1, `other` otherwise (English, Hebrew, and the default).
    #[default]
    ZeroOneOther,
    /// `one` for 1, `other` otherwise (Italian).
    OneOther,
    /// `one` for 1, `few` when the last digit is 2-4 outside the teens, `many` otherwise.
    Polish,
    /// CLDR cardinal rules for the given language.
    Cldr(Language),
}

impl PluralRule {
    /// Select the category for a count.
    ///
    /// `None` maps to [`PluralRule::general`] so that plain lookups share a
    /// bucket with large counts. Negative counts are out of contract and are
    /// also treated as the general category.
    pub fn category(&self, count: Option<i64>) -> PluralCategory {
        let Some(n) = count.filter(|n| *n >= 0) else {
            return self.general();
        };
        match self {
            PluralRule::ZeroOneOther => match n {
                0 => PluralCategory::Zero,
                1 => PluralCategory::One,
                _ => PluralCategory::Other,
            },
            PluralRule::OneOther => match n {
                1 => PluralCategory::One,
                _ => PluralCategory::Other,
            },
            PluralRule::Polish => {
                let (tens, units) = (n % 100, n % 10);
                if n == 1 {
                    PluralCategory::One
                } else if (2..=4).contains(&units) && !(12..=14).contains(&tens) {
                    PluralCategory::Few
                } else {
                    PluralCategory::Many
                }
            }
            PluralRule::Cldr(language) => with_cldr_rules(*language, |rules| match rules {
                Some(rules) => from_icu(rules.category_for(n)),
                None => PluralRule::ZeroOneOther.category(Some(n)),
            }),
        }
    }

    /// The catch-all category: the target of `None` counts and the
    /// fallback form inside a translation entry.
    pub fn general(&self) -> PluralCategory {
        match self {
            PluralRule::Polish => PluralCategory::Many,
            PluralRule::ZeroOneOther | PluralRule::OneOther | PluralRule::Cldr(_) => {
                PluralCategory::Other
            }
        }
    }

    /// All categories this rule can produce, in canonical order.
    pub fn categories(&self) -> Vec<PluralCategory> {
        match self {
            PluralRule::ZeroOneOther => vec![
                PluralCategory::Zero,
                PluralCategory::One,
                PluralCategory::Other,
            ],
            PluralRule::OneOther => vec![PluralCategory::One, PluralCategory::Other],
            PluralRule::Polish => vec![
                PluralCategory::One,
                PluralCategory::Few,
                PluralCategory::Many,
            ],
            PluralRule::Cldr(language) => with_cldr_rules(*language, |rules| match rules {
                Some(rules) => rules.categories().map(from_icu).collect(),
                None => PluralRule::ZeroOneOther.categories(),
            }),
        }
    }

    /// The categories an ordered list of plural forms is assigned to.
    ///
    /// A zero form is always supplied separately, so `zero` is skipped.
    pub fn form_categories(&self) -> Vec<PluralCategory> {
        self.categories()
            .into_iter()
            .filter(|c| *c != PluralCategory::Zero)
            .collect()
    }

    /// Stable small-integer index of a category under this rule.
    ///
    /// `zero` is always 0; the remaining categories count up from 1 in
    /// canonical order. Returns `None` for categories the rule never produces.
    pub fn index(&self, category: PluralCategory) -> Option<usize> {
        if category == PluralCategory::Zero {
            return Some(0);
        }
        self.form_categories()
            .iter()
            .position(|c| *c == category)
            .map(|i| i + 1)
    }
}

thread_local! {
    /// Per-thread cache of CLDR `PluralRules` keyed by language.
    static CLDR_RULES_CACHE: RefCell<Vec<(subtags::Language, Option<PluralRules>)>> =
        const { RefCell::new(Vec::new()) };
}

/// Run `f` with the CLDR cardinal rules for `language`, building and caching
/// them on first use. `f` receives `None` if no CLDR data exists for it.
fn with_cldr_rules<T>(language: Language, f: impl FnOnce(Option<&PluralRules>) -> T) -> T {
    let subtag = language.subtag();
    CLDR_RULES_CACHE.with_borrow_mut(|cache| {
        if let Some((_, rules)) = cache.iter().find(|(code, _)| *code == subtag) {
            return f(rules.as_ref());
        }
        let rules = build_rules(language);
        let result = f(rules.as_ref());
        cache.push((subtag, rules));
        result
    })
}

/// Build `PluralRules` for a language.
fn build_rules(language: Language) -> Option<PluralRules> {
    let locale = IcuLocale::try_from_str(language.as_str()).ok()?;
    PluralRules::try_new(locale.into(), PluralRuleType::Cardinal.into()).ok()
}

/// Translate an ICU `PluralCategory` into ours.
fn from_icu(category: IcuCategory) -> PluralCategory {
    match category {
        IcuCategory::Zero => PluralCategory::Zero,
        IcuCategory::One => PluralCategory::One,
        IcuCategory::Two => PluralCategory::Two,
        IcuCategory::Few => PluralCategory::Few,
        IcuCategory::Many => PluralCategory::Many,
        IcuCategory::Other => PluralCategory::Other,
    }
}
