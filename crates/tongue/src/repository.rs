//! Stored translations and the repository boundary.
//!
//! The resolver only talks to a [`TranslationRepository`]; how rows are
//! persisted is up to the implementation. [`MemoryRepository`] keeps
//! everything in process and is what tests and embedders without a
//! database use.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::locale::Language;
use crate::plural::{PluralCategory, PluralRule};
use crate::types::SourceKey;

/// The stored forms of one (source key, language) pair.
///
/// Forms are a sparse mapping from plural category to text. Selecting a form
/// falls back from the requested category to the rule's general category,
/// then to the last stored form in canonical order.
///
/// # Example
///
/// ```
/// use tongue::{PluralCategory, PluralRule, TranslationEntry};
///
/// let entry = TranslationEntry::plural(
///     PluralRule::ZeroOneOther,
///     ["One item in your cart", "%d items in your cart"],
/// );
/// // No zero form stored: zero falls back to the general form.
/// assert_eq!(
///     entry.select(PluralCategory::Zero, PluralCategory::Other),
///     Some("%d items in your cart")
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationEntry {
    forms: BTreeMap<PluralCategory, String>,
}

impl TranslationEntry {
    /// A translation with no plural variation.
    pub fn single(text: impl Into<String>) -> Self {
        Self::default().with_form(PluralCategory::Other, text)
    }

    /// Assign ordered plural forms to `rule`'s non-zero categories.
    ///
    /// Forms beyond the rule's category count are ignored.
    pub fn plural<I, S>(rule: PluralRule, forms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let forms = rule
            .form_categories()
            .into_iter()
            .zip(forms)
            .map(|(category, text)| (category, text.into()))
            .collect();
        Self { forms }
    }

    /// Set the form for one category.
    pub fn with_form(mut self, category: PluralCategory, text: impl Into<String>) -> Self {
        self.forms.insert(category, text.into());
        self
    }

    /// Set the explicit zero form.
    pub fn with_zero(self, text: impl Into<String>) -> Self {
        self.with_form(PluralCategory::Zero, text)
    }

    /// Replace one category's form in place.
    pub fn set_form(&mut self, category: PluralCategory, text: impl Into<String>) {
        self.forms.insert(category, text.into());
    }

    /// Pick the form for `category`, falling back to `general` and then to
    /// the last stored form. `None` only for an entry with no forms.
    pub fn select(&self, category: PluralCategory, general: PluralCategory) -> Option<&str> {
        self.forms
            .get(&category)
            .or_else(|| self.forms.get(&general))
            .or_else(|| self.forms.values().next_back())
            .map(String::as_str)
    }

    pub fn form(&self, category: PluralCategory) -> Option<&str> {
        self.forms.get(&category).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    /// Stored forms in canonical category order.
    pub fn forms(&self) -> impl Iterator<Item = (PluralCategory, &str)> {
        self.forms.iter().map(|(c, t)| (*c, t.as_str()))
    }
}

/// Administrative input for a translation write, independent of language.
///
/// `Forms` is turned into a [`TranslationEntry`] once the target language's
/// plural rule is known.
///
/// # Example
///
/// ```
/// use tongue::{Forms, PluralCategory, PluralRule};
///
/// let forms = Forms::plural(["One item in your cart", "%d items in your cart"])
///     .with_zero("Your cart is empty");
/// let entry = forms.into_entry(PluralRule::ZeroOneOther);
/// assert_eq!(entry.form(PluralCategory::Zero), Some("Your cart is empty"));
/// assert_eq!(entry.form(PluralCategory::One), Some("One item in your cart"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forms {
    forms: Vec<String>,
    zero: Option<String>,
}

impl Forms {
    /// One text used for every count.
    pub fn single(text: impl Into<String>) -> Self {
        Self {
            forms: vec![text.into()],
            zero: None,
        }
    }

    /// Ordered plural forms (e.g. one, other; or one, few, many).
    pub fn plural<I, S>(forms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            forms: forms.into_iter().map(Into::into).collect(),
            zero: None,
        }
    }

    /// Add an explicit zero form.
    pub fn with_zero(mut self, text: impl Into<String>) -> Self {
        self.zero = Some(text.into());
        self
    }

    /// Resolve against a language's plural rule.
    pub fn into_entry(self, rule: PluralRule) -> TranslationEntry {
        let Forms { mut forms, zero } = self;
        let entry = if forms.len() == 1 {
            TranslationEntry::single(forms.remove(0))
        } else {
            TranslationEntry::plural(rule, forms)
        };
        match zero {
            Some(zero) => entry.with_zero(zero),
            None => entry,
        }
    }
}

impl From<&str> for Forms {
    fn from(text: &str) -> Self {
        Forms::single(text)
    }
}

impl From<String> for Forms {
    fn from(text: String) -> Self {
        Forms::single(text)
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for Forms {
    fn from(forms: [S; N]) -> Self {
        Forms::plural(forms)
    }
}

impl From<Vec<String>> for Forms {
    fn from(forms: Vec<String>) -> Self {
        Forms::plural(forms)
    }
}

/// Storage of translations and of misses awaiting translation.
pub trait TranslationRepository {
    /// The stored entry for `(key, language)`, or `None` when there is no
    /// explicit translation (including recorded misses).
    fn lookup(&self, key: &SourceKey, language: Language) -> Option<TranslationEntry>;

    /// Remember that `(key, language)` was requested without a translation.
    ///
    /// Must not overwrite an existing translation.
    fn record_miss(&mut self, key: &SourceKey, language: Language);

    /// Store `entry`, replacing whatever was stored for the pair.
    fn set_translation(&mut self, key: &SourceKey, language: Language, entry: TranslationEntry);
}

/// A stored row: a translation, or a miss with no text yet.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Row {
    Translated(TranslationEntry),
    Missing,
}

/// In-process [`TranslationRepository`].
///
/// # Example
///
/// ```
/// use tongue::{Language, MemoryRepository, SourceKey, TranslationEntry, TranslationRepository};
///
/// let he = Language::parse("he").unwrap();
/// let key = SourceKey::new("And now in Hebrew");
///
/// let mut repo = MemoryRepository::new();
/// repo.set_translation(&key, he, TranslationEntry::single("ועכשיו בעברית"));
/// assert!(repo.lookup(&key, he).is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    rows: BTreeMap<(SourceKey, Language), Row>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a translation, builder style.
    pub fn with_translation(
        mut self,
        key: impl Into<SourceKey>,
        language: Language,
        entry: TranslationEntry,
    ) -> Self {
        self.set_translation(&key.into(), language, entry);
        self
    }

    /// Recorded misses in key order, for later human translation.
    pub fn misses(&self) -> impl Iterator<Item = (&SourceKey, Language)> {
        self.rows
            .iter()
            .filter(|(_, row)| **row == Row::Missing)
            .map(|((key, language), _)| (key, *language))
    }

    pub fn miss_count(&self) -> usize {
        self.misses().count()
    }

    /// Whether a miss is recorded for `(key, language)`.
    pub fn is_missing(&self, key: &SourceKey, language: Language) -> bool {
        self.rows.get(&(key.clone(), language)) == Some(&Row::Missing)
    }

    /// Number of stored translations, misses excluded.
    pub fn translation_count(&self) -> usize {
        self.rows.len() - self.miss_count()
    }
}

impl TranslationRepository for MemoryRepository {
    fn lookup(&self, key: &SourceKey, language: Language) -> Option<TranslationEntry> {
        match self.rows.get(&(key.clone(), language))? {
            Row::Translated(entry) if !entry.is_empty() => Some(entry.clone()),
            Row::Translated(_) | Row::Missing => None,
        }
    }

    fn record_miss(&mut self, key: &SourceKey, language: Language) {
        self.rows
            .entry((key.clone(), language))
            .or_insert_with(|| {
                debug!(key = %key, %language, "recorded missing translation");
                Row::Missing
            });
    }

    fn set_translation(&mut self, key: &SourceKey, language: Language, entry: TranslationEntry) {
        self.rows
            .insert((key.clone(), language), Row::Translated(entry));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn he() -> Language {
        Language::parse("he").unwrap()
    }

    #[test]
    fn record_miss_is_idempotent() {
        let mut repo = MemoryRepository::new();
        let key = SourceKey::new("not in database");
        repo.record_miss(&key, he());
        repo.record_miss(&key, he());
        assert_eq!(repo.miss_count(), 1);
        assert!(repo.lookup(&key, he()).is_none());
    }

    #[test]
    fn record_miss_keeps_existing_translation() {
        let key = SourceKey::new("hello");
        let mut repo = MemoryRepository::new().with_translation(&key, he(), TranslationEntry::single("שלום"));
        repo.record_miss(&key, he());
        assert_eq!(repo.miss_count(), 0);
        assert_eq!(repo.translation_count(), 1);
    }

    #[test]
    fn translation_replaces_miss() {
        let mut repo = MemoryRepository::new();
        let key = SourceKey::new("hello");
        repo.record_miss(&key, he());
        repo.set_translation(&key, he(), TranslationEntry::single("שלום"));
        assert!(!repo.is_missing(&key, he()));
        assert!(repo.lookup(&key, he()).is_some());
    }

    #[test]
    fn polish_forms_fill_three_categories() {
        let entry = TranslationEntry::plural(PluralRule::Polish, ["%d plik", "%d pliki", "%d plików"]);
        assert_eq!(entry.form(PluralCategory::One), Some("%d plik"));
        assert_eq!(entry.form(PluralCategory::Few), Some("%d pliki"));
        assert_eq!(entry.form(PluralCategory::Many), Some("%d plików"));
    }

    #[test]
    fn select_falls_back_to_last_form() {
        let entry = TranslationEntry::default().with_form(PluralCategory::One, "one dog");
        assert_eq!(
            entry.select(PluralCategory::Other, PluralCategory::Other),
            Some("one dog")
        );
    }
}
