use std::borrow::Borrow;
use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// The canonical, untranslated text identifying what to translate.
///
/// Symbolic identifiers are normalized into the same string space once, at
/// the request boundary, so the rest of the crate only ever sees plain text.
///
/// # Example
///
/// ```
/// use tongue::SourceKey;
///
/// let literal = SourceKey::new("And now in Hebrew");
/// let symbol = SourceKey::from_symbol("And_now_in_Hebrew");
/// assert_eq!(literal, symbol);
/// assert_eq!(symbol.byte_len(), 17);
/// ```
#[derive(Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct SourceKey(String);

impl SourceKey {
    /// Wrap literal source text.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Normalize a symbolic identifier: underscores become spaces.
    pub fn from_symbol(symbol: &str) -> Self {
        Self(symbol.replace('_', " "))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// UTF-8 length of the key, used for cache size accounting.
    pub fn byte_len(&self) -> usize {
        self.0.len()
    }
}

impl Display for SourceKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for SourceKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SourceKey {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for SourceKey {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&SourceKey> for SourceKey {
    fn from(key: &SourceKey) -> Self {
        key.clone()
    }
}
