//! Error types for locale selection and template substitution.

use strsim::levenshtein;
use thiserror::Error;

/// A locale or language code that cannot be used.
///
/// Every variant means the same thing to a caller (the code is unusable and
/// the active locale was left unchanged); the variants only refine why.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidLocaleError {
    /// The code is not `ll` or `ll-RR`.
    #[error("malformed locale code '{code}': expected a 2-letter language optionally followed by '-' and a 2-letter region")]
    Malformed { code: String },

    /// The language is not in the supported set.
    #[error("unsupported language '{language}' in locale code '{code}'")]
    UnknownLanguage { code: String, language: String },

    /// The language is known but explicitly refused.
    #[error("language '{language}' in locale code '{code}' is not allowed")]
    DisallowedLanguage { code: String, language: String },

    /// The region is not in the supported set.
    #[error("unsupported region '{region}' in locale code '{code}'")]
    UnknownRegion { code: String, region: String },
}

impl InvalidLocaleError {
    /// The code that was rejected.
    pub fn code(&self) -> &str {
        match self {
            InvalidLocaleError::Malformed { code }
            | InvalidLocaleError::UnknownLanguage { code, .. }
            | InvalidLocaleError::DisallowedLanguage { code, .. }
            | InvalidLocaleError::UnknownRegion { code, .. } => code,
        }
    }
}

/// Placeholders and arguments that cannot be reconciled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateSyntaxError {
    /// The template itself does not parse.
    #[error("syntax error at column {column}: {message}")]
    Parse { column: usize, message: String },

    /// A positional placeholder has no corresponding argument.
    #[error("placeholder {index} has no corresponding argument")]
    MissingPositional { index: usize },

    /// A `%d` placeholder with neither a count nor an argument to consume.
    #[error("count placeholder used without a count")]
    MissingCount,

    /// A `%{name}` placeholder whose name is absent from the supplied map.
    #[error("{}", format_missing_named(name, suggestions))]
    MissingNamed {
        name: String,
        suggestions: Vec<String>,
    },

    /// An argument cannot be coerced to an integer for a `%d` placeholder.
    #[error("placeholder {index} expects an integer, got '{value}'")]
    NotAnInteger { index: usize, value: String },

    /// A `%{name}` placeholder used without a name to value mapping.
    #[error("named placeholder '%{{{name}}}' requires a map of arguments")]
    NotAMap { name: String },
}

fn format_missing_named(name: &str, suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        format!("no argument named '{name}'")
    } else {
        format!(
            "no argument named '{name}'; did you mean: {}?",
            suggestions.join(", ")
        )
    }
}

/// Compute typo suggestions using Levenshtein distance.
///
/// - distance <= 1 for names <= 3 chars
/// - distance <= 2 for longer names
/// - at most 3 suggestions, closest first, ties broken alphabetically
pub fn compute_suggestions<'a>(name: &str, available: impl Iterator<Item = &'a str>) -> Vec<String> {
    let max_distance = if name.len() <= 3 { 1 } else { 2 };
    let mut suggestions: Vec<(usize, &str)> = available
        .filter_map(|candidate| {
            let dist = levenshtein(name, candidate);
            (dist <= max_distance && dist > 0).then_some((dist, candidate))
        })
        .collect();

    suggestions.sort_unstable();
    suggestions
        .into_iter()
        .take(3)
        .map(|(_, s)| s.to_string())
        .collect()
}
