//! Parsed form of a translated template.

/// A template split into literal text and placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub segments: Vec<Segment>,
}

/// A segment within a template.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal text, with `%%` already collapsed to `%`.
    Literal(String),
    /// `%d`: the request's count, or the next positional argument.
    Count,
    /// `%s`: the next positional argument.
    Positional,
    /// `%{name}`: a value looked up by name.
    Named(String),
}
