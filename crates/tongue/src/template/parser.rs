//! Template string parser using winnow.
//!
//! Recognizes:
//! - `%d` count placeholders
//! - `%s` positional placeholders
//! - `%{name}` named placeholders
//! - `%%` as a literal percent sign
//!
//! Any other `%` is literal text, so strings like `"50% off"` need no escaping.

use winnow::combinator::{alt, cut_err, delimited, repeat};
use winnow::prelude::*;
use winnow::token::{any, take_while};

use super::ast::{Segment, Template};
use crate::error::TemplateSyntaxError;

/// Parse a template string into segments.
pub fn parse_template(input: &str) -> Result<Template, TemplateSyntaxError> {
    let mut remaining = input;
    match template(&mut remaining) {
        Ok(t) => {
            if remaining.is_empty() {
                Ok(t)
            } else {
                Err(TemplateSyntaxError::Parse {
                    column: calculate_column(input, remaining),
                    message: format!(
                        "unexpected character: '{}'",
                        remaining.chars().next().unwrap_or('?')
                    ),
                })
            }
        }
        Err(e) => Err(TemplateSyntaxError::Parse {
            column: calculate_column(input, remaining),
            message: format!("expected '%{{name}}' placeholder: {e}"),
        }),
    }
}

/// 1-based character column of `remaining` within `original`.
fn calculate_column(original: &str, remaining: &str) -> usize {
    let consumed = original.len() - remaining.len();
    original[..consumed].chars().count() + 1
}

/// Parse a complete template into segments.
fn template(input: &mut &str) -> ModalResult<Template> {
    let segments: Vec<Segment> = repeat(0.., segment).parse_next(input)?;
    Ok(Template {
        segments: merge_literals(segments),
    })
}

/// Merge adjacent Literal segments into single segments.
fn merge_literals(segments: Vec<Segment>) -> Vec<Segment> {
    let mut result = Vec::with_capacity(segments.len());

    for segment in segments {
        match segment {
            Segment::Literal(text) => {
                if let Some(Segment::Literal(prev)) = result.last_mut() {
                    prev.push_str(&text);
                } else {
                    result.push(Segment::Literal(text));
                }
            }
            other => result.push(other),
        }
    }

    result
}

/// Parse a single segment (escape, placeholder, or literal).
fn segment(input: &mut &str) -> ModalResult<Segment> {
    alt((
        "%%".value(Segment::Literal("%".to_string())),
        "%d".value(Segment::Count),
        "%s".value(Segment::Positional),
        named,
        literal_char,
    ))
    .parse_next(input)
}

/// Parse `%{name}`. Once `%{` is seen the placeholder must be well formed.
fn named(input: &mut &str) -> ModalResult<Segment> {
    delimited("%{", cut_err(identifier), cut_err('}'))
        .map(|name: &str| Segment::Named(name.to_string()))
        .parse_next(input)
}

/// Parse a single literal character.
fn literal_char(input: &mut &str) -> ModalResult<Segment> {
    any.map(|c: char| Segment::Literal(c.to_string()))
        .parse_next(input)
}

/// Parse a placeholder name.
fn identifier<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| c.is_alphanumeric() || c == '_').parse_next(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacent_literals_are_merged() {
        let t = parse_template("100%% sure").unwrap();
        assert_eq!(t.segments, vec![Segment::Literal("100% sure".to_string())]);
    }

    #[test]
    fn unterminated_named_placeholder_is_an_error() {
        let err = parse_template("ab %{").unwrap_err();
        assert!(matches!(err, TemplateSyntaxError::Parse { .. }));
    }
}
