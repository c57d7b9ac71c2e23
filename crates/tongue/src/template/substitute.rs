//! Argument substitution into resolved templates.

use std::collections::HashMap;
use std::slice::{self, Iter};

use super::ast::{Segment, Template};
use super::parser::parse_template;
use crate::error::{TemplateSyntaxError, compute_suggestions};
use crate::types::{Args, Value};

/// Substitute `count` and `args` into `template`.
///
/// A request with neither a count nor arguments returns the template
/// verbatim, placeholders and `%%` included. Otherwise:
///
/// - `%d` renders the count. Without a count it consumes the next
///   positional argument, which must coerce to an integer.
/// - `%s` consumes the next positional argument.
/// - With [`Args::Sequence`], every positional placeholder (`%d` included)
///   consumes the next element in order and the count is not used.
/// - `%{name}` looks `name` up in an [`Args::Named`] map.
///
/// Surplus arguments are ignored.
///
/// # Example
///
/// ```
/// use tongue::template::substitute;
/// use tongue::{Args, args, params};
///
/// assert_eq!(substitute("%d files", Some(3), &Args::None).unwrap(), "3 files");
/// assert_eq!(substitute("welcome, %s", None, &"Josh".into()).unwrap(), "welcome, Josh");
/// assert_eq!(
///     substitute("%s has %d dogs", None, &args!["Nicola", 3]).unwrap(),
///     "Nicola has 3 dogs"
/// );
/// assert_eq!(
///     substitute("%{arg1} and %{arg2}", None, &params! { "arg1" => "a", "arg2" => "b" }.into())
///         .unwrap(),
///     "a and b"
/// );
/// assert_eq!(substitute("%d abcde", None, &Args::None).unwrap(), "%d abcde");
/// ```
pub fn substitute(
    template: &str,
    count: Option<i64>,
    args: &Args,
) -> Result<String, TemplateSyntaxError> {
    if count.is_none() && args.is_none() {
        return Ok(template.to_string());
    }
    let parsed = parse_template(template)?;
    render(&parsed, count, args)
}

/// Render a parsed template against a count and arguments.
pub fn render(
    template: &Template,
    count: Option<i64>,
    args: &Args,
) -> Result<String, TemplateSyntaxError> {
    let mut positional = Positional::new(args);
    let mut out = String::new();

    for segment in &template.segments {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Count => {
                let n = positional.count(count)?;
                out.push_str(&n.to_string());
            }
            Segment::Positional => {
                out.push_str(&positional.consume()?.to_string());
            }
            Segment::Named(name) => {
                out.push_str(&named(args, name)?.to_string());
            }
        }
    }

    Ok(out)
}

/// Left-to-right consumption of positional arguments.
struct Positional<'a> {
    values: Iter<'a, Value>,
    sequence: bool,
    index: usize,
}

impl<'a> Positional<'a> {
    fn new(args: &'a Args) -> Self {
        let (values, sequence) = match args {
            Args::Sequence(values) => (values.as_slice(), true),
            Args::Scalar(value) => (slice::from_ref(value), false),
            Args::None | Args::Named(_) => (&[][..], false),
        };
        Self {
            values: values.iter(),
            sequence,
            index: 0,
        }
    }

    /// Value for a `%d` placeholder.
    fn count(&mut self, count: Option<i64>) -> Result<i64, TemplateSyntaxError> {
        self.index += 1;
        if let (false, Some(n)) = (self.sequence, count) {
            return Ok(n);
        }
        let index = self.index;
        let value = self.values.next().ok_or(if self.sequence {
            TemplateSyntaxError::MissingPositional { index }
        } else {
            TemplateSyntaxError::MissingCount
        })?;
        value
            .to_integer()
            .ok_or_else(|| TemplateSyntaxError::NotAnInteger {
                index,
                value: value.to_string(),
            })
    }

    /// Value for a `%s` placeholder.
    fn consume(&mut self) -> Result<&'a Value, TemplateSyntaxError> {
        self.index += 1;
        let index = self.index;
        self.values
            .next()
            .ok_or(TemplateSyntaxError::MissingPositional { index })
    }
}

/// Value for a `%{name}` placeholder.
fn named<'a>(args: &'a Args, name: &str) -> Result<&'a Value, TemplateSyntaxError> {
    let Args::Named(map) = args else {
        return Err(TemplateSyntaxError::NotAMap {
            name: name.to_string(),
        });
    };
    map.get(name).ok_or_else(|| missing_named(map, name))
}

fn missing_named(map: &HashMap<String, Value>, name: &str) -> TemplateSyntaxError {
    TemplateSyntaxError::MissingNamed {
        name: name.to_string(),
        suggestions: compute_suggestions(name, map.keys().map(String::as_str)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{args, params};

    #[test]
    fn count_placeholder_repeats_count() {
        assert_eq!(substitute("%d of %d", Some(2), &Args::None).unwrap(), "2 of 2");
    }

    #[test]
    fn scalar_feeds_only_string_placeholders() {
        let out = substitute("%d files by %s", Some(4), &"Ada".into()).unwrap();
        assert_eq!(out, "4 files by Ada");
    }

    #[test]
    fn sequence_ignores_count() {
        let out = substitute("%s has %d dogs", Some(7), &args!["Nicola", 1]).unwrap();
        assert_eq!(out, "Nicola has 1 dogs");
    }

    #[test]
    fn sequence_too_short_reports_position() {
        let err = substitute("%s has %d dogs", None, &args!["Nicola"]).unwrap_err();
        assert_eq!(err, TemplateSyntaxError::MissingPositional { index: 2 });
    }

    #[test]
    fn count_placeholder_rejects_words() {
        let err = substitute("%d dogs", None, &args!["many"]).unwrap_err();
        assert_eq!(
            err,
            TemplateSyntaxError::NotAnInteger {
                index: 1,
                value: "many".to_string()
            }
        );
    }

    #[test]
    fn count_placeholder_accepts_numeric_strings_and_floats() {
        assert_eq!(substitute("%d", None, &args!["12"]).unwrap(), "12");
        assert_eq!(substitute("%d", None, &args![3.9]).unwrap(), "3");
    }

    #[test]
    fn missing_count_without_scalar() {
        let err = substitute("%d items", None, &params! { "x" => 1 }.into()).unwrap_err();
        assert_eq!(err, TemplateSyntaxError::MissingCount);
    }

    #[test]
    fn named_placeholder_requires_map() {
        let err = substitute("%{who}", Some(1), &Args::None).unwrap_err();
        assert_eq!(
            err,
            TemplateSyntaxError::NotAMap {
                name: "who".to_string()
            }
        );
    }

    #[test]
    fn missing_named_suggests_close_keys() {
        let err = substitute("%{arg1} and %{arg2}", None, &params! { "arg1" => "a", "arg3" => "c" }.into())
            .unwrap_err();
        assert_eq!(
            err,
            TemplateSyntaxError::MissingNamed {
                name: "arg2".to_string(),
                suggestions: vec!["arg1".to_string(), "arg3".to_string()],
            }
        );
    }

    #[test]
    fn no_placeholders_ignore_arguments() {
        assert_eq!(substitute("plain", Some(3), &args![1, 2]).unwrap(), "plain");
    }

    #[test]
    fn escaped_percent_collapses_only_when_substituting() {
        assert_eq!(substitute("%d%%", Some(50), &Args::None).unwrap(), "50%");
        assert_eq!(substitute("100%%", None, &Args::None).unwrap(), "100%%");
    }
}
