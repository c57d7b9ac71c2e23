use std::collections::HashMap;

use super::Value;

/// Substitution arguments supplied alongside a translation request.
///
/// The shape of the argument decides how positional placeholders consume it:
/// a [`Args::Sequence`] feeds every positional placeholder (`%d` included) in
/// order, while a [`Args::Scalar`] feeds `%s` and only feeds `%d` when the
/// request has no count.
///
/// # Example
///
/// ```
/// use tongue::{Args, Value, args, params};
///
/// let none = Args::None;
/// let scalar: Args = "Josh".into();
/// let sequence = args!["Nicola", 3];
/// let named: Args = params! { "arg1" => "a", "arg2" => "b" }.into();
///
/// assert!(none.is_none());
/// assert!(matches!(scalar, Args::Scalar(Value::String(_))));
/// assert!(matches!(sequence, Args::Sequence(ref v) if v.len() == 2));
/// assert!(matches!(named, Args::Named(_)));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Args {
    /// No arguments.
    #[default]
    None,

    /// A single value.
    Scalar(Value),

    /// Values consumed left to right by positional placeholders.
    Sequence(Vec<Value>),

    /// Values looked up by `%{name}` placeholders.
    Named(HashMap<String, Value>),
}

impl Args {
    /// Returns true when no arguments were supplied.
    pub fn is_none(&self) -> bool {
        matches!(self, Args::None)
    }

    /// Builds a sequence argument from anything convertible to values.
    pub fn sequence<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Args::Sequence(values.into_iter().map(Into::into).collect())
    }
}

impl From<Value> for Args {
    fn from(value: Value) -> Self {
        Args::Scalar(value)
    }
}

impl From<&str> for Args {
    fn from(s: &str) -> Self {
        Args::Scalar(Value::from(s))
    }
}

impl From<String> for Args {
    fn from(s: String) -> Self {
        Args::Scalar(Value::from(s))
    }
}

impl From<Vec<Value>> for Args {
    fn from(values: Vec<Value>) -> Self {
        Args::Sequence(values)
    }
}

impl From<HashMap<String, Value>> for Args {
    fn from(map: HashMap<String, Value>) -> Self {
        Args::Named(map)
    }
}
