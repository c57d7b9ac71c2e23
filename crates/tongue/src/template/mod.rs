//! Placeholder parsing and argument substitution.
//!
//! Substitution always runs on the template chosen for a request, whether it
//! came from the cache or was freshly resolved; its output is never cached.

mod ast;
mod parser;
mod substitute;

pub use ast::{Segment, Template};
pub use parser::parse_template;
pub use substitute::{render, substitute};
