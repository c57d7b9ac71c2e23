mod args;
mod source_key;
mod value;

pub use args::Args;
pub use source_key::SourceKey;
pub use value::Value;
