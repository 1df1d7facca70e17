pub mod rules;

pub use rules::{apply_context, Context, ContextKind, ContextParseError};
