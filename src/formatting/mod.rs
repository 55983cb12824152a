//! Pretty-printing syntax trees of Zeek scripts

mod declarations;
mod engine;
mod error;
mod expressions;
mod extras;
mod formatter;
mod hints;
mod options;
mod registry;
mod statements;
mod wrap;

// Re-export all public symbols
pub use engine::*;
pub use error::*;
pub use formatter::{format, format_to_string, format_with_registry};
pub use hints::*;
pub use options::*;
pub use registry::*;
pub use wrap::*;
