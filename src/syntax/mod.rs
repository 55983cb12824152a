//! Syntax trees for Zeek scripts, as handed to the formatter by an
//! external parser

use std::io::Read;
use std::path::Path;
use tracing::debug;

mod concrete;
mod dump;
mod errors;
mod tree;

// Re-export all public symbols
pub use concrete::*;
pub use dump::*;
pub use errors::*;
pub use tree::*;

/// Read a concrete syntax tree, serialized as JSON, from a file and build
/// the formatter's view of it. The filename "-" means standard input.
pub fn load(filename: &Path) -> Result<SyntaxTree, LoadingError> {
    let content = read(filename).map_err(|error| {
        debug!(?error);
        LoadingError::Read {
            filename: filename.to_path_buf(),
            source: error,
        }
    })?;

    let concrete: ConcreteNode =
        serde_json::from_str(&content).map_err(|error| LoadingError::Decode {
            filename: filename.to_path_buf(),
            source: error,
        })?;

    Ok(SyntaxTree::from_concrete(concrete))
}

fn read(filename: &Path) -> std::io::Result<String> {
    if filename.to_str() == Some("-") {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        Ok(content)
    } else {
        std::fs::read_to_string(filename)
    }
}
