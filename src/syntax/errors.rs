use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::syntax::tree::*;

/// Failure to obtain a syntax tree from disk.
#[derive(Debug, Error)]
pub enum LoadingError {
    #[error("Failed reading {}: {source}", .filename.display())]
    Read {
        filename: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Not a valid syntax tree in {}: {source}", .filename.display())]
    Decode {
        filename: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Where an external parser gave up, as found by scanning the tree it
/// produced for error and missing nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseProblem {
    pub message: String,
    pub row: usize,
    pub line: String,
}

impl fmt::Display for ParseProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

const SNIPPET_LIMIT: usize = 50;

impl SyntaxTree {
    /// Summarize the first ERROR or missing node, in traversal order.
    pub fn first_error(&self) -> Option<ParseProblem> {
        let (id, _) = self
            .traverse(false)
            .find(|&(id, _)| {
                self.kind(id) == "ERROR"
                    || self
                        .node(id)
                        .is_missing
            })?;

        let point = self.start_point(id);

        let message = if self.kind(id) == "ERROR" {
            format!(
                "cannot parse line {}, col {}: \"{}\"",
                point.row,
                point.column,
                snippet(self.text(id))
            )
        } else {
            format!(
                "missing grammar node \"{}\" on line {}, col {}",
                self.kind(id),
                point.row,
                point.column
            )
        };

        let line = self
            .source
            .lines()
            .nth(point.row)
            .unwrap_or("")
            .to_string();

        Some(ParseProblem {
            message,
            row: point.row,
            line,
        })
    }
}

fn snippet(text: &str) -> String {
    if text.len() <= SNIPPET_LIMIT {
        return text.to_string();
    }
    let mut end = SNIPPET_LIMIT;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}[...]", &text[..end])
}
