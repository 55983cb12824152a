use std::io;

use thiserror::Error;

/// The formatter has no partial results: once the output can't be written
/// the whole run is abandoned.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Failed writing formatted output: {0}")]
    Output(#[from] io::Error),
}
