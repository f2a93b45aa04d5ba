//! Program text loading.
//!
//! The simulator core consumes a finite ordered sequence of non-empty
//! instruction lines; this module produces that sequence from a file. An
//! unreadable source is the only fatal condition at this edge — callers that
//! prefer the core's "zero instructions" tolerance can map the error to an
//! empty program.

use std::fs;
use std::path::Path;

use thiserror::Error;

/// Errors raised while reading a program source.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// The program file could not be read.
    #[error("could not read program '{path}': {source}")]
    Unreadable {
        /// Path that failed to open.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Reads a program file into instruction lines.
///
/// Blank and whitespace-only lines are dropped; everything else is kept
/// verbatim for the operand resolver. An empty file yields an empty program,
/// which runs for zero cycles.
///
/// # Errors
///
/// Returns [`LoaderError::Unreadable`] when the file cannot be read.
pub fn load_program(path: &Path) -> Result<Vec<String>, LoaderError> {
    let text = fs::read_to_string(path).map_err(|source| LoaderError::Unreadable {
        path: path.display().to_string(),
        source,
    })?;
    Ok(parse_program(&text))
}

/// Splits raw program text into non-empty instruction lines.
pub fn parse_program(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}
