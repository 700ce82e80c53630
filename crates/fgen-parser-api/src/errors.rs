use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a parse
///
/// Malformed declarations are never reported here: lines that match no
/// grammar are merged with their successors and, failing that, dropped.
#[derive(Error, Debug)]
pub enum ParserError {
    /// Failed to open or read the header
    #[error("IO error reading {0}: {1}")]
    IoError(PathBuf, #[source] std::io::Error),

    /// File too large
    #[error("File {0} exceeds maximum size ({1} bytes)")]
    FileTooLarge(PathBuf, usize),

    /// A closing brace arrived while no scope was open
    #[error("Unbalanced closing brace at line {line}: no open scope")]
    UnbalancedBrace {
        /// 1-based line of the offending brace
        line: usize,
    },
}

/// Result type for parser operations
pub type ParserResult<T> = Result<T, ParserError>;
