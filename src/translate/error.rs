//! Error handling for translation
//!
//! Every variant is fatal for the whole program: no partial document is
//! ever returned.

use thiserror::Error;

use crate::parser::{Axis, SplitError};

/// Translation error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TranslateError {
    /// Command has no entry in the dialect's mapping
    #[error("line {line}: unsupported command '{command}' (do not carve)")]
    UnsupportedCommand {
        /// 1-based input line number.
        line: usize,
        /// The generic command token.
        command: String,
    },

    /// Line does not follow `COMMAND [FEEDRATE] [ARGS...]`
    #[error("line {line}: malformed line '{text}': {reason}")]
    MalformedLine {
        /// 1-based input line number.
        line: usize,
        /// The trimmed input line.
        text: String,
        /// What did not fit the grammar.
        #[source]
        reason: SplitError,
    },

    /// Output command requires an argument the input cannot supply
    #[error("line {line}: command '{command}' requires axis {axis}")]
    MissingAxis {
        /// 1-based input line number.
        line: usize,
        /// The generic command token.
        command: String,
        /// The missing argument.
        axis: Axis,
    },

    /// Caller handed over the wrong number of objects or one without path data
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for translation operations
pub type TranslateResult<T> = std::result::Result<T, TranslateError>;
