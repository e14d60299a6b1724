//! G-code Line Splitter
//!
//! Turns one raw line into a command, an optional feed rate and its axis
//! words. Knows nothing about dialects or translation state.

pub mod ast;
pub mod lexer;

pub use ast::{Axis, AxisWord, InstructionLine, ParsedLine, SplitError};
pub use lexer::{tokenize_line, Token, TokenKind};

/// Opening delimiter of a comment line
pub const COMMENT_DELIMITER: char = '(';

/// Split a single line of G-code
///
/// Blank lines and lines starting with `(` are returned as
/// [`ParsedLine::Empty`] and [`ParsedLine::Comment`]; everything else must
/// follow `COMMAND [FEEDRATE] [ARGS...]`.
pub fn parse_line(line: &str) -> Result<ParsedLine, SplitError> {
    let line = line.trim();

    if line.is_empty() {
        return Ok(ParsedLine::Empty);
    }

    if let Some(text) = line.strip_prefix(COMMENT_DELIMITER) {
        let text = text.strip_suffix(')').unwrap_or(text);
        return Ok(ParsedLine::Comment(text.to_string()));
    }

    ast::tokens_to_parsed_line(lexer::tokenize_line(line))
}
