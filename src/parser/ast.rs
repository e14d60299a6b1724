//! Instruction Line Types
//!
//! Minimal types for a split instruction line plus the small grammar that
//! builds them from tokens: `COMMAND [FEEDRATE] [ARGS...]`.

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

use crate::parser::lexer::{Token, TokenKind};

/// A split line of G-code
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedLine {
    /// A command with optional feed rate and axis words
    Instruction(InstructionLine),
    /// A comment-only line (text without the opening delimiter)
    Comment(String),
    /// An empty or whitespace-only line
    Empty,
}

/// One motion or machine directive
#[derive(Debug, Clone, PartialEq)]
pub struct InstructionLine {
    /// Command token (e.g., "G1")
    pub command: String,
    /// Feed-rate token when the line carries one (e.g., "F10.0")
    pub feed_rate: Option<String>,
    /// Axis words in the order they were written
    pub words: Vec<AxisWord>,
    /// Raw argument remainder after command and feed rate
    pub args: String,
}

impl InstructionLine {
    /// Find the word for an axis
    pub fn word(&self, axis: Axis) -> Option<&AxisWord> {
        self.words.iter().find(|w| w.axis == axis)
    }
}

/// An argument word like "X1.250"
#[derive(Debug, Clone, PartialEq)]
pub struct AxisWord {
    pub axis: Axis,
    /// Numeric value as written
    pub value: String,
}

impl AxisWord {
    /// The word as it appears in output, letter included
    pub fn token(&self) -> String {
        format!("{}{}", self.axis, self.value)
    }
}

/// Argument letters understood by the translator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
    I,
    J,
    K,
    /// Drilling-cycle retract plane
    R,
    /// Drilling-cycle dwell
    P,
    /// Drilling-cycle peck depth
    Q,
}

impl Axis {
    pub fn from_letter(letter: char) -> Option<Self> {
        let axis = match letter {
            'X' => Axis::X,
            'Y' => Axis::Y,
            'Z' => Axis::Z,
            'I' => Axis::I,
            'J' => Axis::J,
            'K' => Axis::K,
            'R' => Axis::R,
            'P' => Axis::P,
            'Q' => Axis::Q,
            _ => return None,
        };
        Some(axis)
    }

    pub fn letter(self) -> char {
        match self {
            Axis::X => 'X',
            Axis::Y => 'Y',
            Axis::Z => 'Z',
            Axis::I => 'I',
            Axis::J => 'J',
            Axis::K => 'K',
            Axis::R => 'R',
            Axis::P => 'P',
            Axis::Q => 'Q',
        }
    }

    /// Whether an omitted value inherits the previous line's position
    pub fn carries_forward(self) -> bool {
        matches!(self, Axis::X | Axis::Y | Axis::Z)
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Why a line does not fit `COMMAND [FEEDRATE] [ARGS...]`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    #[error("expected a command word, found '{0}'")]
    BadCommand(String),
    #[error("feed rate '{0}' must directly follow the command")]
    MisplacedFeedRate(String),
    #[error("unrecognized argument '{0}'")]
    UnknownArgument(String),
    #[error("axis {0} given more than once")]
    DuplicateAxis(Axis),
}

/// Build an instruction line from the tokens of a non-comment line
pub fn tokens_to_parsed_line(tokens: Vec<Token>) -> Result<ParsedLine, SplitError> {
    let mut tokens = tokens.into_iter().peekable();

    let Some(command) = tokens.next() else {
        return Ok(ParsedLine::Empty);
    };
    if command.kind != TokenKind::Command {
        return Err(SplitError::BadCommand(command.text));
    }

    let feed_rate = tokens
        .next_if(|t| t.kind == TokenKind::FeedRate)
        .map(|t| t.text);

    let rest: Vec<Token> = tokens.collect();
    let args = rest
        .iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    let mut words: Vec<AxisWord> = Vec::with_capacity(rest.len());
    for token in rest {
        let word = match token.kind {
            TokenKind::FeedRate => return Err(SplitError::MisplacedFeedRate(token.text)),
            TokenKind::Word => parse_axis_word(&token),
            TokenKind::Command | TokenKind::Other => None,
        };
        let Some(word) = word else {
            return Err(SplitError::UnknownArgument(token.text));
        };
        if words.iter().any(|w| w.axis == word.axis) {
            return Err(SplitError::DuplicateAxis(word.axis));
        }
        words.push(word);
    }

    Ok(ParsedLine::Instruction(InstructionLine {
        command: command.text,
        feed_rate,
        words,
        args,
    }))
}

fn parse_axis_word(token: &Token) -> Option<AxisWord> {
    let axis = Axis::from_letter(token.letter()?)?;
    Some(AxisWord {
        axis,
        value: token.value()?.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::tokenize_line;

    fn split(line: &str) -> Result<ParsedLine, SplitError> {
        tokens_to_parsed_line(tokenize_line(line))
    }

    #[test]
    fn test_command_feed_and_args() {
        let ParsedLine::Instruction(line) = split("G1 F10 X1 Y2").unwrap() else {
            panic!("Expected instruction");
        };
        assert_eq!(line.command, "G1");
        assert_eq!(line.feed_rate.as_deref(), Some("F10"));
        assert_eq!(line.args, "X1 Y2");
        assert_eq!(line.words.len(), 2);
        assert_eq!(line.word(Axis::Y).unwrap().token(), "Y2");
    }

    #[test]
    fn test_feed_rate_only() {
        let ParsedLine::Instruction(line) = split("G1 F10").unwrap() else {
            panic!("Expected instruction");
        };
        assert_eq!(line.feed_rate.as_deref(), Some("F10"));
        assert!(line.words.is_empty());
        assert_eq!(line.args, "");
    }

    #[test]
    fn test_command_only() {
        let ParsedLine::Instruction(line) = split("G90").unwrap() else {
            panic!("Expected instruction");
        };
        assert_eq!(line.feed_rate, None);
        assert!(line.words.is_empty());
    }

    #[test]
    fn test_rejects_non_command_start() {
        assert_eq!(
            split("X1 Y2"),
            Err(SplitError::BadCommand("X1".to_string()))
        );
    }

    #[test]
    fn test_rejects_ambiguous_second_token() {
        assert_eq!(
            split("G1 S200"),
            Err(SplitError::UnknownArgument("S200".to_string()))
        );
        assert_eq!(
            split("G1 fast"),
            Err(SplitError::UnknownArgument("fast".to_string()))
        );
    }

    #[test]
    fn test_rejects_late_feed_rate() {
        assert_eq!(
            split("G1 X1 F10"),
            Err(SplitError::MisplacedFeedRate("F10".to_string()))
        );
    }

    #[test]
    fn test_rejects_duplicate_axis() {
        assert_eq!(split("G0 X1 X2"), Err(SplitError::DuplicateAxis(Axis::X)));
    }

    #[test]
    fn test_axis_letters() {
        assert_eq!(Axis::from_letter('Q'), Some(Axis::Q));
        assert_eq!(Axis::from_letter('S'), None);
        assert!(Axis::Z.carries_forward());
        assert!(!Axis::I.carries_forward());
        assert_eq!(Axis::J.to_string(), "J");
    }
}
