//! G-code Lexer
//!
//! Splits one instruction line into whitespace-separated tokens and
//! classifies each by shape. No grammar decisions are made here.

use std::sync::LazyLock;

use regex::Regex;

/// A letter followed by a signed decimal number, e.g. `G1`, `X-1.250`, `F.5`
static WORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z])([+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+))$")
        .expect("word pattern is valid")
});

/// Token types in an instruction line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Command word like "G1", "M3"
    Command,
    /// Feed-rate word like "F10.0"
    FeedRate,
    /// Any other letter/number word like "X10", "I-0.5"
    Word,
    /// Anything that is not a well-formed word
    Other,
}

/// A token with its text content
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    /// Leading letter of a word token
    pub fn letter(&self) -> Option<char> {
        match self.kind {
            TokenKind::Other => None,
            _ => self.text.chars().next(),
        }
    }

    /// Numeric part of a word token, as written
    pub fn value(&self) -> Option<&str> {
        match self.kind {
            TokenKind::Other => None,
            _ => self.text.get(1..),
        }
    }
}

/// Tokenize a line of G-code
///
/// Tokens are separated by any run of whitespace, so doubled spaces or tabs
/// between words are tolerated.
pub fn tokenize_line(line: &str) -> Vec<Token> {
    line.split_whitespace()
        .map(|text| Token {
            kind: classify(text),
            text: text.to_string(),
        })
        .collect()
}

fn classify(text: &str) -> TokenKind {
    let Some(caps) = WORD_RE.captures(text) else {
        return TokenKind::Other;
    };

    match &caps[1] {
        "G" | "M" | "T" => TokenKind::Command,
        "F" => TokenKind::FeedRate,
        _ => TokenKind::Word,
    }
}
