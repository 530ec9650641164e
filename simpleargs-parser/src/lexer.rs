//! A lexer for classifying raw tokens from a command line.

use crate::error::{Error, Result};

/// Defines a `Token` that has been read from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token<'a> {
    /// A bare flag (e.g. `-v` or `--verbose`). Only the identifier is
    /// stored, not the hyphens.
    Flag(&'a str),

    /// A flag carrying an inline value (e.g. `--mode=fast`). The value
    /// may be empty.
    Assign(&'a str, &'a str),

    /// Value (i.e. everything that is not a flag, including bare `-`
    /// and `--`).
    Value(&'a str),
}

impl<'a> Token<'a> {
    /// Classify one raw token. Single and double hyphen prefixes are
    /// equivalent. A stripped token with more than one `=`, or with an
    /// empty name before one, fails the whole scan.
    pub fn classify(raw: &'a str) -> Result<Token<'a>> {
        let stripped = match raw.strip_prefix("--").or_else(|| raw.strip_prefix('-')) {
            Some(rest) if !rest.is_empty() => rest,
            _ => return Ok(Token::Value(raw)),
        };

        let mut parts = stripped.splitn(3, '=');
        let name = parts.next().unwrap_or_default();

        match (parts.next(), parts.next()) {
            (None, _) => Ok(Token::Flag(stripped)),
            (Some(value), None) if !name.is_empty() => Ok(Token::Assign(name, value)),
            _ => Err(Error::MalformedOption(stripped.to_owned())),
        }
    }
}

/// Defines a `Tokens` iterator that is responsible for streaming tokens
/// from the command line input.
#[derive(Clone, Debug)]
pub struct Tokens<'a> {
    argv: &'a [&'a str],
    cursor: usize,
}

impl<'a> Tokens<'a> {
    /// Create a new lexer from the command line input.
    pub fn new(argv: &'a [&'a str]) -> Self {
        Tokens { argv, cursor: 0 }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Result<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        let raw = *self.argv.get(self.cursor)?;
        self.cursor += 1;

        Some(Token::classify(raw))
    }
}
