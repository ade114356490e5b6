use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Location of a token or character in the source text.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// Byte offset from the start of the source.
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("illegal character '{character}' at {position}")]
    IllegalCharacter { character: char, position: Position },
    #[error("syntax error at {position}: found {found}, expected {expected}")]
    SyntaxError {
        found: String,
        expected: &'static str,
        position: Position,
    },
}

impl Position {
    pub fn start() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// Moves past `c`, which must be the character at this position.
    pub(crate) fn advance(&mut self, c: char) {
        self.offset += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl Error {
    pub fn position(&self) -> Position {
        match self {
            Error::IllegalCharacter { position, .. } | Error::SyntaxError { position, .. } => {
                *position
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_advance() {
        let mut position = Position::start();
        for c in "H\nNa".chars() {
            position.advance(c);
        }
        assert_eq!(
            position,
            Position {
                offset: 4,
                line: 2,
                column: 3,
            }
        );
    }

    #[test]
    fn test_messages() {
        let error = Error::IllegalCharacter {
            character: '#',
            position: Position {
                offset: 3,
                line: 1,
                column: 4,
            },
        };
        assert_eq!(error.to_string(), "illegal character '#' at 1:4");

        let error = Error::SyntaxError {
            found: "end of input".to_owned(),
            expected: "'\\rightarrow'",
            position: Position::start(),
        };
        assert_eq!(
            error.to_string(),
            "syntax error at 1:1: found end of input, expected '\\rightarrow'"
        );
    }
}
