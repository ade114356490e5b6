use std::fmt;

use super::error::{Error, Position, Result};

const ARROW: &str = "\\rightarrow";
const ASCII_ARROW: &str = "->";
const UNEWLINE: &str = "\\\\";

#[derive(Debug, Clone)]
pub struct ReactionScanner<'a> {
    source: &'a str,
    position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind<'a> {
    Element(&'a str),
    Number(&'a str),
    Subscript,
    LBrace,
    RBrace,
    Plus,
    Arrow,
    Newline,
    /// `\\`, the line continuation that chains reactions into one system.
    UNewline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind<'a>,
    pub position: Position,
}

impl<'a> ReactionScanner<'a> {
    pub fn new(source: &'a str) -> Self {
        ReactionScanner {
            source,
            position: Position::start(),
        }
    }

    /// Position of the next unread character.
    pub fn position(&self) -> Position {
        self.position
    }

    fn bump(&mut self, len: usize) -> &'a str {
        let (text, rest) = self.source.split_at(len);
        for c in text.chars() {
            self.position.advance(c);
        }
        self.source = rest;
        text
    }

    fn run_len(&self, skip: usize, pred: impl Fn(char) -> bool) -> usize {
        self.source[skip..]
            .find(|c: char| !pred(c))
            .map_or(self.source.len(), |len| skip + len)
    }
}

impl<'a> Iterator for ReactionScanner<'a> {
    type Item = Result<Token<'a>>;

    fn next(&mut self) -> Option<Result<Token<'a>>> {
        let skipped = self.run_len(0, |c| matches!(c, ' ' | '\t' | '\r'));
        self.bump(skipped);

        let position = self.position;
        let next = self.source.chars().next()?;
        let kind = match next {
            'A'..='Z' => {
                let len = self.run_len(1, |c| c.is_ascii_lowercase());
                TokenKind::Element(self.bump(len))
            }
            '0'..='9' => {
                let len = self.run_len(0, |c| c.is_ascii_digit());
                TokenKind::Number(self.bump(len))
            }
            '\n' => {
                let len = self.run_len(0, |c| c == '\n');
                self.bump(len);
                TokenKind::Newline
            }
            '_' | '{' | '}' | '+' => {
                self.bump(1);
                match next {
                    '_' => TokenKind::Subscript,
                    '{' => TokenKind::LBrace,
                    '}' => TokenKind::RBrace,
                    _ => TokenKind::Plus,
                }
            }
            _ if self.source.starts_with(UNEWLINE) => {
                self.bump(UNEWLINE.len());
                TokenKind::UNewline
            }
            _ if self.source.starts_with(ARROW) => {
                self.bump(ARROW.len());
                TokenKind::Arrow
            }
            _ if self.source.starts_with(ASCII_ARROW) => {
                self.bump(ASCII_ARROW.len());
                TokenKind::Arrow
            }
            _ => {
                self.bump(next.len_utf8());
                return Some(Err(Error::IllegalCharacter {
                    character: next,
                    position,
                }));
            }
        };

        Some(Ok(Token { kind, position }))
    }
}

/// Scans the whole of `source`, keeping every token that could be read
/// alongside the illegal characters that were skipped.
pub fn tokenize(source: &str) -> (Vec<Token<'_>>, Vec<Error>) {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    for result in ReactionScanner::new(source) {
        match result {
            Ok(token) => tokens.push(token),
            Err(error) => {
                tracing::warn!(%error, "skipping character");
                errors.push(error);
            }
        }
    }
    (tokens, errors)
}

impl fmt::Display for TokenKind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Element(symbol) => write!(f, "{symbol}"),
            TokenKind::Number(digits) => write!(f, "{digits}"),
            TokenKind::Subscript => write!(f, "_"),
            TokenKind::LBrace => write!(f, "{{"),
            TokenKind::RBrace => write!(f, "}}"),
            TokenKind::Plus => write!(f, "+"),
            TokenKind::Arrow => write!(f, "{ARROW}"),
            TokenKind::Newline => write!(f, "newline"),
            TokenKind::UNewline => write!(f, "{UNEWLINE}"),
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.kind)
    }
}
