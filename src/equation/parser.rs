use std::str::FromStr;

use super::{
    error::{Error, Position, Result},
    scanner::{ReactionScanner, Token, TokenKind},
    Molecule, Reaction, Side, System,
};

/// How a side treats a molecule that is equal to one it already holds.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// Every occurrence is kept as its own entry.
    #[default]
    Distinct,
    /// Equal molecules share one entry and their coefficients are summed.
    Combine,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub merge: MergePolicy,
}

/// The result of a parse together with everything that was reported on the
/// way. A parse is clean when there are no diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed<T> {
    pub value: T,
    pub diagnostics: Vec<Error>,
}

impl<T> Parsed<T> {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Fails with the first diagnostic, if any.
    pub fn into_result(self) -> Result<T> {
        match self.diagnostics.into_iter().next() {
            Some(error) => Err(error),
            None => Ok(self.value),
        }
    }
}

pub struct Parser<'a> {
    scanner: ReactionScanner<'a>,
    lookahead: Option<Token<'a>>,
    options: ParseOptions,
    diagnostics: Vec<Error>,
}

pub fn parse(source: &str) -> Parsed<System> {
    Parser::new(source).parse_system()
}

pub fn parse_with_options(source: &str, options: ParseOptions) -> Parsed<System> {
    Parser::with_options(source, options).parse_system()
}

pub fn parse_molecule(source: &str) -> Parsed<Option<Molecule>> {
    Parser::new(source).parse_molecule()
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self::with_options(source, ParseOptions::default())
    }

    pub fn with_options(source: &'a str, options: ParseOptions) -> Self {
        Parser {
            scanner: ReactionScanner::new(source),
            lookahead: None,
            options,
            diagnostics: Vec::new(),
        }
    }

    /// Parses reactions joined by `\\` and a newline. A malformed reaction is
    /// reported and skipped up to the next continuation; the others are kept,
    /// including a complete reaction followed by a malformed separator.
    pub fn parse_system(mut self) -> Parsed<System> {
        let mut system = System::new();

        self.skip_newlines();
        if self.peek().is_some() {
            loop {
                match self.equation() {
                    Ok(reaction) => system.add_reaction(reaction),
                    Err(error) => {
                        self.report(error);
                        if !self.recover() {
                            break;
                        }
                        continue;
                    }
                }
                match self.separator() {
                    Ok(true) => {}
                    Ok(false) => break,
                    Err(error) => {
                        self.report(error);
                        if !self.recover() {
                            break;
                        }
                    }
                }
            }
        }

        tracing::debug!(
            reactions = system.len(),
            diagnostics = self.diagnostics.len(),
            "parsed reaction system"
        );
        self.finish(system)
    }

    /// Parses a single molecule such as `H_2O`. Anything after the molecule is
    /// reported, but the molecule itself is kept.
    pub fn parse_molecule(mut self) -> Parsed<Option<Molecule>> {
        let molecule = match self.molecule() {
            Ok(molecule) => Some(molecule),
            Err(error) => {
                self.report(error);
                None
            }
        };

        if molecule.is_some() {
            self.skip_newlines();
            if self.peek().is_some() {
                let error = self.unexpected("end of input");
                self.report(error);
            }
        }

        self.finish(molecule)
    }

    fn finish<T>(self, value: T) -> Parsed<T> {
        Parsed {
            value,
            diagnostics: self.diagnostics,
        }
    }

    fn report(&mut self, error: Error) {
        tracing::warn!(%error, "reaction input");
        self.diagnostics.push(error);
    }

    fn peek(&mut self) -> Option<Token<'a>> {
        while self.lookahead.is_none() {
            match self.scanner.next()? {
                Ok(token) => self.lookahead = Some(token),
                Err(error) => self.report(error),
            }
        }
        self.lookahead
    }

    fn peek_kind(&mut self) -> Option<TokenKind<'a>> {
        self.peek().map(|token| token.kind)
    }

    fn next_token(&mut self) -> Option<Token<'a>> {
        let token = self.peek();
        self.lookahead = None;
        token
    }

    fn unexpected(&mut self, expected: &'static str) -> Error {
        match self.peek() {
            Some(token) => Error::SyntaxError {
                found: token.to_string(),
                expected,
                position: token.position,
            },
            None => Error::SyntaxError {
                found: "end of input".to_owned(),
                expected,
                position: self.scanner.position(),
            },
        }
    }

    fn expect(&mut self, kind: TokenKind<'static>, expected: &'static str) -> Result<Token<'a>> {
        match self.peek() {
            Some(token) if token.kind == kind => {
                self.lookahead = None;
                Ok(token)
            }
            _ => Err(self.unexpected(expected)),
        }
    }

    fn skip_newlines(&mut self) {
        while self.peek_kind() == Some(TokenKind::Newline) {
            self.next_token();
        }
    }

    /// Discards tokens through the next `\\` newline pair. Returns false when
    /// the input ran out first.
    fn recover(&mut self) -> bool {
        while let Some(token) = self.next_token() {
            if token.kind == TokenKind::UNewline && self.peek_kind() == Some(TokenKind::Newline) {
                self.skip_newlines();
                return true;
            }
        }
        false
    }

    /// After an equation: `\\` newline means another equation follows,
    /// trailing newlines or the end of input finish the system.
    fn separator(&mut self) -> Result<bool> {
        match self.peek_kind() {
            None => Ok(false),
            Some(TokenKind::Newline) => {
                self.skip_newlines();
                match self.peek() {
                    None => Ok(false),
                    Some(_) => Err(self.unexpected("'\\\\' or end of input")),
                }
            }
            Some(TokenKind::UNewline) => {
                self.next_token();
                self.expect(TokenKind::Newline, "a newline after '\\\\'")?;
                self.skip_newlines();
                Ok(true)
            }
            Some(_) => Err(self.unexpected("'+', '\\\\' or end of input")),
        }
    }

    fn equation(&mut self) -> Result<Reaction> {
        let reactants = self.side()?;
        self.expect(TokenKind::Arrow, "'+' or '\\rightarrow'")?;
        let products = self.side()?;
        Ok(Reaction::new(reactants, products))
    }

    fn side(&mut self) -> Result<Side> {
        let mut side = Side::new();
        self.term(&mut side)?;
        while self.peek_kind() == Some(TokenKind::Plus) {
            self.next_token();
            self.term(&mut side)?;
        }
        Ok(side)
    }

    /// Parses one molecule with its coefficient and adds it to `side`.
    fn term(&mut self, side: &mut Side) -> Result<()> {
        let position = match self.peek() {
            Some(token) => token.position,
            None => self.scanner.position(),
        };
        let (molecule, coefficient) = self.molecules()?;
        match self.options.merge {
            MergePolicy::Distinct => side.add(molecule, coefficient),
            MergePolicy::Combine => {
                let found = match coefficient {
                    1 => format!("'{molecule}'"),
                    _ => format!("'{coefficient}{molecule}'"),
                };
                if side.combine(molecule, coefficient).is_none() {
                    return Err(Error::SyntaxError {
                        found,
                        expected: "a combined coefficient no larger than 4294967295",
                        position,
                    });
                }
            }
        }
        Ok(())
    }

    /// A molecule with an optional leading coefficient.
    fn molecules(&mut self) -> Result<(Molecule, u32)> {
        let coefficient = match self.peek_kind() {
            Some(TokenKind::Number(_)) => self.number()?,
            _ => 1,
        };
        Ok((self.molecule()?, coefficient))
    }

    fn molecule(&mut self) -> Result<Molecule> {
        let mut molecule = Molecule::new();
        loop {
            let symbol = match self.peek_kind() {
                Some(TokenKind::Element(symbol)) => symbol,
                _ if molecule.is_empty() => return Err(self.unexpected("an element symbol")),
                _ => return Ok(molecule),
            };
            self.next_token();
            let count = self.atom_count()?;
            molecule.add_element(symbol, count);
        }
    }

    /// The count after an element: `_N`, `_{N}`, a bare `N`, or nothing.
    fn atom_count(&mut self) -> Result<u32> {
        match self.peek_kind() {
            Some(TokenKind::Subscript) => {
                self.next_token();
                match self.peek_kind() {
                    Some(TokenKind::Number(_)) => self.number(),
                    Some(TokenKind::LBrace) => {
                        self.next_token();
                        let count = match self.peek_kind() {
                            Some(TokenKind::Number(_)) => self.number()?,
                            _ => return Err(self.unexpected("a number")),
                        };
                        self.expect(TokenKind::RBrace, "'}'")?;
                        Ok(count)
                    }
                    _ => Err(self.unexpected("a number or '{'")),
                }
            }
            Some(TokenKind::Number(_)) => self.number(),
            _ => Ok(1),
        }
    }

    /// Consumes a number token, which must hold a positive `u32`.
    fn number(&mut self) -> Result<u32> {
        let parsed = match self.peek_kind() {
            Some(TokenKind::Number(digits)) => digits.parse::<u32>().ok().filter(|&n| n > 0),
            _ => None,
        };
        match parsed {
            Some(n) => {
                self.next_token();
                Ok(n)
            }
            None => Err(self.unexpected("a number between 1 and 4294967295")),
        }
    }
}

impl FromStr for System {
    type Err = Error;

    fn from_str(source: &str) -> Result<Self> {
        parse(source).into_result()
    }
}

impl FromStr for Molecule {
    type Err = Error;

    fn from_str(source: &str) -> Result<Self> {
        parse_molecule(source)
            .into_result()?
            .ok_or_else(|| Error::SyntaxError {
                found: "end of input".to_owned(),
                expected: "an element symbol",
                position: Position::start(),
            })
    }
}
