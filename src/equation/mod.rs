use std::fmt;

use itertools::Itertools;

pub mod builder;
pub mod error;
pub mod parser;
pub mod scanner;

/// A chemical element, identified by its symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Element {
    symbol: String,
}

/// Elements with their atom counts, in the order they were first added.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Molecule {
    elements: Vec<(Element, u32)>,
}

/// One side of a reaction: molecules with their stoichiometric coefficients.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Side {
    molecules: Vec<(Molecule, u32)>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reaction {
    pub reactants: Side,
    pub products: Side,
}

/// Reactions in the order they appear in the source.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct System {
    reactions: Vec<Reaction>,
}

impl Element {
    pub fn new(symbol: impl Into<String>) -> Self {
        Element {
            symbol: symbol.into(),
        }
    }

    pub fn many(symbols: &[&str]) -> Vec<Element> {
        symbols.iter().copied().map(Element::new).collect()
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }
}

impl From<&str> for Element {
    fn from(symbol: &str) -> Self {
        Element::new(symbol)
    }
}

impl Molecule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the count of `element`. An element that is already present keeps
    /// its place and takes the new count.
    pub fn add_element(&mut self, element: impl Into<Element>, count: u32) {
        let element = element.into();
        match self.elements.iter_mut().find(|(e, _)| *e == element) {
            Some((_, existing)) => *existing = count,
            None => self.elements.push((element, count)),
        }
    }

    pub fn elements(&self) -> impl Iterator<Item = (&Element, u32)> + '_ {
        self.elements.iter().map(|(element, count)| (element, *count))
    }

    pub fn count(&self, symbol: &str) -> Option<u32> {
        self.elements
            .iter()
            .find(|(element, _)| element.symbol() == symbol)
            .map(|&(_, count)| count)
    }

    /// Total number of atoms in one molecule.
    pub fn atom_count(&self) -> u32 {
        self.elements.iter().map(|&(_, count)| count).sum()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl Side {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new occurrence of `molecule`, even if an equal one is
    /// already on this side.
    pub fn add(&mut self, molecule: Molecule, coefficient: u32) {
        self.molecules.push((molecule, coefficient));
    }

    /// Adds `coefficient` to the entry equal to `molecule`, or appends it if
    /// there is none. Returns the resulting coefficient, or `None` without
    /// changing the side when the sum does not fit a `u32`.
    pub fn combine(&mut self, molecule: Molecule, coefficient: u32) -> Option<u32> {
        match self.molecules.iter_mut().find(|(m, _)| *m == molecule) {
            Some((_, existing)) => {
                *existing = existing.checked_add(coefficient)?;
                Some(*existing)
            }
            None => {
                self.molecules.push((molecule, coefficient));
                Some(coefficient)
            }
        }
    }

    pub fn molecules(&self) -> impl Iterator<Item = (&Molecule, u32)> + '_ {
        self.molecules
            .iter()
            .map(|(molecule, coefficient)| (molecule, *coefficient))
    }

    /// Coefficient-weighted atom totals per element, in first-seen order.
    pub fn atom_totals(&self) -> Vec<(Element, u32)> {
        let mut totals = Molecule::new();
        for (molecule, coefficient) in self.molecules() {
            for (element, count) in molecule.elements() {
                let total = totals.count(element.symbol()).unwrap_or(0);
                totals.add_element(
                    element.clone(),
                    total.saturating_add(coefficient.saturating_mul(count)),
                );
            }
        }
        totals.elements
    }

    pub fn len(&self) -> usize {
        self.molecules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.molecules.is_empty()
    }
}

impl Reaction {
    pub fn new(reactants: Side, products: Side) -> Self {
        Reaction {
            reactants,
            products,
        }
    }
}

impl System {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_reaction(&mut self, reaction: Reaction) {
        self.reactions.push(reaction);
    }

    pub fn reactions(&self) -> &[Reaction] {
        &self.reactions
    }

    pub fn len(&self) -> usize {
        self.reactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reactions.is_empty()
    }
}

impl<'a> IntoIterator for &'a System {
    type Item = &'a Reaction;
    type IntoIter = std::slice::Iter<'a, Reaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.reactions.iter()
    }
}

struct Subscript(u32);

impl fmt::Display for Subscript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            1 => Ok(()),
            n if n < 10 => write!(f, "_{n}"),
            n => write!(f, "_{{{n}}}"),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

impl fmt::Display for Molecule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (element, count) in self.elements() {
            write!(f, "{element}{}", Subscript(count))?;
        }
        Ok(())
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terms = self.molecules().format_with(" + ", |(molecule, coefficient), f| {
            if coefficient == 1 {
                f(&molecule)
            } else {
                f(&format_args!("{coefficient}{molecule}"))
            }
        });
        write!(f, "{terms}")
    }
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} \\rightarrow {}", self.reactants, self.products)
    }
}

impl fmt::Display for System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reactions.iter().format("\\\\ \n"))
    }
}
