//! Operator sugar for writing reactions directly in Rust.
//!
//! ```
//! use reactions::equation::{builder::SystemBuilder, Element};
//!
//! let [c, h, o] = [Element::new("C"), Element::new("H"), Element::new("O")];
//! let glucose = (c.clone() / 6) * (h.clone() / 12) * (o.clone() / 6);
//! let oxygen = o.clone() / 2;
//! let carbon_dioxide = c * (o.clone() / 2);
//! let water = (h / 2) * o;
//!
//! let mut builder = SystemBuilder::new();
//! builder.reaction(glucose + 6 * oxygen, 6 * carbon_dioxide + 6 * water);
//! let system = builder.build();
//! assert_eq!(
//!     system.to_string(),
//!     r"C_6H_{12}O_6 + 6O_2 \rightarrow 6CO_2 + 6H_2O"
//! );
//! ```

use std::ops::{Add, Div, Mul};

use super::{Element, Molecule, Reaction, Side, System};

/// Collects reactions into a [`System`] one explicit call at a time.
#[derive(Debug, Default)]
pub struct SystemBuilder {
    system: System,
}

impl SystemBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reaction(&mut self, reactants: impl Into<Side>, products: impl Into<Side>) -> &mut Self {
        self.add(Reaction::new(reactants.into(), products.into()))
    }

    pub fn add(&mut self, reaction: Reaction) -> &mut Self {
        self.system.add_reaction(reaction);
        self
    }

    pub fn build(self) -> System {
        self.system
    }
}

impl Side {
    pub fn yields(self, products: impl Into<Side>) -> Reaction {
        Reaction::new(self, products.into())
    }
}

impl From<Element> for Molecule {
    fn from(element: Element) -> Self {
        element / 1
    }
}

impl From<Molecule> for Side {
    fn from(molecule: Molecule) -> Self {
        1 * molecule
    }
}

/// `H / 2` is the molecule `H_2`.
impl Div<u32> for Element {
    type Output = Molecule;

    fn div(self, count: u32) -> Molecule {
        let mut molecule = Molecule::new();
        molecule.add_element(self, count);
        molecule
    }
}

impl Mul<Element> for Element {
    type Output = Molecule;

    fn mul(self, other: Element) -> Molecule {
        Molecule::from(self) * other
    }
}

impl Mul<Molecule> for Element {
    type Output = Molecule;

    fn mul(self, other: Molecule) -> Molecule {
        Molecule::from(self) * other
    }
}

impl Mul<Element> for Molecule {
    type Output = Molecule;

    fn mul(mut self, element: Element) -> Molecule {
        self.add_element(element, 1);
        self
    }
}

impl Mul<Molecule> for Molecule {
    type Output = Molecule;

    fn mul(mut self, other: Molecule) -> Molecule {
        for (element, count) in other.elements {
            self.add_element(element, count);
        }
        self
    }
}

/// `2 * H_2O` puts two water molecules on a side.
impl Mul<Molecule> for u32 {
    type Output = Side;

    fn mul(self, molecule: Molecule) -> Side {
        let mut side = Side::new();
        Side::add(&mut side, molecule, self);
        side
    }
}

impl Add<Molecule> for Molecule {
    type Output = Side;

    fn add(self, other: Molecule) -> Side {
        Side::from(self) + other
    }
}

impl Add<Side> for Molecule {
    type Output = Side;

    fn add(self, other: Side) -> Side {
        Side::from(self) + other
    }
}

impl Add<Molecule> for Side {
    type Output = Side;

    fn add(mut self, molecule: Molecule) -> Side {
        Side::add(&mut self, molecule, 1);
        self
    }
}

impl Add<Side> for Side {
    type Output = Side;

    fn add(mut self, other: Side) -> Side {
        self.molecules.extend(other.molecules);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equation::parser::parse;

    #[test]
    fn test_sugar_matches_parser() {
        let [h, o] = [Element::new("H"), Element::new("O")];
        let hydrogen = h.clone() / 2;
        let oxygen = o.clone() / 2;
        let water = (h / 2) * o;

        let reaction = (2 * hydrogen + oxygen).yields(2 * water);
        let mut builder = SystemBuilder::new();
        builder.add(reaction);

        let parsed = parse(r"2H_2 + O_2 \rightarrow 2H_2O").into_result().unwrap();
        assert_eq!(builder.build(), parsed);
    }

    #[test]
    fn test_element_product() {
        let elements = Element::many(&["Na", "Cl"]);
        let salt = elements[0].clone() * elements[1].clone();
        assert_eq!(salt.to_string(), "NaCl");
    }

    #[test]
    fn test_molecule_product_overwrites() {
        let [c, h] = [Element::new("C"), Element::new("H")];
        let molecule = (c.clone() / 2) * (h / 6) * (c / 3);
        assert_eq!(molecule.to_string(), "C_3H_6");
    }

    #[test]
    fn test_side_order() {
        let [h, o, n] = [Element::new("H"), Element::new("O"), Element::new("N")];
        let side = (h / 2) + (2 * (o / 2) + Molecule::from(n));
        assert_eq!(side.to_string(), "H_2 + 2O_2 + N");
    }

    #[test]
    fn test_builder_chains() {
        let [h, o] = [Element::new("H"), Element::new("O")];
        let mut builder = SystemBuilder::new();
        builder
            .reaction(h.clone() / 2, 2 * Molecule::from(h.clone()))
            .reaction(o.clone() / 2, 2 * Molecule::from(o));
        let system = builder.build();
        assert_eq!(system.len(), 2);
        assert_eq!(
            system.to_string(),
            "H_2 \\rightarrow 2H\\\\ \nO_2 \\rightarrow 2O"
        );
    }
}
