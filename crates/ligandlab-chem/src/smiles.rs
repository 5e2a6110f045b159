//! SMILES parser covering the subset ChEMBL canonical strings use:
//! organic-subset atoms, bracket atoms with charge and H count, branches,
//! ring closures (including `%nn`), and aromatic lowercase forms.
//!
//! Stereo markers (`/`, `\`, `@`) are accepted and ignored; the pipeline
//! embeds 3D coordinates from the graph alone.

use crate::element;
use crate::molecule::{Atom, Bond, BondOrder, Molecule};
use ligandlab_common::GeometryError;

/// Parse a SMILES string into a molecular graph with implicit hydrogens
/// filled on organic-subset atoms.
pub fn parse_smiles(input: &str) -> Result<Molecule, GeometryError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(GeometryError::Parse("empty SMILES string".into()));
    }

    let mut parser = Parser::new(trimmed);
    parser.run()?;
    parser.finish()
}

struct Parser<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    input: &'a str,
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
    /// Atoms written in brackets keep their H count as given.
    from_bracket: Vec<bool>,
    /// Stack of attachment points for branch open/close.
    stack: Vec<usize>,
    prev: Option<usize>,
    pending_bond: Option<BondOrder>,
    /// Open ring-closure digits: digit -> (atom, bond at opening).
    ring_open: std::collections::HashMap<u8, (usize, Option<BondOrder>)>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Parser {
            chars: input.chars().peekable(),
            input,
            atoms: Vec::new(),
            bonds: Vec::new(),
            from_bracket: Vec::new(),
            stack: Vec::new(),
            prev: None,
            pending_bond: None,
            ring_open: std::collections::HashMap::new(),
        }
    }

    fn err(&self, msg: impl Into<String>) -> GeometryError {
        GeometryError::Parse(format!("{} in {:?}", msg.into(), self.input))
    }

    fn run(&mut self) -> Result<(), GeometryError> {
        while let Some(&c) = self.chars.peek() {
            match c {
                '-' => {
                    self.chars.next();
                    self.pending_bond = Some(BondOrder::Single);
                }
                '=' => {
                    self.chars.next();
                    self.pending_bond = Some(BondOrder::Double);
                }
                '#' => {
                    self.chars.next();
                    self.pending_bond = Some(BondOrder::Triple);
                }
                ':' => {
                    self.chars.next();
                    self.pending_bond = Some(BondOrder::Aromatic);
                }
                '/' | '\\' => {
                    // Cis/trans markers; directionality does not matter here.
                    self.chars.next();
                    self.pending_bond = Some(BondOrder::Single);
                }
                '(' => {
                    self.chars.next();
                    let prev = self
                        .prev
                        .ok_or_else(|| self.err("branch before any atom"))?;
                    self.stack.push(prev);
                }
                ')' => {
                    self.chars.next();
                    let prev = self
                        .stack
                        .pop()
                        .ok_or_else(|| self.err("unmatched closing parenthesis"))?;
                    self.prev = Some(prev);
                }
                '.' => {
                    self.chars.next();
                    self.prev = None;
                    self.pending_bond = None;
                }
                '%' => {
                    self.chars.next();
                    let d1 = self.next_digit()?;
                    let d2 = self.next_digit()?;
                    self.close_ring(d1 * 10 + d2)?;
                }
                '0'..='9' => {
                    self.chars.next();
                    self.close_ring(c as u8 - b'0')?;
                }
                '[' => {
                    self.chars.next();
                    self.bracket_atom()?;
                }
                _ => self.organic_atom()?,
            }
        }

        if !self.stack.is_empty() {
            return Err(self.err("unmatched opening parenthesis"));
        }
        if !self.ring_open.is_empty() {
            return Err(self.err("unclosed ring bond"));
        }
        Ok(())
    }

    fn peek_digit(&mut self) -> Option<u8> {
        self.chars
            .peek()
            .filter(|c| c.is_ascii_digit())
            .map(|&c| c as u8 - b'0')
    }

    fn next_digit(&mut self) -> Result<u8, GeometryError> {
        match self.chars.next() {
            Some(c @ '0'..='9') => Ok(c as u8 - b'0'),
            _ => Err(self.err("expected digit after %")),
        }
    }

    fn close_ring(&mut self, label: u8) -> Result<(), GeometryError> {
        let here = self.prev.ok_or_else(|| self.err("ring digit before any atom"))?;
        let bond = self.pending_bond.take();
        match self.ring_open.remove(&label) {
            Some((there, open_bond)) => {
                if there == here {
                    return Err(self.err("ring bond closes on its own atom"));
                }
                let order = bond.or(open_bond).unwrap_or_else(|| {
                    if self.atoms[here].is_aromatic && self.atoms[there].is_aromatic {
                        BondOrder::Aromatic
                    } else {
                        BondOrder::Single
                    }
                });
                self.bonds.push(Bond { a: there, b: here, order });
            }
            None => {
                self.ring_open.insert(label, (here, bond));
            }
        }
        Ok(())
    }

    /// Organic-subset atom: B, C, N, O, P, S, F, Cl, Br, I and aromatic
    /// b, c, n, o, p, s.
    fn organic_atom(&mut self) -> Result<(), GeometryError> {
        let c = self.chars.next().ok_or_else(|| self.err("unexpected end"))?;
        let (symbol, aromatic): (String, bool) = match c {
            'C' => {
                if self.chars.peek() == Some(&'l') {
                    self.chars.next();
                    ("Cl".into(), false)
                } else {
                    ("C".into(), false)
                }
            }
            'B' => {
                if self.chars.peek() == Some(&'r') {
                    self.chars.next();
                    ("Br".into(), false)
                } else {
                    ("B".into(), false)
                }
            }
            'N' | 'O' | 'P' | 'S' | 'F' | 'I' => (c.to_string(), false),
            'b' | 'c' | 'n' | 'o' | 'p' | 's' => (c.to_ascii_uppercase().to_string(), true),
            other => return Err(self.err(format!("unexpected character {other:?}"))),
        };

        let elem = element::by_symbol(&symbol)
            .ok_or_else(|| self.err(format!("unknown element {symbol:?}")))?;
        self.push_atom(
            Atom {
                atomic_number: elem.number,
                formal_charge: 0,
                is_aromatic: aromatic,
                implicit_hydrogens: 0,
            },
            false,
        );
        Ok(())
    }

    /// Bracket atom: `[<isotope><symbol><chiral><Hn><charge>]`. Isotope and
    /// chirality are parsed and dropped.
    fn bracket_atom(&mut self) -> Result<(), GeometryError> {
        // Optional isotope digits.
        while matches!(self.chars.peek(), Some('0'..='9')) {
            self.chars.next();
        }

        let first = self
            .chars
            .next()
            .ok_or_else(|| self.err("unterminated bracket atom"))?;
        if !first.is_ascii_alphabetic() {
            return Err(self.err(format!("bad bracket atom start {first:?}")));
        }
        let aromatic = first.is_ascii_lowercase();
        let mut symbol = first.to_ascii_uppercase().to_string();
        if let Some(&second) = self.chars.peek() {
            if second.is_ascii_lowercase() {
                let two = format!("{symbol}{second}");
                if element::by_symbol(&two).is_some() {
                    self.chars.next();
                    symbol = two;
                }
            }
        }
        let elem = element::by_symbol(&symbol)
            .ok_or_else(|| self.err(format!("unknown element {symbol:?}")))?;

        let mut hydrogens: u8 = 0;
        let mut charge: i8 = 0;
        loop {
            match self.chars.next() {
                Some(']') => break,
                Some('@') => {} // chirality, ignored
                Some('H') => {
                    hydrogens = 1;
                    if let Some(d) = self.peek_digit() {
                        self.chars.next();
                        hydrogens = d;
                    }
                }
                Some('+') => {
                    charge = 1;
                    while self.chars.peek() == Some(&'+') {
                        self.chars.next();
                        charge += 1;
                    }
                    if let Some(d) = self.peek_digit() {
                        self.chars.next();
                        charge = d as i8;
                    }
                }
                Some('-') => {
                    charge = -1;
                    while self.chars.peek() == Some(&'-') {
                        self.chars.next();
                        charge -= 1;
                    }
                    if let Some(d) = self.peek_digit() {
                        self.chars.next();
                        charge = -(d as i8);
                    }
                }
                Some(other) => {
                    return Err(self.err(format!("unexpected {other:?} in bracket atom")))
                }
                None => return Err(self.err("unterminated bracket atom")),
            }
        }

        self.push_atom(
            Atom {
                atomic_number: elem.number,
                formal_charge: charge,
                is_aromatic: aromatic,
                implicit_hydrogens: hydrogens,
            },
            true,
        );
        Ok(())
    }

    fn push_atom(&mut self, atom: Atom, bracket: bool) {
        let idx = self.atoms.len();
        let aromatic = atom.is_aromatic;
        self.atoms.push(atom);
        self.from_bracket.push(bracket);

        if let Some(prev) = self.prev {
            let order = self.pending_bond.take().unwrap_or_else(|| {
                if aromatic && self.atoms[prev].is_aromatic {
                    BondOrder::Aromatic
                } else {
                    BondOrder::Single
                }
            });
            self.bonds.push(Bond { a: prev, b: idx, order });
        }
        self.prev = Some(idx);
        self.pending_bond = None;
    }

    /// Fill implicit hydrogens on organic-subset atoms and build the graph.
    /// Bracket atoms already carry their explicit H count.
    fn finish(self) -> Result<Molecule, GeometryError> {
        let mut atoms = self.atoms;

        for (i, atom) in atoms.iter_mut().enumerate() {
            if self.from_bracket[i] {
                continue;
            }
            let elem = element::by_number(atom.atomic_number)
                .ok_or_else(|| GeometryError::Parse(format!(
                    "no valence data for atomic number {}",
                    atom.atomic_number
                )))?;
            let order_sum: f64 = self
                .bonds
                .iter()
                .filter(|b| b.a == i || b.b == i)
                .map(|b| b.order.as_f64())
                .sum();
            // Aromatic atoms with two ring bonds sum to 3.0 and round to 3,
            // which leaves one H on aromatic carbon and none on pyridine N.
            let used = order_sum.round() as usize;
            atom.implicit_hydrogens =
                (elem.valence as usize).saturating_sub(used) as u8;
        }

        Ok(Molecule::new(atoms, self.bonds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::molecule::BondOrder;

    #[test]
    fn linear_chain() {
        let mol = parse_smiles("CCO").unwrap();
        assert_eq!(mol.atom_count(), 3);
        assert_eq!(mol.atoms[0].implicit_hydrogens, 3);
        assert_eq!(mol.atoms[1].implicit_hydrogens, 2);
        assert_eq!(mol.atoms[2].implicit_hydrogens, 1);
    }

    #[test]
    fn bond_orders() {
        let mol = parse_smiles("C=C").unwrap();
        assert_eq!(mol.bonds[0].order, BondOrder::Double);
        assert_eq!(mol.atoms[0].implicit_hydrogens, 2);

        let mol = parse_smiles("C#N").unwrap();
        assert_eq!(mol.bonds[0].order, BondOrder::Triple);
        assert_eq!(mol.atoms[0].implicit_hydrogens, 1);
        assert_eq!(mol.atoms[1].implicit_hydrogens, 0);
    }

    #[test]
    fn branches() {
        // Isobutane: central carbon has three C neighbors and one H.
        let mol = parse_smiles("CC(C)C").unwrap();
        assert_eq!(mol.atom_count(), 4);
        assert_eq!(mol.degree(1), 3);
        assert_eq!(mol.atoms[1].implicit_hydrogens, 1);
    }

    #[test]
    fn benzene_ring() {
        let mol = parse_smiles("c1ccccc1").unwrap();
        assert_eq!(mol.atom_count(), 6);
        assert_eq!(mol.bond_count(), 6);
        assert!(mol.bonds.iter().all(|b| b.order == BondOrder::Aromatic));
        assert!(mol.atoms.iter().all(|a| a.implicit_hydrogens == 1));
        // C6H6 = 78.11
        assert!((mol.molecular_weight() - 78.11).abs() < 0.02);
    }

    #[test]
    fn pyridine_nitrogen_has_no_hydrogen() {
        let mol = parse_smiles("c1ccncc1").unwrap();
        let n = mol.atoms.iter().position(|a| a.atomic_number == 7).unwrap();
        assert_eq!(mol.atoms[n].implicit_hydrogens, 0);
    }

    #[test]
    fn pyrrole_bracket_nh() {
        let mol = parse_smiles("c1cc[nH]c1").unwrap();
        let n = mol.atoms.iter().position(|a| a.atomic_number == 7).unwrap();
        assert_eq!(mol.atoms[n].implicit_hydrogens, 1);
        assert!(mol.atoms[n].is_aromatic);
    }

    #[test]
    fn charged_bracket_atoms() {
        let mol = parse_smiles("[NH4+]").unwrap();
        assert_eq!(mol.atoms[0].formal_charge, 1);
        assert_eq!(mol.atoms[0].implicit_hydrogens, 4);

        let mol = parse_smiles("[O-]C").unwrap();
        assert_eq!(mol.atoms[0].formal_charge, -1);
        assert_eq!(mol.atoms[0].implicit_hydrogens, 0);
    }

    #[test]
    fn two_digit_ring_closure() {
        let mol = parse_smiles("C%10CCCCC%10").unwrap();
        assert_eq!(mol.atom_count(), 6);
        assert_eq!(mol.bond_count(), 6);
    }

    #[test]
    fn dot_separates_components() {
        let mol = parse_smiles("CC.O").unwrap();
        assert_eq!(mol.atom_count(), 3);
        assert_eq!(mol.bond_count(), 1);
    }

    #[test]
    fn stereo_markers_are_ignored() {
        let mol = parse_smiles("C/C=C/C").unwrap();
        assert_eq!(mol.atom_count(), 4);
        assert_eq!(mol.bonds[1].order, BondOrder::Double);

        let mol = parse_smiles("C[C@H](N)C(=O)O").unwrap();
        assert_eq!(mol.atom_count(), 6);
    }

    #[test]
    fn glucose_parses() {
        let mol = parse_smiles("OCC1OC(O)C(O)C(O)C1O").unwrap();
        assert_eq!(mol.atom_count(), 12);
        // C6H12O6 = 180.156
        assert!((mol.molecular_weight() - 180.156).abs() < 0.01);
    }

    #[test]
    fn malformed_inputs_fail() {
        assert!(parse_smiles("").is_err());
        assert!(parse_smiles("C(").is_err());
        assert!(parse_smiles("C)").is_err());
        assert!(parse_smiles("C1CC").is_err());
        assert!(parse_smiles("[Xx]").is_err());
        assert!(parse_smiles("C[").is_err());
    }
}
