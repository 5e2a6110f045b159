//! Molecular graph with explicit-hydrogen support.

use crate::element;

/// Bond order classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BondOrder {
    Single,
    Double,
    Triple,
    Aromatic,
}

impl BondOrder {
    /// Numeric order for valence arithmetic.
    pub fn as_f64(self) -> f64 {
        match self {
            BondOrder::Single => 1.0,
            BondOrder::Double => 2.0,
            BondOrder::Triple => 3.0,
            BondOrder::Aromatic => 1.5,
        }
    }
}

/// One atom of the graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atom {
    pub atomic_number: u8,
    pub formal_charge: i8,
    pub is_aromatic: bool,
    /// Hydrogens implied by valence; zero once [`Molecule::add_hydrogens`] ran.
    pub implicit_hydrogens: u8,
}

/// An edge between two atoms, by index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bond {
    pub a: usize,
    pub b: usize,
    pub order: BondOrder,
}

impl Bond {
    /// The endpoint that is not `atom`.
    pub fn other(&self, atom: usize) -> usize {
        if self.a == atom { self.b } else { self.a }
    }
}

/// Molecular graph: atoms, bonds, and a derived adjacency list.
#[derive(Debug, Clone)]
pub struct Molecule {
    pub atoms: Vec<Atom>,
    pub bonds: Vec<Bond>,
    /// `adjacency[i]` lists `(neighbor_atom, bond_index)` pairs.
    pub adjacency: Vec<Vec<(usize, usize)>>,
}

impl Molecule {
    pub fn new(atoms: Vec<Atom>, bonds: Vec<Bond>) -> Self {
        let mut adjacency = vec![Vec::new(); atoms.len()];
        for (bi, bond) in bonds.iter().enumerate() {
            adjacency[bond.a].push((bond.b, bi));
            adjacency[bond.b].push((bond.a, bi));
        }
        Molecule { atoms, bonds, adjacency }
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    /// Graph degree (explicit bonds only).
    pub fn degree(&self, atom: usize) -> usize {
        self.adjacency[atom].len()
    }

    /// Number of non-hydrogen neighbors.
    pub fn heavy_degree(&self, atom: usize) -> usize {
        self.adjacency[atom]
            .iter()
            .filter(|&&(n, _)| self.atoms[n].atomic_number != 1)
            .count()
    }

    /// Whether any bond at `atom` has the given order.
    pub fn has_bond_of_order(&self, atom: usize, order: BondOrder) -> bool {
        self.adjacency[atom].iter().any(|&(_, bi)| self.bonds[bi].order == order)
    }

    /// Hydrogens on `atom`: explicit H neighbors plus any implicit count.
    pub fn hydrogen_count(&self, atom: usize) -> usize {
        let explicit = self.adjacency[atom]
            .iter()
            .filter(|&&(n, _)| self.atoms[n].atomic_number == 1)
            .count();
        explicit + self.atoms[atom].implicit_hydrogens as usize
    }

    /// Sum of atomic weights, counting implicit hydrogens.
    pub fn molecular_weight(&self) -> f64 {
        let heavy: f64 = self
            .atoms
            .iter()
            .map(|a| element::atomic_weight(a.atomic_number))
            .sum();
        let implicit_h: usize = self
            .atoms
            .iter()
            .map(|a| a.implicit_hydrogens as usize)
            .sum();
        heavy + implicit_h as f64 * element::atomic_weight(1)
    }

    /// Convert every implicit hydrogen into an explicit H atom with a single
    /// bond to its parent. Returns a new graph; the input order of heavy
    /// atoms is preserved, hydrogens are appended at the end.
    pub fn add_hydrogens(&self) -> Molecule {
        let mut atoms = self.atoms.clone();
        let mut bonds = self.bonds.clone();

        for parent in 0..self.atoms.len() {
            let count = atoms[parent].implicit_hydrogens;
            atoms[parent].implicit_hydrogens = 0;
            for _ in 0..count {
                let h_idx = atoms.len();
                atoms.push(Atom {
                    atomic_number: 1,
                    formal_charge: 0,
                    is_aromatic: false,
                    implicit_hydrogens: 0,
                });
                bonds.push(Bond { a: parent, b: h_idx, order: BondOrder::Single });
            }
        }

        Molecule::new(atoms, bonds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smiles::parse_smiles;

    #[test]
    fn adjacency_is_symmetric() {
        let mol = parse_smiles("CCO").unwrap();
        assert_eq!(mol.atom_count(), 3);
        assert_eq!(mol.bond_count(), 2);
        assert_eq!(mol.degree(1), 2);
        assert_eq!(mol.adjacency[0], vec![(1, 0)]);
    }

    #[test]
    fn ethanol_weight_matches_formula() {
        // C2H6O = 46.069
        let mol = parse_smiles("CCO").unwrap();
        assert!((mol.molecular_weight() - 46.069).abs() < 0.01);
        // Weight is unchanged by making hydrogens explicit.
        let explicit = mol.add_hydrogens();
        assert!((explicit.molecular_weight() - 46.069).abs() < 0.01);
    }

    #[test]
    fn add_hydrogens_expands_graph() {
        let mol = parse_smiles("C").unwrap().add_hydrogens();
        assert_eq!(mol.atom_count(), 5);
        assert_eq!(mol.bond_count(), 4);
        assert_eq!(mol.hydrogen_count(0), 4);
        assert_eq!(mol.heavy_degree(0), 0);
        assert!(mol.atoms.iter().all(|a| a.implicit_hydrogens == 0));
    }

    #[test]
    fn hydrogen_count_mixes_implicit_and_explicit() {
        let mol = parse_smiles("CO").unwrap();
        assert_eq!(mol.hydrogen_count(0), 3);
        assert_eq!(mol.hydrogen_count(1), 1);
    }
}
