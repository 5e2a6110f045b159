//! Topological descriptors: Crippen logP, rotatable bonds, Ertl TPSA.
//! Molecular weight lives on [`Molecule`](crate::molecule::Molecule).
//!
//! All three work on the graph alone; 3D coordinates never enter.

use crate::molecule::{BondOrder, Molecule};
use crate::ring;

/// Per-atom bond-pattern summary used by the contribution tables.
struct AtomEnv {
    hydrogens: usize,
    singles: usize,
    doubles: usize,
    triples: usize,
    aromatics: usize,
    has_hetero_neighbor: bool,
}

fn atom_env(mol: &Molecule, i: usize) -> AtomEnv {
    let mut env = AtomEnv {
        hydrogens: mol.hydrogen_count(i),
        singles: 0,
        doubles: 0,
        triples: 0,
        aromatics: 0,
        has_hetero_neighbor: false,
    };
    for &(n, bi) in &mol.adjacency[i] {
        let z = mol.atoms[n].atomic_number;
        if z == 1 {
            continue;
        }
        if z != 6 {
            env.has_hetero_neighbor = true;
        }
        match mol.bonds[bi].order {
            BondOrder::Single => env.singles += 1,
            BondOrder::Double => env.doubles += 1,
            BondOrder::Triple => env.triples += 1,
            BondOrder::Aromatic => env.aromatics += 1,
        }
    }
    env
}

/// Wildman-Crippen logP from an abbreviated atom-contribution table.
/// Hydrogens contribute 0.1230 on carbon and -0.2677 on heteroatoms,
/// whether implicit or explicit.
pub fn crippen_logp(mol: &Molecule) -> f64 {
    const H_ON_CARBON: f64 = 0.1230;
    const H_ON_HETERO: f64 = -0.2677;

    let mut logp = 0.0;
    for (i, atom) in mol.atoms.iter().enumerate() {
        if atom.atomic_number == 1 {
            continue;
        }
        let env = atom_env(mol, i);
        let h_value = if atom.atomic_number == 6 { H_ON_CARBON } else { H_ON_HETERO };
        logp += env.hydrogens as f64 * h_value;

        logp += match atom.atomic_number {
            6 => {
                if atom.is_aromatic {
                    0.1581
                } else if env.has_hetero_neighbor {
                    -0.2035
                } else {
                    0.1441
                }
            }
            7 => {
                if atom.is_aromatic {
                    -0.3239
                } else {
                    match mol.heavy_degree(i) {
                        0 | 1 => -1.0190,
                        2 => -0.7096,
                        _ => -1.0270,
                    }
                }
            }
            8 => {
                if atom.is_aromatic {
                    0.2923
                } else if env.doubles >= 1 {
                    -0.1526
                } else if env.hydrogens >= 1 {
                    -0.2893
                } else {
                    -0.0684
                }
            }
            16 => {
                if atom.is_aromatic {
                    0.6237
                } else {
                    0.6482
                }
            }
            9 => 0.4202,
            17 => 0.6895,
            35 => 0.8456,
            53 => 0.8857,
            15 => 0.8612,
            _ => 0.0,
        };
    }
    logp
}

/// Count of rotatable bonds: acyclic single bonds between two heavy atoms
/// that each carry at least two heavy neighbors, excluding bonds whose
/// endpoint sits in a triple bond.
pub fn rotatable_bond_count(mol: &Molecule) -> u32 {
    let ring_bonds = ring::ring_bond_flags(mol);
    let mut count = 0;
    for (bi, bond) in mol.bonds.iter().enumerate() {
        if bond.order != BondOrder::Single || ring_bonds[bi] {
            continue;
        }
        let (a, b) = (bond.a, bond.b);
        if mol.atoms[a].atomic_number == 1 || mol.atoms[b].atomic_number == 1 {
            continue;
        }
        if mol.heavy_degree(a) < 2 || mol.heavy_degree(b) < 2 {
            continue;
        }
        if mol.has_bond_of_order(a, BondOrder::Triple)
            || mol.has_bond_of_order(b, BondOrder::Triple)
        {
            continue;
        }
        count += 1;
    }
    count
}

/// Ertl topological polar surface area from nitrogen and oxygen fragment
/// contributions.
pub fn tpsa(mol: &Molecule) -> f64 {
    let mut area = 0.0;
    for (i, atom) in mol.atoms.iter().enumerate() {
        let env = atom_env(mol, i);
        area += match atom.atomic_number {
            7 => nitrogen_contribution(atom.is_aromatic, atom.formal_charge, &env),
            8 => oxygen_contribution(atom.is_aromatic, atom.formal_charge, &env),
            _ => 0.0,
        };
    }
    area
}

fn nitrogen_contribution(aromatic: bool, charge: i8, env: &AtomEnv) -> f64 {
    let h = env.hydrogens;
    if aromatic {
        return if h >= 1 {
            if charge > 0 { 14.14 } else { 15.79 }
        } else if charge > 0 {
            4.10
        } else if env.aromatics >= 3 {
            4.41
        } else if env.singles >= 1 {
            4.93
        } else if env.doubles >= 1 {
            8.39
        } else {
            12.89
        };
    }
    if charge > 0 {
        return match h {
            0 => {
                if env.triples >= 1 {
                    4.36
                } else if env.doubles >= 1 {
                    3.01
                } else {
                    0.0
                }
            }
            1 => {
                if env.doubles >= 1 { 13.97 } else { 4.44 }
            }
            2 => {
                if env.doubles >= 1 { 25.59 } else { 16.61 }
            }
            _ => 27.64,
        };
    }
    if env.triples >= 1 {
        if env.doubles >= 1 { 13.60 } else { 23.79 }
    } else if env.doubles >= 2 {
        11.68
    } else if env.doubles == 1 {
        if h == 0 { 12.36 } else { 23.85 }
    } else {
        match h {
            0 => 3.24,
            1 => 12.03,
            _ => 26.02,
        }
    }
}

fn oxygen_contribution(aromatic: bool, charge: i8, env: &AtomEnv) -> f64 {
    if aromatic {
        13.14
    } else if charge < 0 {
        23.06
    } else if env.doubles >= 1 {
        17.07
    } else if env.hydrogens >= 1 {
        20.23
    } else {
        9.23
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smiles::parse_smiles;

    const GLUCOSE: &str = "OCC1OC(O)C(O)C(O)C1O";
    const ASPIRIN: &str = "CC(=O)Oc1ccccc1C(=O)O";

    #[test]
    fn glucose_logp_is_strongly_negative() {
        let mol = parse_smiles(GLUCOSE).unwrap();
        // 6 C next to O, 5 hydroxyl O, 1 ether O, 7 H on C, 5 H on O.
        let expected = 6.0 * -0.2035
            + 5.0 * -0.2893
            + -0.0684
            + 7.0 * 0.1230
            + 5.0 * -0.2677;
        assert!((crippen_logp(&mol) - expected).abs() < 1e-9);
    }

    #[test]
    fn alkane_logp_is_positive() {
        let mol = parse_smiles("CCCCCCCC").unwrap();
        assert!(crippen_logp(&mol) > 3.0);
    }

    #[test]
    fn logp_ignores_explicit_vs_implicit_hydrogens() {
        let implicit = parse_smiles(ASPIRIN).unwrap();
        let explicit = implicit.add_hydrogens();
        assert!((crippen_logp(&implicit) - crippen_logp(&explicit)).abs() < 1e-9);
    }

    #[test]
    fn glucose_has_one_rotatable_bond() {
        let mol = parse_smiles(GLUCOSE).unwrap();
        assert_eq!(rotatable_bond_count(&mol), 1);
    }

    #[test]
    fn octane_rotatable_bonds() {
        let mol = parse_smiles("CCCCCCCC").unwrap();
        assert_eq!(rotatable_bond_count(&mol), 5);
    }

    #[test]
    fn nitrile_bond_is_not_rotatable() {
        let mol = parse_smiles("CCCC#N").unwrap();
        assert_eq!(rotatable_bond_count(&mol), 1);
    }

    #[test]
    fn ring_bonds_are_not_rotatable() {
        let mol = parse_smiles("C1CCCCC1").unwrap();
        assert_eq!(rotatable_bond_count(&mol), 0);
    }

    #[test]
    fn glucose_tpsa() {
        let mol = parse_smiles(GLUCOSE).unwrap();
        // Five hydroxyls at 20.23 plus the ring ether at 9.23.
        assert!((tpsa(&mol) - 110.38).abs() < 1e-9);
    }

    #[test]
    fn aspirin_tpsa() {
        let mol = parse_smiles(ASPIRIN).unwrap();
        // Two carbonyls, one ester oxygen, one hydroxyl: 63.60.
        assert!((tpsa(&mol) - 63.60).abs() < 1e-9);
    }

    #[test]
    fn pyridine_versus_pyrrole_tpsa() {
        let pyridine = parse_smiles("c1ccncc1").unwrap();
        assert!((tpsa(&pyridine) - 12.89).abs() < 1e-9);

        let pyrrole = parse_smiles("c1cc[nH]c1").unwrap();
        assert!((tpsa(&pyrrole) - 15.79).abs() < 1e-9);
    }

    #[test]
    fn hydrocarbon_tpsa_is_zero() {
        let mol = parse_smiles("c1ccccc1").unwrap();
        assert_eq!(tpsa(&mol), 0.0);
    }
}
