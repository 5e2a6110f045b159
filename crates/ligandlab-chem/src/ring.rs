//! Ring membership via bridge detection.
//!
//! A bond is in a ring exactly when it is not a bridge of the molecular
//! graph, and an atom is in a ring when one of its bonds is. That is all
//! the descriptors need; no smallest-ring enumeration happens here.

use crate::molecule::Molecule;

/// `flags[i]` is true when bond `i` lies on a cycle.
pub fn ring_bond_flags(mol: &Molecule) -> Vec<bool> {
    let n = mol.atom_count();
    let mut flags = vec![true; mol.bond_count()];
    if n == 0 {
        return flags;
    }

    // Iterative DFS with discovery times and low links; a tree edge (u, v)
    // is a bridge when low[v] > disc[u].
    let mut disc = vec![usize::MAX; n];
    let mut low = vec![0usize; n];
    let mut timer = 0usize;

    for root in 0..n {
        if disc[root] != usize::MAX {
            continue;
        }
        // (atom, incoming bond index, next adjacency slot)
        let mut stack: Vec<(usize, Option<usize>, usize)> = vec![(root, None, 0)];
        disc[root] = timer;
        low[root] = timer;
        timer += 1;

        while let Some(frame) = stack.last_mut() {
            let (u, parent_bond) = (frame.0, frame.1);
            if frame.2 < mol.adjacency[u].len() {
                let (v, bi) = mol.adjacency[u][frame.2];
                frame.2 += 1;
                if Some(bi) == parent_bond {
                    continue;
                }
                if disc[v] == usize::MAX {
                    disc[v] = timer;
                    low[v] = timer;
                    timer += 1;
                    stack.push((v, Some(bi), 0));
                } else {
                    low[u] = low[u].min(disc[v]);
                }
            } else {
                stack.pop();
                if let Some(&(p, _, _)) = stack.last() {
                    low[p] = low[p].min(low[u]);
                    if let Some(pb) = parent_bond {
                        if low[u] > disc[p] {
                            flags[pb] = false;
                        }
                    }
                }
            }
        }
    }

    flags
}

/// `flags[i]` is true when atom `i` belongs to at least one ring.
pub fn ring_atom_flags(mol: &Molecule) -> Vec<bool> {
    let bond_flags = ring_bond_flags(mol);
    let mut flags = vec![false; mol.atom_count()];
    for (bi, bond) in mol.bonds.iter().enumerate() {
        if bond_flags[bi] {
            flags[bond.a] = true;
            flags[bond.b] = true;
        }
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smiles::parse_smiles;

    #[test]
    fn chain_has_no_rings() {
        let mol = parse_smiles("CCCCC").unwrap();
        assert!(ring_bond_flags(&mol).iter().all(|&f| !f));
        assert!(ring_atom_flags(&mol).iter().all(|&f| !f));
    }

    #[test]
    fn cyclohexane_is_all_ring() {
        let mol = parse_smiles("C1CCCCC1").unwrap();
        assert!(ring_bond_flags(&mol).iter().all(|&f| f));
        assert!(ring_atom_flags(&mol).iter().all(|&f| f));
    }

    #[test]
    fn toluene_methyl_is_acyclic() {
        let mol = parse_smiles("Cc1ccccc1").unwrap();
        let bonds = ring_bond_flags(&mol);
        let atoms = ring_atom_flags(&mol);
        // Bond 0 connects the methyl carbon to the ring.
        assert!(!bonds[0]);
        assert!(!atoms[0]);
        assert_eq!(atoms.iter().filter(|&&f| f).count(), 6);
    }

    #[test]
    fn biphenyl_linker_is_acyclic() {
        let mol = parse_smiles("c1ccc(-c2ccccc2)cc1").unwrap();
        let bonds = ring_bond_flags(&mol);
        assert_eq!(bonds.iter().filter(|&&f| !f).count(), 1);
        assert!(ring_atom_flags(&mol).iter().all(|&f| f));
    }

    #[test]
    fn fused_rings_share_a_ring_bond() {
        // Naphthalene: every bond is in a ring, including the fusion bond.
        let mol = parse_smiles("c1ccc2ccccc2c1").unwrap();
        assert!(ring_bond_flags(&mol).iter().all(|&f| f));
    }

    #[test]
    fn disconnected_components() {
        let mol = parse_smiles("C1CC1.CC").unwrap();
        let bonds = ring_bond_flags(&mol);
        assert_eq!(bonds.iter().filter(|&&f| f).count(), 3);
    }
}
