//! Descriptor extraction for one parsed ligand.

use ligandlab_chem::descriptors::{crippen_logp, rotatable_bond_count, tpsa};
use ligandlab_chem::Molecule;
use serde::Serialize;

/// The four descriptors the classifier and scorer consume. Continuous
/// values are rounded to two decimals at extraction so every consumer
/// (thresholds, score, display) sees the same numbers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LigandFeatures {
    pub mw: f64,
    pub logp: f64,
    pub rotatable_bonds: u32,
    pub tpsa: f64,
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Compute all four descriptors from the molecular graph. Coordinates
/// play no role here.
pub fn extract(mol: &Molecule) -> LigandFeatures {
    LigandFeatures {
        mw: round2(mol.molecular_weight()),
        logp: round2(crippen_logp(mol)),
        rotatable_bonds: rotatable_bond_count(mol),
        tpsa: round2(tpsa(mol)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ligandlab_chem::smiles::parse_smiles;

    #[test]
    fn glucose_features() {
        let mol = parse_smiles("OCC1OC(O)C(O)C(O)C1O").unwrap();
        let f = extract(&mol);
        assert_eq!(f.mw, 180.16);
        assert_eq!(f.logp, -3.21);
        assert_eq!(f.rotatable_bonds, 1);
        assert_eq!(f.tpsa, 110.38);
    }

    #[test]
    fn features_unchanged_by_explicit_hydrogens() {
        let implicit = parse_smiles("CC(=O)Oc1ccccc1C(=O)O").unwrap();
        let explicit = implicit.add_hydrogens();
        assert_eq!(extract(&implicit), extract(&explicit));
    }

    #[test]
    fn rounding_is_two_decimals() {
        assert_eq!(round2(1.005001), 1.01);
        assert_eq!(round2(-3.2134), -3.21);
        assert_eq!(round2(180.156), 180.16);
    }
}
