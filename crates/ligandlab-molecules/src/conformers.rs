//! Conformation generation for one ligand.
//!
//! Two geometries come out of every run: a raw embedding and a
//! force-field-relaxed one, each from its own fixed seed so repeated
//! runs of the same compound produce identical coordinates.

use ligandlab_chem::embed::{embed, EmbedConfig};
use ligandlab_chem::pdb::write_pdb_block;
use ligandlab_chem::smiles::parse_smiles;
use ligandlab_chem::uff::{ForceField, MinimizeConfig};
use ligandlab_chem::{Conformer, Molecule};
use ligandlab_common::GeometryError;
use tracing::{debug, instrument};

/// Seed for the unrelaxed reference geometry.
pub const INITIAL_SEED: u64 = 1;
/// Seed for the geometry that gets force-field relaxation.
pub const PREPARED_SEED: u64 = 42;

/// A molecule with explicit hydrogens and one set of 3D coordinates.
#[derive(Debug, Clone)]
pub struct Ligand3d {
    pub molecule: Molecule,
    pub conformer: Conformer,
}

impl Ligand3d {
    pub fn to_pdb_block(&self, title: &str) -> Result<String, GeometryError> {
        write_pdb_block(&self.molecule, &self.conformer, title)
    }
}

/// Parse, protonate, and embed without any relaxation.
#[instrument(skip(smiles))]
pub fn initial_conformation(smiles: &str) -> Result<Ligand3d, GeometryError> {
    let molecule = parse_smiles(smiles)?.add_hydrogens();
    let conformer = embed(&molecule, EmbedConfig { seed: INITIAL_SEED })?;
    Ok(Ligand3d { molecule, conformer })
}

/// Parse, protonate, embed from its own seed, then relax with the force
/// field. This is the geometry meant for downstream docking.
#[instrument(skip(smiles))]
pub fn prepared_conformation(smiles: &str) -> Result<Ligand3d, GeometryError> {
    let molecule = parse_smiles(smiles)?.add_hydrogens();
    let mut conformer = embed(&molecule, EmbedConfig { seed: PREPARED_SEED })?;

    let ff = ForceField::for_molecule(&molecule);
    let result = ff.minimize(&mut conformer, MinimizeConfig::default())?;
    debug!(
        initial_energy = result.initial_energy,
        final_energy = result.final_energy,
        steps = result.steps,
        converged = result.converged,
        "relaxed prepared conformation"
    );

    Ok(Ligand3d { molecule, conformer })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_is_reproducible() {
        let a = initial_conformation("CCO").unwrap();
        let b = initial_conformation("CCO").unwrap();
        assert_eq!(a.conformer, b.conformer);
    }

    #[test]
    fn prepared_is_reproducible() {
        let a = prepared_conformation("CCO").unwrap();
        let b = prepared_conformation("CCO").unwrap();
        assert_eq!(a.conformer, b.conformer);
    }

    #[test]
    fn initial_and_prepared_geometries_differ() {
        let initial = initial_conformation("CCCO").unwrap();
        let prepared = prepared_conformation("CCCO").unwrap();
        assert!(initial.conformer.rmsd(&prepared.conformer).unwrap() > 1e-6);
    }

    #[test]
    fn hydrogens_are_explicit() {
        let ligand = initial_conformation("C").unwrap();
        assert_eq!(ligand.molecule.atom_count(), 5);
        assert_eq!(ligand.conformer.atom_count(), 5);
    }

    #[test]
    fn bad_smiles_surfaces_as_parse_error() {
        assert!(matches!(
            initial_conformation("not-a-smiles!"),
            Err(GeometryError::Parse(_))
        ));
    }

    #[test]
    fn pdb_block_renders() {
        let ligand = prepared_conformation("CCO").unwrap();
        let block = ligand.to_pdb_block("prepared").unwrap();
        assert!(block.starts_with("COMPND    prepared"));
        assert!(block.ends_with("END\n"));
    }
}
