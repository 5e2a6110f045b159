//! Serialize one molecule plus conformer as a PDB-format text block.
//!
//! Output is a single HETATM residue (`LIG`, chain A) followed by CONECT
//! records for every bond, which is what molecular viewers expect for a
//! small ligand.

use std::collections::HashMap;
use std::fmt::Write;

use ligandlab_common::GeometryError;

use crate::conformer::Conformer;
use crate::element;
use crate::molecule::Molecule;

/// Render the molecule as a PDB block. Fails when the conformer does not
/// match the molecule's atom list.
pub fn write_pdb_block(
    mol: &Molecule,
    conf: &Conformer,
    title: &str,
) -> Result<String, GeometryError> {
    conf.check_against(mol)?;

    let mut out = String::new();
    let _ = writeln!(out, "COMPND    {title}");

    // Per-element counters give names like C1, C2, O1.
    let mut seen: HashMap<u8, usize> = HashMap::new();
    for (i, atom) in mol.atoms.iter().enumerate() {
        let symbol = element::by_number(atom.atomic_number)
            .map(|e| e.symbol)
            .unwrap_or("X");
        let counter = seen.entry(atom.atomic_number).or_insert(0);
        *counter += 1;
        let name = format!("{symbol}{counter}");
        let [x, y, z] = conf.coords[i];
        let _ = writeln!(
            out,
            "{:6}{:5} {:<4}{:1}{:>3} {:1}{:>4}{:1}   {:8.3}{:8.3}{:8.3}{:6.2}{:6.2}          {:>2}",
            "HETATM",
            i + 1,
            name,
            "",
            "LIG",
            "A",
            1,
            "",
            x,
            y,
            z,
            1.00,
            0.00,
            symbol.to_uppercase(),
        );
    }

    // One CONECT line per atom with neighbors, serials 1-based.
    for i in 0..mol.atom_count() {
        if mol.adjacency[i].is_empty() {
            continue;
        }
        let _ = write!(out, "CONECT{:5}", i + 1);
        for &(n, _) in &mol.adjacency[i] {
            let _ = write!(out, "{:5}", n + 1);
        }
        let _ = writeln!(out);
    }

    out.push_str("END\n");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::{embed, EmbedConfig};
    use crate::smiles::parse_smiles;

    fn sample() -> (Molecule, Conformer) {
        let mol = parse_smiles("CCO").unwrap().add_hydrogens();
        let conf = embed(&mol, EmbedConfig { seed: 1 }).unwrap();
        (mol, conf)
    }

    #[test]
    fn block_structure() {
        let (mol, conf) = sample();
        let block = write_pdb_block(&mol, &conf, "ethanol").unwrap();

        let lines: Vec<&str> = block.lines().collect();
        assert_eq!(lines[0], "COMPND    ethanol");
        assert_eq!(
            lines.iter().filter(|l| l.starts_with("HETATM")).count(),
            mol.atom_count()
        );
        assert!(lines.iter().any(|l| l.starts_with("CONECT")));
        assert_eq!(*lines.last().unwrap(), "END");
    }

    #[test]
    fn hetatm_columns_are_fixed_width() {
        let (mol, conf) = sample();
        let block = write_pdb_block(&mol, &conf, "ethanol").unwrap();
        let first = block.lines().nth(1).unwrap();

        assert_eq!(&first[0..6], "HETATM");
        assert_eq!(first[6..11].trim(), "1");
        assert_eq!(first[12..16].trim(), "C1");
        assert_eq!(first[17..20].trim(), "LIG");
        assert_eq!(&first[21..22], "A");
        // Coordinate fields parse back as floats.
        assert!(first[30..38].trim().parse::<f64>().is_ok());
        assert!(first[38..46].trim().parse::<f64>().is_ok());
        assert!(first[46..54].trim().parse::<f64>().is_ok());
        assert_eq!(first[54..60].trim(), "1.00");
        assert_eq!(first[76..78].trim(), "C");
    }

    #[test]
    fn conect_serials_are_one_based() {
        let (mol, conf) = sample();
        let block = write_pdb_block(&mol, &conf, "ethanol").unwrap();
        let conect: Vec<&str> = block
            .lines()
            .filter(|l| l.starts_with("CONECT"))
            .collect();
        assert_eq!(conect.len(), mol.atom_count());
        // First atom (C1) bonds to atom 2 and its hydrogens.
        assert_eq!(conect[0][6..11].trim(), "1");
        assert_eq!(conect[0][11..16].trim(), "2");
    }

    #[test]
    fn mismatched_conformer_fails() {
        let (mol, _) = sample();
        let wrong = Conformer::new(vec![[0.0; 3]]);
        assert!(write_pdb_block(&mol, &wrong, "x").is_err());
    }
}
