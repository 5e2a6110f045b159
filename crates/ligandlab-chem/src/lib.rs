//! ligandlab-chem — in-tree cheminformatics for the ligand pipeline.
//!
//! Provides the operations the pipeline delegates to:
//! 1. SMILES parsing into a molecular graph
//! 2. Explicit hydrogen addition
//! 3. Seeded 3D embedding (distance geometry)
//! 4. UFF force-field minimization
//! 5. Descriptors: weight, Crippen logP, rotatable bonds, TPSA
//! 6. PDB block serialization

pub mod conformer;
pub mod descriptors;
pub mod element;
pub mod embed;
pub mod molecule;
pub mod pdb;
pub mod ring;
pub mod smiles;
pub mod uff;

pub use conformer::Conformer;
pub use molecule::{Atom, Bond, BondOrder, Molecule};
