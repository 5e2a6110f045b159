//! ChEMBL compound retrieval.

pub mod client;
pub mod source;

pub use client::ChemblClient;
pub use source::{CompoundRecord, CompoundSource};
