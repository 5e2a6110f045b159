//! Abstraction over where compound structures come from.

use async_trait::async_trait;
use ligandlab_common::FetchError;

/// A compound as retrieved from a registry: identifier, optional
/// preferred name, and the canonical SMILES string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundRecord {
    pub chembl_id: String,
    pub pref_name: Option<String>,
    pub canonical_smiles: String,
}

/// Anything that can resolve a ChEMBL identifier to a structure. The
/// pipeline only talks to this trait; tests substitute an in-memory
/// implementation.
#[async_trait]
pub trait CompoundSource: Send + Sync {
    async fn fetch_compound(&self, chembl_id: &str) -> Result<CompoundRecord, FetchError>;
}
