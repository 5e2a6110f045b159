//! Closed error kinds for each collaborator boundary.
//!
//! Each stage of the ligand pipeline has its own enum; the orchestrator
//! wraps them into a single tagged [`PipelineError`] so the web layer can
//! tell a bad identifier apart from a geometry failure.

use thiserror::Error;

/// Failures while looking a compound up in the external database.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("compound '{0}' not found")]
    NotFound(String),

    #[error("compound '{0}' has no canonical SMILES structure")]
    MissingStructure(String),

    #[error("compound database unreachable: {0}")]
    Service(#[from] reqwest::Error),

    #[error("malformed compound record: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Failures while building a 3D conformation from a SMILES string.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("SMILES parse error: {0}")]
    Parse(String),

    #[error("3D embedding failed: {0}")]
    Embed(String),

    #[error("conformer has {conformer} coordinates but molecule has {molecule} atoms")]
    AtomMismatch { conformer: usize, molecule: usize },
}

/// Any stage failure aborts the whole request; no partial result escapes.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error("descriptor extraction failed: {0}")]
    Features(String),
}

pub type Result<T, E = PipelineError> = std::result::Result<T, E>;
