//! Shared application state for the web server.

use std::sync::Arc;

use ligandlab_chembl::{ChemblClient, CompoundSource};
use ligandlab_common::config::AppConfig;
use ligandlab_common::FetchError;
use ligandlab_molecules::LigandPipeline;

/// Shared state injected into every Axum handler.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: LigandPipeline,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// Wire the pipeline to the live ChEMBL API.
    pub fn new(config: &AppConfig) -> Result<Self, FetchError> {
        let client = ChemblClient::new(&config.chembl)?;
        Ok(Self::with_source(Arc::new(client)))
    }

    /// Wire the pipeline to any compound source. Tests use this with an
    /// in-memory source.
    pub fn with_source(source: Arc<dyn CompoundSource>) -> Self {
        AppState { pipeline: LigandPipeline::new(source) }
    }
}
