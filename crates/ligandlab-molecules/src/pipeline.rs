//! End-to-end ligand analysis: one compound identifier in, one report out.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use ligandlab_chembl::CompoundSource;
use ligandlab_common::Result;
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::classify::{classify, decision_message, LigandClass};
use crate::conformers::{initial_conformation, prepared_conformation};
use crate::features::{extract, LigandFeatures};
use crate::scoring::quality_score;

/// Everything one analysis run produced, ready for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct LigandReport {
    pub id: Uuid,
    pub chembl_id: String,
    pub pref_name: Option<String>,
    pub smiles: String,
    pub features: LigandFeatures,
    pub class: LigandClass,
    pub score: u8,
    pub decision: &'static str,
    pub pdb_initial: String,
    pub pdb_prepared: String,
    pub generated_at: DateTime<Utc>,
}

/// Runs the fixed analysis sequence against whichever compound source it
/// was built with.
#[derive(Clone)]
pub struct LigandPipeline {
    source: Arc<dyn CompoundSource>,
}

impl LigandPipeline {
    pub fn new(source: Arc<dyn CompoundSource>) -> Self {
        LigandPipeline { source }
    }

    #[instrument(skip(self), fields(chembl_id = %chembl_id))]
    pub async fn run(&self, chembl_id: &str) -> Result<LigandReport> {
        let record = self.source.fetch_compound(chembl_id).await?;
        info!(smiles = %record.canonical_smiles, "structure resolved");

        let initial = initial_conformation(&record.canonical_smiles)?;
        let prepared = prepared_conformation(&record.canonical_smiles)?;

        let features = extract(&prepared.molecule);
        let class = classify(&features);
        let score = quality_score(&features);
        let decision = decision_message(class.as_str());

        let pdb_initial = initial.to_pdb_block(&format!("{} initial", record.chembl_id))?;
        let pdb_prepared =
            prepared.to_pdb_block(&format!("{} prepared", record.chembl_id))?;

        info!(class = %class, score, "analysis complete");
        Ok(LigandReport {
            id: Uuid::new_v4(),
            chembl_id: record.chembl_id,
            pref_name: record.pref_name,
            smiles: record.canonical_smiles,
            features,
            class,
            score,
            decision,
            pdb_initial,
            pdb_prepared,
            generated_at: Utc::now(),
        })
    }
}
