//! HTTP client for the ChEMBL REST API.

use async_trait::async_trait;
use ligandlab_common::config::ChemblConfig;
use ligandlab_common::FetchError;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::source::{CompoundRecord, CompoundSource};

/// Client for `GET {base_url}/molecule/{id}.json`.
#[derive(Debug, Clone)]
pub struct ChemblClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct MoleculeResponse {
    pref_name: Option<String>,
    molecule_structures: Option<MoleculeStructures>,
}

#[derive(Debug, Deserialize)]
struct MoleculeStructures {
    canonical_smiles: Option<String>,
}

impl ChemblClient {
    pub fn new(config: &ChemblConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(ChemblClient {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Uppercase and trim, so `chembl25` and `CHEMBL25 ` hit the same URL.
    fn normalize_id(raw: &str) -> String {
        raw.trim().to_ascii_uppercase()
    }
}

#[async_trait]
impl CompoundSource for ChemblClient {
    #[instrument(skip(self), fields(chembl_id = %chembl_id))]
    async fn fetch_compound(&self, chembl_id: &str) -> Result<CompoundRecord, FetchError> {
        let id = Self::normalize_id(chembl_id);
        let url = format!("{}/molecule/{}.json", self.base_url, id);
        debug!(%url, "fetching compound");

        let response = self.http.get(&url).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(id));
        }
        let response = response.error_for_status()?;
        let body: MoleculeResponse = response.json().await?;

        let canonical_smiles = body
            .molecule_structures
            .and_then(|s| s.canonical_smiles)
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| FetchError::MissingStructure(id.clone()))?;

        Ok(CompoundRecord {
            chembl_id: id,
            pref_name: body.pref_name.filter(|n| !n.trim().is_empty()),
            canonical_smiles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_normalized() {
        assert_eq!(ChemblClient::normalize_id(" chembl25 "), "CHEMBL25");
        assert_eq!(ChemblClient::normalize_id("CHEMBL25"), "CHEMBL25");
    }

    #[test]
    fn response_shape_deserializes() {
        let raw = r#"{
            "pref_name": "ASPIRIN",
            "molecule_structures": {
                "canonical_smiles": "CC(=O)Oc1ccccc1C(=O)O",
                "standard_inchi_key": "BSYNRYMUTXBXSQ-UHFFFAOYSA-N"
            },
            "molecule_type": "Small molecule"
        }"#;
        let parsed: MoleculeResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.pref_name.as_deref(), Some("ASPIRIN"));
        assert_eq!(
            parsed.molecule_structures.unwrap().canonical_smiles.as_deref(),
            Some("CC(=O)Oc1ccccc1C(=O)O")
        );
    }

    #[test]
    fn missing_structures_deserialize_to_none() {
        let parsed: MoleculeResponse =
            serde_json::from_str(r#"{"pref_name": null}"#).unwrap();
        assert!(parsed.molecule_structures.is_none());
    }

    // Touches the live ChEMBL API; run with --ignored when online.
    #[tokio::test]
    #[ignore]
    async fn fetches_aspirin_from_live_api() {
        let client = ChemblClient::new(&ChemblConfig::default()).unwrap();
        let record = client.fetch_compound("CHEMBL25").await.unwrap();
        assert_eq!(record.chembl_id, "CHEMBL25");
        assert!(record.canonical_smiles.contains("c1ccccc1"));
    }
}
