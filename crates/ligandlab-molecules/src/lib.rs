//! Ligand analysis pipeline: fetch, embed, profile, classify, score.

pub mod classify;
pub mod conformers;
pub mod features;
pub mod pipeline;
pub mod scoring;

pub use classify::{decision_message, LigandClass};
pub use features::LigandFeatures;
pub use pipeline::{LigandPipeline, LigandReport};
pub use scoring::quality_score;
