//! Web front end for the ligand analysis pipeline.

pub mod handlers;
pub mod router;
pub mod state;
