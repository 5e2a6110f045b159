//! Threshold classification and the decision text shown to users.

use serde::Serialize;

use crate::features::LigandFeatures;

/// Docking-suitability class, ordered first-match over the thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LigandClass {
    Problematic,
    FragmentLike,
    DrugLike,
}

impl LigandClass {
    pub fn as_str(self) -> &'static str {
        match self {
            LigandClass::Problematic => "Problematic",
            LigandClass::FragmentLike => "Fragment-like",
            LigandClass::DrugLike => "Drug-like",
        }
    }
}

impl std::fmt::Display for LigandClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify by size and flexibility. Oversized or overly flexible wins
/// over small, so a heavy but floppy compound is Problematic even if
/// other descriptors look fine.
pub fn classify(features: &LigandFeatures) -> LigandClass {
    if features.mw > 700.0 || features.rotatable_bonds > 10 {
        LigandClass::Problematic
    } else if features.mw < 300.0 {
        LigandClass::FragmentLike
    } else {
        LigandClass::DrugLike
    }
}

/// Map a class label to the advisory line shown with the verdict.
/// Unknown labels fall through to the drug-like message.
pub fn decision_message(label: &str) -> &'static str {
    match label {
        "Problematic" => "⚠️ Ligand may show unreliable docking behavior",
        "Fragment-like" => "ℹ️ Ligand is small and suitable for fragment-based docking",
        _ => "✅ Ligand suitable for classical molecular docking",
    }
}
