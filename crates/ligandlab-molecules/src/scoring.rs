//! Additive penalty score on a 0-100 scale.

use crate::features::LigandFeatures;

/// Start from 100 and subtract a fixed penalty per violated rule. Each
/// rule is judged independently, so the weight penalties can stack with
/// the flexibility, lipophilicity, and polarity ones. Floor at zero.
pub fn quality_score(features: &LigandFeatures) -> u8 {
    let mut score: i32 = 100;

    if features.mw > 700.0 {
        score -= 25;
    }
    if features.mw < 250.0 {
        score -= 10;
    }
    if features.rotatable_bonds > 10 {
        score -= 20;
    }
    if features.logp > 5.0 {
        score -= 15;
    }
    if features.tpsa > 140.0 {
        score -= 10;
    }

    score.max(0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(mw: f64, logp: f64, rotatable_bonds: u32, tpsa: f64) -> LigandFeatures {
        LigandFeatures { mw, logp, rotatable_bonds, tpsa }
    }

    #[test]
    fn clean_compound_scores_full() {
        assert_eq!(quality_score(&features(400.0, 2.0, 4, 80.0)), 100);
    }

    #[test]
    fn single_penalties() {
        assert_eq!(quality_score(&features(800.0, 0.0, 0, 0.0)), 75);
        assert_eq!(quality_score(&features(200.0, 0.0, 0, 0.0)), 90);
        assert_eq!(quality_score(&features(400.0, 0.0, 12, 0.0)), 80);
        assert_eq!(quality_score(&features(400.0, 6.0, 0, 0.0)), 85);
        assert_eq!(quality_score(&features(400.0, 0.0, 0, 150.0)), 90);
    }

    #[test]
    fn penalties_stack() {
        assert_eq!(quality_score(&features(800.0, 6.0, 12, 150.0)), 30);
    }

    #[test]
    fn thresholds_are_strict() {
        assert_eq!(quality_score(&features(700.0, 5.0, 10, 140.0)), 100);
        assert_eq!(quality_score(&features(250.0, 0.0, 0, 0.0)), 100);
    }

    #[test]
    fn worsening_a_descriptor_never_raises_the_score() {
        let base = features(400.0, 2.0, 4, 80.0);
        let worse = [
            features(800.0, 2.0, 4, 80.0),
            features(400.0, 6.0, 4, 80.0),
            features(400.0, 2.0, 12, 80.0),
            features(400.0, 2.0, 4, 150.0),
        ];
        for w in worse {
            assert!(quality_score(&w) <= quality_score(&base));
        }
    }

    #[test]
    fn score_stays_in_range() {
        // The two weight penalties are mutually exclusive, so at most 70
        // points can be lost; the zero floor guards future weights.
        let worst = quality_score(&features(100.0, 10.0, 20, 200.0));
        assert!(worst <= 100);
        assert_eq!(worst, 100 - 10 - 20 - 15 - 10);
    }
}
