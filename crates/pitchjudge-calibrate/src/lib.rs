//! Score Calibrator (C4): pure, synchronous, no I/O. Fuses raw model
//! scores with a deterministic text-derived baseline and applies
//! anti-inflation/anti-flatness rules (spec §4.4).

pub mod baseline;
pub mod fusion;
pub mod keywords;

use std::collections::HashMap;

use pitchjudge_core::model::ScoreVector;
use pitchjudge_core::rubric::RubricKey;

pub use baseline::TextStats;

/// Runs the full calibration pipeline: baseline computation then fusion.
///
/// `raw_scores` are the (possibly incomplete/invalid) model outputs,
/// already coerced to `i32` by `pitchjudge_agents::raw::to_int_1_10`.
/// `diagram_evidence_count` is the deck's diagram-evidence image count
/// (`EvaluationContext::diagram_evidence_count`, i.e. images the visual
/// analyzer judged `is_diagram` and `importance ∈ {critical, supporting}`),
/// used for the rule-6 floor and the rule-4.2-derived technical/implementation
/// bonus — not the raw post-dedup/surviving image count (spec §4.5).
pub fn calibrate(
    text: &str,
    raw_scores: &HashMap<RubricKey, i32>,
    diagram_evidence_count: usize,
) -> ScoreVector {
    let stats = baseline::compute_text_stats(text);
    let has_surviving_image = diagram_evidence_count > 0;
    let base = baseline::compute_baseline(text, &stats, has_surviving_image);
    fusion::fuse(raw_scores, &base, text, &stats, diagram_evidence_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_s2_rich_deck_meets_baseline_floors() {
        let text = "architecture API dataset latency baseline privacy ".repeat(34);
        let mut raw = HashMap::new();
        for k in RubricKey::ALL {
            raw.insert(k, 5);
        }
        let scores = calibrate(&text, &raw, 0);
        assert!(scores.get(RubricKey::TechnicalFeasibility).unwrap() >= 5);
        assert!(scores.get(RubricKey::PotentialImpact).unwrap() >= 5);
    }

    #[test]
    fn determinism_same_inputs_produce_same_output() {
        let text = "architecture api dataset latency baseline privacy novel unique".repeat(20);
        let mut raw = HashMap::new();
        for k in RubricKey::ALL {
            raw.insert(k, 7);
        }
        let first = calibrate(&text, &raw, 2);
        let second = calibrate(&text, &raw, 2);
        for k in RubricKey::ALL {
            assert_eq!(first.get(k), second.get(k));
        }
    }
}
