//! The nine ordered fusion rules (spec §4.4) that turn raw model scores
//! plus the heuristic baseline into the final calibrated `ScoreVector`.

use std::collections::{BTreeMap, HashMap};

use pitchjudge_core::model::ScoreVector;
use pitchjudge_core::rubric::RubricKey;

use crate::baseline::TextStats;
use crate::keywords::EXTRA_EVIDENCE;

/// Applies the nine fusion rules in order and returns the final
/// calibrated [`ScoreVector`].
pub fn fuse(
    raw_scores: &HashMap<RubricKey, i32>,
    baseline: &BTreeMap<RubricKey, i32>,
    text: &str,
    stats: &TextStats,
    diagram_evidence_count: usize,
) -> ScoreVector {
    let mut scores: BTreeMap<RubricKey, f64> = RubricKey::ALL
        .iter()
        .map(|k| {
            // Rule 1: replace missing/invalid (not in [1,10]) with the baseline.
            let v = raw_scores
                .get(k)
                .copied()
                .filter(|v| (1..=10).contains(v))
                .unwrap_or(baseline[k]);
            (*k, v as f64)
        })
        .collect();

    // Rule 2: global cap.
    let global_cap = if stats.word_count < 150 { 9.0 } else { 10.0 };
    for v in scores.values_mut() {
        *v = v.min(global_cap);
    }

    // Rule 3: anti-inflation on missing extra-evidence keywords.
    let lower = text.to_ascii_lowercase();
    let has_extra_evidence = EXTRA_EVIDENCE.iter().any(|kw| lower.contains(kw));
    if !has_extra_evidence {
        for key in [RubricKey::TechnicalFeasibility, RubricKey::PotentialImpact] {
            let v = scores.get_mut(&key).unwrap();
            *v = (*v - 1.0).max(3.0);
        }
    }

    // Rule 4: numeric density bonus.
    if stats.numeric_count >= 5 {
        for key in [RubricKey::PotentialImpact, RubricKey::TechnicalFeasibility] {
            let v = scores.get_mut(&key).unwrap();
            *v = (*v + 1.0).min(10.0);
        }
    }

    // Rule 5: low technical density penalty.
    if stats.technical_density < 0.01 && stats.word_count > 150 {
        for key in [RubricKey::TechnicalFeasibility, RubricKey::ImplementationApproach] {
            let v = scores.get_mut(&key).unwrap();
            *v = (*v - 1.0).max(3.0);
        }
    }

    // Rule 6: evidentiary floor.
    if stats.word_count >= 120 || diagram_evidence_count > 0 {
        for v in scores.values_mut() {
            *v = v.max(3.0);
        }
    }

    // Rule 7: anti-uniform-10.
    let tens: Vec<RubricKey> = RubricKey::PRIORITY
        .iter()
        .copied()
        .filter(|k| scores[k].round() >= 10.0)
        .collect();
    if tens.len() > 1 {
        for key in tens.into_iter().skip(1) {
            scores.insert(key, 9.0);
        }
    }

    // Rule 8: anti-flat.
    let rounded: Vec<i32> = RubricKey::ALL.iter().map(|k| scores[k].round() as i32).collect();
    if rounded.windows(2).all(|w| w[0] == w[1]) {
        for key in [
            RubricKey::TeamReadiness,
            RubricKey::ImplementationApproach,
            RubricKey::ProblemUnderstanding,
        ] {
            let v = scores.get_mut(&key).unwrap();
            *v = (*v - 1.0).max(3.0);
        }
    }

    // Rule 9: final round + clamp.
    let mut out = ScoreVector::new();
    for key in RubricKey::ALL {
        out.set(key, scores[&key].round() as i32);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::{compute_baseline, compute_text_stats};

    fn all_raw(value: i32) -> HashMap<RubricKey, i32> {
        RubricKey::ALL.iter().map(|k| (*k, value)).collect()
    }

    #[test]
    fn scenario_s1_single_word_deck_scores_three_everywhere() {
        let text = "Hello";
        let stats = compute_text_stats(text);
        let baseline = compute_baseline(text, &stats, false);
        let raw = all_raw(3);
        let fused = fuse(&raw, &baseline, text, &stats, 0);
        assert_eq!(fused.raw_total(), 18);
        assert_eq!(fused.weighted_total(), 30.00);
    }

    #[test]
    fn at_most_one_criterion_rounds_to_ten() {
        let text = "architecture api dataset latency baseline privacy novel unique".repeat(40);
        let stats = compute_text_stats(&text);
        let baseline = compute_baseline(&text, &stats, true);
        let raw = all_raw(10);
        let fused = fuse(&raw, &baseline, &text, &stats, 1);
        let tens = RubricKey::ALL.iter().filter(|k| fused.get(**k) == Some(10)).count();
        assert!(tens <= 1);
    }

    #[test]
    fn invalid_raw_value_falls_back_to_baseline() {
        let text = "architecture api dataset latency baseline privacy".repeat(30);
        let stats = compute_text_stats(&text);
        let baseline = compute_baseline(&text, &stats, false);
        let mut raw = all_raw(5);
        raw.insert(RubricKey::TeamReadiness, 99);
        let fused = fuse(&raw, &baseline, &text, &stats, 0);
        assert_eq!(fused.get(RubricKey::TeamReadiness), Some(baseline[&RubricKey::TeamReadiness]));
    }
}
