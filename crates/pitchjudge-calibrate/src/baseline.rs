//! Heuristic text-derived baseline (spec §4.4).

use std::collections::BTreeMap;

use pitchjudge_core::rubric::RubricKey;

use crate::keywords::{self, TECHNICAL_TERMS};

#[derive(Debug, Clone, Copy)]
pub struct TextStats {
    pub word_count: usize,
    pub numeric_count: usize,
    pub technical_density: f64,
}

fn is_numeric_token(tok: &str) -> bool {
    let stripped = tok.trim_end_matches('%');
    !stripped.is_empty() && stripped.chars().all(|c| c.is_ascii_digit() || c == '.')
}

pub fn compute_text_stats(text: &str) -> TextStats {
    let tokens: Vec<String> = text
        .split_whitespace()
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric() && c != '%').to_string())
        .filter(|t| !t.is_empty())
        .collect();
    let word_count = tokens.len();
    let numeric_count = tokens.iter().filter(|t| is_numeric_token(t)).count();
    let technical_count = tokens
        .iter()
        .filter(|t| TECHNICAL_TERMS.contains(&t.to_ascii_lowercase().as_str()))
        .count();
    let technical_density = if word_count == 0 {
        0.0
    } else {
        technical_count as f64 / word_count as f64
    };
    TextStats {
        word_count,
        numeric_count,
        technical_density,
    }
}

fn base_from_word_count(word_count: usize) -> i32 {
    if word_count >= 400 {
        6
    } else if word_count >= 200 {
        5
    } else if word_count >= 100 {
        4
    } else {
        3
    }
}

/// Computes the clamped `[3, 8]` baseline for every rubric key.
pub fn compute_baseline(
    text: &str,
    stats: &TextStats,
    has_surviving_image: bool,
) -> BTreeMap<RubricKey, i32> {
    let lower = text.to_ascii_lowercase();
    let mut base = base_from_word_count(stats.word_count);
    if stats.technical_density < 0.01 && stats.word_count > 150 {
        base -= 1;
    }

    let mut out = BTreeMap::new();
    for key in RubricKey::ALL {
        let mut score = base;
        if keywords::keywords_for(key).iter().any(|kw| lower.contains(kw)) {
            score += 1;
        }
        if matches!(key, RubricKey::TechnicalFeasibility | RubricKey::PotentialImpact)
            && stats.numeric_count >= 2
        {
            score += 1;
        }
        if matches!(key, RubricKey::TechnicalFeasibility | RubricKey::ImplementationApproach)
            && has_surviving_image
        {
            score += 1;
        }
        if key == RubricKey::InnovationUniqueness
            && keywords::INNOVATION_BONUS.iter().any(|kw| lower.contains(kw))
        {
            score += 1;
        }
        out.insert(key, score.clamp(3, 8));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_word_yields_minimum_baseline_everywhere() {
        let stats = compute_text_stats("Hello");
        assert_eq!(stats.word_count, 1);
        let baseline = compute_baseline("Hello", &stats, false);
        for key in RubricKey::ALL {
            assert_eq!(baseline[&key], 3, "{key} should floor at 3");
        }
    }

    #[test]
    fn technical_keywords_and_numerics_raise_technical_feasibility() {
        let text = "architecture api dataset latency baseline privacy 10% 20%".repeat(30);
        let stats = compute_text_stats(&text);
        let baseline = compute_baseline(&text, &stats, false);
        assert!(baseline[&RubricKey::TechnicalFeasibility] >= 6);
    }

    #[test]
    fn baseline_is_clamped_to_eight() {
        let text = "novel unique patent state-of-the-art sota first architecture api dataset latency roadmap milestone team founder impact market".repeat(40);
        let stats = compute_text_stats(&text);
        let baseline = compute_baseline(&text, &stats, true);
        for key in RubricKey::ALL {
            assert!(baseline[&key] <= 8);
        }
    }
}
