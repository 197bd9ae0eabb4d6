//! Loosely-typed LLM response shapes and the `_to_int_1_10` coercion from
//! `original_source/project_context/agents/scoring_agent.py`.

use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize, Default)]
pub struct ScoringResponse {
    pub team_name: Option<String>,
    #[serde(default)]
    pub scores: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct CombinedResponse {
    pub team_name: Option<String>,
    #[serde(default)]
    pub scores: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub feedback: FeedbackResponse,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct FeedbackResponse {
    #[serde(default)]
    pub positive: String,
    #[serde(default)]
    pub criticism: String,
    #[serde(default)]
    pub technical: String,
    #[serde(default)]
    pub suggestions: String,
}

/// `max(1, min(10, round(float(x))))`; falls back to `1` on any coercion
/// failure, matching `_to_int_1_10` in the source scoring agent.
pub fn to_int_1_10(value: &serde_json::Value) -> i32 {
    let as_f64 = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.parse::<f64>().ok(),
        _ => None,
    };
    match as_f64 {
        Some(f) if f.is_finite() => (f.round() as i32).clamp(1, 10),
        _ => 1,
    }
}

pub fn raw_scores_from_map(map: &HashMap<String, serde_json::Value>) -> HashMap<String, i32> {
    map.iter().map(|(k, v)| (k.clone(), to_int_1_10(v))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerces_float_strings_and_clamps() {
        assert_eq!(to_int_1_10(&serde_json::json!(12)), 10);
        assert_eq!(to_int_1_10(&serde_json::json!(-3)), 1);
        assert_eq!(to_int_1_10(&serde_json::json!("7.6")), 8);
        assert_eq!(to_int_1_10(&serde_json::json!("not a number")), 1);
        assert_eq!(to_int_1_10(&serde_json::json!(null)), 1);
    }
}
