//! Scoring agent (C3a): scores the six rubric criteria from deck text plus
//! condensed diagram evidence, grounded on
//! `original_source/project_context/agents/scoring_agent.py`.

use pitchjudge_core::model::EvaluationContext;
use pitchjudge_core::rubric::RubricKey;
use tracing::{instrument, warn};

use crate::config;
use crate::invoke::invoke_json;
use crate::prompts::scoring_prompt;
use crate::raw::{raw_scores_from_map, ScoringResponse};

/// Runs scoring against `ctx.raw_text` / `ctx.workflow_report_text` and
/// writes `team_name`, `scores`, `scoring_summary` back into `ctx`.
///
/// Never panics on LLM failure: records `ctx.evaluation_error` instead so
/// the pipeline can still emit a leaderboard row with a null total.
#[instrument(skip_all, fields(team = %ctx.team_name))]
pub async fn run(ctx: &mut EvaluationContext) {
    let prompt = scoring_prompt(&ctx.raw_text, &ctx.workflow_report_text);
    let cfg = config::scoring_config();

    match invoke_json::<ScoringResponse>(&prompt, &cfg, config::max_retries()).await {
        Ok(resp) => apply(ctx, resp),
        Err(e) => {
            warn!(error = %e, "scoring agent failed");
            ctx.set_error(format!("scoring failed: {e}"));
        }
    }
}

fn apply(ctx: &mut EvaluationContext, resp: ScoringResponse) {
    if let Some(name) = resp.team_name {
        if !name.trim().is_empty() {
            ctx.team_name = name;
        }
    }
    let raw_scores = raw_scores_from_map(&resp.scores);
    for key in RubricKey::ALL {
        // A key absent from the model's response is left unset rather than
        // defaulted to a valid score, so fusion Rule 1 (spec §4.4) can tell
        // "missing" apart from "model genuinely said 1" and substitute the
        // calibration baseline instead.
        if let Some((_, value)) = raw_scores.iter().find(|(label, _)| RubricKey::from_label(label) == Some(key)) {
            ctx.scores.set(key, *value);
        }
    }
    ctx.scoring_summary = resp.summary;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn apply_maps_labels_case_insensitively_and_leaves_missing_keys_unset() {
        let mut ctx = EvaluationContext::new("deck.pdf".into(), "Unknown".into());
        let mut scores = HashMap::new();
        scores.insert("innovation & uniqueness".to_string(), serde_json::json!(9));
        let resp = ScoringResponse {
            team_name: Some("Team Rocket".into()),
            scores,
            summary: "solid pitch".into(),
        };
        apply(&mut ctx, resp);
        assert_eq!(ctx.team_name, "Team Rocket");
        assert_eq!(ctx.scores.get(RubricKey::InnovationUniqueness), Some(9));
        assert_eq!(ctx.scores.get(RubricKey::TeamReadiness), None);
        assert_eq!(ctx.scoring_summary, "solid pitch");
    }

    #[test]
    fn apply_keeps_existing_team_name_when_response_omits_it() {
        let mut ctx = EvaluationContext::new("deck.pdf".into(), "Alpha".into());
        let resp = ScoringResponse {
            team_name: None,
            scores: HashMap::new(),
            summary: String::new(),
        };
        apply(&mut ctx, resp);
        assert_eq!(ctx.team_name, "Alpha");
    }
}
