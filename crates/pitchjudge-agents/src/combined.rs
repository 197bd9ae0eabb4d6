//! Combined agent (C3c): a single call producing both scores and feedback,
//! used when `USE_COMBINED` is truthy to halve LLM round-trips at the cost
//! of a larger, slower single prompt.

use pitchjudge_core::model::EvaluationContext;
use pitchjudge_core::rubric::RubricKey;
use tracing::{instrument, warn};

use crate::config;
use crate::invoke::invoke_json;
use crate::prompts::combined_prompt;
use crate::raw::{raw_scores_from_map, CombinedResponse};

#[instrument(skip_all, fields(team = %ctx.team_name))]
pub async fn run(ctx: &mut EvaluationContext) {
    let prompt = combined_prompt(&ctx.raw_text, &ctx.workflow_report_text);
    let cfg = config::scoring_config();

    match invoke_json::<CombinedResponse>(&prompt, &cfg, config::max_retries()).await {
        Ok(resp) => apply(ctx, resp),
        Err(e) => {
            warn!(error = %e, "combined agent failed");
            ctx.set_error(format!("combined agent failed: {e}"));
        }
    }
}

fn apply(ctx: &mut EvaluationContext, resp: CombinedResponse) {
    if let Some(name) = resp.team_name {
        if !name.trim().is_empty() {
            ctx.team_name = name;
        }
    }
    let raw_scores = raw_scores_from_map(&resp.scores);
    for key in RubricKey::ALL {
        // See scoring.rs::apply: leave missing keys unset so fusion Rule 1
        // can substitute the calibration baseline instead of a fake 1.
        if let Some((_, value)) = raw_scores.iter().find(|(label, _)| RubricKey::from_label(label) == Some(key)) {
            ctx.scores.set(key, *value);
        }
    }
    ctx.scoring_summary = resp.summary;
    ctx.feedback.positive = resp.feedback.positive;
    ctx.feedback.criticism = resp.feedback.criticism;
    ctx.feedback.technical = resp.feedback.technical;
    ctx.feedback.suggestions = resp.feedback.suggestions;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::FeedbackResponse;
    use std::collections::HashMap;

    #[test]
    fn apply_fills_both_scores_and_feedback() {
        let mut ctx = EvaluationContext::new("deck.pdf".into(), "Unknown".into());
        let mut scores = HashMap::new();
        for k in RubricKey::ALL {
            scores.insert(k.label().to_string(), serde_json::json!(6));
        }
        let resp = CombinedResponse {
            team_name: Some("Beta".into()),
            scores,
            summary: "decent".into(),
            feedback: FeedbackResponse {
                positive: "good demo".into(),
                criticism: "no metrics".into(),
                technical: "monolith".into(),
                suggestions: "add eval plan".into(),
            },
        };
        apply(&mut ctx, resp);
        assert!(ctx.scores.is_complete());
        assert_eq!(ctx.feedback.suggestions, "add eval plan");
    }
}
