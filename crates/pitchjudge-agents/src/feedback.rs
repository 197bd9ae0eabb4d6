//! Feedback agent (C3b): mentor-style qualitative feedback, grounded on
//! `original_source/project_context/agents/feedback_agent.py`.

use pitchjudge_core::model::EvaluationContext;
use tracing::{instrument, warn};

use crate::config;
use crate::invoke::invoke_json;
use crate::prompts::feedback_prompt;
use crate::raw::FeedbackResponse;

/// Skips entirely if scoring already failed for this file — there is no
/// scoring summary worth feeding a mentor prompt.
#[instrument(skip_all, fields(team = %ctx.team_name))]
pub async fn run(ctx: &mut EvaluationContext) {
    if ctx.evaluation_error.is_some() {
        return;
    }

    let scores_debug = ctx
        .scores
        .iter()
        .map(|(k, v)| format!("{k}: {v}"))
        .collect::<Vec<_>>()
        .join(", ");
    let prompt = feedback_prompt(
        &ctx.raw_text,
        &ctx.workflow_report_text,
        &ctx.scoring_summary,
        &scores_debug,
    );
    let cfg = config::feedback_config();

    match invoke_json::<FeedbackResponse>(&prompt, &cfg, config::max_retries()).await {
        Ok(resp) => {
            ctx.feedback.positive = resp.positive;
            ctx.feedback.criticism = resp.criticism;
            ctx.feedback.technical = resp.technical;
            ctx.feedback.suggestions = resp.suggestions;
        }
        Err(e) => {
            // Feedback is advisory; a failure here does not invalidate the score.
            warn!(error = %e, "feedback agent failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn skips_when_scoring_already_failed() {
        let mut ctx = EvaluationContext::new("deck.pdf".into(), "Alpha".into());
        ctx.set_error("scoring failed: boom");
        run(&mut ctx).await;
        assert!(ctx.feedback.positive.is_empty());
    }
}
