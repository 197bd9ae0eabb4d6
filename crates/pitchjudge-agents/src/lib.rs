//! LLM orchestration: the scoring/feedback/combined agents, the shared
//! invocation contract, and the OpenAI-compatible chat client.

pub mod client;
pub mod combined;
pub mod config;
pub mod error;
pub mod feedback;
pub mod invoke;
pub mod json_extract;
pub mod prompts;
pub mod raw;
pub mod scoring;

pub use error::{AgentError, Result};

use pitchjudge_core::model::EvaluationContext;

/// Which agent topology to run, selected by `USE_COMBINED` (default
/// `split`), matching `original_source/project_context/orchestrator.py`'s
/// `os.getenv("USE_COMBINED", ...)` truthiness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentMode {
    /// Separate scoring and feedback calls (default): two round-trips, each
    /// with a focused prompt and its own retry budget.
    Split,
    /// One call producing both scores and feedback.
    Combined,
}

impl AgentMode {
    pub fn from_env() -> Self {
        let truthy = std::env::var("USE_COMBINED")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        if truthy {
            AgentMode::Combined
        } else {
            AgentMode::Split
        }
    }
}

/// Runs the configured agent topology end to end against `ctx`.
pub async fn evaluate(ctx: &mut EvaluationContext, mode: AgentMode) {
    match mode {
        AgentMode::Split => {
            scoring::run(ctx).await;
            feedback::run(ctx).await;
        }
        AgentMode::Combined => {
            combined::run(ctx).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn from_env_defaults_to_split_with_no_env() {
        std::env::remove_var("USE_COMBINED");
        assert_eq!(AgentMode::from_env(), AgentMode::Split);
    }

    #[test]
    #[serial]
    fn from_env_recognizes_truthy_values() {
        for v in ["1", "true", "TRUE", "yes"] {
            std::env::set_var("USE_COMBINED", v);
            assert_eq!(AgentMode::from_env(), AgentMode::Combined, "expected {v} to be truthy");
        }
        std::env::remove_var("USE_COMBINED");
    }
}
