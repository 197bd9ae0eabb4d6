//! Env-driven generation configuration, read fresh per call so each agent
//! invocation picks up the current `OPENAI_SEED`/model env vars (spec §9).

use std::time::Duration;

use crate::client::GenerationConfig;

fn model_text() -> String {
    std::env::var("OPENAI_MODEL_TEXT")
        .or_else(|_| std::env::var("OPENAI_MODEL"))
        .unwrap_or_else(|_| "gpt-4o-mini".to_string())
}

fn model_vision() -> String {
    std::env::var("OPENAI_MODEL_VISION")
        .or_else(|_| std::env::var("OPENAI_MODEL"))
        .unwrap_or_else(|_| "gpt-4o-mini".to_string())
}

fn timeout() -> Duration {
    let secs: u64 = std::env::var("LLM_TIMEOUT_S")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(90);
    Duration::from_secs(secs)
}

pub fn max_retries() -> u32 {
    std::env::var("LLM_MAX_RETRIES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(2)
}

fn seed() -> Option<String> {
    std::env::var("OPENAI_SEED").ok()
}

/// Scoring/Combined config: temperature 0.0, top_p 0.0, JSON mode on.
pub fn scoring_config() -> GenerationConfig {
    GenerationConfig {
        model: model_text(),
        temperature: 0.0,
        top_p: 0.0,
        seed: seed(),
        timeout: timeout(),
        json_mode: true,
    }
}

/// Feedback config: temperature 0.1, top_p 0.0, JSON mode on.
pub fn feedback_config() -> GenerationConfig {
    GenerationConfig {
        model: model_text(),
        temperature: 0.1,
        top_p: 0.0,
        seed: seed(),
        timeout: timeout(),
        json_mode: true,
    }
}

/// Vision config for the visual analyzer; exposed here so both crates
/// share one env-reading contract.
pub fn vision_config() -> GenerationConfig {
    GenerationConfig {
        model: model_vision(),
        temperature: 0.2,
        top_p: 1.0,
        seed: seed(),
        timeout: timeout(),
        json_mode: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn scoring_config_defaults_to_gpt_4o_mini_with_no_env() {
        std::env::remove_var("OPENAI_MODEL_TEXT");
        std::env::remove_var("OPENAI_MODEL");
        std::env::remove_var("OPENAI_SEED");
        let cfg = scoring_config();
        assert_eq!(cfg.model, "gpt-4o-mini");
        assert_eq!(cfg.temperature, 0.0);
        assert_eq!(cfg.top_p, 0.0);
        assert!(cfg.seed.is_none());
    }

    #[test]
    #[serial]
    fn model_text_prefers_specific_override_over_general() {
        std::env::set_var("OPENAI_MODEL", "general-model");
        std::env::set_var("OPENAI_MODEL_TEXT", "text-specific-model");
        assert_eq!(model_text(), "text-specific-model");
        std::env::remove_var("OPENAI_MODEL");
        std::env::remove_var("OPENAI_MODEL_TEXT");
    }

    #[test]
    #[serial]
    fn timeout_reads_llm_timeout_s_env_var() {
        std::env::set_var("LLM_TIMEOUT_S", "30");
        assert_eq!(timeout(), Duration::from_secs(30));
        std::env::remove_var("LLM_TIMEOUT_S");
    }

    #[test]
    #[serial]
    fn max_retries_defaults_to_two() {
        std::env::remove_var("LLM_MAX_RETRIES");
        assert_eq!(max_retries(), 2);
    }
}
