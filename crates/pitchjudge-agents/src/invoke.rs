//! The shared LLM invocation contract (spec §4.3): rate limit, call under
//! timeout, recover JSON, parse, retry with exponential backoff.

use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::client::{self, GenerationConfig};
use crate::error::{AgentError, Result};
use crate::json_extract::recover_json;

/// Runs the full contract against the text rate limiter:
/// 1. await `pitchjudge_core::ratelimit::text_limiter()`
/// 2. call under `cfg.timeout`
/// 3. strip fences / extract the first balanced JSON object
/// 4. parse into `T`
/// 5. on any failure, retry with `1.5 * 2^attempt` second backoff, up to
///    `max_retries` additional attempts
pub async fn invoke_json<T: DeserializeOwned>(
    prompt: &str,
    cfg: &GenerationConfig,
    max_retries: u32,
) -> Result<T> {
    let mut last_err = None;
    for attempt in 0..=max_retries {
        pitchjudge_core::ratelimit::text_limiter().acquire().await;

        let call = client::chat_completion(prompt, cfg);
        let outcome = tokio::time::timeout(cfg.timeout, call).await;

        let result = match outcome {
            Ok(Ok(raw)) => {
                let recovered = recover_json(&raw);
                serde_json::from_str::<T>(&recovered).map_err(AgentError::from)
            }
            Ok(Err(e)) => Err(e),
            Err(_) => Err(AgentError::Timeout(cfg.timeout.as_secs())),
        };

        match result {
            Ok(value) => return Ok(value),
            Err(e) => {
                last_err = Some(e);
                if attempt < max_retries {
                    let backoff = Duration::from_secs_f64(1.5 * 2f64.powi(attempt as i32));
                    tokio::time::sleep(backoff).await;
                }
            }
        }
    }
    Err(last_err.expect("at least one attempt always runs"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Dummy {
        #[allow(dead_code)]
        a: i32,
    }

    #[tokio::test]
    async fn missing_api_key_fails_without_retry_delay() {
        // SAFETY: test-only env mutation, serialized by default single-threaded test runtime.
        unsafe {
            std::env::remove_var("OPENAI_API_KEY");
        }
        let cfg = GenerationConfig {
            model: "gpt-4o-mini".into(),
            temperature: 0.0,
            top_p: 0.0,
            seed: None,
            timeout: Duration::from_secs(1),
            json_mode: true,
        };
        let start = std::time::Instant::now();
        let result: Result<Dummy> = invoke_json("prompt", &cfg, 0).await;
        assert!(result.is_err());
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
