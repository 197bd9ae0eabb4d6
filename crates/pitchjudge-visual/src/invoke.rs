//! Vision call contract, mirroring `pitchjudge_agents::invoke::invoke_json`
//! but against the vision rate limiter and the multi-image client.

use serde::de::DeserializeOwned;
use std::time::Duration;

use pitchjudge_agents::client::GenerationConfig;
use pitchjudge_agents::json_extract::{extract_first_json_object, strip_code_fences};

use crate::client::vision_completion;
use crate::error::{Result, VisualError};

fn recover_json(raw: &str) -> String {
    let stripped = strip_code_fences(raw);
    extract_first_json_object(&stripped).unwrap_or(stripped)
}

pub async fn invoke_vision_json<T: DeserializeOwned>(
    prompt: &str,
    images_base64: &[&str],
    cfg: &GenerationConfig,
    max_retries: u32,
) -> Result<T> {
    let mut last_err = None;
    for attempt in 0..=max_retries {
        pitchjudge_core::ratelimit::vision_limiter().acquire().await;

        let call = vision_completion(prompt, images_base64, cfg);
        let outcome = tokio::time::timeout(cfg.timeout, call).await;

        let result = match outcome {
            Ok(Ok(raw)) => {
                let recovered = recover_json(&raw);
                serde_json::from_str::<T>(&recovered).map_err(VisualError::from)
            }
            Ok(Err(e)) => Err(e),
            Err(_) => Err(VisualError::Timeout(cfg.timeout.as_secs())),
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
