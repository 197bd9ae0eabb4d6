//! Text-LLM HTTP client.
//!
//! Grounded on `docling-quality-verifier::client::OpenAIClient`: env-based
//! config, a fresh `reqwest::Client` per call (spec §5: "new instance per
//! invocation" to pick up per-call seed/temperature safely), and
//! `response_format: json_object` when requested.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{AgentError, Result};

/// Per-call generation configuration. The agent's invocation contract takes
/// this record rather than baking temperature/seed into a long-lived
/// client (spec §9, "Dynamic LLM config per call").
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub model: String,
    pub temperature: f64,
    pub top_p: f64,
    pub seed: Option<String>,
    pub timeout: Duration,
    pub json_mode: bool,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
    top_p: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    r#type: String,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Issues one chat-completion call and returns the raw completion text.
/// Does not retry or rate-limit; the agent invocation loop in
/// [`crate::invoke`] owns that.
pub async fn chat_completion(prompt: &str, cfg: &GenerationConfig) -> Result<String> {
    let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| AgentError::MissingApiKey)?;
    let base_url = std::env::var("OPENAI_API_BASE")
        .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());

    let client = reqwest::Client::builder().timeout(cfg.timeout).build()?;

    let request = ChatRequest {
        model: cfg.model.clone(),
        messages: vec![ChatMessage {
            role: "user".to_string(),
            content: prompt.to_string(),
        }],
        temperature: cfg.temperature,
        top_p: cfg.top_p,
        seed: cfg.seed.as_deref().and_then(|s| s.parse().ok()),
        response_format: cfg.json_mode.then(|| ResponseFormat {
            r#type: "json_object".to_string(),
        }),
    };

    let response = client
        .post(format!("{base_url}/chat/completions"))
        .bearer_auth(&api_key)
        .json(&request)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AgentError::Api {
            status: status.as_u16(),
            body,
        });
    }

    let parsed: ChatResponse = response.json().await?;
    Ok(parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .unwrap_or_default())
}
