//! Multimodal vision-LLM HTTP client, grounded on
//! `docling-llm-verify::models::openai::OpenAIClient` (image-content-block
//! request shape, one client per call).

use serde::{Deserialize, Serialize};

use pitchjudge_agents::client::GenerationConfig;

use crate::error::{Result, VisualError};

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
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
struct Message {
    role: String,
    content: Vec<Content>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Content {
    Text { r#type: String, text: String },
    Image { r#type: String, image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
    detail: String,
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

/// Sends `prompt` plus every base64 JPEG in `images_base64` as one
/// multi-image chat-completion request. Does not rate-limit or retry; the
/// visual analyzer's caller owns that via `pitchjudge_core::ratelimit::vision_limiter`.
pub async fn vision_completion(
    prompt: &str,
    images_base64: &[&str],
    cfg: &GenerationConfig,
) -> Result<String> {
    let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| VisualError::MissingApiKey)?;
    let base_url = std::env::var("OPENAI_API_BASE")
        .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());

    let client = reqwest::Client::builder().timeout(cfg.timeout).build()?;

    let mut content = vec![Content::Text {
        r#type: "text".to_string(),
        text: prompt.to_string(),
    }];
    for b64 in images_base64 {
        content.push(Content::Image {
            r#type: "image_url".to_string(),
            image_url: ImageUrl {
                url: format!("data:image/jpeg;base64,{b64}"),
                detail: "high".to_string(),
            },
        });
    }

    let request = ChatRequest {
        model: cfg.model.clone(),
        messages: vec![Message {
            role: "user".to_string(),
            content,
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
        return Err(VisualError::Api {
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
