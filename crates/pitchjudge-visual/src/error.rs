//! Error type for the visual analyzer crate.

use pitchjudge_core::PitchjudgeError;

#[derive(Debug, thiserror::Error)]
pub enum VisualError {
    #[error("missing OPENAI_API_KEY")]
    MissingApiKey,
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("vision API returned status {status}: {body}")]
    Api { status: u16, body: String },
    #[error("vision call timed out after {0}s")]
    Timeout(u64),
    #[error("no JSON object found in vision response")]
    NoJsonFound,
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<VisualError> for PitchjudgeError {
    fn from(err: VisualError) -> Self {
        PitchjudgeError::Llm(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, VisualError>;
