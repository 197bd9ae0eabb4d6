use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("OPENAI_API_KEY not set")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("OpenAI API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("call timed out after {0}s")]
    Timeout(u64),

    #[error("could not recover a JSON object from the model response")]
    NoJsonFound,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<AgentError> for pitchjudge_core::PitchjudgeError {
    fn from(err: AgentError) -> Self {
        pitchjudge_core::PitchjudgeError::Llm(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AgentError>;
