//! Error types shared across the evaluation pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can surface at the orchestrator boundary.
///
/// Component crates define their own narrower error enums and convert into
/// this one via `#[from]` at the point where the orchestrator consumes them.
#[derive(Error, Debug)]
pub enum PitchjudgeError {
    /// A file extension fell outside the accepted set (`.pdf`, `.pptx`, `.ppt`).
    #[error("unsupported format: {0}")]
    UnsupportedFormat(PathBuf),

    /// Filesystem error reading an input file or writing an artifact.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure decoding or encoding a JSON payload.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An LLM call failed permanently after exhausting retries.
    #[error("LLM error: {0}")]
    Llm(String),

    /// A document render pass (PDF rasterization, slide export) failed.
    #[error("render error: {0}")]
    Render(String),

    /// `TEAM_GLOB` resolved to an empty file list.
    #[error("no files matched: {0}")]
    NoFilesMatched(String),
}

pub type Result<T> = std::result::Result<T, PitchjudgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_size_is_reasonable() {
        assert!(std::mem::size_of::<PitchjudgeError>() < 256);
    }

    #[test]
    fn unsupported_format_displays_path() {
        let err = PitchjudgeError::UnsupportedFormat(PathBuf::from("deck.key"));
        assert!(err.to_string().contains("deck.key"));
    }

    #[test]
    fn io_error_converts_via_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: PitchjudgeError = io_err.into();
        assert!(matches!(err, PitchjudgeError::Io(_)));
    }
}
