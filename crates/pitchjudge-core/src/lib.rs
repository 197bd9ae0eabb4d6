//! Shared data model, error taxonomy, and process-wide rate limiters for
//! the presentation evaluation pipeline.

pub mod error;
pub mod model;
pub mod ratelimit;
pub mod rubric;

pub use error::{PitchjudgeError, Result};
pub use model::{
    DedupKey, EvaluationContext, EvidenceImage, FileInput, ImageAnalysis, Importance,
    LeaderboardEntry, ScoreVector, WorkflowReport, ALLOWED_EXTS,
};
pub use model::Feedback;
pub use rubric::RubricKey;
