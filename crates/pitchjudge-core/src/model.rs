//! Shared data model: file input, evidence images, workflow reports, score
//! vectors, and the per-file evaluation context.

use crate::rubric::RubricKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// File extensions accepted by the loader.
pub const ALLOWED_EXTS: [&str; 3] = ["pdf", "pptx", "ppt"];

/// An accepted input path together with its derived team name.
#[derive(Debug, Clone)]
pub struct FileInput {
    pub path: PathBuf,
    pub team_name: String,
}

impl FileInput {
    /// Builds a `FileInput` if `path`'s extension is in [`ALLOWED_EXTS`].
    pub fn new(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let ext_ok = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| ALLOWED_EXTS.contains(&e.to_ascii_lowercase().as_str()))
            .unwrap_or(false);
        if !ext_ok {
            return None;
        }
        let team_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Unknown")
            .to_string();
        Some(Self { path, team_name })
    }

    pub fn is_allowed(path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| ALLOWED_EXTS.contains(&e.to_ascii_lowercase().as_str()))
            .unwrap_or(false)
    }
}

/// A single piece of raster evidence extracted from a deck.
///
/// At most one of `slide_index` / `page_index` is set. `perceptual_hash` is
/// `None` when the hashing backend could not decode the image; dedup then
/// falls back to `(slide_index, page_index, payload length)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceImage {
    pub base64_jpeg: String,
    pub slide_index: Option<u32>,
    pub page_index: Option<u32>,
    pub perceptual_hash: Option<u64>,
    /// True when this image came from a full-page/slide render rather than
    /// an embedded picture. Rendered images are ordered first.
    pub is_rendered: bool,
}

impl EvidenceImage {
    pub fn dedup_key(&self) -> DedupKey {
        match self.perceptual_hash {
            Some(h) => DedupKey::Hash(h),
            None => DedupKey::Fallback(self.slide_index, self.page_index, self.base64_jpeg.len()),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum DedupKey {
    Hash(u64),
    Fallback(Option<u32>, Option<u32>, usize),
}

/// How important a classified image is to the evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Critical,
    Supporting,
    Decorative,
    Irrelevant,
}

impl Importance {
    pub fn is_evidentiary(self) -> bool {
        matches!(self, Importance::Critical | Importance::Supporting)
    }
}

/// One vision-model analysis of a single evidence image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageAnalysis {
    pub image_index: u32,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub slide_index: Option<u32>,
    pub page_index: Option<u32>,
    pub is_diagram: bool,
    pub importance: Importance,
    pub confidence: f64,
}

/// Aggregate diagram evidence for one file, produced by the visual analyzer.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WorkflowReport {
    pub overall_summary: String,
    pub image_analyses: Vec<ImageAnalysis>,
}

impl WorkflowReport {
    /// Number of analyses counted as diagram evidence for calibration
    /// purposes: `is_diagram && importance in {critical, supporting}`.
    pub fn diagram_evidence_count(&self) -> usize {
        self.image_analyses
            .iter()
            .filter(|a| a.is_diagram && a.importance.is_evidentiary())
            .count()
    }

    /// Condensed evidence paragraph injected into scoring/feedback prompts:
    /// one line per analysis that is diagram evidence, preserving
    /// slide/page references.
    pub fn condensed_evidence_text(&self) -> String {
        let mut lines = Vec::new();
        lines.push(format!("Overall: {}", self.overall_summary.trim()));
        for a in &self.image_analyses {
            if !(a.is_diagram && a.importance.is_evidentiary()) {
                continue;
            }
            let tag = match a.importance {
                Importance::Critical => "CRITICAL",
                Importance::Supporting => "SUPPORTING",
                _ => unreachable!(),
            };
            let mut where_bits = Vec::new();
            if let Some(s) = a.slide_index {
                where_bits.push(format!("slide {}", s + 1));
            }
            if let Some(p) = a.page_index {
                where_bits.push(format!("page {}", p + 1));
            }
            let where_str = if where_bits.is_empty() {
                String::new()
            } else {
                format!(" ({})", where_bits.join(", "))
            };
            lines.push(format!(
                "Image {} [{}, {}]{}: {}",
                a.image_index,
                tag,
                a.kind,
                where_str,
                a.description.trim()
            ));
        }
        lines.join("\n").trim().to_string()
    }
}

/// Mapping from the six rubric keys to integer scores in `[1, 10]`.
#[derive(Debug, Clone, Default)]
pub struct ScoreVector(BTreeMap<RubricKey, i32>);

impl ScoreVector {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Clamps `value` to `[1, 10]` before storing.
    pub fn set(&mut self, key: RubricKey, value: i32) {
        self.0.insert(key, value.clamp(1, 10));
    }

    pub fn get(&self, key: RubricKey) -> Option<i32> {
        self.0.get(&key).copied()
    }

    pub fn is_complete(&self) -> bool {
        RubricKey::ALL.iter().all(|k| self.0.contains_key(k))
    }

    pub fn raw_total(&self) -> i32 {
        RubricKey::ALL.iter().filter_map(|k| self.get(*k)).sum()
    }

    /// `sum(score/10 * weight)`, rounded to 2 decimals, out of 100.
    pub fn weighted_total(&self) -> f64 {
        let sum: f64 = RubricKey::ALL
            .iter()
            .map(|k| {
                let score = self.get(*k).unwrap_or(0) as f64;
                (score / 10.0) * k.weight() as f64
            })
            .sum();
        (sum * 100.0).round() / 100.0
    }

    pub fn iter(&self) -> impl Iterator<Item = (RubricKey, i32)> + '_ {
        RubricKey::ALL.iter().map(move |k| (*k, self.get(*k).unwrap_or(0)))
    }
}

impl fmt::Debug for DedupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DedupKey::Hash(h) => write!(f, "Hash({h})"),
            DedupKey::Fallback(s, p, l) => write!(f, "Fallback({s:?},{p:?},{l})"),
        }
    }
}

/// `{positive, criticism, technical, suggestions}` feedback block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Feedback {
    pub positive: String,
    pub criticism: String,
    pub technical: String,
    pub suggestions: String,
}

/// Per-file mutable record threaded through loader → visual analyzer →
/// agents → calibrator. Owned exclusively by one orchestrator task.
#[derive(Debug, Clone)]
pub struct EvaluationContext {
    pub file_path: PathBuf,
    pub team_name: String,
    pub raw_text: String,
    pub images: Vec<EvidenceImage>,
    pub workflow_report: Option<WorkflowReport>,
    pub workflow_report_text: String,
    pub scores: ScoreVector,
    pub scoring_summary: String,
    pub feedback: Feedback,
    pub evaluation_error: Option<String>,
}

impl EvaluationContext {
    pub fn new(file_path: PathBuf, team_name: String) -> Self {
        Self {
            file_path,
            team_name,
            raw_text: String::new(),
            images: Vec::new(),
            workflow_report: None,
            workflow_report_text: String::new(),
            scores: ScoreVector::new(),
            scoring_summary: String::new(),
            feedback: Feedback::default(),
            evaluation_error: None,
        }
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.evaluation_error = Some(msg.into());
    }

    pub fn attach_workflow_report(&mut self, report: Option<WorkflowReport>) {
        self.workflow_report_text = report
            .as_ref()
            .map(|r| r.condensed_evidence_text())
            .unwrap_or_default();
        self.workflow_report = report;
    }

    pub fn diagram_evidence_count(&self) -> usize {
        self.workflow_report
            .as_ref()
            .map(WorkflowReport::diagram_evidence_count)
            .unwrap_or(0)
    }
}

/// A derived leaderboard row; not stored independently of its context.
#[derive(Debug, Clone)]
pub struct LeaderboardEntry {
    pub team_name: String,
    pub file_path: PathBuf,
    pub weighted_total: Option<f64>,
    pub scores: ScoreVector,
    pub evaluation_error: Option<String>,
}

impl From<&EvaluationContext> for LeaderboardEntry {
    fn from(ctx: &EvaluationContext) -> Self {
        Self {
            team_name: ctx.team_name.clone(),
            file_path: ctx.file_path.clone(),
            weighted_total: if ctx.evaluation_error.is_some() {
                None
            } else {
                Some(ctx.scores.weighted_total())
            },
            scores: ctx.scores.clone(),
            evaluation_error: ctx.evaluation_error.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_input_rejects_unknown_extension() {
        assert!(FileInput::new("deck.key").is_none());
        assert!(FileInput::new("deck.PDF").is_some());
    }

    #[test]
    fn file_input_derives_team_name_from_stem() {
        let f = FileInput::new("teams/Alpha Squad.pptx").unwrap();
        assert_eq!(f.team_name, "Alpha Squad");
    }

    #[test]
    fn weighted_total_matches_spec_example() {
        let mut sv = ScoreVector::new();
        for k in RubricKey::ALL {
            sv.set(k, 3);
        }
        assert_eq!(sv.weighted_total(), 30.00);
    }

    #[test]
    fn condensed_evidence_text_only_includes_diagram_evidence() {
        let report = WorkflowReport {
            overall_summary: "ok".into(),
            image_analyses: vec![
                ImageAnalysis {
                    image_index: 0,
                    description: "flow".into(),
                    kind: "Flowchart".into(),
                    slide_index: Some(0),
                    page_index: None,
                    is_diagram: true,
                    importance: Importance::Critical,
                    confidence: 0.9,
                },
                ImageAnalysis {
                    image_index: 1,
                    description: "logo".into(),
                    kind: "Logo".into(),
                    slide_index: Some(1),
                    page_index: None,
                    is_diagram: false,
                    importance: Importance::Decorative,
                    confidence: 0.5,
                },
            ],
        };
        let text = report.condensed_evidence_text();
        assert!(text.contains("Image 0"));
        assert!(!text.contains("Image 1"));
        assert_eq!(report.diagram_evidence_count(), 1);
    }
}
