//! Loosely-typed vision response shape, mirroring
//! `original_source/project_context/image.py`'s `WorkflowAnalysisAgent`
//! output before it is normalized into `pitchjudge_core::model::ImageAnalysis`.

use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct VisionResponse {
    #[serde(default)]
    pub overall: String,
    #[serde(default)]
    pub images: Vec<RawImageAnalysis>,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawImageAnalysis {
    #[serde(default)]
    pub index: Option<u32>,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub is_diagram: Option<bool>,
    #[serde(default)]
    pub importance: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
}
