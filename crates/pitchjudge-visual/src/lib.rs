//! Visual analyzer (C2): dedups evidence images by perceptual hash, caps
//! the set sent to the vision model, and classifies each as diagram
//! evidence or not.

pub mod client;
pub mod dedup;
pub mod error;
pub mod invoke;
mod postprocess;
mod prompts;
mod raw;

pub use error::{Result, VisualError};

use pitchjudge_agents::config::{max_retries, vision_config};
use pitchjudge_core::model::{EvidenceImage, WorkflowReport};
use tracing::{instrument, warn};

/// Dedups and budget-samples `images`, then (if any remain) runs one vision
/// call classifying all of them together. Returns `None` when there were no
/// images to analyze, matching the source's `workflow_analysis: null` case.
#[instrument(skip_all, fields(n = images.len()))]
pub async fn analyze(images: Vec<EvidenceImage>) -> Option<WorkflowReport> {
    let mut deduped = dedup::dedup(images);
    if deduped.is_empty() {
        return None;
    }
    dedup::hash_images(&mut deduped);
    let deduped = dedup::dedup(deduped);
    let sampled = dedup::sample_for_budget(deduped);

    let prompt = prompts::analysis_prompt(sampled.len());
    let images_b64: Vec<&str> = sampled.iter().map(|i| i.base64_jpeg.as_str()).collect();
    let cfg = vision_config();

    match invoke::invoke_vision_json::<raw::VisionResponse>(&prompt, &images_b64, &cfg, max_retries())
        .await
    {
        Ok(resp) => {
            let image_analyses = postprocess::normalize(&sampled, resp.images);
            Some(WorkflowReport {
                overall_summary: resp.overall,
                image_analyses,
            })
        }
        Err(e) => {
            warn!(error = %e, "visual analyzer failed, treating file as having no diagram evidence");
            None
        }
    }
}

/// Counts how many images a real `analyze` call would actually send to the
/// vision model, without making any network call (spec §9 dry-run mode).
pub fn count_for_budget(images: Vec<EvidenceImage>) -> usize {
    let mut deduped = dedup::dedup(images);
    if deduped.is_empty() {
        return 0;
    }
    dedup::hash_images(&mut deduped);
    let deduped = dedup::dedup(deduped);
    dedup::sample_for_budget(deduped).len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_image_list_yields_no_report() {
        assert!(analyze(Vec::new()).await.is_none());
    }

    #[test]
    #[serial_test::serial(max_vision_images_env)]
    fn count_for_budget_matches_sample_cap() {
        let images: Vec<_> = (0..50)
            .map(|i| EvidenceImage {
                base64_jpeg: format!("img-{i}"),
                slide_index: Some(i),
                page_index: None,
                perceptual_hash: None,
                is_rendered: false,
            })
            .collect();
        assert_eq!(count_for_budget(images), dedup::MAX_VISION_IMAGES);
    }
}
