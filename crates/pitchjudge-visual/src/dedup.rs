//! Perceptual-hash dedup and vision-budget sampling, grounded on
//! `video-audio-duplicate-detection::DuplicateDetector` (same `img_hash`
//! crate, same Gradient-hash-of-8x8 default).

use std::collections::HashSet;

use img_hash::{HashAlg, HasherConfig};
use pitchjudge_core::model::{DedupKey, EvidenceImage};
use tracing::debug;

/// Default maximum number of images sent to the vision model per file
/// (spec §4.2 / §5): keeps a single deck's vision cost and latency bounded
/// even when it has dozens of embedded pictures. Overridable via
/// `MAX_VISION_IMAGES` (spec S5).
pub const MAX_VISION_IMAGES: usize = 12;

fn max_vision_images() -> usize {
    std::env::var("MAX_VISION_IMAGES")
        .ok()
        .and_then(|v| v.parse().ok())
        .filter(|&n: &usize| n > 0)
        .unwrap_or(MAX_VISION_IMAGES)
}

/// Fills in `perceptual_hash` for every image that decodes cleanly,
/// leaving `None` for ones that don't (dedup then falls back to
/// `(slide_index, page_index, payload length)`).
pub fn hash_images(images: &mut [EvidenceImage]) {
    let hasher = HasherConfig::new()
        .hash_alg(HashAlg::Gradient)
        .hash_size(8, 8)
        .to_hasher();

    for img in images.iter_mut() {
        img.perceptual_hash = decode(&img.base64_jpeg).map(|decoded| {
            let hash = hasher.hash_image(&decoded);
            let bytes = hash.as_bytes();
            let mut buf = [0u8; 8];
            let n = bytes.len().min(8);
            buf[..n].copy_from_slice(&bytes[..n]);
            u64::from_be_bytes(buf)
        });
    }
}

fn decode(base64_jpeg: &str) -> Option<img_hash::image::DynamicImage> {
    use base64::Engine;
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(base64_jpeg)
        .ok()?;
    img_hash::image::load_from_memory(&bytes).ok()
}

/// Removes images whose [`EvidenceImage::dedup_key`] has already been seen,
/// preserving the incoming order (rendered-first, per the loader).
pub fn dedup(images: Vec<EvidenceImage>) -> Vec<EvidenceImage> {
    let mut seen: HashSet<DedupKey> = HashSet::new();
    let before = images.len();
    let out: Vec<_> = images
        .into_iter()
        .filter(|img| seen.insert(img.dedup_key()))
        .collect();
    if out.len() != before {
        debug!(removed = before - out.len(), "deduped evidence images");
    }
    out
}

/// Evenly subsamples down to the vision-image budget (`MAX_VISION_IMAGES`
/// by default, see [`max_vision_images`]) by stride, preferring earlier
/// (rendered-first) images when the budget doesn't divide evenly.
pub fn sample_for_budget(images: Vec<EvidenceImage>) -> Vec<EvidenceImage> {
    let budget = max_vision_images();
    if images.len() <= budget {
        return images;
    }
    let stride = images.len() as f64 / budget as f64;
    let mut out = Vec::with_capacity(budget);
    let mut idx = 0.0_f64;
    for _ in 0..budget {
        let i = idx.round() as usize;
        if let Some(img) = images.get(i) {
            out.push(img.clone());
        }
        idx += stride;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn img(hash: Option<u64>, slide: u32, len: usize) -> EvidenceImage {
        EvidenceImage {
            base64_jpeg: "x".repeat(len),
            slide_index: Some(slide),
            page_index: None,
            perceptual_hash: hash,
            is_rendered: false,
        }
    }

    #[test]
    fn dedup_removes_matching_hashes() {
        let images = vec![img(Some(1), 0, 10), img(Some(1), 1, 10), img(Some(2), 2, 10)];
        let out = dedup(images);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn dedup_falls_back_to_slide_and_length_without_a_hash() {
        let images = vec![img(None, 0, 10), img(None, 0, 10), img(None, 1, 10)];
        let out = dedup(images);
        assert_eq!(out.len(), 2);
    }

    #[test]
    #[serial_test::serial(max_vision_images_env)]
    fn sample_for_budget_caps_at_max_and_keeps_order() {
        let images: Vec<_> = (0..50).map(|i| img(Some(i as u64), i, 10)).collect();
        let sampled = sample_for_budget(images);
        assert_eq!(sampled.len(), MAX_VISION_IMAGES);
        let slides: Vec<_> = sampled.iter().map(|i| i.slide_index.unwrap()).collect();
        assert!(slides.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    #[serial_test::serial(max_vision_images_env)]
    fn sample_for_budget_is_noop_under_the_cap() {
        let images: Vec<_> = (0..5).map(|i| img(Some(i as u64), i, 10)).collect();
        assert_eq!(sample_for_budget(images.clone()).len(), 5);
    }

    #[test]
    #[serial_test::serial(max_vision_images_env)]
    fn scenario_s5_max_vision_images_env_override_samples_by_stride() {
        std::env::set_var("MAX_VISION_IMAGES", "4");
        let images: Vec<_> = (0..20).map(|i| img(Some(i as u64), i, 10)).collect();
        let sampled = sample_for_budget(images);
        std::env::remove_var("MAX_VISION_IMAGES");

        assert_eq!(sampled.len(), 4);
        let slides: Vec<_> = sampled.iter().map(|i| i.slide_index.unwrap()).collect();
        assert_eq!(slides, vec![0, 5, 10, 15]);
    }
}
