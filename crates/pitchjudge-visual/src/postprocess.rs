//! Normalizes loosely-typed vision output into [`ImageAnalysis`], filling
//! the spec's documented defaults for any field the model omitted (spec
//! §4.2 Post-processing): `is_diagram` defaults from `type` (types in
//! {photo, image, mockup} are non-diagrams, everything else is); missing
//! `importance` defaults to "supporting" for diagrams else "decorative";
//! missing `confidence` defaults to 0.7.

use pitchjudge_core::model::{EvidenceImage, ImageAnalysis, Importance};

use crate::raw::RawImageAnalysis;

const NON_DIAGRAM_TYPES: [&str; 3] = ["photo", "image", "mockup"];

fn default_is_diagram(kind: Option<&str>) -> bool {
    match kind.map(|s| s.trim().to_ascii_lowercase()) {
        Some(t) => !NON_DIAGRAM_TYPES.contains(&t.as_str()),
        None => true,
    }
}

fn parse_importance(raw: Option<&str>, is_diagram: bool) -> Importance {
    match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        Some("critical") => Importance::Critical,
        Some("supporting") => Importance::Supporting,
        Some("decorative") => Importance::Decorative,
        Some("irrelevant") => Importance::Irrelevant,
        _ if is_diagram => Importance::Supporting,
        _ => Importance::Decorative,
    }
}

/// Builds one [`ImageAnalysis`] per source image, matching a raw response
/// entry by `index` when present and falling back to positional order
/// otherwise. An image with no matching raw entry at all (the model
/// dropped it from its response) still defaults to non-evidentiary, since
/// there is no `type` to derive a diagram default from.
pub fn normalize(images: &[EvidenceImage], raw: Vec<RawImageAnalysis>) -> Vec<ImageAnalysis> {
    images
        .iter()
        .enumerate()
        .map(|(i, img)| {
            let matched = raw
                .iter()
                .find(|r| r.index == Some(i as u32))
                .or_else(|| raw.get(i));
            let (description, kind, is_diagram, importance, confidence) = match matched {
                Some(r) => {
                    let is_diagram = r.is_diagram.unwrap_or_else(|| default_is_diagram(r.kind.as_deref()));
                    (
                        r.description.clone(),
                        r.kind.clone().unwrap_or_else(|| "Unknown".to_string()),
                        is_diagram,
                        parse_importance(r.importance.as_deref(), is_diagram),
                        r.confidence.unwrap_or(0.7).clamp(0.0, 1.0),
                    )
                }
                None => (String::new(), "Unknown".to_string(), false, Importance::Decorative, 0.7),
            };
            ImageAnalysis {
                image_index: i as u32,
                description,
                kind,
                slide_index: img.slide_index,
                page_index: img.page_index,
                is_diagram,
                importance,
                confidence,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn img(slide: u32) -> EvidenceImage {
        EvidenceImage {
            base64_jpeg: "x".into(),
            slide_index: Some(slide),
            page_index: None,
            perceptual_hash: None,
            is_rendered: true,
        }
    }

    #[test]
    fn missing_entry_defaults_to_non_evidentiary() {
        let images = vec![img(0), img(1)];
        let raw = vec![RawImageAnalysis {
            index: Some(0),
            description: "flow".into(),
            kind: Some("Flowchart".into()),
            is_diagram: Some(true),
            importance: Some("critical".into()),
            confidence: Some(0.95),
        }];
        let out = normalize(&images, raw);
        assert_eq!(out.len(), 2);
        assert!(out[0].is_diagram);
        assert!(!out[1].is_diagram);
        assert_eq!(out[1].importance, Importance::Decorative);
    }

    #[test]
    fn missing_is_diagram_defaults_from_type() {
        let images = vec![img(0), img(1)];
        let raw = vec![
            RawImageAnalysis {
                index: Some(0),
                description: "flow".into(),
                kind: Some("flowchart".into()),
                is_diagram: None,
                importance: None,
                confidence: None,
            },
            RawImageAnalysis {
                index: Some(1),
                description: "team photo".into(),
                kind: Some("photo".into()),
                is_diagram: None,
                importance: None,
                confidence: None,
            },
        ];
        let out = normalize(&images, raw);
        assert!(out[0].is_diagram);
        assert_eq!(out[0].importance, Importance::Supporting);
        assert!(!out[1].is_diagram);
        assert_eq!(out[1].importance, Importance::Decorative);
    }

    #[test]
    fn unrecognized_importance_string_defaults_from_is_diagram() {
        let images = vec![img(0)];
        let raw = vec![RawImageAnalysis {
            index: Some(0),
            description: "x".into(),
            kind: None,
            is_diagram: Some(true),
            importance: Some("super-critical".into()),
            confidence: None,
        }];
        let out = normalize(&images, raw);
        assert_eq!(out[0].importance, Importance::Supporting);
        assert_eq!(out[0].confidence, 0.7);
    }
}
