//! PDF text extraction, embedded-image extraction, and full-page
//! rasterization.
//!
//! Grounded on `docling-llm-verify::pdf::PdfRenderer` for the
//! DPI-to-pixel-dimension math and PNG encoding, and on `lopdf` (already in
//! the workspace dependency table) for the raw `/XObject` walk that
//! `pdfium-render` itself does not expose.

use base64::Engine;
use image::ImageFormat;
use pdfium_render::prelude::*;
use pitchjudge_core::EvidenceImage;
use std::path::Path;
use std::sync::OnceLock;
use tracing::warn;

use crate::error::{LoaderError, Result};

/// PDF points per inch; 1 inch = 72 points.
const PDF_POINTS_PER_INCH: f32 = 72.0;

static PDFIUM: OnceLock<Pdfium> = OnceLock::new();

fn pdfium() -> &'static Pdfium {
    PDFIUM.get_or_init(Pdfium::default)
}

/// `(raw_text, images)` for a PDF file. `dpi` and `max_render_pages` come
/// from `RENDER_DPI` / `MAX_RENDER_PAGES` at the orchestrator boundary.
pub fn load(path: &Path, dpi: u32, max_render_pages: usize) -> Result<(String, Vec<EvidenceImage>)> {
    let document = match pdfium().load_pdf_from_file(path, None) {
        Ok(doc) => doc,
        Err(e) => {
            warn!(file = %path.display(), error = %e, "failed to open PDF");
            return Ok((String::new(), Vec::new()));
        }
    };

    let mut raw_text = String::new();
    for page in document.pages().iter() {
        if let Ok(text) = page.text() {
            raw_text.push_str(&text.all());
            raw_text.push('\n');
        }
    }

    let mut images = Vec::new();

    // Rendered pages go first so full-page diagrams are seen before
    // embedded pictures.
    let page_count = document.pages().len() as usize;
    for (i, page) in document.pages().iter().enumerate().take(max_render_pages) {
        let width = page.width().value;
        let height = page.height().value;
        let render_config = PdfRenderConfig::new()
            .set_target_width((width * dpi as f32 / PDF_POINTS_PER_INCH) as i32)
            .set_target_height((height * dpi as f32 / PDF_POINTS_PER_INCH) as i32);
        match page.render_with_config(&render_config) {
            Ok(bitmap) => {
                let rendered = bitmap.as_image();
                let mut jpeg_bytes = Vec::new();
                if rendered
                    .to_rgb8()
                    .write_to(&mut std::io::Cursor::new(&mut jpeg_bytes), ImageFormat::Jpeg)
                    .is_ok()
                {
                    images.push(EvidenceImage {
                        base64_jpeg: base64::engine::general_purpose::STANDARD.encode(&jpeg_bytes),
                        slide_index: None,
                        page_index: Some(i as u32),
                        perceptual_hash: None,
                        is_rendered: true,
                    });
                }
            }
            Err(e) => warn!(file = %path.display(), page = i, error = %e, "page render failed"),
        }
    }
    if page_count > max_render_pages {
        warn!(file = %path.display(), page_count, max_render_pages, "capped rendered pages");
    }

    // Embedded raster images from /XObject streams, independent of the
    // render pass above (SmartArt/vector diagrams won't show up here, but
    // scanned photos embedded as DCTDecode JPEGs will).
    match extract_embedded_jpegs(path) {
        Ok(embedded) => images.extend(embedded),
        Err(e) => warn!(file = %path.display(), error = %e, "embedded image extraction failed"),
    }

    Ok((raw_text, images))
}

/// Rasterizes every page of `pdf_path` to a PNG file under `out_dir`,
/// named `page-{n}.png` in page order. Used by the `soffice` renderer
/// fallback to turn its PDF output into per-slide images.
pub fn rasterize_to_png_files(
    pdf_path: &Path,
    out_dir: &Path,
    dpi: u32,
) -> std::result::Result<Vec<std::path::PathBuf>, LoaderError> {
    let document = pdfium()
        .load_pdf_from_file(pdf_path, None)
        .map_err(|e| LoaderError::Render(format!("failed to open converted PDF: {e}")))?;

    let mut out = Vec::new();
    for (i, page) in document.pages().iter().enumerate() {
        let width = page.width().value;
        let height = page.height().value;
        let render_config = PdfRenderConfig::new()
            .set_target_width((width * dpi as f32 / PDF_POINTS_PER_INCH) as i32)
            .set_target_height((height * dpi as f32 / PDF_POINTS_PER_INCH) as i32);
        let bitmap = page
            .render_with_config(&render_config)
            .map_err(|e| LoaderError::Render(format!("render failed: {e}")))?;
        let file_path = out_dir.join(format!("page-{i:03}.png"));
        bitmap
            .as_image()
            .save_with_format(&file_path, ImageFormat::Png)
            .map_err(|e| LoaderError::Render(format!("PNG save failed: {e}")))?;
        out.push(file_path);
    }
    Ok(out)
}

/// Walks every page's `/XObject` resources for `/Subtype /Image` streams
/// encoded as `/Filter /DCTDecode` (JPEG) and returns them verbatim as
/// base64. Other filters (FlateDecode raw bitmaps, JPXDecode, CCITT) are
/// skipped rather than re-encoded, keeping this path small and honest
/// about what it actually extracts.
fn extract_embedded_jpegs(path: &Path) -> std::result::Result<Vec<EvidenceImage>, LoaderError> {
    let doc = lopdf::Document::load(path)
        .map_err(|e| LoaderError::Render(format!("lopdf load failed: {e}")))?;

    let mut out = Vec::new();
    for (page_idx, (_, page_id)) in doc.get_pages().into_iter().enumerate() {
        let (resources, _) = doc.get_page_resources(page_id);
        let Some(xobjects_dict) = resources else {
            continue;
        };
        let Ok(xobjects) = xobjects_dict.get(b"XObject").and_then(|o| o.as_dict()) else {
            continue;
        };
        for (_, obj_ref) in xobjects.iter() {
            let Ok(obj_id) = obj_ref.as_reference() else {
                continue;
            };
            let Ok(stream) = doc.get_object(obj_id).and_then(|o| o.as_stream()) else {
                continue;
            };
            let is_image = stream
                .dict
                .get(b"Subtype")
                .and_then(|s| s.as_name())
                .map(|n| n == &b"Image"[..])
                .unwrap_or(false);
            if !is_image {
                continue;
            }
            let is_jpeg = stream
                .dict
                .get(b"Filter")
                .map(|f| match f {
                    lopdf::Object::Name(n) => n.as_slice() == &b"DCTDecode"[..],
                    lopdf::Object::Array(arr) => arr.iter().any(|o| {
                        matches!(o.as_name(), Ok(n) if n == &b"DCTDecode"[..])
                    }),
                    _ => false,
                })
                .unwrap_or(false);
            if !is_jpeg {
                continue;
            }
            out.push(EvidenceImage {
                base64_jpeg: base64::engine::general_purpose::STANDARD.encode(&stream.content),
                slide_index: None,
                page_index: Some(page_idx as u32),
                perceptual_hash: None,
                is_rendered: false,
            });
        }
    }
    Ok(out)
}
