//! Document Loader (C1): parses PDF/PPT/PPTX decks into deck text plus an
//! ordered list of evidence images, with fallback renderers for formats
//! whose diagrams live outside the text/raster-extraction path.

pub mod error;
mod filter;
pub mod pdf;
mod pptx;
mod render;

pub use error::{LoaderError, Result};

use pitchjudge_core::EvidenceImage;
use std::path::Path;
use tracing::{instrument, warn};

/// Default full-page/slide render resolution.
pub const DEFAULT_RENDER_DPI: u32 = 150;
/// Default cap on rendered pages per PDF.
pub const DEFAULT_MAX_RENDER_PAGES: usize = 12;

/// Loads `path` into `(raw_text, images)`. Fails with
/// [`LoaderError::UnsupportedFormat`] if the extension isn't `.pdf`,
/// `.pptx`, or `.ppt`. Never panics on parse/render failure: a renderer
/// failing independently does not prevent the other extraction path from
/// contributing, and total failure to read the file yields `("", [])`.
#[instrument(skip_all, fields(file = %path.display()))]
pub fn load(path: &Path, render_dpi: u32, max_render_pages: usize) -> Result<(String, Vec<EvidenceImage>)> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let result = match ext.as_deref() {
        Some("pdf") => pdf::load(path, render_dpi, max_render_pages),
        Some("pptx") | Some("ppt") => pptx::load(path),
        _ => return Err(LoaderError::UnsupportedFormat(path.to_path_buf())),
    };

    let (raw_text, mut images) = match result {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "load failed, returning empty evidence");
            (String::new(), Vec::new())
        }
    };

    images.retain(|img| match base64_decode(&img.base64_jpeg) {
        Some(bytes) => filter::is_worth_keeping(&bytes),
        None => false,
    });

    // Rendered images are already appended before embedded ones by each
    // per-format loader; a stable sort preserves that relative order while
    // keeping it explicit as an invariant here.
    images.sort_by_key(|img| !img.is_rendered);

    Ok((raw_text, images))
}

fn base64_decode(s: &str) -> Option<Vec<u8>> {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD.decode(s).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = load(Path::new("deck.key"), DEFAULT_RENDER_DPI, DEFAULT_MAX_RENDER_PAGES)
            .unwrap_err();
        assert!(matches!(err, LoaderError::UnsupportedFormat(_)));
    }

    #[test]
    fn missing_file_yields_empty_result_not_panic() {
        let (text, images) =
            load(Path::new("/nonexistent/deck.pdf"), DEFAULT_RENDER_DPI, DEFAULT_MAX_RENDER_PAGES)
                .unwrap();
        assert!(text.is_empty());
        assert!(images.is_empty());
    }
}
