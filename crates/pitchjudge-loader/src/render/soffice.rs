//! Headless LibreOffice/OpenOffice rendering fallback.
//!
//! Grounded on `docling-quality-verifier::visual::VisualTester::document_to_pdf`:
//! `soffice --headless --convert-to pdf --outdir ...`. `soffice`'s own
//! `--convert-to png` only exports a single slide, so the PDF it produces
//! is rasterized page-by-page with the same Pdfium path PDFs use
//! (`crate::pdf`), giving one PNG per slide in order.

use std::path::{Path, PathBuf};
use std::process::Command;

use super::RendererStrategy;
use crate::error::{LoaderError, Result};

const RENDER_DPI: u32 = 150;

pub struct Soffice;

impl RendererStrategy for Soffice {
    fn render(&self, input: &Path, out_dir: &Path) -> Result<Vec<PathBuf>> {
        let output = Command::new("soffice")
            .args([
                "--headless",
                "--convert-to",
                "pdf",
                "--outdir",
                out_dir.to_str().ok_or_else(|| LoaderError::Render("non-utf8 out_dir".into()))?,
                input.to_str().ok_or_else(|| LoaderError::Render("non-utf8 input path".into()))?,
            ])
            .output()?;

        if !output.status.success() {
            return Err(LoaderError::Render(format!(
                "soffice exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr)
            )));
        }

        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| LoaderError::Render("non-utf8 file stem".into()))?;
        let pdf_path = out_dir.join(format!("{stem}.pdf"));
        if !pdf_path.exists() {
            return Err(LoaderError::Render("soffice did not produce a PDF".into()));
        }

        let pages = crate::pdf::rasterize_to_png_files(&pdf_path, out_dir, RENDER_DPI)
            .map_err(|e| LoaderError::Render(format!("rasterizing converted PDF failed: {e}")))?;
        Ok(pages)
    }
}
