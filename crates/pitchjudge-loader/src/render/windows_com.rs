//! Windows-only COM-automation renderer arm.
//!
//! No real automation binding is wired up here: no COM crate appears
//! anywhere in the retrieved reference pack to ground a choice of binding
//! (see `DESIGN.md`), so this degrades to reporting itself unavailable.
//! The trait boundary stays in place so a real binding can be dropped in
//! later without touching `pick_strategy`'s callers.

use std::path::{Path, PathBuf};

use super::RendererStrategy;
use crate::error::Result;

pub struct ComAutomation;

pub fn is_available() -> bool {
    false
}

impl RendererStrategy for ComAutomation {
    fn render(&self, _input: &Path, _out_dir: &Path) -> Result<Vec<PathBuf>> {
        Ok(Vec::new())
    }
}
