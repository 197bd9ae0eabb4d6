//! Capability-probed slide renderer selection.
//!
//! No OS checks in business logic — only here, in the strategy factory —
//! grounded on `goshtasb-omni-glass::mcp::sandbox::mod` (`#[cfg(target_os =
//! "...")]` submodule selection) and its `which::which` binary probing.

mod soffice;
#[cfg(target_os = "windows")]
mod windows_com;

use std::path::{Path, PathBuf};

/// Renders a PPTX/PPT file's slides to an ordered list of PNG files.
pub trait RendererStrategy {
    fn render(&self, input: &Path, out_dir: &Path) -> crate::error::Result<Vec<PathBuf>>;
}

struct Unavailable;

impl RendererStrategy for Unavailable {
    fn render(&self, _input: &Path, _out_dir: &Path) -> crate::error::Result<Vec<PathBuf>> {
        Ok(Vec::new())
    }
}

/// Picks a COM automation host on Windows when one is available, else a
/// `soffice` binary on `PATH`, else a no-op strategy that renders nothing.
pub fn pick_strategy() -> Box<dyn RendererStrategy> {
    #[cfg(target_os = "windows")]
    {
        if windows_com::is_available() {
            return Box::new(windows_com::ComAutomation);
        }
    }
    if which::which("soffice").is_ok() {
        return Box::new(soffice::Soffice);
    }
    Box::new(Unavailable)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_strategy_renders_no_pages_without_erroring() {
        let strategy = Unavailable;
        let result = strategy.render(Path::new("deck.pptx"), Path::new("/tmp"));
        assert_eq!(result.unwrap(), Vec::<PathBuf>::new());
    }
}
