//! PNG (single slide) and PDF (whole deck) exporters.

pub mod pdf;
pub mod png;

use std::path::Path;

use anyhow::Context;

use crate::foundation::error::SlideResult;

pub(crate) fn write_bytes(path: &Path, bytes: &[u8]) -> SlideResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))?;
    Ok(())
}
