//! Frame capture sinks.
//!
//! Sinks consume rendered frames in frame order and are driven by `WaveSession::run`.

use crate::foundation::error::WavefieldResult;
use anyhow::Context as _;
use std::path::Path;

/// Numbered PNG sequence sink.
pub mod png;
/// Generic frame sink trait and built-in sinks.
pub mod sink;

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> WavefieldResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}
