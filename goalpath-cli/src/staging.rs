//! Transient working copies of uploaded statements.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::info;

/// A statement copied into its own temporary directory. The copy is removed
/// when this value is dropped, whatever the outcome of processing.
pub struct Staged {
    dir: TempDir,
    path: PathBuf,
}

impl Staged {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for Staged {
    fn drop(&mut self) {
        info!(dir = %self.dir.path().display(), "removing staged upload");
    }
}

/// Copy `source` into a fresh temporary directory, keeping its file name so
/// the format can still be inferred from the extension.
pub fn stage_upload(source: &Path) -> Result<Staged> {
    let name = source
        .file_name()
        .with_context(|| format!("{} has no file name", source.display()))?;
    let dir = tempfile::Builder::new()
        .prefix("goalpath-upload-")
        .tempdir()
        .context("create staging directory")?;
    let path = dir.path().join(name);
    fs::copy(source, &path)
        .with_context(|| format!("stage {} -> {}", source.display(), path.display()))?;

    Ok(Staged { dir, path })
}

/// Size of the upload in bytes.
pub fn upload_size(source: &Path) -> Result<u64> {
    let meta = fs::metadata(source).with_context(|| format!("stat {}", source.display()))?;
    Ok(meta.len())
}
