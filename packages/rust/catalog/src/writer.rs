//! Catalog file writer.
//!
//! Renders entities as a multi-document YAML stream and overwrites the
//! output file in full on every run. A newly created file is staged with
//! `git add` so it shows up in the next commit.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info, instrument, warn};

use backstageify_shared::{BackstageifyError, Result};

use crate::entity::CatalogEntity;

/// Outcome of a catalog write.
#[derive(Debug, Clone)]
pub struct WriteResult {
    /// Where the catalog was written.
    pub path: PathBuf,
    /// Whether the file was newly created by this run.
    pub created: bool,
    /// Whether a newly created file was staged with git.
    pub staged: bool,
    /// Size of the rendered stream.
    pub bytes_written: usize,
}

/// Writes the catalog file, optionally staging new files with git.
#[derive(Debug, Clone)]
pub struct CatalogWriter {
    stage_new_files: bool,
}

impl Default for CatalogWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogWriter {
    /// Create a writer that stages newly created files with git.
    pub fn new() -> Self {
        Self {
            stage_new_files: true,
        }
    }

    /// Toggle git staging of newly created files.
    pub fn stage_new_files(mut self, enabled: bool) -> Self {
        self.stage_new_files = enabled;
        self
    }

    /// Render `entities` and overwrite `path` with the result.
    ///
    /// The write is a plain full overwrite; there are no atomic-replace
    /// semantics.
    #[instrument(skip_all, fields(path = %path.display(), entities = entities.len()))]
    pub fn write(&self, path: &Path, entities: &[CatalogEntity]) -> Result<WriteResult> {
        let stream = render_stream(entities)?;
        let created = !path.exists();

        std::fs::write(path, &stream).map_err(|e| BackstageifyError::io(path, e))?;

        let staged = created && self.stage_new_files && stage_with_git(path);

        info!(
            entity_count = entities.len(),
            bytes = stream.len(),
            created,
            staged,
            "catalog written"
        );

        Ok(WriteResult {
            path: path.to_path_buf(),
            created,
            staged,
            bytes_written: stream.len(),
        })
    }
}

/// Render entities as a YAML stream: documents in order, separated by `---`,
/// block-style collections, key order preserved.
pub fn render_stream(entities: &[CatalogEntity]) -> Result<String> {
    let mut out = String::new();

    for (i, entity) in entities.iter().enumerate() {
        if i > 0 {
            out.push_str("---\n");
        }
        let doc = serde_yaml::to_string(entity).map_err(|e| {
            BackstageifyError::encode(format!("entity {} ({}): {e}", entity.name(), entity.kind()))
        })?;
        out.push_str(&doc);
    }

    Ok(out)
}

/// Stage a file with `git add`. Failures are warnings, never fatal: the
/// catalog itself is already on disk.
fn stage_with_git(path: &Path) -> bool {
    match Command::new("git").arg("add").arg(path).status() {
        Ok(status) if status.success() => {
            debug!(path = %path.display(), "staged new catalog file");
            true
        }
        Ok(status) => {
            warn!(path = %path.display(), %status, "git add failed");
            false
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not invoke git");
            false
        }
    }
}
