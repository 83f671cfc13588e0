//! Candidate enumeration under the source root.
//! Yields (absolute, relative) path pairs for either files or directories.
//! Directories come out deepest-first so nested directory moves are applied
//! from the leaves up and do not invalidate each other's sources.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::debug;
use walkdir::WalkDir;

use crate::config::{Config, EntryKind};

/// One enumerated entry: absolute path plus its path relative to the root.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub path: PathBuf,
    pub rel: PathBuf,
}

/// Enumerate candidate entries per the configured kind and depth.
pub fn candidates(cfg: &Config) -> Result<Vec<Candidate>> {
    let max_depth = if cfg.recursive { usize::MAX } else { 1 };
    let mut out = Vec::new();

    for entry in WalkDir::new(&cfg.source_root).min_depth(1).max_depth(max_depth) {
        let entry = entry.with_context(|| {
            format!("Failed to enumerate '{}'", cfg.source_root.display())
        })?;
        let wanted = match cfg.kind {
            EntryKind::Files => entry.file_type().is_file(),
            EntryKind::Directories => entry.file_type().is_dir(),
        };
        if !wanted {
            continue;
        }
        let rel = entry
            .path()
            .strip_prefix(&cfg.source_root)
            .with_context(|| format!("Entry escapes source root: {}", entry.path().display()))?
            .to_path_buf();
        out.push(Candidate { path: entry.into_path(), rel });
    }

    if cfg.kind == EntryKind::Directories {
        // Deepest-first, by path length like a longest-prefix sort.
        out.sort_by(|a, b| b.path.as_os_str().len().cmp(&a.path.as_os_str().len()));
    }

    debug!(count = out.len(), kind = ?cfg.kind, "candidates enumerated");
    Ok(out)
}
