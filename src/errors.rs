//! Typed fatal errors.
//! Every variant aborts the run; skips are not errors and never appear here.
//! Planning variants are raised before any mutation, execution variants as
//! soon as the offending move is reached.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MvreError {
    #[error("Invalid replacement for '{path}': unknown group reference '${reference}'")]
    UnknownGroup { reference: String, path: PathBuf },

    #[error("Rename result must be a relative path. Got: '{0}'")]
    AbsoluteResult(String),

    #[error("Rename result escapes target folder: '{0}'")]
    EscapesTarget(String),

    #[error("Cannot move a directory into itself: '{source_rel}' -> '{dest_rel}'")]
    SelfNested { source_rel: PathBuf, dest_rel: PathBuf },

    #[error("Multiple sources map to the same target path:{}", list(.0))]
    DuplicateDestinations(Vec<PathBuf>),

    #[error("Source file not found: {0}")]
    SourceFileMissing(PathBuf),

    #[error("Source directory not found: {0}")]
    SourceDirMissing(PathBuf),

    #[error("Target is a directory: {0}")]
    TargetIsDirectory(PathBuf),

    #[error("Target exists but is not a directory: {0}")]
    TargetNotDirectory(PathBuf),

    #[error("Target already exists: {0} (use --no-clobber or --overwrite-mode to resolve)")]
    TargetExists(PathBuf),
}

fn list(paths: &[PathBuf]) -> String {
    let mut out = String::new();
    for p in paths {
        out.push_str("\n  ");
        out.push_str(&p.display().to_string());
    }
    out
}
