//! Runtime configuration.
//! - Config is an explicit immutable value built from parsed CLI flags and
//!   passed into the planner and executor; there is no global option state.
//! - OverwriteMode is the comparator vocabulary shared by tie-breaking and
//!   overwrite-on-conflict decisions.

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

/// Which kind of filesystem entry a run operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular files only (default).
    Files,
    /// Directories only, supplied deepest-first by the walker.
    Directories,
}

/// Comparator selecting the winner when two entries compete for one path:
/// either two sources mapping to the same destination, or a source against
/// an already-existing destination at execution time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OverwriteMode {
    /// Prefer the larger source (by byte length).
    Larger,
    /// Prefer the smaller source.
    Small,
    /// Prefer the older source (by last-modification time).
    Older,
    /// Prefer the newer source.
    Newer,
}

impl fmt::Display for OverwriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OverwriteMode::Larger => "larger",
            OverwriteMode::Small => "small",
            OverwriteMode::Older => "older",
            OverwriteMode::Newer => "newer",
        };
        f.write_str(s)
    }
}

/// Immutable settings for one invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root under which candidate paths are enumerated.
    pub source_root: PathBuf,
    /// Root the substitution results are resolved against.
    pub target_root: PathBuf,
    /// Regex matched against each normalized relative path.
    pub pattern: String,
    /// Substitution template ($1 / ${name} group references).
    pub replacement: String,
    /// Files or directories.
    pub kind: EntryKind,
    /// Walk the whole tree (default) or only the top level.
    pub recursive: bool,
    /// Skip any move whose destination already exists.
    pub no_clobber: bool,
    /// Comparator for tie-breaks and overwrite decisions, if configured.
    pub overwrite: Option<OverwriteMode>,
    /// Create destination parent directories before moving.
    pub create_parents: bool,
    /// Report skips and non-matches on stdout.
    pub verbose: bool,
    /// Validate and report, but never touch the filesystem.
    pub dry_run: bool,
}

/// Check both roots exist as directories and replace them with canonical
/// absolute paths. Containment checks downstream rely on the canonical form,
/// so this runs once before any planning.
pub fn validate_and_normalize(cfg: &mut Config) -> Result<()> {
    for (path, name) in [(&mut cfg.source_root, "source"), (&mut cfg.target_root, "target")] {
        if !path.exists() {
            bail!("Directory not found: {}", path.display());
        }
        if !path.is_dir() {
            bail!("Not a directory: {}", path.display());
        }
        *path = dunce::canonicalize(&*path)
            .with_context(|| format!("Failed to resolve {name} folder '{}'", path.display()))?;
    }
    debug!(
        source = %cfg.source_root.display(),
        target = %cfg.target_root.display(),
        "roots validated"
    );
    Ok(())
}
