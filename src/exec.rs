//! Move execution.
//!
//! Applies planned moves in the order computed by the planner, through an
//! injected filesystem capability so tests can observe or replace the
//! primitive operations. Fail-fast: the first filesystem error aborts the
//! remaining batch and already-applied moves stay in place.

use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::Path;
use tracing::info;

use crate::config::{Config, OverwriteMode};
use crate::errors::MvreError;
use crate::output as out;
use crate::plan::PlannedMove;

/// The primitive mutating operations the executor needs. Everything else
/// (existence probes, metadata reads) is non-destructive and uses std::fs
/// directly.
pub trait MoveFs {
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;
    fn create_dir_all(&self, dir: &Path) -> io::Result<()>;
    fn remove_file(&self, path: &Path) -> io::Result<()>;
    fn remove_dir_all(&self, path: &Path) -> io::Result<()>;
}

/// Real filesystem backend.
pub struct RealFs;

impl MoveFs for RealFs {
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }
    fn create_dir_all(&self, dir: &Path) -> io::Result<()> {
        fs::create_dir_all(dir)
    }
    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }
    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir_all(path)
    }
}

/// Apply `moves` in the given index order.
///
/// Dry-run performs every validation and prints the same report lines, but
/// never calls a mutating operation (including parent creation).
pub fn execute(cfg: &Config, moves: &[PlannedMove], order: &[usize], fs_ops: &dyn MoveFs) -> Result<()> {
    for &i in order {
        let mv = &moves[i];
        let moved = if mv.is_dir {
            execute_dir(cfg, mv, fs_ops)?
        } else {
            execute_file(cfg, mv, fs_ops)?
        };
        if moved {
            out::print_user(&format!("{} -> {}", mv.source_rel.display(), mv.dest_rel.display()));
        }
    }
    Ok(())
}

/// Move one directory. Returns false when the move was skipped.
fn execute_dir(cfg: &Config, mv: &PlannedMove, fs_ops: &dyn MoveFs) -> Result<bool> {
    match fs::symlink_metadata(&mv.source) {
        Ok(meta) if meta.is_dir() => {}
        _ => return Err(MvreError::SourceDirMissing(mv.source.clone()).into()),
    }

    if let Ok(dest_meta) = fs::symlink_metadata(&mv.dest) {
        if !dest_meta.is_dir() {
            return Err(MvreError::TargetNotDirectory(mv.dest.clone()).into());
        }
        if cfg.no_clobber {
            skip(cfg, mv, "target exists, no-clobber");
            return Ok(false);
        }
        let Some(mode) = cfg.overwrite else {
            return Err(MvreError::TargetExists(mv.dest.clone()).into());
        };
        if !dir_overwrite_condition(&mv.source, &mv.dest, mode) {
            skip(cfg, mv, "target exists, overwrite condition not met");
            return Ok(false);
        }
        if !cfg.dry_run {
            fs_ops
                .remove_dir_all(&mv.dest)
                .with_context(|| format!("Failed to remove existing target '{}'", mv.dest.display()))?;
        }
    }

    finish_move(cfg, mv, fs_ops)?;
    Ok(true)
}

/// Move one file. Returns false when the move was skipped.
fn execute_file(cfg: &Config, mv: &PlannedMove, fs_ops: &dyn MoveFs) -> Result<bool> {
    match fs::symlink_metadata(&mv.source) {
        Ok(meta) if !meta.is_dir() => {}
        _ => return Err(MvreError::SourceFileMissing(mv.source.clone()).into()),
    }

    if let Ok(dest_meta) = fs::symlink_metadata(&mv.dest) {
        if dest_meta.is_dir() {
            return Err(MvreError::TargetIsDirectory(mv.dest.clone()).into());
        }
        if cfg.no_clobber {
            skip(cfg, mv, "target exists, no-clobber");
            return Ok(false);
        }
        let Some(mode) = cfg.overwrite else {
            return Err(MvreError::TargetExists(mv.dest.clone()).into());
        };
        let src_meta = fs::metadata(&mv.source)
            .with_context(|| format!("Failed to read metadata of '{}'", mv.source.display()))?;
        if !file_overwrite_condition(&src_meta, &dest_meta, mode) {
            skip(cfg, mv, "target exists, overwrite condition not met");
            return Ok(false);
        }
        if !cfg.dry_run {
            // fs::rename onto an existing file errors on Windows; clear the
            // target first now that the overwrite decision is made.
            fs_ops
                .remove_file(&mv.dest)
                .with_context(|| format!("Failed to remove existing target '{}'", mv.dest.display()))?;
        }
    }

    finish_move(cfg, mv, fs_ops)?;
    Ok(true)
}

/// Create parents if requested, then rename. No-op under dry-run.
fn finish_move(cfg: &Config, mv: &PlannedMove, fs_ops: &dyn MoveFs) -> Result<()> {
    if cfg.dry_run {
        info!(src = %mv.source.display(), dest = %mv.dest.display(), "dry-run: would move");
        return Ok(());
    }
    if cfg.create_parents
        && let Some(parent) = mv.dest.parent()
    {
        fs_ops
            .create_dir_all(parent)
            .with_context(|| format!("Failed to create parent directory '{}'", parent.display()))?;
    }
    fs_ops.rename(&mv.source, &mv.dest).with_context(|| {
        format!(
            "Failed to move '{}' -> '{}'",
            mv.source.display(),
            mv.dest.display()
        )
    })?;
    info!(src = %mv.source.display(), dest = %mv.dest.display(), "moved");
    Ok(())
}

fn skip(cfg: &Config, mv: &PlannedMove, reason: &str) {
    info!(src = %mv.source_rel.display(), reason, "skipped");
    if cfg.verbose {
        out::print_user(&format!("{}: not moved ({})", mv.source_rel.display(), reason));
    }
}

/// Overwrite decision for an existing file target: same four comparators as
/// tie-breaking, evaluated against current on-disk state.
fn file_overwrite_condition(src: &fs::Metadata, dest: &fs::Metadata, mode: OverwriteMode) -> bool {
    let mtime = |m: &fs::Metadata| m.modified().unwrap_or(std::time::SystemTime::UNIX_EPOCH);
    match mode {
        OverwriteMode::Larger => src.len() > dest.len(),
        OverwriteMode::Small => src.len() < dest.len(),
        OverwriteMode::Older => mtime(src) < mtime(dest),
        OverwriteMode::Newer => mtime(src) > mtime(dest),
    }
}

/// Overwrite decision for an existing directory target: directory mtime is
/// the proxy for size, as in tie-breaking.
fn dir_overwrite_condition(src: &Path, dest: &Path, mode: OverwriteMode) -> bool {
    let mtime = |p: &Path| {
        fs::metadata(p)
            .and_then(|m| m.modified())
            .unwrap_or(std::time::SystemTime::UNIX_EPOCH)
    };
    let (s, d) = (mtime(src), mtime(dest));
    match mode {
        OverwriteMode::Larger | OverwriteMode::Newer => s > d,
        OverwriteMode::Small | OverwriteMode::Older => s < d,
    }
}
