//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - `--no-clobber` and `--overwrite-mode` are mutually exclusive, as are
//!   `--files-only` and `--directories-only`; clap enforces both.
//! - The walk is recursive unless `--top-level` is given.

use clap::{Parser, ValueHint};
use std::path::PathBuf;

use crate::config::{Config, EntryKind, OverwriteMode};

/// Move or rename files and folders using regular expressions.
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Move or rename files and folders using regular expressions",
    after_help = "EXAMPLES:\n  mvre '(.+)\\.txt' '$1.bak'\n  mvre -s ./in -t ./out '^(.+)\\.jpg$' 'photos/$1.jpg'"
)]
pub struct Args {
    /// Regex matched against each path relative to the source folder.
    #[arg(value_name = "PATTERN")]
    pub pattern: String,

    /// Replacement template. Use $1, $2, ... for numbered capture groups and
    /// ${name} for named groups.
    #[arg(value_name = "REPLACEMENT")]
    pub replacement: String,

    /// Source directory (default: current directory).
    #[arg(short = 's', long, default_value = ".", value_hint = ValueHint::DirPath)]
    pub source_folder: PathBuf,

    /// Target directory (default: current directory).
    #[arg(short = 't', long, default_value = ".", value_hint = ValueHint::DirPath)]
    pub target_folder: PathBuf,

    /// Never overwrite an existing target; skip the move instead.
    #[arg(short = 'n', long, conflicts_with = "overwrite_mode")]
    pub no_clobber: bool,

    /// On conflict, keep/overwrite when the source is larger, small(er),
    /// older or newer than the competing entry.
    #[arg(short = 'o', long, value_name = "MODE", value_enum)]
    pub overwrite_mode: Option<OverwriteMode>,

    /// Apply only to files (default).
    #[arg(short = 'f', long, conflicts_with = "directories_only")]
    pub files_only: bool,

    /// Apply only to directories.
    #[arg(short = 'd', long)]
    pub directories_only: bool,

    /// Only consider entries directly under the source folder.
    #[arg(long)]
    pub top_level: bool,

    /// Create parent directories in the target if they do not exist.
    #[arg(short = 'p', long)]
    pub create_parents: bool,

    /// Print a line for every candidate; if not moved, show the reason.
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Do not move or create anything; only report what would be done.
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug logging on stderr.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Build the immutable run configuration from the parsed flags.
    pub fn to_config(&self) -> Config {
        Config {
            source_root: self.source_folder.clone(),
            target_root: self.target_folder.clone(),
            pattern: self.pattern.clone(),
            replacement: self.replacement.clone(),
            kind: if self.directories_only {
                EntryKind::Directories
            } else {
                EntryKind::Files
            },
            recursive: !self.top_level,
            no_clobber: self.no_clobber,
            overwrite: self.overwrite_mode,
            create_parents: self.create_parents,
            verbose: self.verbose,
            dry_run: self.dry_run,
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
