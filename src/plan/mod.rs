//! Planning: path transformation, conflict resolution and move ordering.
//! Everything here is pure path/metadata computation; no mutation happens
//! until the executor runs the finished plan.

pub mod conflict;
pub mod order;
pub mod paths;
pub mod transform;

pub use conflict::{Resolution, resolve_conflicts};
pub use order::safe_order;
pub use transform::{Outcome, SkipReason, Transformer};

use std::path::PathBuf;

/// One resolved source/destination pair awaiting execution.
/// Immutable once computed: a planned move is only ever included in or
/// excluded from the final ordered list, never edited.
#[derive(Debug, Clone)]
pub struct PlannedMove {
    /// Absolute, filesystem-native source path.
    pub source: PathBuf,
    /// Absolute, filesystem-native destination path, inside the target root.
    pub dest: PathBuf,
    /// Selects which existence/overwrite rules apply at execution time.
    pub is_dir: bool,
    /// Path relative to the source root, for display.
    pub source_rel: PathBuf,
    /// Path relative to the target root, for display.
    pub dest_rel: PathBuf,
}

impl PlannedMove {
    /// Case-insensitive identity key of the source path.
    pub(crate) fn source_key(&self) -> String {
        paths::path_key(&self.source)
    }

    /// Case-insensitive identity key of the destination path.
    pub(crate) fn dest_key(&self) -> String {
        paths::path_key(&self.dest)
    }
}
