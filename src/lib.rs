//! Core library for `mvre`.
//!
//! Moves or renames files and directories whose relative paths match a
//! regular expression, substituting to produce the new relative path.
//! The work is split into sequential phases: enumerate candidates, transform
//! paths into planned moves, resolve destination conflicts, compute a safe
//! execution order, then apply the moves. All planning errors surface before
//! any filesystem mutation; execution is fail-fast with no rollback.

pub mod app;
pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod output;
pub mod plan;
pub mod walk;

pub use config::{Config, EntryKind, OverwriteMode};
pub use errors::MvreError;
pub use plan::PlannedMove;
