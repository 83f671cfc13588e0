//! Application orchestrator.
//! Builds the config, initializes logging, then runs the sequential phases:
//! enumerate candidates, transform paths into planned moves, resolve
//! destination conflicts, compute a safe execution order, execute. Planning
//! is completed in full before the first filesystem mutation, so every
//! planning error aborts the run with nothing changed.

use anyhow::{Context, Result};
use regex::Regex;
use tracing::debug;

use crate::cli::Args;
use crate::config::{EntryKind, validate_and_normalize};
use crate::exec::{RealFs, execute};
use crate::logging::init_tracing;
use crate::output as out;
use crate::plan::{Outcome, Transformer, resolve_conflicts, safe_order};
use crate::walk;

/// Run one invocation end to end.
pub fn run(args: Args) -> Result<()> {
    init_tracing(args.debug)?;

    let mut cfg = args.to_config();
    validate_and_normalize(&mut cfg)?;

    let pattern = Regex::new(&cfg.pattern)
        .with_context(|| format!("Invalid matching regex '{}'", cfg.pattern))?;

    let candidates = walk::candidates(&cfg)?;
    debug!(candidates = candidates.len(), "planning");

    let transformer = Transformer::new(
        &pattern,
        &cfg.replacement,
        &cfg.target_root,
        cfg.kind == EntryKind::Directories,
    );

    let mut moves = Vec::new();
    for cand in &candidates {
        match transformer.apply(&cand.path, &cand.rel)? {
            Outcome::Move(mv) => moves.push(mv),
            Outcome::Skip(reason) => {
                if cfg.verbose {
                    out::print_user(&format!("{}: {}", cand.rel.display(), reason.describe()));
                }
            }
        }
    }

    if moves.is_empty() {
        debug!("nothing to do");
        return Ok(());
    }

    let resolution = resolve_conflicts(moves, cfg.overwrite)?;
    if cfg.verbose {
        for mv in &resolution.dropped {
            out::print_user(&format!(
                "{}: not moved (another source was chosen for same destination)",
                mv.source_rel.display()
            ));
        }
    }

    let order = safe_order(&resolution.moves);
    execute(&cfg, &resolution.moves, &order, &RealFs)
}
