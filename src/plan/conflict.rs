//! Conflict resolution for destinations claimed by more than one source.
//!
//! Without a configured overwrite mode any duplicate destination is fatal and
//! every colliding destination is reported in one batch. With a mode, each
//! duplicate group folds left-to-right to a single winner and the losers are
//! dropped from the plan.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::SystemTime;
use tracing::debug;

use crate::config::OverwriteMode;
use crate::errors::MvreError;
use crate::plan::PlannedMove;

/// Outcome of conflict resolution: the surviving plan in input order, plus
/// the dropped losers for verbose reporting.
#[derive(Debug)]
pub struct Resolution {
    pub moves: Vec<PlannedMove>,
    pub dropped: Vec<PlannedMove>,
}

/// Detect duplicate destinations and resolve each group to one winner.
pub fn resolve_conflicts(
    moves: Vec<PlannedMove>,
    mode: Option<OverwriteMode>,
) -> Result<Resolution, MvreError> {
    let mut groups: HashMap<String, Vec<usize>> = HashMap::new();
    for (i, mv) in moves.iter().enumerate() {
        groups.entry(mv.dest_key()).or_default().push(i);
    }

    if groups.values().all(|g| g.len() == 1) {
        return Ok(Resolution { moves, dropped: Vec::new() });
    }

    let Some(mode) = mode else {
        // Report every colliding destination, in first-seen order.
        let mut seen = std::collections::HashSet::new();
        let mut colliding = Vec::new();
        for mv in &moves {
            let key = mv.dest_key();
            if groups[&key].len() > 1 && seen.insert(key) {
                colliding.push(mv.dest.clone());
            }
        }
        return Err(MvreError::DuplicateDestinations(colliding));
    };

    let mut keep = vec![true; moves.len()];
    for group in groups.values().filter(|g| g.len() > 1) {
        let mut winner = group[0];
        for &challenger in &group[1..] {
            if challenger_wins(&moves[winner], &moves[challenger], mode) {
                winner = challenger;
            }
        }
        for &i in group {
            if i != winner {
                keep[i] = false;
                debug!(
                    loser = %moves[i].source_rel.display(),
                    winner = %moves[winner].source_rel.display(),
                    dest = %moves[winner].dest_rel.display(),
                    "dropped tie-break loser"
                );
            }
        }
    }

    let mut kept = Vec::new();
    let mut dropped = Vec::new();
    for (i, mv) in moves.into_iter().enumerate() {
        if keep[i] {
            kept.push(mv);
        } else {
            dropped.push(mv);
        }
    }
    Ok(Resolution { moves: kept, dropped })
}

/// Whether `challenger` beats the current `incumbent` under `mode`.
///
/// The left-to-right fold over a duplicate group is only order-independent
/// because all four modes compare a single number (byte length or mtime),
/// which is transitive. Any future mode must preserve transitivity or the
/// surviving move would depend on enumeration order.
fn challenger_wins(incumbent: &PlannedMove, challenger: &PlannedMove, mode: OverwriteMode) -> bool {
    if incumbent.is_dir || challenger.is_dir {
        // Directory modification time stands in for size as well.
        let t1 = dir_mtime(&incumbent.source);
        let t2 = dir_mtime(&challenger.source);
        return match mode {
            OverwriteMode::Larger | OverwriteMode::Newer => t2 > t1,
            OverwriteMode::Small | OverwriteMode::Older => t2 < t1,
        };
    }

    // A source that no longer exists loses unconditionally to one that does.
    let m1 = fs::metadata(&incumbent.source);
    let m2 = fs::metadata(&challenger.source);
    let (m1, m2) = match (m1, m2) {
        (Err(_), _) => return true,
        (Ok(_), Err(_)) => return false,
        (Ok(a), Ok(b)) => (a, b),
    };

    match mode {
        OverwriteMode::Larger => m2.len() > m1.len(),
        OverwriteMode::Small => m2.len() < m1.len(),
        OverwriteMode::Older => mtime(&m2) < mtime(&m1),
        OverwriteMode::Newer => mtime(&m2) > mtime(&m1),
    }
}

fn dir_mtime(path: &Path) -> SystemTime {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .unwrap_or(SystemTime::UNIX_EPOCH)
}

fn mtime(meta: &fs::Metadata) -> SystemTime {
    meta.modified().unwrap_or(SystemTime::UNIX_EPOCH)
}
