//! Execution ordering.
//!
//! A move must run after any other pending move whose source it would
//! clobber: if Y.source == X.dest, X must come first... equivalently, only a
//! move whose destination is not a still-pending source may be emitted.
//! Repeatedly emitting such "sinks" orders any acyclic batch (chains,
//! independent groups, diamonds). Worst case O(n²) passes over at most the
//! number of matched entries in one invocation, which is not a hot path.

use std::collections::HashSet;
use tracing::{debug, warn};

use crate::plan::PlannedMove;

/// Return indices into `moves` in a safe execution order, or the input order
/// when the dependency graph contains a cycle (e.g. A->B plus B->A) or an
/// unresolvable overlap. The fallback is deliberate degraded-mode behavior:
/// callers accept residual intra-batch clobbering risk for the affected
/// moves rather than rejecting the batch.
pub fn safe_order(moves: &[PlannedMove]) -> Vec<usize> {
    let mut placed = vec![false; moves.len()];
    let mut pending_sources: HashSet<String> = moves.iter().map(|m| m.source_key()).collect();
    let mut order = Vec::with_capacity(moves.len());

    while order.len() < moves.len() {
        let before = order.len();
        for (i, mv) in moves.iter().enumerate() {
            if placed[i] || pending_sources.contains(&mv.dest_key()) {
                continue;
            }
            placed[i] = true;
            pending_sources.remove(&mv.source_key());
            order.push(i);
        }
        if order.len() == before {
            warn!(
                remaining = moves.len() - order.len(),
                "no safe order exists (rename cycle); falling back to input order"
            );
            return (0..moves.len()).collect();
        }
    }

    debug!(count = order.len(), "safe move order computed");
    order
}
