//! Path normalization and identity helpers shared across the planner.
//!
//! Matching happens on `/`-separated relative paths so patterns are
//! platform-independent; identity and containment comparisons use a
//! case-insensitive canonical string key, matching how the tool treats
//! colliding destinations on every platform.

use std::path::{Component, Path, PathBuf};

/// Convert a relative path to the canonical `/`-separated form the pattern
/// is matched against. Non-UTF-8 segments are replaced lossily; such paths
/// can still be skipped as non-matches but will not round-trip.
pub fn normalize_rel(rel: &Path) -> String {
    rel.to_string_lossy().replace('\\', "/")
}

/// Convert a substitution result back to filesystem-native separators.
pub fn native_rel(normalized: &str) -> PathBuf {
    if std::path::MAIN_SEPARATOR == '/' {
        PathBuf::from(normalized.replace('\\', "/"))
    } else {
        PathBuf::from(normalized.replace('/', &std::path::MAIN_SEPARATOR.to_string()))
    }
}

/// Resolve `rel` against an already-canonical absolute `base` without
/// touching the filesystem. `.` and `..` components are folded lexically so
/// a destination that does not exist yet can still be containment-checked.
pub fn lexical_resolve(base: &Path, rel: &Path) -> PathBuf {
    let mut out = base.to_path_buf();
    for comp in rel.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(c) => out.push(c),
            // Rooted components are rejected by the transformer before this
            // point; fold them defensively into the base.
            Component::RootDir | Component::Prefix(_) => {}
        }
    }
    out
}

/// Case-insensitive identity key: lowercased, trailing separators trimmed.
pub fn path_key(path: &Path) -> String {
    let s = path.to_string_lossy().to_lowercase();
    s.trim_end_matches(['/', '\\']).to_string()
}

/// Whether `candidate` equals `root` or lies underneath it, by string-prefix
/// comparison on the identity keys.
pub fn is_under(candidate: &Path, root: &Path) -> bool {
    let cand = path_key(candidate);
    let root = path_key(root);
    if cand == root {
        return true;
    }
    let mut prefix = root;
    prefix.push(std::path::MAIN_SEPARATOR);
    // Normalized keys may carry either separator on Windows.
    cand.starts_with(&prefix)
        || (std::path::MAIN_SEPARATOR != '/' && {
            let mut alt = prefix;
            alt.pop();
            alt.push('/');
            cand.starts_with(&alt)
        })
}

/// Filesystem-equality check for a planned source/destination pair.
pub fn paths_equal(a: &Path, b: &Path) -> bool {
    path_key(a) == path_key(b)
}
