//! Path transformation: match a relative path, substitute once, and validate
//! that the result stays inside the target root.
//!
//! Notes:
//! - Substitution is applied to the first match region only, so a pattern
//!   that could match several times in one path rewrites exactly one region.
//! - The regex crate expands unknown `$group` references to the empty string
//!   instead of failing, so the template is validated against the compiled
//!   pattern here and an unknown reference is a hard error.

use regex::Regex;
use std::collections::HashSet;
use std::path::Path;
use tracing::trace;

use crate::errors::MvreError;
use crate::plan::PlannedMove;
use crate::plan::paths::{is_under, lexical_resolve, native_rel, normalize_rel, paths_equal};

/// Why a candidate produced no move. Skips are reported in verbose mode and
/// never abort the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoMatch,
    EmptyReplacement,
    SamePath,
}

impl SkipReason {
    /// Verbose-mode wording, appended after the relative path.
    pub fn describe(&self) -> &'static str {
        match self {
            SkipReason::NoMatch => "pattern did not match",
            SkipReason::EmptyReplacement => "replacement is empty",
            SkipReason::SamePath => "source and target are the same",
        }
    }
}

/// Result of transforming one candidate path.
#[derive(Debug)]
pub enum Outcome {
    Move(PlannedMove),
    Skip(SkipReason),
}

/// Pure path computation: holds the compiled pattern, the substitution
/// template and the canonicalized target root.
pub struct Transformer<'a> {
    pattern: &'a Regex,
    template: &'a str,
    target_root: &'a Path,
    move_dirs: bool,
}

impl<'a> Transformer<'a> {
    pub fn new(
        pattern: &'a Regex,
        template: &'a str,
        target_root: &'a Path,
        move_dirs: bool,
    ) -> Self {
        Self {
            pattern,
            template,
            target_root,
            move_dirs,
        }
    }

    /// Derive a planned move for one candidate, or the reason it is skipped.
    ///
    /// `source` is the absolute candidate path, `rel` its path relative to
    /// the source root. Hard errors (bad template, escaping or self-nesting
    /// destination) abort the whole run.
    pub fn apply(&self, source: &Path, rel: &Path) -> Result<Outcome, MvreError> {
        let normalized = normalize_rel(rel);
        if !self.pattern.is_match(&normalized) {
            trace!(rel = %rel.display(), "no match");
            return Ok(Outcome::Skip(SkipReason::NoMatch));
        }

        if let Some(reference) = unknown_group_reference(self.pattern, self.template) {
            return Err(MvreError::UnknownGroup {
                reference,
                path: rel.to_path_buf(),
            });
        }

        let replaced = self.pattern.replacen(&normalized, 1, self.template);
        if replaced.trim().is_empty() {
            return Ok(Outcome::Skip(SkipReason::EmptyReplacement));
        }

        let dest_rel = native_rel(&replaced);
        if dest_rel.has_root() || dest_rel.is_absolute() {
            return Err(MvreError::AbsoluteResult(replaced.into_owned()));
        }

        let dest = lexical_resolve(self.target_root, &dest_rel);
        if !is_under(&dest, self.target_root) {
            return Err(MvreError::EscapesTarget(replaced.into_owned()));
        }

        if paths_equal(source, &dest) {
            return Ok(Outcome::Skip(SkipReason::SamePath));
        }

        if self.move_dirs && is_under(&dest, source) {
            return Err(MvreError::SelfNested {
                source_rel: rel.to_path_buf(),
                dest_rel,
            });
        }

        Ok(Outcome::Move(PlannedMove {
            source: source.to_path_buf(),
            dest,
            is_dir: self.move_dirs,
            source_rel: rel.to_path_buf(),
            dest_rel,
        }))
    }
}

/// Scan the template for `$name` / `${name}` references and return the first
/// one that names a group the pattern does not define. Mirrors the regex
/// crate's expansion rules: `$$` is a literal dollar, a bare name is the
/// longest run of `[0-9A-Za-z_]`, and an all-digit name is a group index.
fn unknown_group_reference(pattern: &Regex, template: &str) -> Option<String> {
    let names: HashSet<&str> = pattern.capture_names().flatten().collect();
    let bytes = template.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'$' {
            i += 1;
            continue;
        }
        if i + 1 < bytes.len() && bytes[i + 1] == b'$' {
            i += 2;
            continue;
        }
        let (reference, next) = if i + 1 < bytes.len() && bytes[i + 1] == b'{' {
            match template[i + 2..].find('}') {
                Some(end) => (&template[i + 2..i + 2 + end], i + 2 + end + 1),
                // Unterminated brace is passed through literally.
                None => {
                    i += 1;
                    continue;
                }
            }
        } else {
            let start = i + 1;
            let mut end = start;
            while end < bytes.len() && (bytes[end].is_ascii_alphanumeric() || bytes[end] == b'_') {
                end += 1;
            }
            // A stray '$' with no following name stays literal.
            if end == start {
                i += 1;
                continue;
            }
            (&template[start..end], end)
        };
        let known = match reference.parse::<usize>() {
            Ok(idx) => idx < pattern.captures_len(),
            Err(_) => names.contains(reference),
        };
        if !known {
            return Some(reference.to_string());
        }
        i = next;
    }
    None
}
