//! Executor behavior against a real filesystem: skips, overwrite decisions,
//! dry-run, type mismatches and chained move ordering.

use filetime::{FileTime, set_file_mtime};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

use mvre::config::{Config, EntryKind, OverwriteMode};
use mvre::exec::{MoveFs, RealFs, execute};
use mvre::plan::{PlannedMove, safe_order};
use mvre::MvreError;

fn cfg(root: &Path) -> Config {
    Config {
        source_root: root.to_path_buf(),
        target_root: root.to_path_buf(),
        pattern: String::new(),
        replacement: String::new(),
        kind: EntryKind::Files,
        recursive: true,
        no_clobber: false,
        overwrite: None,
        create_parents: false,
        verbose: false,
        dry_run: false,
    }
}

fn mv(root: &Path, from: &str, to: &str, is_dir: bool) -> PlannedMove {
    PlannedMove {
        source: root.join(from),
        dest: root.join(to),
        is_dir,
        source_rel: PathBuf::from(from),
        dest_rel: PathBuf::from(to),
    }
}

#[test]
fn moves_a_file_into_place() {
    let td = tempdir().unwrap();
    fs::write(td.path().join("a.txt"), b"hello").unwrap();
    let moves = [mv(td.path(), "a.txt", "b.txt", false)];

    execute(&cfg(td.path()), &moves, &[0], &RealFs).unwrap();

    assert!(!td.path().join("a.txt").exists());
    assert_eq!(fs::read(td.path().join("b.txt")).unwrap(), b"hello");
}

#[test]
fn dry_run_validates_but_mutates_nothing() {
    let td = tempdir().unwrap();
    fs::write(td.path().join("a.txt"), b"hello").unwrap();
    let moves = [mv(td.path(), "a.txt", "sub/b.txt", false)];
    let mut cfg = cfg(td.path());
    cfg.dry_run = true;
    cfg.create_parents = true;

    execute(&cfg, &moves, &[0], &RealFs).unwrap();

    assert!(td.path().join("a.txt").exists());
    assert!(!td.path().join("sub").exists());
}

#[test]
fn dry_run_still_fails_on_missing_source() {
    let td = tempdir().unwrap();
    let moves = [mv(td.path(), "ghost.txt", "b.txt", false)];
    let mut cfg = cfg(td.path());
    cfg.dry_run = true;

    let err = execute(&cfg, &moves, &[0], &RealFs).unwrap_err();
    let err = err.downcast::<MvreError>().unwrap();
    assert!(matches!(err, MvreError::SourceFileMissing(_)));
}

#[test]
fn existing_target_without_policy_is_fatal() {
    let td = tempdir().unwrap();
    fs::write(td.path().join("a.txt"), b"a").unwrap();
    fs::write(td.path().join("b.txt"), b"b").unwrap();
    let moves = [mv(td.path(), "a.txt", "b.txt", false)];

    let err = execute(&cfg(td.path()), &moves, &[0], &RealFs).unwrap_err();
    let err = err.downcast::<MvreError>().unwrap();
    assert!(matches!(err, MvreError::TargetExists(_)));
    assert_eq!(fs::read(td.path().join("b.txt")).unwrap(), b"b");
}

#[test]
fn no_clobber_skips_existing_target() {
    let td = tempdir().unwrap();
    fs::write(td.path().join("a.txt"), b"a").unwrap();
    fs::write(td.path().join("b.txt"), b"b").unwrap();
    let moves = [mv(td.path(), "a.txt", "b.txt", false)];
    let mut cfg = cfg(td.path());
    cfg.no_clobber = true;

    execute(&cfg, &moves, &[0], &RealFs).unwrap();

    assert!(td.path().join("a.txt").exists(), "skipped source stays");
    assert_eq!(fs::read(td.path().join("b.txt")).unwrap(), b"b");
}

#[test]
fn overwrite_larger_replaces_smaller_target() {
    let td = tempdir().unwrap();
    fs::write(td.path().join("a.txt"), b"larger content").unwrap();
    fs::write(td.path().join("b.txt"), b"b").unwrap();
    let moves = [mv(td.path(), "a.txt", "b.txt", false)];
    let mut cfg = cfg(td.path());
    cfg.overwrite = Some(OverwriteMode::Larger);

    execute(&cfg, &moves, &[0], &RealFs).unwrap();

    assert!(!td.path().join("a.txt").exists());
    assert_eq!(fs::read(td.path().join("b.txt")).unwrap(), b"larger content");
}

#[test]
fn overwrite_condition_unmet_skips_the_move() {
    let td = tempdir().unwrap();
    fs::write(td.path().join("a.txt"), b"x").unwrap();
    fs::write(td.path().join("b.txt"), b"bigger than source").unwrap();
    let moves = [mv(td.path(), "a.txt", "b.txt", false)];
    let mut cfg = cfg(td.path());
    cfg.overwrite = Some(OverwriteMode::Larger);

    execute(&cfg, &moves, &[0], &RealFs).unwrap();

    assert!(td.path().join("a.txt").exists());
    assert_eq!(fs::read(td.path().join("b.txt")).unwrap(), b"bigger than source");
}

#[test]
fn overwrite_newer_compares_mtimes() {
    let td = tempdir().unwrap();
    fs::write(td.path().join("a.txt"), b"new").unwrap();
    fs::write(td.path().join("b.txt"), b"old").unwrap();
    set_file_mtime(td.path().join("a.txt"), FileTime::from_unix_time(1_700_000_000, 0)).unwrap();
    set_file_mtime(td.path().join("b.txt"), FileTime::from_unix_time(1_600_000_000, 0)).unwrap();
    let moves = [mv(td.path(), "a.txt", "b.txt", false)];
    let mut cfg = cfg(td.path());
    cfg.overwrite = Some(OverwriteMode::Newer);

    execute(&cfg, &moves, &[0], &RealFs).unwrap();
    assert_eq!(fs::read(td.path().join("b.txt")).unwrap(), b"new");
}

#[test]
fn file_move_onto_directory_is_fatal() {
    let td = tempdir().unwrap();
    fs::write(td.path().join("a.txt"), b"a").unwrap();
    fs::create_dir(td.path().join("b.txt")).unwrap();
    let moves = [mv(td.path(), "a.txt", "b.txt", false)];

    let err = execute(&cfg(td.path()), &moves, &[0], &RealFs).unwrap_err();
    let err = err.downcast::<MvreError>().unwrap();
    assert!(matches!(err, MvreError::TargetIsDirectory(_)));
}

#[test]
fn directory_move_onto_file_is_fatal() {
    let td = tempdir().unwrap();
    fs::create_dir(td.path().join("d")).unwrap();
    fs::write(td.path().join("e"), b"file").unwrap();
    let moves = [mv(td.path(), "d", "e", true)];

    let err = execute(&cfg(td.path()), &moves, &[0], &RealFs).unwrap_err();
    let err = err.downcast::<MvreError>().unwrap();
    assert!(matches!(err, MvreError::TargetNotDirectory(_)));
}

#[test]
fn create_parents_builds_destination_directories() {
    let td = tempdir().unwrap();
    fs::write(td.path().join("a.txt"), b"a").unwrap();
    let moves = [mv(td.path(), "a.txt", "deep/nested/a.txt", false)];
    let mut cfg = cfg(td.path());
    cfg.create_parents = true;

    execute(&cfg, &moves, &[0], &RealFs).unwrap();
    assert_eq!(fs::read(td.path().join("deep/nested/a.txt")).unwrap(), b"a");
}

#[test]
fn chained_moves_execute_without_clobbering() {
    // a -> b and b -> c: the planner must free b before a claims it.
    let td = tempdir().unwrap();
    fs::write(td.path().join("a"), b"from-a").unwrap();
    fs::write(td.path().join("b"), b"from-b").unwrap();
    let moves = vec![mv(td.path(), "a", "b", false), mv(td.path(), "b", "c", false)];

    let order = safe_order(&moves);
    execute(&cfg(td.path()), &moves, &order, &RealFs).unwrap();

    assert!(!td.path().join("a").exists());
    assert_eq!(fs::read(td.path().join("b")).unwrap(), b"from-a");
    assert_eq!(fs::read(td.path().join("c")).unwrap(), b"from-b");
}

#[test]
fn directory_move_carries_contents() {
    use assert_fs::prelude::*;

    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("old/sub/f.txt").write_str("inside").unwrap();
    let moves = [mv(temp.path(), "old", "new", true)];

    execute(&cfg(temp.path()), &moves, &[0], &RealFs).unwrap();

    assert!(!temp.path().join("old").exists());
    temp.child("new/sub/f.txt").assert("inside");
}

#[test]
fn dir_no_clobber_skips_existing_target() {
    let td = tempdir().unwrap();
    fs::create_dir(td.path().join("src")).unwrap();
    fs::write(td.path().join("src/f.txt"), b"s").unwrap();
    fs::create_dir(td.path().join("dst")).unwrap();
    fs::write(td.path().join("dst/old.txt"), b"o").unwrap();
    let moves = [mv(td.path(), "src", "dst", true)];
    let mut cfg = cfg(td.path());
    cfg.no_clobber = true;

    execute(&cfg, &moves, &[0], &RealFs).unwrap();

    assert!(td.path().join("src/f.txt").exists(), "skipped source stays");
    assert!(td.path().join("dst/old.txt").exists(), "target untouched");
}

#[test]
fn dir_existing_target_without_policy_is_fatal() {
    let td = tempdir().unwrap();
    fs::create_dir(td.path().join("src")).unwrap();
    fs::create_dir(td.path().join("dst")).unwrap();
    fs::write(td.path().join("dst/old.txt"), b"o").unwrap();
    let moves = [mv(td.path(), "src", "dst", true)];

    let err = execute(&cfg(td.path()), &moves, &[0], &RealFs).unwrap_err();
    let err = err.downcast::<MvreError>().unwrap();
    assert!(matches!(err, MvreError::TargetExists(_)));
    assert!(td.path().join("src").exists());
    assert!(td.path().join("dst/old.txt").exists());
}

#[test]
fn dir_overwrite_newer_replaces_existing_tree() {
    let td = tempdir().unwrap();
    fs::create_dir(td.path().join("src")).unwrap();
    fs::write(td.path().join("src/f.txt"), b"fresh").unwrap();
    fs::create_dir(td.path().join("dst")).unwrap();
    fs::write(td.path().join("dst/old.txt"), b"stale").unwrap();
    set_file_mtime(td.path().join("src"), FileTime::from_unix_time(1_700_000_000, 0)).unwrap();
    set_file_mtime(td.path().join("dst"), FileTime::from_unix_time(1_600_000_000, 0)).unwrap();
    let moves = [mv(td.path(), "src", "dst", true)];
    let mut cfg = cfg(td.path());
    cfg.overwrite = Some(OverwriteMode::Newer);

    execute(&cfg, &moves, &[0], &RealFs).unwrap();

    assert!(!td.path().join("src").exists());
    assert_eq!(fs::read(td.path().join("dst/f.txt")).unwrap(), b"fresh");
    assert!(!td.path().join("dst/old.txt").exists(), "old tree is replaced");
}

#[test]
fn dir_overwrite_condition_unmet_skips_the_move() {
    let td = tempdir().unwrap();
    fs::create_dir(td.path().join("src")).unwrap();
    fs::write(td.path().join("src/f.txt"), b"s").unwrap();
    fs::create_dir(td.path().join("dst")).unwrap();
    fs::write(td.path().join("dst/old.txt"), b"o").unwrap();
    set_file_mtime(td.path().join("src"), FileTime::from_unix_time(1_600_000_000, 0)).unwrap();
    set_file_mtime(td.path().join("dst"), FileTime::from_unix_time(1_700_000_000, 0)).unwrap();
    let moves = [mv(td.path(), "src", "dst", true)];
    let mut cfg = cfg(td.path());
    cfg.overwrite = Some(OverwriteMode::Newer);

    execute(&cfg, &moves, &[0], &RealFs).unwrap();

    assert!(td.path().join("src/f.txt").exists());
    assert!(td.path().join("dst/old.txt").exists());
}

/// Recording backend: proves the executor routes every mutation through the
/// injected capability and that dry-run reaches none of them.
#[derive(Default)]
struct RecordingFs {
    ops: std::sync::Mutex<Vec<String>>,
}

impl MoveFs for RecordingFs {
    fn rename(&self, from: &Path, to: &Path) -> std::io::Result<()> {
        self.ops
            .lock()
            .unwrap()
            .push(format!("rename {} {}", from.display(), to.display()));
        fs::rename(from, to)
    }
    fn create_dir_all(&self, dir: &Path) -> std::io::Result<()> {
        self.ops.lock().unwrap().push(format!("mkdir {}", dir.display()));
        fs::create_dir_all(dir)
    }
    fn remove_file(&self, path: &Path) -> std::io::Result<()> {
        self.ops.lock().unwrap().push(format!("rm {}", path.display()));
        fs::remove_file(path)
    }
    fn remove_dir_all(&self, path: &Path) -> std::io::Result<()> {
        self.ops.lock().unwrap().push(format!("rmdir {}", path.display()));
        fs::remove_dir_all(path)
    }
}

#[test]
fn dry_run_invokes_no_mutating_operation() {
    let td = tempdir().unwrap();
    fs::write(td.path().join("a.txt"), b"definitely larger").unwrap();
    fs::write(td.path().join("b.txt"), b"b").unwrap();
    let moves = [mv(td.path(), "a.txt", "b.txt", false)];
    let mut cfg = cfg(td.path());
    cfg.dry_run = true;
    // Overwrite condition is met, so a real run would remove b.txt first.
    cfg.overwrite = Some(OverwriteMode::Larger);

    let backend = RecordingFs::default();
    execute(&cfg, &moves, &[0], &backend).unwrap();
    assert!(backend.ops.lock().unwrap().is_empty());
}

#[test]
fn parents_are_created_before_the_rename() {
    let td = tempdir().unwrap();
    fs::write(td.path().join("a.txt"), b"a").unwrap();
    let moves = [mv(td.path(), "a.txt", "sub/a.txt", false)];
    let mut cfg = cfg(td.path());
    cfg.create_parents = true;

    let backend = RecordingFs::default();
    execute(&cfg, &moves, &[0], &backend).unwrap();
    let ops = backend.ops.lock().unwrap();
    assert_eq!(ops.len(), 2);
    assert!(ops[0].starts_with("mkdir"));
    assert!(ops[1].starts_with("rename"));
}
