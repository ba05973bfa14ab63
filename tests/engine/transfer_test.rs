/*!
 * Transfer Tests
 * move and copy, including destination collision policies
 */

use std::fs;

use file_service::FsError;
use pretty_assertions::assert_eq;

use crate::common::{contents, sandbox, write};

#[test]
fn test_move_file_creates_parents() {
    let (temp, engine) = sandbox();
    write(temp.path(), "src.txt", "payload");

    engine.move_entry("src.txt", "new/place/dst.txt").unwrap();

    assert!(!temp.path().join("src.txt").exists());
    assert_eq!(contents(temp.path(), "new/place/dst.txt"), "payload");
}

#[test]
fn test_move_directory() {
    let (temp, engine) = sandbox();
    write(temp.path(), "dir/sub/file1.txt", "one");

    engine.move_entry("dir", "renamed").unwrap();

    assert!(!temp.path().join("dir").exists());
    assert_eq!(contents(temp.path(), "renamed/sub/file1.txt"), "one");
}

#[test]
fn test_move_overwrites_file() {
    let (temp, engine) = sandbox();
    write(temp.path(), "a.txt", "new");
    write(temp.path(), "b.txt", "old");

    engine.move_entry("a.txt", "b.txt").unwrap();
    assert_eq!(contents(temp.path(), "b.txt"), "new");
    assert!(!temp.path().join("a.txt").exists());
}

#[test]
fn test_move_replaces_empty_directory() {
    let (temp, engine) = sandbox();
    write(temp.path(), "a.txt", "file");
    write(temp.path(), "src/inner.txt", "dir");
    fs::create_dir(temp.path().join("empty1")).unwrap();
    fs::create_dir(temp.path().join("empty2")).unwrap();

    engine.move_entry("a.txt", "empty1").unwrap();
    assert_eq!(contents(temp.path(), "empty1"), "file");

    engine.move_entry("src", "empty2").unwrap();
    assert_eq!(contents(temp.path(), "empty2/inner.txt"), "dir");
}

#[test]
fn test_move_onto_non_empty_directory_changes_nothing() {
    let (temp, engine) = sandbox();
    write(temp.path(), "a.txt", "source");
    write(temp.path(), "full/existing.txt", "dest");

    let err = engine.move_entry("a.txt", "full").unwrap_err();
    assert!(matches!(err, FsError::AlreadyExists(_)));

    assert_eq!(contents(temp.path(), "a.txt"), "source");
    assert_eq!(contents(temp.path(), "full/existing.txt"), "dest");
}

#[test]
fn test_move_errors() {
    let (temp, engine) = sandbox();
    write(temp.path(), "dir/f.txt", "");

    assert!(matches!(
        engine.move_entry("missing", "x").unwrap_err(),
        FsError::NotFound(_)
    ));
    assert!(matches!(
        engine.move_entry("dir", "dir/inside").unwrap_err(),
        FsError::InvalidPath(_)
    ));
    assert!(matches!(
        engine.move_entry("", "x").unwrap_err(),
        FsError::InvalidPath(_)
    ));
    assert!(matches!(
        engine.move_entry("dir", " ").unwrap_err(),
        FsError::InvalidPath(_)
    ));
    assert!(matches!(
        engine.move_entry("dir", "../escape").unwrap_err(),
        FsError::InvalidPath(_)
    ));
    assert!(temp.path().join("dir/f.txt").exists());
}

#[test]
fn test_move_onto_itself_is_noop() {
    let (temp, engine) = sandbox();
    write(temp.path(), "same.txt", "x");

    engine.move_entry("same.txt", "./same.txt").unwrap();
    assert_eq!(contents(temp.path(), "same.txt"), "x");
}

#[test]
fn test_copy_directory_reproduces_subtree() {
    let (temp, engine) = sandbox();
    write(temp.path(), "src/sub/file1.txt", "alpha");
    write(temp.path(), "src/top.txt", "beta");
    fs::create_dir_all(temp.path().join("src/empty")).unwrap();

    engine.copy_entry("src", "backup/src").unwrap();

    assert_eq!(contents(temp.path(), "backup/src/sub/file1.txt"), "alpha");
    assert_eq!(contents(temp.path(), "backup/src/top.txt"), "beta");
    assert!(temp.path().join("backup/src/empty").is_dir());
    // Source untouched
    assert_eq!(contents(temp.path(), "src/sub/file1.txt"), "alpha");
}

#[test]
fn test_copy_file_overwrites() {
    let (temp, engine) = sandbox();
    write(temp.path(), "a.txt", "fresh");
    write(temp.path(), "b.txt", "stale contents");

    engine.copy_entry("a.txt", "b.txt").unwrap();

    assert_eq!(contents(temp.path(), "b.txt"), "fresh");
    assert_eq!(contents(temp.path(), "a.txt"), "fresh");
}

#[test]
fn test_copy_into_empty_directory() {
    let (temp, engine) = sandbox();
    write(temp.path(), "a.txt", "file");
    write(temp.path(), "src/x.txt", "x");
    fs::create_dir(temp.path().join("empty_for_file")).unwrap();
    fs::create_dir(temp.path().join("empty_for_dir")).unwrap();

    engine.copy_entry("a.txt", "empty_for_file").unwrap();
    assert_eq!(contents(temp.path(), "empty_for_file"), "file");

    engine.copy_entry("src", "empty_for_dir").unwrap();
    assert_eq!(contents(temp.path(), "empty_for_dir/x.txt"), "x");
}

#[test]
fn test_copy_onto_non_empty_directory_changes_nothing() {
    let (temp, engine) = sandbox();
    write(temp.path(), "src/new.txt", "new");
    write(temp.path(), "dest/old.txt", "old");

    let err = engine.copy_entry("src", "dest").unwrap_err();
    assert!(matches!(err, FsError::AlreadyExists(_)));

    assert!(!temp.path().join("dest/new.txt").exists());
    assert_eq!(contents(temp.path(), "dest/old.txt"), "old");
    assert_eq!(contents(temp.path(), "src/new.txt"), "new");
}

#[test]
fn test_copy_errors() {
    let (temp, engine) = sandbox();
    write(temp.path(), "dir/f.txt", "");
    write(temp.path(), "plain.txt", "keep");

    assert!(matches!(
        engine.copy_entry("missing", "x").unwrap_err(),
        FsError::NotFound(_)
    ));
    assert!(matches!(
        engine.copy_entry("dir", "dir/nested/copy").unwrap_err(),
        FsError::InvalidPath(_)
    ));
    assert!(matches!(
        engine.copy_entry("plain.txt", "plain.txt").unwrap_err(),
        FsError::InvalidPath(_)
    ));
    assert!(matches!(
        engine.copy_entry("dir", "plain.txt").unwrap_err(),
        FsError::AlreadyExists(_)
    ));
    assert!(matches!(
        engine.copy_entry("dir", "").unwrap_err(),
        FsError::InvalidPath(_)
    ));

    assert_eq!(contents(temp.path(), "plain.txt"), "keep");
    assert!(!temp.path().join("dir/nested").exists());
}

#[cfg(unix)]
#[test]
fn test_copy_partial_failure_keeps_completed_part() {
    let (temp, engine) = sandbox();
    write(temp.path(), "src/top.txt", "top");
    fs::create_dir_all(temp.path().join("src/sub")).unwrap();
    std::os::unix::fs::symlink(
        temp.path().join("src/nowhere"),
        temp.path().join("src/sub/dangling"),
    )
    .unwrap();

    let err = engine.copy_entry("src", "dst").unwrap_err();
    assert!(matches!(err, FsError::IoFailure(_)), "got {err:?}");

    // Whatever was copied before the failure stays in place
    assert_eq!(contents(temp.path(), "dst/top.txt"), "top");
    assert!(temp.path().join("dst/sub").is_dir());
}
