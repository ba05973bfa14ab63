/*!
 * Mutation Tests
 * create, delete and append
 */

use std::fs;

use file_service::FsError;
use pretty_assertions::assert_eq;

use crate::common::{contents, sandbox, write};

#[test]
fn test_create_file_reports_empty_file() {
    let (temp, engine) = sandbox();

    engine.create("notes.txt", false).unwrap();

    let info = engine.get_info("notes.txt").unwrap();
    assert!(!info.is_directory);
    assert_eq!(info.size_bytes, 0);
    assert!(temp.path().join("notes.txt").is_file());
}

#[test]
fn test_create_builds_missing_ancestors() {
    let (temp, engine) = sandbox();

    engine.create("a/b/c.txt", false).unwrap();
    engine.create("x/y/z", true).unwrap();

    assert!(temp.path().join("a/b").is_dir());
    assert!(temp.path().join("a/b/c.txt").is_file());
    assert!(temp.path().join("x/y/z").is_dir());
    assert!(engine.get_info("x/y/z").unwrap().is_directory);
}

#[test]
fn test_create_existing_fails() {
    let (temp, engine) = sandbox();
    write(temp.path(), "taken.txt", "keep");
    fs::create_dir(temp.path().join("dir")).unwrap();

    let err = engine.create("taken.txt", false).unwrap_err();
    assert!(matches!(err, FsError::AlreadyExists(_)));
    assert_eq!(contents(temp.path(), "taken.txt"), "keep");

    // Kind does not matter
    assert!(matches!(
        engine.create("dir", false).unwrap_err(),
        FsError::AlreadyExists(_)
    ));
    assert!(matches!(
        engine.create("taken.txt", true).unwrap_err(),
        FsError::AlreadyExists(_)
    ));
}

#[test]
fn test_create_rejects_blank_and_root() {
    let (_temp, engine) = sandbox();

    for path in ["", "  ", ".", "a/.."] {
        let err = engine.create(path, true).unwrap_err();
        assert!(matches!(err, FsError::InvalidPath(_)), "{path:?} gave {err:?}");
    }
}

#[test]
fn test_delete_file() {
    let (temp, engine) = sandbox();
    write(temp.path(), "gone.txt", "x");

    engine.delete("gone.txt").unwrap();
    assert!(!temp.path().join("gone.txt").exists());
}

#[test]
fn test_delete_directory_removes_descendants() {
    let (temp, engine) = sandbox();
    write(temp.path(), "tree/a.txt", "a");
    write(temp.path(), "tree/sub/b.txt", "b");
    write(temp.path(), "tree/sub/deeper/c.txt", "c");
    fs::create_dir_all(temp.path().join("tree/empty")).unwrap();

    engine.delete("tree").unwrap();

    for path in ["tree", "tree/a.txt", "tree/sub", "tree/sub/deeper/c.txt", "tree/empty"] {
        assert!(
            matches!(engine.get_info(path).unwrap_err(), FsError::NotFound(_)),
            "{path} still present"
        );
    }
    // Root itself is untouched
    assert!(engine.get_info("").unwrap().is_directory);
}

#[test]
fn test_delete_twice_is_not_found() {
    let (temp, engine) = sandbox();
    write(temp.path(), "once.txt", "");

    assert!(engine.delete("once.txt").is_ok());
    assert!(matches!(
        engine.delete("once.txt").unwrap_err(),
        FsError::NotFound(_)
    ));
}

#[test]
fn test_delete_rejects_root() {
    let (temp, engine) = sandbox();
    write(temp.path(), "survivor.txt", "");

    assert!(matches!(engine.delete("").unwrap_err(), FsError::InvalidPath(_)));
    assert!(matches!(engine.delete("./").unwrap_err(), FsError::InvalidPath(_)));
    assert!(temp.path().join("survivor.txt").exists());
}

#[cfg(unix)]
#[test]
fn test_delete_does_not_follow_symlinks() {
    let (temp, engine) = sandbox();
    let outside = tempfile::TempDir::new().unwrap();
    write(outside.path(), "keep.txt", "safe");
    write(temp.path(), "tree/own.txt", "");
    std::os::unix::fs::symlink(outside.path(), temp.path().join("tree/link")).unwrap();

    engine.delete("tree").unwrap();

    assert!(!temp.path().join("tree").exists());
    assert_eq!(contents(outside.path(), "keep.txt"), "safe");
}

#[test]
fn test_append_extends_file() {
    let (temp, engine) = sandbox();
    write(temp.path(), "log.txt", "start;");

    engine.append("log.txt", "one;").unwrap();
    engine.append("log.txt", "").unwrap();
    engine.append("log.txt", "two;").unwrap();

    assert_eq!(contents(temp.path(), "log.txt"), "start;one;two;");
    assert_eq!(engine.read("log.txt", 0, 64).unwrap(), "start;one;two;");
    assert!(engine.locks().is_empty());
}

#[test]
fn test_append_errors() {
    let (temp, engine) = sandbox();
    fs::create_dir(temp.path().join("dir")).unwrap();

    assert!(matches!(
        engine.append("missing.txt", "x").unwrap_err(),
        FsError::NotFound(_)
    ));
    assert!(!temp.path().join("missing.txt").exists());

    assert!(matches!(
        engine.append("dir", "x").unwrap_err(),
        FsError::InvalidPath(_)
    ));
    assert!(matches!(
        engine.append("", "x").unwrap_err(),
        FsError::InvalidPath(_)
    ));
    assert!(engine.locks().is_empty());
}
