/*!
 * Containment Tests
 * No caller-supplied path may resolve outside the sandbox root
 */

use file_service::{FsError, SandboxRoot};
use proptest::prelude::*;
use tempfile::TempDir;

use crate::common::sandbox;

fn segment() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("..".to_string()),
        Just(".".to_string()),
        Just(String::new()),
        "[a-z]{1,4}",
    ]
}

/// True unless a lexical walk over the segments climbs above its start
fn stays_inside(segments: &[String]) -> bool {
    // A leading empty segment makes the joined string absolute
    if segments.len() > 1 && segments[0].is_empty() {
        return false;
    }
    let mut depth: i64 = 0;
    for seg in segments {
        match seg.as_str() {
            ".." => depth -= 1,
            "." | "" => {}
            _ => depth += 1,
        }
        if depth < 0 {
            return false;
        }
    }
    true
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_resolution_is_contained(segments in prop::collection::vec(segment(), 0..8)) {
        let temp = TempDir::new().unwrap();
        let root = SandboxRoot::new(temp.path()).unwrap();
        let raw = segments.join("/");

        match root.resolve(Some(&raw)) {
            Ok(resolved) => {
                prop_assert!(resolved.as_path().starts_with(root.as_path()));
                prop_assert!(stays_inside(&segments), "accepted escaping path {raw:?}");
            }
            Err(FsError::InvalidPath(_)) => {
                prop_assert!(!stays_inside(&segments), "rejected contained path {raw:?}");
            }
            Err(other) => prop_assert!(false, "unexpected error {other:?}"),
        }
    }

    #[test]
    fn prop_escaping_paths_rejected_by_every_operation(
        ups in 1usize..4,
        tail in prop::collection::vec("[a-z]{1,4}", 0..3),
    ) {
        let (temp, engine) = sandbox();
        std::fs::write(temp.path().join("inside.txt"), "x").unwrap();

        let mut parts = vec!["..".to_string(); ups];
        parts.extend(tail);
        let escape = parts.join("/");

        let results = [
            engine.get_info(&escape).map(|_| ()),
            engine.list_children(&escape).map(|_| ()),
            engine.create(&escape, false),
            engine.create(&escape, true),
            engine.delete(&escape),
            engine.move_entry("inside.txt", &escape),
            engine.move_entry(&escape, "moved.txt"),
            engine.copy_entry("inside.txt", &escape),
            engine.copy_entry(&escape, "copied.txt"),
            engine.append(&escape, "x"),
            engine.read(&escape, 0, 1).map(|_| ()),
        ];

        for result in results {
            prop_assert!(matches!(result, Err(FsError::InvalidPath(_))), "got {result:?}");
        }
        prop_assert!(temp.path().join("inside.txt").exists());
    }
}

#[test]
fn test_absolute_paths_outside_root_rejected() {
    let (_temp, engine) = sandbox();
    for raw in ["/a", "/.", "/"] {
        assert!(
            matches!(engine.get_info(raw).unwrap_err(), FsError::InvalidPath(_)),
            "{raw:?} was accepted"
        );
    }
    assert!(matches!(
        engine.get_info("/etc/passwd").unwrap_err(),
        FsError::InvalidPath(_)
    ));
    assert!(matches!(
        engine.create("/tmp/outside-file-service-test", false).unwrap_err(),
        FsError::InvalidPath(_)
    ));
}

#[test]
fn test_empty_path_is_root() {
    let temp = TempDir::new().unwrap();
    let root = SandboxRoot::new(temp.path()).unwrap();
    let resolved = root.resolve(Some("")).unwrap();
    assert_eq!(resolved.as_path(), root.as_path());
}
