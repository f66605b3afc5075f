use std::fs;
use std::path::Path;

use resilient_delete::mock::RecordingSink;
use resilient_delete::{ResilientDeleter, delete_dir};
use tempfile::tempdir;
use utils::file_util::{is_read_only, set_read_only, set_read_only_recursive};
use utils::test_utils::create_tree;

const TEST_TREE: &[&str] = &[
    "build/top.txt",
    "build/a/middle.txt",
    "build/a/b/bottom.txt",
    "build/empty/",
];

#[test]
fn test_delete_missing_directory() {
    let temp_dir = tempdir().unwrap();
    let sink = RecordingSink::new();

    let deleted = delete_dir(&temp_dir.path().join("does-not-exist"), &sink).unwrap();

    assert!(deleted);
    assert_eq!(sink.total_warnings(), 0);
}

#[test]
fn test_delete_tree() {
    let temp_dir = tempdir().unwrap();
    create_tree(temp_dir.path(), TEST_TREE).unwrap();
    let build_dir = temp_dir.path().join("build");
    let sink = RecordingSink::new();

    let deleted = ResilientDeleter::new().delete(&build_dir, &sink).unwrap();

    assert!(deleted);
    assert!(!build_dir.exists());
    assert!(temp_dir.path().exists());
    assert_eq!(sink.total_warnings(), 0);
}

#[test]
fn test_delete_tree_with_read_only_files() {
    let temp_dir = tempdir().unwrap();
    create_tree(temp_dir.path(), TEST_TREE).unwrap();
    let build_dir = temp_dir.path().join("build");
    assert_eq!(set_read_only_recursive(&build_dir, true).unwrap(), 3);
    let sink = RecordingSink::new();

    let deleted = ResilientDeleter::new().delete(&build_dir, &sink).unwrap();

    assert!(deleted);
    assert!(!build_dir.exists());
    assert_eq!(sink.total_warnings(), 0);
}

#[test]
fn test_delete_twice() {
    let temp_dir = tempdir().unwrap();
    create_tree(temp_dir.path(), TEST_TREE).unwrap();
    let build_dir = temp_dir.path().join("build");
    let sink = RecordingSink::new();
    let deleter = ResilientDeleter::new();

    assert!(deleter.delete(&build_dir, &sink).unwrap());
    assert!(deleter.delete(&build_dir, &sink).unwrap());
    assert_eq!(sink.total_warnings(), 0);
}

#[test]
fn test_deleting_a_file_is_a_hard_error() {
    let temp_dir = tempdir().unwrap();
    let file_path = temp_dir.path().join("plain.txt");
    fs::write(&file_path, "not a directory").unwrap();
    let sink = RecordingSink::new();

    let result = ResilientDeleter::new().delete(&file_path, &sink);

    assert!(result.is_err(), "Expected error, got {:?}", result);
    assert!(file_path.exists());
    assert_eq!(sink.total_warnings(), 0);
}

#[test]
fn test_read_only_toggle_leaves_siblings_alone() {
    let temp_dir = tempdir().unwrap();
    let created = create_tree(temp_dir.path(), &["one.txt", "two.txt"]).unwrap();
    set_read_only(&created[0], true).unwrap();

    assert!(is_read_only(&created[0]).unwrap());
    assert!(!is_read_only(Path::new(&created[1])).unwrap());

    // cleanup must cope with the read-only file
    assert!(delete_dir(temp_dir.path(), &RecordingSink::new()).unwrap());
}
