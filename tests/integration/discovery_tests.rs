//! Source tree discovery tests
//!
//! Exercise the walker against real directory trees on disk.

use refaudit::discovery::SourceTreeWalker;
use refaudit::AuditError;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "package p\n").unwrap();
}

fn collect(walker: &SourceTreeWalker, roots: &[PathBuf], excluded: &[PathBuf]) -> Vec<PathBuf> {
    let mut seen = Vec::new();
    walker
        .walk(roots, excluded, |path| {
            seen.push(path.to_path_buf());
            Ok(())
        })
        .unwrap();
    seen
}

fn relative(root: &Path, paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
        .collect()
}

#[test]
fn test_only_go_files_are_visited() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "a.go");
    touch(dir.path(), "README.md");
    touch(dir.path(), "go.mod");
    touch(dir.path(), "notes.go.txt");

    let seen = collect(&SourceTreeWalker::new(), &[dir.path().to_path_buf()], &[]);

    assert_eq!(relative(dir.path(), &seen), vec!["a.go"]);
}

#[test]
fn test_vendor_anywhere_is_pruned() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "keep.go");
    touch(dir.path(), "vendor/dep/dep.go");
    touch(dir.path(), "pkg/vendor/inner.go");
    touch(dir.path(), "pkg/vendored/kept.go");

    let seen = collect(&SourceTreeWalker::new(), &[dir.path().to_path_buf()], &[]);

    assert_eq!(relative(dir.path(), &seen), vec!["keep.go", "pkg/vendored/kept.go"]);
}

#[test]
fn test_excluded_directory_is_pruned() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "a/a.go");
    touch(dir.path(), "b/b.go");

    let excluded = vec![dir.path().join("b")];
    let seen = collect(&SourceTreeWalker::new(), &[dir.path().to_path_buf()], &excluded);

    assert_eq!(relative(dir.path(), &seen), vec!["a/a.go"]);
}

#[test]
fn test_excluded_file_is_skipped() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "a.go");
    touch(dir.path(), "b.go");

    let excluded = vec![dir.path().join("a.go")];
    let seen = collect(&SourceTreeWalker::new(), &[dir.path().to_path_buf()], &excluded);

    assert_eq!(relative(dir.path(), &seen), vec!["b.go"]);
}

#[test]
fn test_exclusion_ignores_trailing_separator() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "a/a.go");
    touch(dir.path(), "b/b.go");

    let excluded = vec![PathBuf::from(format!("{}/", dir.path().join("a").display()))];
    let seen = collect(&SourceTreeWalker::new(), &[dir.path().to_path_buf()], &excluded);

    assert_eq!(relative(dir.path(), &seen), vec!["b/b.go"]);
}

#[test]
fn test_roots_are_walked_in_order() {
    let first = tempdir().unwrap();
    let second = tempdir().unwrap();
    touch(first.path(), "z.go");
    touch(second.path(), "a.go");

    let roots = vec![first.path().to_path_buf(), second.path().to_path_buf()];
    let seen = collect(&SourceTreeWalker::new(), &roots, &[]);

    assert_eq!(seen, vec![first.path().join("z.go"), second.path().join("a.go")]);
}

#[test]
fn test_small_queue_delivers_every_file() {
    let dir = tempdir().unwrap();
    for i in 0..50 {
        touch(dir.path(), &format!("pkg{}/file{}.go", i % 5, i));
    }

    let walker = SourceTreeWalker::new().with_queue_capacity(1);
    let seen = collect(&walker, &[dir.path().to_path_buf()], &[]);

    assert_eq!(seen.len(), 50);
}

#[test]
fn test_missing_root_fails_the_walk() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "a.go");
    let missing = dir.path().join("does-not-exist");

    let roots = vec![dir.path().to_path_buf(), missing.clone()];
    let err = SourceTreeWalker::new()
        .walk(&roots, &[], |_| Ok(()))
        .unwrap_err();

    match err {
        AuditError::Walk { root, .. } => assert_eq!(root, missing),
        other => panic!("unexpected error: {other:?}"),
    }
}
