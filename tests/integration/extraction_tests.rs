//! Export and usage extraction tests against the Go fixtures

use refaudit::discovery::SourceTreeWalker;
use refaudit::{AuditError, Auditor, Config, ExportExtractor, UsageExtractor};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn fixture_config() -> Config {
    let fixtures = fixtures_path();
    Config {
        from: vec![fixtures.join("lib")],
        exclude_from: vec![fixtures.join("lib/internal")],
        to: vec![fixtures.join("app")],
        ..Config::default()
    }
}

#[test]
fn test_fixture_exports() {
    let fixtures = fixtures_path();
    let exports = ExportExtractor::new(SourceTreeWalker::new())
        .extract_exports(&[fixtures.join("lib")], &[fixtures.join("lib/internal")])
        .unwrap();

    // vendor/ is pruned, *_test.go has no module and methods are not exports
    assert_eq!(
        exports.sorted(),
        vec![
            "example.com/lib/dummy.ExportedFunction",
            "example.com/lib/dummy.ExportedInterface",
            "example.com/lib/dummy.ExportedStruct",
            "example.com/lib/dummy.ExportedVariable",
        ]
    );
}

#[test]
fn test_fixture_exports_without_exclusion() {
    let exports = ExportExtractor::new(SourceTreeWalker::new())
        .extract_exports(&[fixtures_path().join("lib")], &[])
        .unwrap();

    assert!(exports.contains("example.com/lib/internal/skipme.Skipped"));
    assert!(!exports.contains("example.com/lib/vendor/example.com/dep.Vendored"));
    assert_eq!(exports.len(), 5);
}

#[test]
fn test_fixture_usages() {
    let usages = UsageExtractor::new(SourceTreeWalker::new())
        .extract_usages(&[fixtures_path().join("app")], &[])
        .unwrap();

    assert_eq!(
        usages.sorted(),
        vec![
            "example.com/lib/dummy.ExportedFunction",
            "example.com/lib/dummy.ExportedInterface",
            "fmt.Println",
        ]
    );
}

#[test]
fn test_library_references_to_stdlib_are_usages() {
    let usages = UsageExtractor::new(SourceTreeWalker::new())
        .extract_usages(&[fixtures_path().join("lib/dummy")], &[])
        .unwrap();

    // dummy_test.go is parsed too; it just has no selectors
    assert_eq!(usages.sorted(), vec!["fmt.Print", "fmt.Sprint", "fmt.Stringer"]);
}

#[test]
fn test_end_to_end_report() {
    let report = Auditor::new(fixture_config()).run().unwrap();

    assert_eq!(report.exported.len(), 4);
    assert_eq!(report.imported.len(), 3);
    assert_eq!(
        report.unused_exports,
        vec![
            "example.com/lib/dummy.ExportedStruct",
            "example.com/lib/dummy.ExportedVariable",
        ]
    );
}

#[test]
fn test_report_is_deterministic() {
    let first = Auditor::new(fixture_config()).run().unwrap();
    let second = Auditor::new(fixture_config()).run().unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_unused_is_subset_of_exported() {
    let report = Auditor::new(fixture_config()).run().unwrap();

    for name in &report.unused_exports {
        assert!(report.exported.contains(name));
        assert!(!report.imported.contains(name));
    }
}

#[test]
fn test_empty_usage_roots_mark_everything_unused() {
    let config = Config {
        to: vec![],
        ..fixture_config()
    };
    let report = Auditor::new(config).run().unwrap();

    assert!(report.imported.is_empty());
    assert_eq!(report.unused_exports, report.exported);
}

#[test]
fn test_alias_and_nested_module() {
    let lib = tempdir().unwrap();
    write(lib.path(), "go.mod", "module example.com/multi\n");
    write(lib.path(), "a/a.go", "package a\n\nconst (\n\tFirst = iota\n\tSecond\n)\n");
    write(lib.path(), "v2/go.mod", "module \"example.com/multi/v2\"\n");
    write(lib.path(), "v2/b/b.go", "package b\n\ntype Thing = int\n");

    let app = tempdir().unwrap();
    write(
        app.path(),
        "main.go",
        "package main\n\nimport (\n\talpha \"example.com/multi/a\"\n\t\"example.com/multi/v2/b\"\n)\n\nvar _ b.Thing = alpha.First\n",
    );

    let config = Config {
        from: vec![lib.path().to_path_buf()],
        to: vec![app.path().to_path_buf()],
        ..Config::default()
    };
    let report = Auditor::new(config).run().unwrap();

    assert_eq!(
        report.exported,
        vec![
            "example.com/multi/a.First",
            "example.com/multi/a.Second",
            "example.com/multi/v2/b.Thing",
        ]
    );
    assert_eq!(report.unused_exports, vec!["example.com/multi/a.Second"]);
}

#[test]
fn test_parse_failure_in_usage_pass() {
    let app = tempdir().unwrap();
    write(app.path(), "main.go", "package main\n\nfunc main() {\n");

    let config = Config {
        from: vec![fixtures_path().join("lib/dummy")],
        to: vec![app.path().to_path_buf()],
        ..Config::default()
    };
    let err = Auditor::new(config).run().unwrap_err();

    assert!(matches!(err, AuditError::Pass { pass: "usages", .. }));
    match err.root_cause() {
        AuditError::Parse { path, .. } => assert_eq!(path, &app.path().join("main.go")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_missing_from_root_fails() {
    let config = Config {
        from: vec![fixtures_path().join("no-such-dir")],
        ..Config::default()
    };
    let err = Auditor::new(config).run().unwrap_err();

    assert!(matches!(err.root_cause(), AuditError::Walk { .. }));
}
