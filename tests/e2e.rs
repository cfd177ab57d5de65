//! End-to-end runs against real files on disk.

use std::fs;
use std::path::PathBuf;

use muzzle_core::host::OsHost;
use muzzle_suppress::pipeline::{run, PipelineError, SuppressOptions};

fn options(entry: PathBuf, rule_sets: &[&str]) -> SuppressOptions {
    SuppressOptions {
        entry_point: entry,
        rule_sets: rule_sets.iter().map(|s| s.to_string()).collect(),
        message: None,
    }
}

#[test]
fn test_annotates_and_formats_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let entry = dir.path().join("main.mzl");
    fs::write(&entry, "model Foo {\n    message:string;\n}\n").unwrap();

    let summary = run(&OsHost, &options(entry.clone(), &["core/docs"])).unwrap();
    assert_eq!(summary.warnings_seen, 2);
    assert_eq!(summary.suppressions, 2);
    assert_eq!(summary.files_formatted, 1);

    let expected = concat!(
        "#suppress \"missing-doc\" \"Warnings auto-suppressed by muzzle.\"\n",
        "model Foo {\n",
        "  #suppress \"missing-doc\" \"Warnings auto-suppressed by muzzle.\"\n",
        "  message: string;\n",
        "}\n",
    );
    assert_eq!(fs::read_to_string(&entry).unwrap(), expected);
}

#[test]
fn test_rerun_reaches_a_fixed_point() {
    let dir = tempfile::tempdir().unwrap();
    let entry = dir.path().join("main.mzl");
    fs::write(
        &entry,
        "model lowercase {\n  Display_Name: string;\n}\n\nop ping(): boolean;\n",
    )
    .unwrap();

    let first = run(&OsHost, &options(entry.clone(), &["core/recommended"])).unwrap();
    assert!(first.suppressions > 0);
    let settled = fs::read_to_string(&entry).unwrap();

    let second = run(&OsHost, &options(entry.clone(), &["core/recommended"])).unwrap();
    assert_eq!(second.warnings_seen, 0);
    assert_eq!(second.suppressions, 0);
    assert_eq!(second.files_formatted, 0);
    assert_eq!(fs::read_to_string(&entry).unwrap(), settled);
}

#[test]
fn test_imports_and_config_from_project_dir() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("main.mzl"),
        "import \"./types.mzl\";\n\n/** Service surface. */\nmodel Api {\n  /** Payload. */\n  body: Payload;\n}\n",
    )
    .unwrap();
    fs::write(dir.path().join("types.mzl"), "model Payload {}\n").unwrap();
    fs::write(
        dir.path().join("muzzle.json"),
        r#"{ "rule_sets": ["core/docs"], "message": "tracked in MZ-7" }"#,
    )
    .unwrap();

    // no rule sets on the command line; muzzle.json supplies them
    let summary = run(&OsHost, &options(dir.path().join("main.mzl"), &[])).unwrap();
    assert_eq!(summary.suppressions, 1);

    let types = fs::read_to_string(dir.path().join("types.mzl")).unwrap();
    assert_eq!(
        types,
        "#suppress \"missing-doc\" \"tracked in MZ-7\"\nmodel Payload {}\n"
    );
}

#[test]
fn test_unknown_rule_set_modifies_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let entry = dir.path().join("main.mzl");
    let original = "model   Foo {}\n";
    fs::write(&entry, original).unwrap();

    let err = run(&OsHost, &options(entry.clone(), &["core/typo"])).unwrap_err();
    assert!(matches!(err, PipelineError::UnknownRuleSet(_)));
    assert!(err.to_string().contains("core/typo"));
    assert_eq!(fs::read_to_string(&entry).unwrap(), original);
}

#[test]
fn test_missing_entry_point_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let err = run(&OsHost, &options(dir.path().join("absent.mzl"), &["core/docs"])).unwrap_err();
    assert!(matches!(err, PipelineError::EntryNotFound(_)));
}
