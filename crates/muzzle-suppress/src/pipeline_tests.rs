use std::path::{Path, PathBuf};

use muzzle_core::host::MemoryHost;

use crate::pipeline::{run, PipelineError, RunSummary, SuppressOptions};

fn options(entry: &str, rule_sets: &[&str]) -> SuppressOptions {
    SuppressOptions {
        entry_point: PathBuf::from(entry),
        rule_sets: rule_sets.iter().map(|s| s.to_string()).collect(),
        message: None,
    }
}

#[test]
fn test_full_run_annotates_and_formats() {
    let host = MemoryHost::new();
    host.seed("main.mzl", "model Foo {\n    message:string;\n}\n");

    let summary = run(&host, &options("main.mzl", &["core/docs"])).unwrap();
    assert_eq!(
        summary,
        RunSummary {
            warnings_seen: 2,
            suppressions: 2,
            files_formatted: 1,
        }
    );

    let expected = concat!(
        "#suppress \"missing-doc\" \"Warnings auto-suppressed by muzzle.\"\n",
        "model Foo {\n",
        "  #suppress \"missing-doc\" \"Warnings auto-suppressed by muzzle.\"\n",
        "  message: string;\n",
        "}\n",
    );
    assert_eq!(host.snapshot(Path::new("main.mzl")).unwrap(), expected);
}

#[test]
fn test_second_run_is_a_no_op() {
    let host = MemoryHost::new();
    host.seed("main.mzl", "model Foo {\n  message: string;\n}\n");
    run(&host, &options("main.mzl", &["core/docs"])).unwrap();
    let settled = host.snapshot(Path::new("main.mzl")).unwrap();

    let summary = run(&host, &options("main.mzl", &["core/docs"])).unwrap();
    assert_eq!(summary.warnings_seen, 0);
    assert_eq!(summary.suppressions, 0);
    assert_eq!(summary.files_formatted, 0);
    assert_eq!(host.snapshot(Path::new("main.mzl")).unwrap(), settled);
}

#[test]
fn test_imported_files_are_annotated_and_formatted() {
    let host = MemoryHost::new();
    host.seed("main.mzl", "import \"./other.mzl\";\n\n/** Doc. */\nmodel Foo {}\n");
    host.seed("other.mzl", "model   Bar {}\n");

    let summary = run(&host, &options("main.mzl", &["core/docs"])).unwrap();
    assert_eq!(summary.suppressions, 1);
    assert_eq!(summary.files_formatted, 1);
    let other = host.snapshot(Path::new("other.mzl")).unwrap();
    assert!(other.starts_with("#suppress \"missing-doc\""));
    assert!(other.contains("model Bar {}"));
}

#[test]
fn test_empty_entry_point() {
    let host = MemoryHost::new();
    let err = run(&host, &options("", &["core/docs"])).unwrap_err();
    assert!(matches!(err, PipelineError::EntryPointMissing));
}

#[test]
fn test_missing_entry_point() {
    let host = MemoryHost::new();
    let err = run(&host, &options("missing.mzl", &["core/docs"])).unwrap_err();
    assert!(matches!(err, PipelineError::EntryNotFound(_)));
    assert!(err.to_string().contains("missing.mzl"));
}

#[test]
fn test_no_rule_sets() {
    let host = MemoryHost::new();
    host.seed("main.mzl", "model Foo {}\n");
    let err = run(&host, &options("main.mzl", &[])).unwrap_err();
    assert!(matches!(err, PipelineError::NoRuleSets));
    assert!(err.to_string().contains("at least one rule set"));
    // nothing written
    assert_eq!(host.snapshot(Path::new("main.mzl")).unwrap(), "model Foo {}\n");
}

#[test]
fn test_unknown_rule_set_aborts_before_writing() {
    let host = MemoryHost::new();
    host.seed("main.mzl", "model   Foo {}\n");
    let err = run(&host, &options("main.mzl", &["core/docs", "core/nope"])).unwrap_err();
    let text = err.to_string();
    assert!(text.contains("core/nope"));
    assert!(text.contains("Check your linter configuration"));
    // not annotated, not even formatted
    assert_eq!(host.snapshot(Path::new("main.mzl")).unwrap(), "model   Foo {}\n");
}

#[test]
fn test_config_supplies_rule_sets() {
    let host = MemoryHost::new();
    host.seed("proj/main.mzl", "model Foo {}\n");
    host.seed("proj/muzzle.json", r#"{ "rule_sets": ["core/docs"] }"#);

    let summary = run(&host, &options("proj/main.mzl", &[])).unwrap();
    assert_eq!(summary.suppressions, 1);
}

#[test]
fn test_config_message_and_flag_override() {
    let host = MemoryHost::new();
    host.seed("proj/main.mzl", "model Foo {}\n");
    host.seed(
        "proj/muzzle.json",
        r#"{ "rule_sets": ["core/docs"], "message": "from config" }"#,
    );

    run(&host, &options("proj/main.mzl", &[])).unwrap();
    assert!(host
        .snapshot(Path::new("proj/main.mzl"))
        .unwrap()
        .contains("\"from config\""));

    host.seed("proj/main.mzl", "model Foo {}\n");
    let mut opts = options("proj/main.mzl", &[]);
    opts.message = Some("from flag".to_string());
    run(&host, &opts).unwrap();
    assert!(host
        .snapshot(Path::new("proj/main.mzl"))
        .unwrap()
        .contains("\"from flag\""));
}

#[test]
fn test_syntax_error_fails_formatting() {
    let host = MemoryHost::new();
    host.seed("main.mzl", "model Foo {\n");
    let err = run(&host, &options("main.mzl", &["core/docs"])).unwrap_err();
    assert!(matches!(err, PipelineError::Format { .. }));
    assert!(err.to_string().contains("main.mzl"));
}
