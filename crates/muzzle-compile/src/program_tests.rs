use std::path::{Path, PathBuf};

use muzzle_core::host::MemoryHost;
use muzzle_core::types::Severity;

use crate::options::CompilerOptions;
use crate::program::{compile, normalize_path, Program, PRELUDE_PATH};

fn options(rule_sets: &[&str]) -> CompilerOptions {
    CompilerOptions {
        rule_sets: rule_sets.iter().map(|s| s.to_string()).collect(),
    }
}

fn warnings(program: &Program) -> Vec<&muzzle_core::types::Diagnostic> {
    program
        .diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .collect()
}

#[test]
fn test_clean_compile_has_no_diagnostics() {
    let host = MemoryHost::new();
    host.seed("main.mzl", "/** Doc. */\nmodel Foo {}\n");
    let program = compile(&host, Path::new("main.mzl"), &options(&["core/docs"]));
    assert!(program.diagnostics.is_empty(), "{:?}", program.diagnostics);
}

#[test]
fn test_prelude_is_synthetic_and_excluded() {
    let host = MemoryHost::new();
    host.seed("main.mzl", "model Foo {}\n");
    let program = compile(&host, Path::new("main.mzl"), &options(&[]));
    let project: Vec<_> = program.project_files().map(|f| f.path.clone()).collect();
    assert_eq!(project, vec![PathBuf::from("main.mzl")]);
    assert!(program
        .sources
        .files()
        .any(|f| f.synthetic && f.path == Path::new(PRELUDE_PATH)));
}

#[test]
fn test_docs_rule_set_reports_model_and_property() {
    let host = MemoryHost::new();
    host.seed("main.mzl", "model Foo {\n  message: string;\n}\n");
    let program = compile(&host, Path::new("main.mzl"), &options(&["core/docs"]));
    let warnings = warnings(&program);
    assert_eq!(warnings.len(), 2);
    assert!(warnings.iter().all(|d| d.code == "missing-doc"));
}

#[test]
fn test_no_rule_sets_means_no_lint() {
    let host = MemoryHost::new();
    host.seed("main.mzl", "model Foo {\n  message: string;\n}\n");
    let program = compile(&host, Path::new("main.mzl"), &options(&[]));
    assert!(program.diagnostics.is_empty());
}

#[test]
fn test_suppress_directive_silences_warning() {
    let host = MemoryHost::new();
    host.seed(
        "main.mzl",
        "#suppress \"missing-doc\" \"known\"\nmodel Foo {\n  #suppress \"missing-doc\" \"known\"\n  message: string;\n}\n",
    );
    let program = compile(&host, Path::new("main.mzl"), &options(&["core/docs"]));
    assert!(program.diagnostics.is_empty(), "{:?}", program.diagnostics);
}

#[test]
fn test_ancestor_suppress_covers_descendants() {
    // directive on the model also silences the identifier-targeted naming
    // warning on its property name
    let host = MemoryHost::new();
    host.seed(
        "main.mzl",
        "#suppress \"property-name-camel-case\" \"legacy\"\nmodel Foo {\n  Display_Name: string;\n}\n",
    );
    let program = compile(&host, Path::new("main.mzl"), &options(&["core/naming"]));
    assert!(
        !program
            .diagnostics
            .iter()
            .any(|d| d.code == "property-name-camel-case"),
        "{:?}",
        program.diagnostics
    );
}

#[test]
fn test_naming_rules_fire() {
    let host = MemoryHost::new();
    host.seed("main.mzl", "model lowercase {\n  Display_Name: string;\n}\n");
    let program = compile(&host, Path::new("main.mzl"), &options(&["core/naming"]));
    let codes: Vec<_> = warnings(&program).iter().map(|d| d.code.clone()).collect();
    assert!(codes.contains(&"model-name-pascal-case".to_string()));
    assert!(codes.contains(&"property-name-camel-case".to_string()));
}

#[test]
fn test_relative_imports_loaded() {
    let host = MemoryHost::new();
    host.seed("pkg/main.mzl", "import \"./common.mzl\";\n\nmodel Foo {\n  id: uuid;\n}\n");
    host.seed("pkg/common.mzl", "scalar uuid;\n");
    let program = compile(&host, Path::new("pkg/main.mzl"), &options(&[]));
    assert!(program.diagnostics.is_empty(), "{:?}", program.diagnostics);
    assert_eq!(program.project_files().count(), 2);
}

#[test]
fn test_import_cycle_terminates() {
    let host = MemoryHost::new();
    host.seed("a.mzl", "import \"./b.mzl\";\n");
    host.seed("b.mzl", "import \"./a.mzl\";\n");
    let program = compile(&host, Path::new("a.mzl"), &options(&[]));
    assert!(program.diagnostics.is_empty());
    assert_eq!(program.project_files().count(), 2);
}

#[test]
fn test_missing_import_is_error() {
    let host = MemoryHost::new();
    host.seed("main.mzl", "import \"./gone.mzl\";\n");
    let program = compile(&host, Path::new("main.mzl"), &options(&[]));
    assert!(program.has_error_code("import-not-found"));
}

#[test]
fn test_bare_import_is_error() {
    let host = MemoryHost::new();
    host.seed("main.mzl", "import \"somelib\";\n");
    let program = compile(&host, Path::new("main.mzl"), &options(&[]));
    assert!(program.has_error_code("import-not-found"));
}

#[test]
fn test_unknown_rule_set_error() {
    let host = MemoryHost::new();
    host.seed("main.mzl", "model Foo {}\n");
    let program = compile(&host, Path::new("main.mzl"), &options(&["core/nope"]));
    assert!(program.has_error_code("unknown-rule-set"));
}

#[test]
fn test_errors_are_never_suppressed() {
    let host = MemoryHost::new();
    host.seed(
        "main.mzl",
        "#suppress \"unknown-identifier\" \"nope\"\nmodel Foo {\n  message: text;\n}\n",
    );
    let program = compile(&host, Path::new("main.mzl"), &options(&[]));
    assert!(program.has_error_code("unknown-identifier"));
}

#[test]
fn test_normalize_path() {
    assert_eq!(
        normalize_path(Path::new("pkg/./sub/../common.mzl")),
        PathBuf::from("pkg/common.mzl")
    );
    assert_eq!(normalize_path(Path::new("./a.mzl")), PathBuf::from("a.mzl"));
}
