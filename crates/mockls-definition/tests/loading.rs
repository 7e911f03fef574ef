//! Integration tests for loading definition files from disk.

use std::fs;
use std::path::{Path, PathBuf};

use mockls_definition::{DefinitionError, load_definition, load_registry};
use mockls_protocol::ProcedureOutcome;
use rstest::{fixture, rstest};
use serde_json::json;
use tempfile::TempDir;

#[fixture]
fn workspace() -> TempDir {
    TempDir::new().expect("failed to create temporary directory")
}

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("failed to write definition");
    path
}

#[rstest]
fn loads_and_merges_mixed_formats(workspace: TempDir) {
    let yaml = write(
        workspace.path(),
        "math.yaml",
        "request:\n  add:\n    - params: [1, 2]\n      result: 3\nnotify:\n  - update\n",
    );
    let toml = write(
        workspace.path(),
        "more.toml",
        "[[request.subtract]]\nparams = [4, 1]\nresult = 3\n",
    );
    let json = write(
        workspace.path(),
        "extra.json",
        r#"{"request": {"add": [{"params": [3, 4], "result": 7}]}, "notify": ["exit"]}"#,
    );

    let registry = load_registry(&[yaml, toml, json]).expect("load failed");

    assert_eq!(registry.methods(), vec!["add", "exit", "subtract", "update"]);
    let add = registry.get("add").expect("add registered");
    assert_eq!(
        add.invoke(Some(&json!([3, 4]))).expect("invoke failed"),
        ProcedureOutcome::Matched(json!(7))
    );
}

#[rstest]
fn rejects_unknown_extension(workspace: TempDir) {
    let path = write(workspace.path(), "math.txt", "{}");

    let error = load_definition(&path).expect_err("extension should be rejected");

    assert!(matches!(error, DefinitionError::UnknownExtension { .. }));
    assert!(error.to_string().contains("math.txt"));
}

#[rstest]
fn reports_missing_file(workspace: TempDir) {
    let path = workspace.path().join("absent.json");

    let error = load_definition(&path).expect_err("missing file should fail");

    assert!(matches!(error, DefinitionError::Read { .. }));
}

#[rstest]
fn reports_syntax_errors_with_path(workspace: TempDir) {
    let path = write(workspace.path(), "broken.json", r#"{"request": "#);

    let error = load_definition(&path).expect_err("invalid JSON should fail");

    assert!(matches!(error, DefinitionError::Syntax { .. }));
    assert!(error.to_string().contains("broken.json"));
}

#[rstest]
fn rejects_duplicate_notify_across_files(workspace: TempDir) {
    let first = write(workspace.path(), "first.yml", "notify: [update]\n");
    let second = write(workspace.path(), "second.json", r#"{"notify": ["update"]}"#);

    let error = load_registry(&[first, second]).expect_err("duplicate should fail");

    assert!(matches!(error, DefinitionError::DuplicateNotify { .. }));
}
