//! Tests for the dependency-mapper binary

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn dependency_mapper() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("dependency-mapper"))
}

fn write_file(root: &Path, relative: &str, contents: &[u8]) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn cyclic_tree() -> TempDir {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "lib/build.gradle", b"dependencies {\n    :core\n    }\n");
    write_file(temp.path(), "app/build.gradle", b"dependencies {\n    :lib\n    }\n");
    write_file(temp.path(), "core/build.gradle", b"dependencies {\n    :app\n    }\n");
    temp
}

#[test]
fn test_writes_plantuml_artifact() {
    let temp = cyclic_tree();
    let out = temp.path().join("deps.puml");

    dependency_mapper()
        .arg(temp.path())
        .arg("build.gradle")
        .arg("3")
        .args(["--resolver", "segment", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 dependency cycle"));

    let diagram = fs::read_to_string(&out).unwrap();
    assert!(diagram.starts_with("@startuml dependency_mapper.domain\n"));
    assert!(diagram.ends_with("@enduml\n"));
    assert_eq!(diagram.matches("..>").count(), 3);
}

#[test]
fn test_default_output_is_output_puml_in_working_dir() {
    let temp = cyclic_tree();

    dependency_mapper()
        .current_dir(temp.path())
        .args([".", "build.gradle", "3"])
        .assert()
        .success();

    assert!(temp.path().join("output.puml").is_file());
}

#[test]
fn test_diagram_to_stdout() {
    let temp = cyclic_tree();

    dependency_mapper()
        .arg(temp.path())
        .args(["build.gradle", "3", "--format", "mermaid", "-o", "-"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("graph TD"));
}

#[test]
fn test_error_on_cycles_exits_non_zero() {
    let temp = cyclic_tree();

    dependency_mapper()
        .arg(temp.path())
        .args(["build.gradle", "3", "--resolver", "segment", "--error-on-cycles", "-o", "-"])
        .assert()
        .failure();
}

#[test]
fn test_invalid_root_fails() {
    let temp = TempDir::new().unwrap();

    dependency_mapper()
        .arg(temp.path().join("missing"))
        .args(["build.gradle", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("root_not_found"));
}

#[test]
fn test_invalid_build_system_fails() {
    let temp = TempDir::new().unwrap();

    dependency_mapper()
        .arg(temp.path())
        .args(["build.gradle", "4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid_build_system"));
}

#[test]
fn test_all_files_undecodable_fails() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "a/build.gradle", &[0xff, 0xfe, 0x00]);
    write_file(temp.path(), "b/build.gradle", &[0xc3, 0x28]);

    dependency_mapper()
        .arg(temp.path())
        .args(["build.gradle", "3", "-o", "-"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("all_files_undecodable"));
}

#[test]
fn test_json_report() {
    let temp = cyclic_tree();
    let out = temp.path().join("deps.dot");

    let assert = dependency_mapper()
        .arg(temp.path())
        .args(["build.gradle", "3", "--resolver", "segment", "--report", "json", "-f", "dot", "-o"])
        .arg(&out)
        .assert()
        .success();

    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(report["cycle_count"], 1);
    assert!(fs::read_to_string(&out).unwrap().starts_with("digraph dependencies {"));
}
