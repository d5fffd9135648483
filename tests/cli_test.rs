//! End-to-end tests for the gocodegraph binary.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::TempDir;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_gocodegraph"))
}

fn run_on(source: &str, extra: &[&str]) -> (TempDir, PathBuf, Output) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("main.go");
    fs::write(&path, source).unwrap();
    let output = bin().args(extra).arg(&path).output().unwrap();
    (temp, path, output)
}

#[test]
fn test_no_arguments_prints_usage() {
    let output = bin().output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage"), "stdout was {:?}", stdout);
}

#[test]
fn test_function_calls_scenario() {
    let (_temp, path, output) = run_on(
        "package main\n\nfunc f() {\n\tg(1)\n\th.Close()\n}\n",
        &[],
    );

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    let f = &value["f"];
    assert_eq!(f["Name"], "f");
    assert_eq!(f["Kind"], "function");
    assert_eq!(f["Calls"], serde_json::json!(["g", "h.Close"]));
    assert_eq!(f["Code"], "func f() {\n\tg(1)\n\th.Close()\n}");
    assert_eq!(f["Position"], format!("{}:3:1", path.display()));
    assert_eq!(value.as_object().unwrap().len(), 1);
}

#[test]
fn test_pointer_method_scenario() {
    let (_temp, _path, output) = run_on(
        "package geo\n\nfunc (p *Point) Move() { p.step() }\n",
        &[],
    );

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["Point.Move"]["Kind"], "method");
    assert_eq!(value["Point.Move"]["Calls"], serde_json::json!(["p.step"]));
}

#[test]
fn test_generic_type_scenario() {
    let (_temp, _path, output) = run_on("package geo\n\ntype Shape[T any] struct{}\n", &[]);

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["Shape"]["Kind"], "type");
    assert_eq!(value["Shape"]["Calls"], serde_json::json!([]));
}

#[test]
fn test_parse_error_has_no_stdout() {
    let (_temp, _path, output) = run_on("package main\n\nfunc broken( {\n", &[]);

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("Error: "), "stderr was {:?}", stderr);
    assert!(stderr.contains("main.go"));
}

#[test]
fn test_missing_file_exits_with_error() {
    let output = bin().arg("/nonexistent/dir/main.go").output().unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_graph_format() {
    let (_temp, _path, output) = run_on(
        "package main\n\ntype T struct{}\n\nfunc (t T) A() { helper() }\n\nfunc helper() {}\n",
        &["--format", "graph", "--pretty"],
    );

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["nodeDataArray"].as_array().unwrap().len(), 3);
    assert_eq!(
        value["linkDataArray"],
        serde_json::json!([
            {"from": "T", "to": "T.A", "category": "dashed", "color": "gray"},
            {"from": "T.A", "to": "helper", "category": "dashed", "color": "green"},
        ])
    );
}

#[test]
fn test_verbose_logs_go_to_stderr() {
    let (_temp, _path, output) = run_on("package main\n\nfunc main() {}\n", &["-v"]);

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(value.get("main").is_some());
    assert!(!output.stderr.is_empty());
}
