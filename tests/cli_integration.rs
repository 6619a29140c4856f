// CLI integration tests for endpoint-probe reads and error exit codes.
use std::process::{Command, Output};

use serde_json::Value;

fn cmd() -> Command {
    let exe = env!("CARGO_BIN_EXE_endpoint-probe");
    Command::new(exe)
}

fn run(args: &[&str]) -> Output {
    cmd().args(args).output().expect("run endpoint-probe")
}

fn parse_json(bytes: &[u8]) -> Value {
    let text = std::str::from_utf8(bytes).expect("utf8");
    let line = text.lines().last().expect("json line");
    serde_json::from_str(line).expect("valid json")
}

#[test]
fn get_prints_typed_value() {
    let out = run(&[
        "--endpoint",
        r#"{"bucket":"nightly","port":9000,"tags":["a","b"]}"#,
        "get",
        "port",
        "--type",
        "number",
    ]);
    assert!(out.status.success());
    let json = parse_json(&out.stdout);
    assert_eq!(json["key"], "port");
    assert_eq!(json["type"], "number");
    assert_eq!(json["value"].as_f64().unwrap(), 9000.0);

    let out = run(&[
        "--endpoint",
        r#"{"tags":["a","b"]}"#,
        "get",
        "tags",
        "--type",
        "string-array",
    ]);
    assert!(out.status.success());
    let json = parse_json(&out.stdout);
    assert_eq!(json["value"], serde_json::json!(["a", "b"]));
}

#[test]
fn default_fills_absent_key_only() {
    let out = run(&[
        "--endpoint",
        r#"{"tls":"yes"}"#,
        "get",
        "compress",
        "--type",
        "boolean",
        "--default",
        "true",
    ]);
    assert!(out.status.success());
    assert_eq!(parse_json(&out.stdout)["value"], true);

    let out = run(&[
        "--endpoint",
        r#"{"tls":"yes"}"#,
        "get",
        "tls",
        "--type",
        "boolean",
        "--default",
        "true",
    ]);
    assert_eq!(out.status.code().unwrap(), 6);
    let err = parse_json(&out.stderr);
    assert_eq!(err["error"]["kind"], "TypeMismatch");
    assert_eq!(err["error"]["key"], "tls");
    assert_eq!(err["error"]["expected"], "boolean");
    assert_eq!(err["error"]["found"], "string");
}

#[test]
fn missing_endpoint_exit_code() {
    let out = run(&["get", "bucket"]);
    assert_eq!(out.status.code().unwrap(), 3);
    assert_eq!(parse_json(&out.stderr)["error"]["kind"], "MissingInput");
}

#[test]
fn malformed_endpoint_exit_code() {
    let out = run(&["--endpoint", "[1,2,3]", "keys"]);
    assert_eq!(out.status.code().unwrap(), 4);
    assert_eq!(parse_json(&out.stderr)["error"]["kind"], "MalformedInput");
}

#[test]
fn missing_key_exit_code() {
    let out = run(&["--endpoint", r#"{"a":1}"#, "get", "b"]);
    assert_eq!(out.status.code().unwrap(), 5);
    let err = parse_json(&out.stderr);
    assert_eq!(err["error"]["kind"], "MissingKey");
    assert_eq!(err["error"]["key"], "b");
}

#[test]
fn usage_exit_code() {
    let out = run(&["--endpoint", "{}", "get", "x", "--type", "map", "--default", "{}"]);
    assert_eq!(out.status.code().unwrap(), 2);

    let out = run(&["--endpoint", "{}", "get", "x", "--type", "float"]);
    assert_eq!(out.status.code().unwrap(), 2);
}

#[test]
fn non_finite_number_default_is_usage_error() {
    for raw in ["nan", "inf", "-inf"] {
        let default = format!("--default={raw}");
        let out = run(&[
            "--endpoint",
            "{}",
            "get",
            "x",
            "--type",
            "number",
            &default,
        ]);
        assert_eq!(out.status.code().unwrap(), 2, "{raw}");
        assert!(out.stdout.is_empty(), "{raw}");
        assert_eq!(parse_json(&out.stderr)["error"]["kind"], "Usage");
    }
}

#[test]
fn keys_are_sorted() {
    let out = run(&["--endpoint", r#"{"b":1,"a":2,"c":null}"#, "keys"]);
    assert!(out.status.success());
    assert_eq!(parse_json(&out.stdout)["keys"], serde_json::json!(["a", "b", "c"]));
}
