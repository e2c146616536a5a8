//! Unit tests for CLI commands

use crate::cli::{execute, Cli, Commands};
use clap::Parser;
use std::io::Write;

fn run_to_string(args: &[&str]) -> (bool, String) {
    let cli = Cli::try_parse_from(args).unwrap();
    let mut out = Vec::new();
    let ok = execute(&cli.command, &mut out).unwrap();
    (ok, String::from_utf8(out).unwrap())
}

fn routes_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(
        b"routes:\n  - name: get_book\n    pattern: /v1/{name=shelves/*/books/*}\n  - name: undelete\n    method: POST\n    pattern: /v1/{name=shelves/*}:undelete\n",
    )
    .unwrap();
    file
}

#[test]
fn test_compile_command_parses() {
    let cli = Cli::try_parse_from(["httprule", "compile", "--pattern", "/v1/{id}", "--json"]).unwrap();
    match cli.command {
        Commands::Compile { pattern, json } => {
            assert_eq!(pattern, "/v1/{id}");
            assert!(json);
        }
        _ => panic!("Expected Compile command"),
    }
    assert_eq!(cli.log_level, "warn");
}

#[test]
fn test_resolve_command_defaults_to_get() {
    let cli = Cli::try_parse_from([
        "httprule",
        "resolve",
        "--config",
        "routes.yaml",
        "--path",
        "/v1/x",
        "--log-level",
        "debug",
    ])
    .unwrap();
    match cli.command {
        Commands::Resolve { config, method, path } => {
            assert_eq!(config.to_string_lossy(), "routes.yaml");
            assert_eq!(method, "GET");
            assert_eq!(path, "/v1/x");
        }
        _ => panic!("Expected Resolve command"),
    }
    assert_eq!(cli.log_level, "debug");
}

#[test]
fn test_missing_required_argument_is_error() {
    assert!(Cli::try_parse_from(["httprule", "match", "--pattern", "/v1"]).is_err());
    assert!(Cli::try_parse_from(["httprule", "frobnicate"]).is_err());
}

#[test]
fn test_compile_json_output() {
    let (ok, out) = run_to_string(&["httprule", "compile", "--pattern", "/v1/{name=shelves/*}", "--json"]);
    assert!(ok);
    let doc: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(doc["template"], "/v1/{name=shelves/*}");
    assert_eq!(doc["opcodes"], serde_json::json!([2, 0, 2, 1, 1, 0, 4, 2, 5, 2]));
    assert_eq!(doc["pool"], serde_json::json!(["v1", "shelves", "name"]));
    assert_eq!(doc["fields"], serde_json::json!(["name"]));
}

#[test]
fn test_compile_text_output() {
    let (ok, out) = run_to_string(&["httprule", "compile", "--pattern", "/v1/{id}:lock"]);
    assert!(ok);
    assert!(out.starts_with("template:  /v1/{id=*}:lock\n"));
    assert!(out.contains("verb:      lock"));
    assert!(out.contains("0000 litpush"));
}

#[test]
fn test_compile_rejects_bad_template() {
    let cli = Cli::try_parse_from(["httprule", "compile", "--pattern", "/v1/{id"]).unwrap();
    let err = execute(&cli.command, &mut Vec::new()).unwrap_err();
    assert!(err.to_string().contains("Invalid template"));
}

#[test]
fn test_match_command() {
    let (ok, out) = run_to_string(&[
        "httprule",
        "match",
        "--pattern",
        "/v1/{name=shelves/*}/books/{book}",
        "--path",
        "/v1/shelves/1/books/2",
    ]);
    assert!(ok);
    let doc: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(doc["matched"], true);
    assert_eq!(doc["bindings"]["name"], "shelves/1");
    assert_eq!(doc["bindings"]["book"], "2");

    let (ok, out) = run_to_string(&["httprule", "match", "--pattern", "/v1/{id}", "--path", "/v2/x"]);
    assert!(!ok);
    assert_eq!(out.trim(), r#"{"matched":false}"#);
}

#[test]
fn test_routes_command() {
    let file = routes_file();
    let path = file.path().to_str().unwrap();
    let (ok, out) = run_to_string(&["httprule", "routes", "--config", path]);
    assert!(ok);
    assert!(out.starts_with("[routes] count=2\n"));
    assert!(out.contains("[route] POST /v1/{name=shelves/*}:undelete -> undelete"));
}

#[test]
fn test_resolve_command() {
    let file = routes_file();
    let path = file.path().to_str().unwrap();

    let (ok, out) = run_to_string(&[
        "httprule",
        "resolve",
        "--config",
        path,
        "--method",
        "post",
        "--path",
        "/v1/shelves/9:undelete",
    ]);
    assert!(ok);
    let doc: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(doc["route"], "undelete");
    assert_eq!(doc["method"], "POST");
    assert_eq!(doc["bindings"]["name"], "shelves/9");

    let (ok, _) = run_to_string(&["httprule", "resolve", "--config", path, "--path", "/nope"]);
    assert!(!ok);
}

#[test]
fn test_resolve_rejects_unknown_method() {
    let file = routes_file();
    let path = file.path().to_str().unwrap();
    let cli = Cli::try_parse_from([
        "httprule", "resolve", "--config", path, "--method", "FETCH", "--path", "/",
    ])
    .unwrap();
    let err = execute(&cli.command, &mut Vec::new()).unwrap_err();
    assert!(err.to_string().contains("FETCH"));
}
