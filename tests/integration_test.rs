//! Integration tests for the oxflib binary.
//!
//! These tests write XML files on the fly and run the full binary
//! against them.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};
use std::fs;
use tempfile::tempdir;

/// Helper to get the binary command for testing.
fn get_cmd() -> Command {
    Command::cargo_bin("oxflib").unwrap()
}

const CATALOG_XML: &str = r#"<?xml version="1.0"?>
<catalog owner="shop">
  <product sku="a1">Widget</product>
  <product sku="b2">Gadget</product>
  <note>  seasonal  </note>
</catalog>"#;

fn expected_catalog() -> Value {
    json!({
        "catalog": {
            "product": [
                {"@sku": "a1", "#text": "Widget"},
                {"@sku": "b2", "#text": "Gadget"}
            ],
            "note": "seasonal",
            "@owner": "shop"
        }
    })
}

#[test]
fn test_file_to_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("catalog.xml");
    let output = dir.path().join("catalog.json");
    fs::write(&input, CATALOG_XML).unwrap();

    get_cmd()
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .arg("--pretty")
        .assert()
        .success();

    let written: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written, expected_catalog());
}

#[test]
fn test_stdin_to_stdout() {
    let assert = get_cmd().write_stdin(CATALOG_XML).assert().success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let written: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(written, expected_catalog());
}

#[test]
fn test_compact_output_is_single_line() {
    get_cmd()
        .write_stdin("<a><b/></a>")
        .assert()
        .success()
        .stdout("{\"a\":{\"b\":null}}\n");
}

#[test]
fn test_malformed_xml_fails() {
    get_cmd()
        .write_stdin("<a><b></a>")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Parse Error"));
}

#[test]
fn test_missing_input_file_fails() {
    let dir = tempdir().unwrap();

    get_cmd()
        .arg("--input")
        .arg(dir.path().join("missing.xml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open input file"));
}
