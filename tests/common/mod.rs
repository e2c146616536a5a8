#![allow(dead_code)]

use std::io::Write;

/// Sample route table used across integration tests
pub const ROUTES_YAML: &str = r#"
routes:
  - name: root
    pattern: /
  - name: list_shelves
    method: GET
    pattern: /v1/shelves
  - name: get_shelf
    method: GET
    pattern: /v1/{name=shelves/*}
  - name: delete_shelf
    method: DELETE
    pattern: /v1/{name=shelves/*}
  - name: undelete_shelf
    method: POST
    pattern: /v1/{name=shelves/*}:undelete
  - name: get_book
    method: GET
    pattern: /v1/{name=shelves/*/books/*}
  - name: get_file
    method: GET
    pattern: /v1/files/{path=**}
"#;

/// Write `content` to a temp file with the given extension (e.g. ".yaml")
pub fn temp_config(content: &str, suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("httprule_test_")
        .suffix(suffix)
        .tempfile()
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}
