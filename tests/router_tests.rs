mod common;

use common::{temp_config, ROUTES_YAML};
use http::Method;
use httprule::config::load_routes_config;
use httprule::RouteTable;

fn table() -> RouteTable {
    let file = temp_config(ROUTES_YAML, ".yaml");
    let config = load_routes_config(file.path()).unwrap();
    RouteTable::from_config(&config).unwrap()
}

fn resolve(table: &RouteTable, method: Method, path: &str) -> Option<(String, Vec<(String, String)>)> {
    table.route(&method, path).map(|m| {
        let bindings = m
            .bindings
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        (m.name().to_string(), bindings)
    })
}

fn pair(k: &str, v: &str) -> (String, String) {
    (k.to_string(), v.to_string())
}

#[test]
fn test_route_matches_from_yaml_config() {
    let table = table();
    assert_eq!(table.len(), 7);

    let cases = vec![
        (Method::GET, "/", Some(("root", vec![]))),
        (Method::GET, "/v1/shelves", Some(("list_shelves", vec![]))),
        (
            Method::GET,
            "/v1/shelves/1",
            Some(("get_shelf", vec![pair("name", "shelves/1")])),
        ),
        (
            Method::DELETE,
            "/v1/shelves/1",
            Some(("delete_shelf", vec![pair("name", "shelves/1")])),
        ),
        (
            Method::POST,
            "/v1/shelves/1:undelete",
            Some(("undelete_shelf", vec![pair("name", "shelves/1")])),
        ),
        (
            Method::GET,
            "/v1/shelves/1/books/2",
            Some(("get_book", vec![pair("name", "shelves/1/books/2")])),
        ),
        (
            Method::GET,
            "/v1/files/css/site.css",
            Some(("get_file", vec![pair("path", "css/site.css")])),
        ),
        (Method::POST, "/v1/shelves/1", None),
        (Method::GET, "/v2/shelves", None),
        (Method::PUT, "/", None),
        (Method::GET, "/v1/shelves:purge", None),
        (Method::GET, "/v1/shelves/1:undelete", None),
    ];

    for (method, path, expected) in cases {
        let got = resolve(&table, method.clone(), path);
        let expected = expected.map(|(name, b)| (name.to_string(), b));
        assert_eq!(got, expected, "{method} {path}");
    }
}

#[test]
fn test_same_table_from_json_and_toml() {
    let json = r#"{"routes":[{"name":"get_shelf","method":"GET","pattern":"/v1/{name=shelves/*}"}]}"#;
    let toml = "[[routes]]\nname = \"get_shelf\"\nmethod = \"GET\"\npattern = \"/v1/{name=shelves/*}\"\n";

    for (content, suffix) in [(json, ".json"), (toml, ".toml")] {
        let file = temp_config(content, suffix);
        let config = load_routes_config(file.path()).unwrap();
        let table = RouteTable::from_config(&config).unwrap();
        assert_eq!(
            resolve(&table, Method::GET, "/v1/shelves/3"),
            Some(("get_shelf".to_string(), vec![pair("name", "shelves/3")]))
        );
    }
}

#[test]
fn test_invalid_pattern_in_config_is_reported() {
    let file = temp_config(
        "routes:\n  - name: broken\n    pattern: /v1/{name=**/x}\n",
        ".yaml",
    );
    let config = load_routes_config(file.path()).unwrap();
    let err = RouteTable::from_config(&config).unwrap_err();
    assert!(err.to_string().starts_with("route 'broken'"));
}

#[test]
fn test_table_shared_across_threads() {
    let table = std::sync::Arc::new(table());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let table = std::sync::Arc::clone(&table);
            std::thread::spawn(move || {
                let path = format!("/v1/shelves/{i}/books/{}", i * 10);
                let m = table.route(&Method::GET, &path).unwrap();
                m.get_binding("name").map(str::to_string)
            })
        })
        .collect();
    for (i, h) in handles.into_iter().enumerate() {
        assert_eq!(h.join().unwrap(), Some(format!("shelves/{i}/books/{}", i * 10)));
    }
}
