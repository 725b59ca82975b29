use http::Method;
use routedfa::matching::{JumpTableKind, SegmentRequirement};
use routedfa::routes::load_route_table;

mod common;
use common::temp_files;

const YAML_TABLE: &str = r#"
options:
  linear_search_max: 2
routes:
  - { path: /pets, method: get, handler: list_pets }
  - { path: /pets, method: POST, handler: add_pet }
  - { path: "/pets/{id}", method: GET, handler: get_pet }
  - { path: /users, method: GET, handler: list_users }
  - { path: /store, handler: store }
  - { path: "/files/{*path}", method: GET, handler: files }
"#;

#[test]
fn test_load_yaml_table() {
    let path = temp_files::create_temp_yaml(YAML_TABLE);
    let table = load_route_table(&path).expect("load");

    assert_eq!(table.len(), 6);
    let listed: Vec<String> = table.routes.iter().map(|r| r.to_string()).collect();
    assert_eq!(
        listed,
        vec![
            "GET /pets -> list_pets",
            "POST /pets -> add_pet",
            "GET /pets/{id} -> get_pet",
            "GET /users -> list_users",
            "* /store -> store",
            "GET /files/{*path} -> files",
        ]
    );
    assert_eq!(table.routes[0].method, Some(Method::GET));
    assert!(matches!(
        table.routes[5].pattern.segments()[1],
        SegmentRequirement::CatchAll(_)
    ));

    temp_files::cleanup_temp_files(&[path]);
}

#[test]
fn test_load_json_table_builds_matcher() {
    let json = r#"{
  "routes": [
    {"path": "/a", "handler": "a"},
    {"path": "/b", "handler": "b"},
    {"path": "/c", "handler": "c"},
    {"path": "/d/{id}", "method": "DELETE", "handler": "d"}
  ]
}"#;
    let path = temp_files::create_temp_json(json);
    let table = load_route_table(&path).expect("load");
    let matcher = table.build_matcher().expect("matcher");

    let set = matcher.match_path("/d/42");
    assert_eq!(set.len(), 1);
    assert_eq!(set.candidates()[0].endpoint.handler_name.as_ref(), "d");
    assert!(matcher.match_path("/e").is_empty());

    temp_files::cleanup_temp_files(&[path]);
}

#[test]
fn test_invalid_tables_are_rejected() {
    let cases = [
        ("routes: [ { path: \"/a/{*rest}/b\", handler: h } ]", "catch-all"),
        ("routes: [ { path: \"/a/{x}-{y}\", handler: h } ]", "segment '{x}-{y}'"),
        ("routes: [ { path: \"/a/{*x?}\", handler: h } ]", "segment '{*x?}'"),
        ("routes: [ { path: /a, method: FETCH, handler: h } ]", "FETCH"),
        ("routes: [ { path: /a, handler: \"  \" } ]", "no handler"),
        ("routes: [ { path: /a } ]", "handler"),
        ("routes: {", ""),
    ];
    for (yaml, needle) in cases {
        let path = temp_files::create_temp_yaml(yaml);
        let err = load_route_table(&path).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains(needle), "{yaml}: {message}");
        assert!(message.contains(&path.display().to_string()), "{message}");
        temp_files::cleanup_temp_files(&[path]);
    }
}

#[test]
fn test_environment_overrides_file_options() {
    let path = temp_files::create_temp_yaml(YAML_TABLE);

    std::env::set_var("RDFA_LINEAR_SEARCH_MAX", "0x1");
    std::env::set_var("RDFA_TRIE_THRESHOLD", "3");
    let table = load_route_table(&path);
    std::env::remove_var("RDFA_LINEAR_SEARCH_MAX");
    std::env::remove_var("RDFA_TRIE_THRESHOLD");

    let table = table.expect("load");
    assert_eq!(table.options.linear_search_max, 1);
    assert_eq!(table.options.trie_threshold, Some(3));

    // root literals: pets, users, store, files
    let matcher = table.build_matcher().expect("matcher");
    let root = matcher.states()[0].transitions().expect("root table");
    assert_eq!(root.kind(), JumpTableKind::CompiledTrie);

    temp_files::cleanup_temp_files(&[path]);
}
