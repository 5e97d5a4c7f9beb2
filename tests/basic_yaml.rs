use treepath::document::node::{Node, Scalar};
use treepath::document::parser::parse_yaml;

#[test]
fn test_parse_simple_yaml() {
    let yaml = r#"
name: Test
count: 42
enabled: true
"#;

    let node = parse_yaml(yaml).expect("Failed to parse YAML");

    match node {
        Node::Mapping(obj) => {
            assert_eq!(obj.len(), 3);

            let name = obj.get("name").expect("name field missing");
            assert_eq!(name.as_str(), Some("Test"));

            let count = obj.get("count").expect("count field missing");
            assert_eq!(count, &Node::Scalar(Scalar::Integer(42)));

            let enabled = obj.get("enabled").expect("enabled field missing");
            assert_eq!(enabled, &Node::Scalar(Scalar::Boolean(true)));
        }
        _ => panic!("Root should be mapping"),
    }
}

#[test]
fn test_parse_array() {
    let yaml = r#"
- Alice
- Bob
- Carol
"#;

    let node = parse_yaml(yaml).expect("Failed to parse YAML");

    match node {
        Node::Sequence(arr) => {
            assert_eq!(arr.len(), 3);
            assert_eq!(arr[0].as_str(), Some("Alice"));
        }
        _ => panic!("Root should be sequence"),
    }
}

#[test]
fn test_subtree_reencodes_as_yaml() {
    let yaml = r#"
g:
  h:
  - i: vi
    k:
      l: vl
"#;

    let root = parse_yaml(yaml).unwrap();
    let sub = root.get("g.h.0").unwrap().unwrap();
    let encoded = sub.to_yaml_string().unwrap();

    assert_eq!(encoded, "i: vi\nk:\n  l: vl\n");
    assert_eq!(&parse_yaml(&encoded).unwrap(), sub);
}

#[test]
fn test_subtree_reencodes_as_json() {
    let root = parse_yaml("c:\n  d: vd\n  n: 3\n").unwrap();
    let sub = root.get("c").unwrap().unwrap();

    let value: serde_json::Value = serde_json::from_str(&sub.to_json_string().unwrap()).unwrap();
    assert_eq!(value, serde_json::json!({"d": "vd", "n": 3}));
}
