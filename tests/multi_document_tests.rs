//! Tests for multi-document YAML streams.

use treepath::document::node::Node;
use treepath::document::parser::{parse_documents, parse_yaml, parse_yaml_documents, Format};

#[test]
fn test_parse_single_document() {
    let docs = parse_yaml_documents("key: value").unwrap();
    assert_eq!(docs.len(), 1);
    assert!(matches!(docs[0], Node::Mapping(_)));
}

#[test]
fn test_parse_multi_document() {
    let yaml = r#"---
name: first
value: 1
---
name: second
value: 2
---
name: third
value: 3
"#;

    let docs = parse_yaml_documents(yaml).unwrap();
    assert_eq!(docs.len(), 3);

    let names: Vec<&str> = docs
        .iter()
        .map(|doc| doc.get("name").unwrap().and_then(|n| n.as_str()).unwrap())
        .collect();
    assert_eq!(names, vec!["first", "second", "third"]);
}

#[test]
fn test_single_document_parser_rejects_streams() {
    let result = parse_yaml("a: 1\n---\na: 2\n");
    assert!(result.is_err());
}

#[test]
fn test_json_is_always_one_document() {
    let docs = parse_documents(r#"[1, 2]"#, Format::Json).unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].get("1").unwrap(), Some(&Node::integer(2)));
}

#[test]
fn test_empty_stream_has_no_documents() {
    assert!(parse_yaml_documents("").unwrap().is_empty());
}
