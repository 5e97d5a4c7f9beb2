//! YAML and JSON decoding into `Node` trees.
//!
//! YAML goes through `yaml-rust2`, which expands aliases while loading; JSON
//! goes through `serde_json` with key order preserved. Both produce the same
//! `Node` shape, so everything downstream is format-agnostic.
//!
//! # Example
//!
//! ```
//! use treepath::document::parser::{parse_document, Format};
//!
//! let from_yaml = parse_document("a: [1, 2]\n", Format::Yaml).unwrap();
//! let from_json = parse_document(r#"{"a": [1, 2]}"#, Format::Json).unwrap();
//! assert_eq!(from_yaml, from_json);
//! ```

use super::node::Node;
use anyhow::{bail, Context, Result};
use indexmap::IndexMap;
use std::path::Path;
use yaml_rust2::{Yaml, YamlLoader};

/// Serialized document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    /// Picks a format from a file name, looking through a trailing `.gz`.
    ///
    /// `.json` files are JSON; everything else is read as YAML.
    ///
    /// # Example
    ///
    /// ```
    /// use treepath::document::parser::Format;
    ///
    /// assert_eq!(Format::from_path("dump.json.gz"), Format::Json);
    /// assert_eq!(Format::from_path("values.yaml"), Format::Yaml);
    /// ```
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        let base = path_str.strip_suffix(".gz").unwrap_or(&path_str);

        if base.ends_with(".json") {
            Format::Json
        } else {
            Format::Yaml
        }
    }
}

/// Parses a single document in the given format.
pub fn parse_document(content: &str, format: Format) -> Result<Node> {
    match format {
        Format::Yaml => parse_yaml(content),
        Format::Json => parse_json(content),
    }
}

/// Parses every document in the given format.
///
/// JSON input always holds exactly one document.
pub fn parse_documents(content: &str, format: Format) -> Result<Vec<Node>> {
    match format {
        Format::Yaml => parse_yaml_documents(content),
        Format::Json => Ok(vec![parse_json(content)?]),
    }
}

/// Parses a JSON string into a `Node`.
///
/// Integers that fit in `i64` stay integers; every other number becomes a float.
///
/// # Errors
///
/// Returns an error if the input is not valid JSON.
pub fn parse_json(json_str: &str) -> Result<Node> {
    let value: serde_json::Value = serde_json::from_str(json_str).context("Failed to parse JSON")?;
    Ok(Node::from(value))
}

/// Parses a YAML string holding at most one document.
///
/// Empty input (or input holding only comments) is a `null` document.
///
/// # Errors
///
/// Returns an error if the YAML is malformed or holds more than one document.
pub fn parse_yaml(yaml_str: &str) -> Result<Node> {
    let mut docs = parse_yaml_documents(yaml_str)?;
    match docs.len() {
        0 => Ok(Node::null()),
        1 => Ok(docs.remove(0)),
        n => bail!("Expected a single YAML document, found {}", n),
    }
}

/// Parses a YAML stream into one `Node` per document.
pub fn parse_yaml_documents(yaml_str: &str) -> Result<Vec<Node>> {
    let docs = YamlLoader::load_from_str(yaml_str).context("Failed to parse YAML")?;

    docs.iter()
        .enumerate()
        .map(|(idx, doc)| {
            convert_yaml(doc).with_context(|| format!("Invalid YAML document {}", idx))
        })
        .collect()
}

fn convert_yaml(yaml: &Yaml) -> Result<Node> {
    let node = match yaml {
        Yaml::Hash(hash) => {
            let mut entries = IndexMap::with_capacity(hash.len());
            for (key, value) in hash {
                let key = yaml_key_to_string(key)?;
                let child = convert_yaml(value)?;
                if entries.insert(key.clone(), child).is_some() {
                    bail!("Duplicate mapping key '{}'", key);
                }
            }
            Node::Mapping(entries)
        }
        Yaml::Array(items) => {
            Node::Sequence(items.iter().map(convert_yaml).collect::<Result<Vec<_>>>()?)
        }
        Yaml::String(s) => Node::string(s.clone()),
        Yaml::Integer(i) => Node::integer(*i),
        Yaml::Real(raw) => match yaml.as_f64() {
            Some(f) => Node::float(f),
            None => bail!("Invalid floating point value '{}'", raw),
        },
        Yaml::Boolean(b) => Node::boolean(*b),
        Yaml::Null => Node::null(),
        Yaml::Alias(_) => bail!("Unresolved YAML alias"),
        Yaml::BadValue => bail!("Invalid YAML value (undefined alias?)"),
    };
    Ok(node)
}

/// Mapping keys must be scalars; non-string scalars are addressed by their text.
fn yaml_key_to_string(key: &Yaml) -> Result<String> {
    match key {
        Yaml::String(s) => Ok(s.clone()),
        Yaml::Integer(i) => Ok(i.to_string()),
        Yaml::Real(raw) => Ok(raw.clone()),
        Yaml::Boolean(b) => Ok(b.to_string()),
        Yaml::Null => Ok("null".to_string()),
        Yaml::Hash(_) | Yaml::Array(_) => bail!("Complex mapping keys are not supported"),
        Yaml::Alias(_) | Yaml::BadValue => bail!("Invalid mapping key"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::node::Scalar;

    #[test]
    fn test_parse_scalars() {
        let node = parse_yaml("s: hello\ni: 42\nf: 2.5\nb: true\nn: ~\n").unwrap();

        match node {
            Node::Mapping(entries) => {
                assert_eq!(entries["s"], Node::string("hello"));
                assert_eq!(entries["i"], Node::integer(42));
                assert_eq!(entries["f"], Node::float(2.5));
                assert_eq!(entries["b"], Node::boolean(true));
                assert_eq!(entries["n"], Node::null());
            }
            _ => panic!("Expected mapping"),
        }
    }

    #[test]
    fn test_parse_keeps_key_order() {
        let node = parse_yaml("z: 1\na: 2\nm: 3\n").unwrap();

        match node {
            Node::Mapping(entries) => {
                let keys: Vec<&str> = entries.keys().map(String::as_str).collect();
                assert_eq!(keys, vec!["z", "a", "m"]);
            }
            _ => panic!("Expected mapping"),
        }
    }

    #[test]
    fn test_parse_nested_sequence() {
        let node = parse_yaml("h:\n- i: vi\n- [1, 2]\n").unwrap();

        match node {
            Node::Mapping(entries) => match &entries["h"] {
                Node::Sequence(items) => {
                    assert_eq!(items.len(), 2);
                    assert!(matches!(items[0], Node::Mapping(_)));
                    assert_eq!(
                        items[1],
                        Node::Sequence(vec![Node::integer(1), Node::integer(2)])
                    );
                }
                _ => panic!("Expected sequence"),
            },
            _ => panic!("Expected mapping"),
        }
    }

    #[test]
    fn test_parse_stringifies_scalar_keys() {
        let node = parse_yaml("1: one\ntrue: yes\n").unwrap();

        match node {
            Node::Mapping(entries) => {
                assert_eq!(entries["1"], Node::string("one"));
                assert!(entries.contains_key("true"));
            }
            _ => panic!("Expected mapping"),
        }
    }

    #[test]
    fn test_parse_rejects_colliding_keys() {
        let result = parse_yaml("1: int\n\"1\": string\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_rejects_complex_keys() {
        let result = parse_yaml("? [a, b]\n: value\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_expands_aliases() {
        let node = parse_yaml("base: &b\n  x: 1\ncopy: *b\n").unwrap();

        match node {
            Node::Mapping(entries) => assert_eq!(entries["base"], entries["copy"]),
            _ => panic!("Expected mapping"),
        }
    }

    #[test]
    fn test_parse_empty_is_null() {
        assert_eq!(parse_yaml("").unwrap(), Node::Scalar(Scalar::Null));
        assert_eq!(parse_yaml("# only a comment\n").unwrap(), Node::null());
    }

    #[test]
    fn test_parse_multi_document() {
        let docs = parse_yaml_documents("a: 1\n---\nb: 2\n").unwrap();
        assert_eq!(docs.len(), 2);

        let err = parse_yaml("a: 1\n---\nb: 2\n").unwrap_err();
        assert!(err.to_string().contains("found 2"));
    }

    #[test]
    fn test_parse_invalid_yaml() {
        assert!(parse_yaml("a: [unclosed\n").is_err());
    }

    #[test]
    fn test_parse_invalid_json() {
        let invalid_cases = vec![r#"{"unclosed": "#, r#"{key: "value"}"#, r#"[1, 2,"#];

        for invalid in invalid_cases {
            assert!(parse_json(invalid).is_err(), "Expected error for: {}", invalid);
        }
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path("a.json"), Format::Json);
        assert_eq!(Format::from_path("a.json.gz"), Format::Json);
        assert_eq!(Format::from_path("a.yaml.gz"), Format::Yaml);
        assert_eq!(Format::from_path("a.yml"), Format::Yaml);
        assert_eq!(Format::from_path("noext"), Format::Yaml);
    }
}
