//! Document tree representation.
//!
//! This module provides the closed node type every decoded document is turned
//! into: a `Node` is a mapping, a sequence, or a scalar leaf. Path resolution,
//! diffing and encoding all dispatch on these three variants with an
//! exhaustive `match`.
//!
//! # Example
//!
//! ```
//! use treepath::document::node::{Node, Scalar};
//! use indexmap::IndexMap;
//!
//! let mut map = IndexMap::new();
//! map.insert("name".to_string(), Node::string("treepath"));
//! map.insert("version".to_string(), Node::Scalar(Scalar::Integer(1)));
//! let root = Node::Mapping(map);
//!
//! assert_eq!(root.kind_name(), "map");
//! assert!(!root.is_scalar());
//! ```

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// A leaf value with no children.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Null,
}

impl Scalar {
    /// Returns the name of this scalar's type as used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Scalar::String(_) => "string",
            Scalar::Integer(_) => "int",
            Scalar::Float(_) => "float",
            Scalar::Boolean(_) => "bool",
            Scalar::Null => "null",
        }
    }
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::String(s) => write!(f, "{}", s),
            Scalar::Integer(i) => write!(f, "{}", i),
            Scalar::Float(fl) => write!(f, "{}", fl),
            Scalar::Boolean(b) => write!(f, "{}", b),
            Scalar::Null => write!(f, "null"),
        }
    }
}

/// A single element of a decoded document.
///
/// Mappings keep the key order of the source document so that re-encoding a
/// subtree reproduces it in the order it was written. Lookups by key do not
/// depend on that order.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Unique string keys mapped to child nodes
    Mapping(IndexMap<String, Node>),
    /// Ordered children, 0-indexed
    Sequence(Vec<Node>),
    /// A leaf value
    Scalar(Scalar),
}

impl Node {
    /// Creates a string scalar node.
    pub fn string(s: impl Into<String>) -> Self {
        Node::Scalar(Scalar::String(s.into()))
    }

    /// Creates an integer scalar node.
    pub fn integer(i: i64) -> Self {
        Node::Scalar(Scalar::Integer(i))
    }

    /// Creates a float scalar node.
    pub fn float(f: f64) -> Self {
        Node::Scalar(Scalar::Float(f))
    }

    /// Creates a boolean scalar node.
    pub fn boolean(b: bool) -> Self {
        Node::Scalar(Scalar::Boolean(b))
    }

    /// Creates a null scalar node.
    pub fn null() -> Self {
        Node::Scalar(Scalar::Null)
    }

    /// Returns the name of this node's kind as used in diagnostics.
    ///
    /// Scalars report their concrete type rather than a generic "scalar".
    ///
    /// # Example
    ///
    /// ```
    /// use treepath::document::node::Node;
    ///
    /// assert_eq!(Node::string("vd").kind_name(), "string");
    /// assert_eq!(Node::integer(3).kind_name(), "int");
    /// assert_eq!(Node::Sequence(vec![]).kind_name(), "sequence");
    /// ```
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Mapping(_) => "map",
            Node::Sequence(_) => "sequence",
            Node::Scalar(scalar) => scalar.kind_name(),
        }
    }

    /// Returns true if this node is a leaf.
    pub fn is_scalar(&self) -> bool {
        matches!(self, Node::Scalar(_))
    }

    /// Returns the scalar string value, if this node is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Resolves a dotted path below this node.
    ///
    /// Shorthand for [`crate::path::resolve`].
    ///
    /// # Example
    ///
    /// ```
    /// use treepath::document::parser::parse_yaml;
    ///
    /// let root = parse_yaml("a:\n  b: [x, y]\n").unwrap();
    /// let found = root.get("a.b.1").unwrap();
    /// assert_eq!(found.and_then(|n| n.as_str()), Some("y"));
    /// ```
    pub fn get(&self, path: &str) -> Result<Option<&Node>, crate::path::ResolveError> {
        crate::path::resolve(self, path)
    }

    /// Encodes this node as a YAML document.
    pub fn to_yaml_string(&self) -> anyhow::Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Encodes this node as pretty-printed JSON.
    pub fn to_json_string(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Encodes this node as single-line JSON.
    pub fn to_compact_json(&self) -> String {
        // Serializing an in-memory tree to a String cannot fail: all keys are strings.
        serde_json::to_string(self).unwrap_or_else(|_| String::from("<unencodable>"))
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Mapping(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Node::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Node::Scalar(scalar) => scalar.serialize(serializer),
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::String(s) => serializer.serialize_str(s),
            Scalar::Integer(i) => serializer.serialize_i64(*i),
            Scalar::Float(f) => serializer.serialize_f64(*f),
            Scalar::Boolean(b) => serializer.serialize_bool(*b),
            Scalar::Null => serializer.serialize_unit(),
        }
    }
}

impl From<serde_json::Value> for Node {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(map) => Node::Mapping(
                map.into_iter()
                    .map(|(k, v)| (k, Node::from(v)))
                    .collect(),
            ),
            serde_json::Value::Array(items) => {
                Node::Sequence(items.into_iter().map(Node::from).collect())
            }
            serde_json::Value::String(s) => Node::string(s),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Node::integer(i),
                None => Node::float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::Bool(b) => Node::boolean(b),
            serde_json::Value::Null => Node::null(),
        }
    }
}
