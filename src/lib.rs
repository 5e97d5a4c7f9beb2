//! treepath - resolve dotted paths such as `g.h.0.k` against YAML and JSON
//! documents.
//!
//! ```
//! use treepath::document::parser::parse_yaml;
//! use treepath::path::resolve;
//!
//! let root = parse_yaml("g:\n  h:\n  - k: {l: 1}\n").unwrap();
//! let found = resolve(&root, "g.h.0.k").unwrap().unwrap();
//! assert_eq!(found.to_compact_json(), r#"{"l":1}"#);
//! ```

pub mod config;
pub mod document;
pub mod file;
pub mod path;
pub mod session;
