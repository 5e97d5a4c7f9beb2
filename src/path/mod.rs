//! Dotted path parsing and resolution.
//!
//! A path such as `g.h.0.k` is split on `.` into segments and applied to a
//! [`Node`](crate::document::node::Node) tree left to right. Each step picks
//! its lookup from the kind of node it reaches:
//!
//! - mapping: the segment text is a key, whatever it looks like
//! - sequence: the segment must be all digits and is used as an index
//! - scalar: nothing to descend into, which is an error
//!
//! Missing keys and out-of-range indices resolve to `Ok(None)`. Only a
//! segment that cannot apply to the node it reached produces a
//! [`ResolveError`].
//!
//! # Examples
//!
//! ```
//! // c          - the mapping under key "c"
//! // g.h.0      - first element of the sequence at g.h
//! // g.h.0.k.l  - mixed key and index steps
//! // ""         - the root itself
//! ```

pub mod ast;
pub mod error;
pub mod parser;
pub mod resolver;

pub use ast::{Path, Segment};
pub use error::ResolveError;
pub use parser::parse_path;
pub use resolver::{resolve, resolve_path, Resolver};
