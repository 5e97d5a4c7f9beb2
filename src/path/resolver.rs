//! Walks a tree one segment at a time.
//!
//! The kind of the current node picks the lookup: mappings are keyed by the
//! segment text, sequences take numeric segments as indices, and scalars end
//! the walk with an error. The first missing child stops the walk as not found.

use super::ast::{Path, Segment};
use super::error::ResolveError;
use super::parser::parse_path;
use crate::document::node::Node;

/// Resolves paths against one borrowed tree.
///
/// Holds nothing but the root reference, so it is `Copy` and can be shared
/// freely between threads that read the same tree.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    root: &'a Node,
}

impl<'a> Resolver<'a> {
    /// Wraps a root node; the tree is only ever read.
    pub fn new(root: &'a Node) -> Self {
        Resolver { root }
    }

    /// Parses and resolves a dotted path string.
    pub fn resolve(&self, path: &str) -> Result<Option<&'a Node>, ResolveError> {
        self.resolve_path(&parse_path(path))
    }

    /// Walks the tree one segment at a time.
    ///
    /// Returns `Ok(None)` at the first missing key or out-of-range index, and
    /// an error at the first segment that cannot apply to the node it reached.
    /// Remaining segments are not looked at in either case.
    pub fn resolve_path(&self, path: &Path) -> Result<Option<&'a Node>, ResolveError> {
        let mut current = self.root;

        for (position, segment) in path.segments.iter().enumerate() {
            match step(current, segment, position)? {
                Some(next) => current = next,
                None => {
                    tracing::trace!(%path, segment = %segment, position, "path not found");
                    return Ok(None);
                }
            }
        }

        Ok(Some(current))
    }
}

/// Applies one segment to one node, choosing the lookup by the node's kind.
fn step<'a>(
    node: &'a Node,
    segment: &Segment,
    position: usize,
) -> Result<Option<&'a Node>, ResolveError> {
    match node {
        Node::Mapping(entries) => Ok(entries.get(segment.as_str())),
        Node::Sequence(items) => {
            if !segment.is_numeric() {
                return Err(ResolveError::NonNumericIndex {
                    segment: segment.as_str().to_string(),
                    position,
                });
            }
            Ok(segment.index().and_then(|idx| items.get(idx)))
        }
        Node::Scalar(scalar) => Err(ResolveError::UnsupportedType {
            segment: segment.as_str().to_string(),
            position,
            kind: scalar.kind_name(),
        }),
    }
}

/// Resolves a dotted path against `root`.
///
/// * `Ok(Some(node))` - every segment matched; `node` is the subtree reached.
/// * `Ok(None)` - a key or index along the way does not exist.
/// * `Err(_)` - a segment tried to descend into a scalar, or a non-numeric
///   segment was applied to a sequence.
///
/// The empty path resolves to `root` itself.
///
/// # Example
///
/// ```
/// use treepath::document::parser::parse_yaml;
/// use treepath::path::resolve;
///
/// let root = parse_yaml("c:\n  d: vd\ng:\n  h:\n  - i: vi\n").unwrap();
///
/// assert_eq!(resolve(&root, "g.h.0.i").unwrap().and_then(|n| n.as_str()), Some("vi"));
/// assert_eq!(resolve(&root, "g.h.5").unwrap(), None);
///
/// let err = resolve(&root, "c.d.e").unwrap_err();
/// assert_eq!(err.to_string(), "resolve: path e, unsupported type string");
/// ```
pub fn resolve<'a>(root: &'a Node, path: &str) -> Result<Option<&'a Node>, ResolveError> {
    Resolver::new(root).resolve(path)
}

/// Same as [`resolve`] for an already-parsed path.
pub fn resolve_path<'a>(root: &'a Node, path: &Path) -> Result<Option<&'a Node>, ResolveError> {
    Resolver::new(root).resolve_path(path)
}
