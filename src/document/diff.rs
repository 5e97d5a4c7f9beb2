//! Structural comparison of two document trees.
//!
//! Differences are reported at the deepest dotted path where the trees
//! disagree, so every reported path resolves against the tree(s) holding it.

use super::node::Node;
use crate::path::Path;
use std::fmt;

/// What changed at a path.
#[derive(Debug, Clone, PartialEq)]
pub enum DiffKind {
    /// Present only in the right tree
    Added(Node),
    /// Present only in the left tree
    Removed(Node),
    /// Present in both with different values or kinds
    Changed { left: Node, right: Node },
}

/// A single disagreement between two trees.
#[derive(Debug, Clone, PartialEq)]
pub struct Difference {
    pub path: Path,
    pub kind: DiffKind,
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() {
            "(root)".to_string()
        } else {
            self.path.to_string()
        };
        match &self.kind {
            DiffKind::Added(node) => write!(f, "+ {}: {}", path, node.to_compact_json()),
            DiffKind::Removed(node) => write!(f, "- {}: {}", path, node.to_compact_json()),
            DiffKind::Changed { left, right } => write!(
                f,
                "~ {}: {} -> {}",
                path,
                left.to_compact_json(),
                right.to_compact_json()
            ),
        }
    }
}

/// Compares two trees and returns every path at which they differ.
///
/// Mapping keys are visited in left order, then keys found only on the right.
/// Sequences are compared index by index.
///
/// # Example
///
/// ```
/// use treepath::document::diff::diff;
/// use treepath::document::parser::parse_yaml;
///
/// let left = parse_yaml("a: 1\nb: [x]\n").unwrap();
/// let right = parse_yaml("a: 2\nb: [x, y]\n").unwrap();
///
/// let lines: Vec<String> = diff(&left, &right).iter().map(|d| d.to_string()).collect();
/// assert_eq!(lines, vec!["~ a: 1 -> 2", "+ b.1: \"y\""]);
/// ```
pub fn diff(left: &Node, right: &Node) -> Vec<Difference> {
    diff_at(&Path::default(), Some(left), Some(right))
}

/// Compares the subtrees found at `base` in two documents.
///
/// A side where `base` does not exist counts as an omitted field: the whole
/// other side is reported as added or removed. Paths in the result are
/// prefixed with `base`.
pub fn diff_at(base: &Path, left: Option<&Node>, right: Option<&Node>) -> Vec<Difference> {
    match (left, right) {
        (Some(l), Some(r)) => {
            let mut out = Vec::new();
            let mut path = base.clone();
            walk(l, r, &mut path, &mut out);
            out
        }
        (Some(l), None) => vec![Difference {
            path: base.clone(),
            kind: DiffKind::Removed(l.clone()),
        }],
        (None, Some(r)) => vec![Difference {
            path: base.clone(),
            kind: DiffKind::Added(r.clone()),
        }],
        (None, None) => Vec::new(),
    }
}

fn walk(left: &Node, right: &Node, path: &mut Path, out: &mut Vec<Difference>) {
    match (left, right) {
        (Node::Mapping(l), Node::Mapping(r)) => {
            for (key, lchild) in l {
                path.push(key);
                match r.get(key) {
                    Some(rchild) => walk(lchild, rchild, path, out),
                    None => out.push(Difference {
                        path: path.clone(),
                        kind: DiffKind::Removed(lchild.clone()),
                    }),
                }
                path.pop();
            }
            for (key, rchild) in r.iter().filter(|(k, _)| !l.contains_key(*k)) {
                path.push(key);
                out.push(Difference {
                    path: path.clone(),
                    kind: DiffKind::Added(rchild.clone()),
                });
                path.pop();
            }
        }
        (Node::Sequence(l), Node::Sequence(r)) => {
            for idx in 0..l.len().max(r.len()) {
                path.push(&idx.to_string());
                match (l.get(idx), r.get(idx)) {
                    (Some(lchild), Some(rchild)) => walk(lchild, rchild, path, out),
                    (Some(lchild), None) => out.push(Difference {
                        path: path.clone(),
                        kind: DiffKind::Removed(lchild.clone()),
                    }),
                    (None, Some(rchild)) => out.push(Difference {
                        path: path.clone(),
                        kind: DiffKind::Added(rchild.clone()),
                    }),
                    (None, None) => {}
                }
                path.pop();
            }
        }
        _ => {
            if left != right {
                out.push(Difference {
                    path: path.clone(),
                    kind: DiffKind::Changed {
                        left: left.clone(),
                        right: right.clone(),
                    },
                });
            }
        }
    }
}
