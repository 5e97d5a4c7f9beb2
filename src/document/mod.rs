//! Document model: the decoded tree, its parsers and structural diffing.

pub mod diff;
pub mod node;
pub mod parser;
