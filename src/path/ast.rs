//! Segment and path types for dotted path expressions.

use std::fmt;

/// One `.`-delimited token of a path expression.
///
/// A segment only records whether its text is all ASCII digits. Whether it is
/// used as a key or an index is decided later by the kind of node it is
/// applied to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Segment {
    text: String,
    numeric: bool,
}

impl Segment {
    /// Creates a segment from its text.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let numeric = !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit());
        Self { text, numeric }
    }

    /// Returns the segment text exactly as written.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns true if the segment is made only of ASCII digits.
    pub fn is_numeric(&self) -> bool {
        self.numeric
    }

    /// Returns the sequence index this segment denotes.
    ///
    /// `None` for non-numeric segments and for numbers too large for `usize`,
    /// which can never be in range.
    pub fn index(&self) -> Option<usize> {
        if self.numeric {
            self.text.parse().ok()
        } else {
            None
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A parsed path: segments in the order they are applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path {
    /// Segments that make up the path.
    pub segments: Vec<Segment>,
}

impl Path {
    /// Creates a new path with the given segments.
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Returns true for the path addressing the root itself.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Appends a segment.
    pub fn push(&mut self, text: &str) {
        self.segments.push(Segment::new(text));
    }

    /// Removes the last segment.
    pub fn pop(&mut self) -> Option<Segment> {
        self.segments.pop()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}
