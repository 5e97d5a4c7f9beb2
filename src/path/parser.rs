//! Dotted path string parser.

use super::ast::{Path, Segment};

/// Splits a path string on `.` into segments.
///
/// Empty pieces from leading, trailing or repeated dots are dropped, so the
/// result only holds non-empty segments and parsing never fails. There is no
/// escape for a literal `.` inside a key.
///
/// # Example
///
/// ```
/// use treepath::path::parse_path;
///
/// let path = parse_path("g.h.0");
/// assert_eq!(path.len(), 3);
/// assert!(path.segments[2].is_numeric());
///
/// assert!(parse_path("").is_empty());
/// assert_eq!(parse_path(".a..b.").to_string(), "a.b");
/// ```
pub fn parse_path(input: &str) -> Path {
    let segments = input
        .trim()
        .split('.')
        .filter(|piece| !piece.is_empty())
        .map(Segment::new)
        .collect();
    Path::new(segments)
}

impl std::str::FromStr for Path {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(parse_path(s))
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        parse_path(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_segment() {
        let path = parse_path("c");
        assert_eq!(path.segments, vec![Segment::new("c")]);
    }

    #[test]
    fn test_parse_keeps_order() {
        let path = parse_path("g.h.0.k");
        let texts: Vec<&str> = path.segments.iter().map(Segment::as_str).collect();
        assert_eq!(texts, vec!["g", "h", "0", "k"]);
    }

    #[test]
    fn test_parse_flags_numeric_segments() {
        let path = parse_path("g.h.0.k");
        let flags: Vec<bool> = path.segments.iter().map(Segment::is_numeric).collect();
        assert_eq!(flags, vec![false, false, true, false]);
    }

    #[test]
    fn test_parse_empty_and_whitespace() {
        assert!(parse_path("").is_empty());
        assert!(parse_path("   ").is_empty());
        assert!(parse_path("...").is_empty());
    }

    #[test]
    fn test_parse_drops_empty_pieces() {
        assert_eq!(parse_path("a..b"), parse_path("a.b"));
        assert_eq!(parse_path(".a.b."), parse_path("a.b"));
    }

    #[test]
    fn test_parse_keeps_inner_whitespace() {
        let path = parse_path(" my key.x ");
        assert_eq!(path.segments[0].as_str(), "my key");
        assert_eq!(path.segments[1].as_str(), "x");
    }

    #[test]
    fn test_from_str() {
        let path: Path = "a.1".parse().unwrap();
        assert_eq!(path.to_string(), "a.1");
    }
}
