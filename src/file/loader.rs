//! Document loading.
//!
//! This module reads documents from files or stdin and decodes them into
//! `Node` trees. Gzip input is decompressed transparently: files by their
//! `.gz` suffix, stdin by its magic bytes.

use crate::document::node::Node;
use crate::document::parser::{parse_documents, Format};
use anyhow::{bail, Context, Result};
use std::fmt;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Gzip magic bytes.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Where a document comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Source {
    File(PathBuf),
    Stdin,
}

impl Source {
    /// Interprets a command-line argument; `-` means stdin.
    ///
    /// # Example
    ///
    /// ```
    /// use treepath::file::loader::Source;
    /// use std::path::PathBuf;
    ///
    /// assert_eq!(Source::from_arg("-"), Source::Stdin);
    /// assert_eq!(Source::from_arg("a.yaml"), Source::File(PathBuf::from("a.yaml")));
    /// ```
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            Source::Stdin
        } else {
            Source::File(PathBuf::from(arg))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::File(path) => write!(f, "{}", path.display()),
            Source::Stdin => write!(f, "<stdin>"),
        }
    }
}

/// Options controlling how input is read and decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Forced format; detected from the file name (or content for stdin) when `None`
    pub format: Option<Format>,
    /// Inputs larger than this, after decompression, are rejected
    pub max_input_bytes: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            format: None,
            max_input_bytes: crate::config::DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

/// Loads every document from a source.
pub fn load_source(source: &Source, options: &LoadOptions) -> Result<Vec<Node>> {
    match source {
        Source::File(path) => load_file(path, options),
        Source::Stdin => load_stdin(options),
    }
}

/// Loads and parses a document file.
///
/// # Errors
///
/// This function will return an error if:
/// - The file cannot be opened or read
/// - A `.gz` file is not valid gzip
/// - The content exceeds `max_input_bytes`
/// - The content is not valid UTF-8 or not valid YAML/JSON
pub fn load_file<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<Vec<Node>> {
    let path_ref = path.as_ref();
    tracing::debug!(path = %path_ref.display(), "loading document file");

    let is_gzipped = path_ref
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let file = fs::File::open(path_ref)
        .with_context(|| format!("Failed to open {}", path_ref.display()))?;

    let bytes = if is_gzipped {
        let decoder = flate2::read::GzDecoder::new(file);
        read_limited(decoder, options.max_input_bytes)
            .context("Failed to decompress gzipped file - file may be corrupted")?
    } else {
        read_limited(file, options.max_input_bytes)
            .with_context(|| format!("Failed to read {}", path_ref.display()))?
    };

    let content = String::from_utf8(bytes).context("File is not valid UTF-8")?;
    let format = options.format.unwrap_or_else(|| Format::from_path(path_ref));

    parse_documents(&content, format)
        .with_context(|| format!("Failed to parse {}", path_ref.display()))
}

/// Loads and parses documents from standard input.
pub fn load_stdin(options: &LoadOptions) -> Result<Vec<Node>> {
    tracing::debug!("loading document from stdin");
    let bytes = read_limited(std::io::stdin().lock(), options.max_input_bytes)
        .context("Failed to read from stdin")?;
    load_bytes(bytes, options)
}

/// Decodes raw input bytes, as read from stdin.
///
/// Gzip is detected by its magic bytes. Without a forced format the content
/// is tried as JSON first, then as YAML.
pub fn load_bytes(bytes: Vec<u8>, options: &LoadOptions) -> Result<Vec<Node>> {
    let bytes = if bytes.starts_with(&GZIP_MAGIC) {
        let decoder = flate2::read::GzDecoder::new(bytes.as_slice());
        read_limited(decoder, options.max_input_bytes).context("Failed to decompress gzipped input")?
    } else {
        bytes
    };

    let content = String::from_utf8(bytes).context("Input is not valid UTF-8")?;

    match options.format {
        Some(format) => parse_documents(&content, format),
        None => match parse_documents(&content, Format::Json) {
            Ok(docs) => Ok(docs),
            Err(_) => parse_documents(&content, Format::Yaml)
                .context("Input is neither valid JSON nor valid YAML"),
        },
    }
}

/// Reads at most `limit` bytes, failing if the reader holds more.
fn read_limited<R: Read>(reader: R, limit: usize) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let cap = u64::try_from(limit).unwrap_or(u64::MAX).saturating_add(1);
    reader.take(cap).read_to_end(&mut buffer)?;

    if buffer.len() > limit {
        bail!("Input exceeds the maximum size of {} bytes", limit);
    }
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn gzip(content: &str) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(content.as_bytes()).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_read_limited_within_limit() {
        let data = read_limited(&b"hello"[..], 5).unwrap();
        assert_eq!(data, b"hello");
    }

    #[test]
    fn test_read_limited_over_limit() {
        let err = read_limited(&b"hello!"[..], 5).unwrap_err();
        assert!(err.to_string().contains("maximum size"));
    }

    #[test]
    fn test_load_bytes_prefers_json() {
        let docs = load_bytes(br#"{"a": 1}"#.to_vec(), &LoadOptions::default()).unwrap();
        assert_eq!(docs.len(), 1);
        assert!(matches!(docs[0], Node::Mapping(_)));
    }

    #[test]
    fn test_load_bytes_falls_back_to_yaml() {
        let docs = load_bytes(b"a: 1\n---\nb: 2\n".to_vec(), &LoadOptions::default()).unwrap();
        assert_eq!(docs.len(), 2);
    }

    #[test]
    fn test_load_bytes_gzip_magic() {
        let docs = load_bytes(gzip("a: [1, 2]\n"), &LoadOptions::default()).unwrap();
        assert_eq!(docs[0].get("a.1").unwrap(), Some(&Node::integer(2)));
    }

    #[test]
    fn test_load_bytes_forced_json_rejects_yaml() {
        let options = LoadOptions {
            format: Some(Format::Json),
            ..LoadOptions::default()
        };
        assert!(load_bytes(b"a: 1\n".to_vec(), &options).is_err());
    }

    #[test]
    fn test_load_bytes_invalid_utf8() {
        let err = load_bytes(vec![0xff, 0xfe, 0x00], &LoadOptions::default()).unwrap_err();
        assert!(err.to_string().contains("UTF-8"));
    }

    #[test]
    fn test_source_display() {
        assert_eq!(Source::Stdin.to_string(), "<stdin>");
        assert_eq!(Source::from_arg("x/y.yaml").to_string(), "x/y.yaml");
    }
}
