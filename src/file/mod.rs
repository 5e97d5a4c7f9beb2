//! Document input: files, stdin and gzip-compressed variants of both.

pub mod loader;
