//! Per-invocation context.
//!
//! A `Session` is built once from a [`Config`] and passed to every command
//! that needs documents. It loads each source on first use and keeps the
//! decoded documents until the session is closed or dropped, so a source is
//! read at most once (which matters for stdin).

use crate::config::Config;
use crate::document::node::Node;
use crate::file::loader::{load_source, LoadOptions, Source};
use crate::path::{resolve, ResolveError};
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Outcome of resolving a path inside a session document.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Found(Node),
    NotFound,
    Invalid(ResolveError),
}

impl Lookup {
    /// True only for `Found`; `Invalid` is not found either.
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    /// The found subtree, if any.
    pub fn node(&self) -> Option<&Node> {
        match self {
            Lookup::Found(node) => Some(node),
            _ => None,
        }
    }
}

/// Owns the configuration and every document loaded through it.
pub struct Session {
    config: Config,
    load_options: LoadOptions,
    documents: Mutex<HashMap<Source, Vec<Arc<Node>>>>,
}

impl Session {
    /// Creates an empty session whose load options come from `config`.
    pub fn new(config: Config) -> Self {
        let load_options = config.load_options();
        Self {
            config,
            load_options,
            documents: Mutex::new(HashMap::new()),
        }
    }

    /// Overrides how sources are decoded. Only affects sources not yet loaded.
    pub fn with_load_options(mut self, load_options: LoadOptions) -> Self {
        self.load_options = load_options;
        self
    }

    /// The configuration this session was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Registers already-decoded documents for a source.
    pub fn insert(&self, source: Source, documents: Vec<Node>) -> Result<()> {
        let mut cache = self.lock()?;
        cache.insert(source, documents.into_iter().map(Arc::new).collect());
        Ok(())
    }

    /// Returns document `index` of a source, loading the source if needed.
    pub fn document(&self, source: &Source, index: usize) -> Result<Arc<Node>> {
        let mut cache = self.lock()?;

        if !cache.contains_key(source) {
            let docs = load_source(source, &self.load_options)?;
            tracing::debug!(%source, documents = docs.len(), "cached source");
            cache.insert(source.clone(), docs.into_iter().map(Arc::new).collect());
        }

        let docs = cache
            .get(source)
            .ok_or_else(|| anyhow!("{} vanished from the session cache", source))?;

        docs.get(index).cloned().ok_or_else(|| {
            anyhow!(
                "{} has {} document(s); document {} does not exist",
                source,
                docs.len(),
                index
            )
        })
    }

    /// Resolves `path` in document `index` of a source.
    ///
    /// Load failures are errors; not found and structural mismatches are
    /// reported through [`Lookup`].
    pub fn resolve(&self, source: &Source, index: usize, path: &str) -> Result<Lookup> {
        let document = self.document(source, index)?;
        let lookup = match resolve(&document, path) {
            Ok(Some(node)) => Lookup::Found(node.clone()),
            Ok(None) => Lookup::NotFound,
            Err(err) => Lookup::Invalid(err),
        };
        Ok(lookup)
    }

    /// Number of sources currently held.
    pub fn cached_sources(&self) -> usize {
        self.documents
            .lock()
            .map(|cache| cache.len())
            .unwrap_or_default()
    }

    /// Releases every cached document.
    pub fn close(&self) {
        let mut cache = match self.documents.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if !cache.is_empty() {
            tracing::debug!(sources = cache.len(), "releasing session documents");
        }
        cache.clear();
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<Source, Vec<Arc<Node>>>>> {
        self.documents
            .lock()
            .map_err(|_| anyhow!("session document cache is poisoned"))
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.close();
    }
}
