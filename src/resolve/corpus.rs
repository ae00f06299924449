//! Response body corpus.
//!
//! Every regular file in the pages directory is kept in memory under its bare
//! file name (`404.html`, `5xx.json`, ...). Lookups are exact and
//! case-sensitive; bodies are shared `Bytes` so concurrent requests never copy.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use thiserror::Error;

/// Errors raised while loading the corpus.
#[derive(Debug, Error)]
#[error("failed to load error pages from {}: {source}", path.display())]
pub struct CorpusError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Immutable map of file name to response body.
#[derive(Debug, Clone, Default)]
pub struct ResponseCorpus {
    pages: HashMap<String, Bytes>,
}

impl ResponseCorpus {
    /// Read every file of `dir` into memory.
    pub fn load(dir: &Path) -> Result<Self, CorpusError> {
        let mut pages = HashMap::new();
        for entry in fs::read_dir(dir).map_err(io_err(dir))? {
            let entry = entry.map_err(io_err(dir))?;
            let path = entry.path();

            // Follows symlinks.
            if fs::metadata(&path).map_err(io_err(path.as_path()))?.is_dir() {
                continue;
            }

            let Ok(name) = entry.file_name().into_string() else {
                tracing::warn!(path = %path.display(), "Skipping error page with non UTF-8 name");
                continue;
            };

            let body = fs::read(&path).map_err(io_err(path.as_path()))?;
            tracing::debug!(page = %name, bytes = body.len(), "Error page loaded");
            pages.insert(name, Bytes::from(body));
        }

        tracing::info!(dir = %dir.display(), pages = pages.len(), "Error pages loaded");
        Ok(Self { pages })
    }

    /// Build a corpus from `(file name, body)` pairs.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Bytes>,
    {
        let pages = entries
            .into_iter()
            .map(|(name, body)| (name.into(), body.into()))
            .collect();
        Self { pages }
    }

    /// Body stored under exactly `key`.
    pub fn lookup(&self, key: &str) -> Option<&Bytes> {
        self.pages.get(key)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> CorpusError {
    let path = path.to_path_buf();
    move |source| CorpusError { path, source }
}
