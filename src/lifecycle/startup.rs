//! Startup orchestration.
//!
//! # Responsibilities
//! - Load the media type registry and the error pages
//! - Parse the status remap
//! - Pre-resolve the default format's extension
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Runs to completion before the listener is bound, so no request is
//!   resolved against partially loaded tables

use std::path::Path;

use thiserror::Error;

use crate::config::ServerConfig;
use crate::resolve::{
    CorpusError, RegistryError, RemapError, ResolverError, Resolver, ResponseCorpus, StatusRemap,
    TypeTable,
};

/// Fatal misconfiguration detected before serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Corpus(#[from] CorpusError),

    #[error(transparent)]
    Remap(#[from] RemapError),

    #[error(transparent)]
    Resolver(#[from] ResolverError),
}

/// Build the resolver from the configured sources.
pub fn bootstrap(config: &ServerConfig) -> Result<Resolver, StartupError> {
    let responses = &config.responses;

    let types = TypeTable::load(Path::new(&responses.mime_types_path))?;
    let corpus = ResponseCorpus::load(Path::new(&responses.pages_dir))?;
    let remap = StatusRemap::parse(&responses.status_code_mapping)?;
    if !remap.is_empty() {
        tracing::info!(
            mapping = %responses.status_code_mapping,
            entries = remap.len(),
            "Status code mapping loaded"
        );
    }

    let resolver = Resolver::new(types, corpus, remap, responses.default_format.as_str())?;
    tracing::info!(
        default_format = %resolver.default_format(),
        default_extension = %resolver.default_extension(),
        "Error page resolver ready"
    );
    Ok(resolver)
}
