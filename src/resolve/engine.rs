//! Error page resolution.
//!
//! # Algorithm
//! ```text
//! requested format ──(empty)──▶ default format
//!        │
//!        ▼
//! TypeTable::extension_for ──(invalid or unregistered)──▶ default format + default extension
//!        │
//!        ▼
//! normalize extension (htm → html)
//!
//! status header ──(not an integer)──▶ 404
//!        │
//!        ▼
//! StatusRemap::apply
//!        │
//!        ▼
//! candidates: "{status}.{ext}", "{status / 100}xx.{ext}"  → first hit wins, else not found
//! ```
//!
//! # Design Decisions
//! - The reported content type and the lookup extension are kept apart: the
//!   content type always names the format that was chosen
//! - The remap runs after the status fallback, so a rule keyed on 404 also
//!   applies to unparseable status headers
//! - A corpus miss is an outcome, not an error

use bytes::Bytes;
use thiserror::Error;

use super::corpus::ResponseCorpus;
use super::mime_types::TypeTable;
use super::remap::StatusRemap;

/// Status used when the status header is missing or not an integer.
pub const FALLBACK_STATUS: i64 = 404;

/// Errors raised while building a resolver.
#[derive(Debug, Error)]
pub enum ResolverError {
    /// The default format does not map to an extension.
    #[error("couldn't get file extension for default format: {format:?}")]
    DefaultFormat { format: String },
}

/// A page selected from the corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Corpus key that matched.
    pub key: String,
    pub body: Bytes,
}

/// Result of resolving one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Status after parse fallback and remap.
    pub status: i64,
    /// Format string to report as `Content-Type`.
    pub content_type: String,
    /// Extension used for corpus lookup.
    pub extension: String,
    /// `None` when neither candidate key exists.
    pub page: Option<Page>,
}

/// Resolves status and format to an error page. Shared read-only by every
/// request once startup has built it.
#[derive(Debug)]
pub struct Resolver {
    types: TypeTable,
    corpus: ResponseCorpus,
    remap: StatusRemap,
    default_format: String,
    default_extension: String,
}

impl Resolver {
    /// Build a resolver, pre-resolving the extension of `default_format`.
    pub fn new(
        types: TypeTable,
        corpus: ResponseCorpus,
        remap: StatusRemap,
        default_format: impl Into<String>,
    ) -> Result<Self, ResolverError> {
        let default_format = default_format.into();
        let default_extension = match types.extension_for(&default_format) {
            Ok(ext) if !ext.is_empty() => normalize_extension(ext).to_string(),
            _ => return Err(ResolverError::DefaultFormat { format: default_format }),
        };

        tracing::debug!(
            format = %default_format,
            extension = %default_extension,
            "Default format resolved"
        );

        Ok(Self {
            types,
            corpus,
            remap,
            default_format,
            default_extension,
        })
    }

    pub fn default_format(&self) -> &str {
        &self.default_format
    }

    pub fn default_extension(&self) -> &str {
        &self.default_extension
    }

    /// Resolve the raw `X-Format` and `X-Code` header values.
    pub fn resolve(&self, requested_format: &str, raw_status: &str) -> Resolution {
        let (content_type, extension) = self.negotiate(requested_format);
        let status = self.status(raw_status);

        let page = candidate_keys(status, &extension)
            .into_iter()
            .find_map(|key| match self.corpus.lookup(&key) {
                Some(body) => Some(Page {
                    key,
                    body: body.clone(),
                }),
                None => {
                    tracing::debug!(page = %key, "Error page not found, falling back");
                    None
                }
            });

        if page.is_none() {
            tracing::info!(status, extension = %extension, "No error page found for status class");
        }

        Resolution {
            status,
            content_type,
            extension,
            page,
        }
    }

    /// Pick the content type and lookup extension.
    fn negotiate(&self, requested_format: &str) -> (String, String) {
        let format = if requested_format.is_empty() {
            tracing::debug!(format = %self.default_format, "Format not specified, using default");
            self.default_format.as_str()
        } else {
            requested_format
        };

        match self.types.extension_for(format) {
            Ok(ext) if !ext.is_empty() => {
                (format.to_string(), normalize_extension(ext).to_string())
            }
            Ok(_) => {
                tracing::debug!(
                    format = %format,
                    extension = %self.default_extension,
                    "No extension registered for format, using default"
                );
                crate::observability::metrics::record_fallback("format");
                self.default_pair()
            }
            Err(e) => {
                tracing::debug!(
                    error = %e,
                    extension = %self.default_extension,
                    "Unreadable format, using default"
                );
                crate::observability::metrics::record_fallback("format");
                self.default_pair()
            }
        }
    }

    fn default_pair(&self) -> (String, String) {
        (self.default_format.clone(), self.default_extension.clone())
    }

    /// Parse the status header, then apply the remap.
    fn status(&self, raw_status: &str) -> i64 {
        let status = match raw_status.parse::<i64>() {
            Ok(status) => status,
            Err(e) => {
                tracing::warn!(
                    value = %raw_status,
                    error = %e,
                    status = FALLBACK_STATUS,
                    "Unexpected status code header, using fallback"
                );
                crate::observability::metrics::record_fallback("status");
                FALLBACK_STATUS
            }
        };

        let mapped = self.remap.apply(status);
        if mapped != status {
            tracing::info!(from = status, to = mapped, "Mapping status code");
        }
        mapped
    }
}

/// Lookup keys in priority order.
fn candidate_keys(status: i64, extension: &str) -> [String; 2] {
    [
        format!("{status}.{extension}"),
        format!("{}xx.{extension}", status / 100),
    ]
}

/// Historical alias kept for older page sets.
fn normalize_extension(ext: &str) -> &str {
    match ext {
        "htm" => "html",
        other => other,
    }
}
