//! Error page resolution subsystem.
//!
//! # Data Flow
//! ```text
//! startup:
//!     etc/mime.types → mime_types.rs → TypeTable
//!     www/*          → corpus.rs     → ResponseCorpus
//!     STATUS_CODE_MAPPING → remap.rs → StatusRemap
//!     → engine.rs (Resolver, default extension pre-resolved)
//!     → shared via Arc with every request handler
//!
//! per request:
//!     X-Format, X-Code → Resolver::resolve → Resolution
//! ```
//!
//! # Design Decisions
//! - All tables are immutable after startup; no locks at request time
//! - Every per-request fallback is a one-shot decision, never a retry

pub mod corpus;
pub mod engine;
pub mod mime_types;
pub mod remap;

pub use corpus::{CorpusError, ResponseCorpus};
pub use engine::{Page, Resolution, Resolver, ResolverError, FALLBACK_STATUS};
pub use mime_types::{MediaTypeError, RegistryError, TypeTable};
pub use remap::{RemapError, StatusRemap};
