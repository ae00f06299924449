//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (from the ingress default-backend hook)
//!     → server.rs (Axum setup, trace + timeout layers)
//!     → handler.rs
//!         liveness path → 200, empty body
//!         anything else → headers.rs (X-Format, X-Code, debug echo)
//!                       → resolve::Resolver
//!                       → page body with resolved status, or bare 404
//! ```

pub mod handler;
pub mod headers;
pub mod server;

pub use server::{AppState, HttpServer};
