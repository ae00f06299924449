//! Custom error pages library.
//!
//! A default backend for ingress controllers: renders the error page matching
//! the `X-Code` status and `X-Format` media type sent by the proxy.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resolve;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use resolve::Resolver;
