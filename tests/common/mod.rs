//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::path::PathBuf;

use custom_error_pages::lifecycle::bootstrap;
use custom_error_pages::{HttpServer, ServerConfig, Shutdown};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Path of a file shipped with the crate.
pub fn fixture(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(relative)
}

/// Contents of a bundled error page.
#[allow(dead_code)]
pub fn page(name: &str) -> String {
    std::fs::read_to_string(fixture("www").join(name)).unwrap()
}

/// Configuration pointing at the bundled registry and pages.
pub fn bundled_config() -> ServerConfig {
    let mut config = ServerConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.responses.mime_types_path = fixture("etc/mime.types").display().to_string();
    config.responses.pages_dir = fixture("www").display().to_string();
    config
}

/// A server running on an ephemeral port.
#[allow(dead_code)]
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<Result<(), std::io::Error>>,
}

#[allow(dead_code)]
impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Bootstrap `config` and serve it in the background.
#[allow(dead_code)]
pub async fn start_server(config: ServerConfig) -> TestServer {
    let resolver = bootstrap(&config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, resolver);
    let server_shutdown = shutdown.subscribe();
    let handle = tokio::spawn(async move { server.run(listener, server_shutdown).await });

    TestServer {
        addr,
        shutdown,
        handle,
    }
}

/// HTTP client that ignores proxy environment variables.
#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
