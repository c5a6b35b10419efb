//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use host_forwarder::{HttpServer, ServiceConfig, Shutdown};
use tokio::net::TcpListener;

/// Start a server on an ephemeral port. Returns its address and the
/// shutdown handle that stops it.
#[allow(dead_code)]
pub async fn start_server(config: ServiceConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config);

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    (addr, shutdown)
}

/// A viewer-request event wrapping `headers`.
#[allow(dead_code)]
pub fn viewer_request(headers: serde_json::Value) -> String {
    serde_json::json!({
        "version": "1.0",
        "context": {"distributionId": "EDFDVBD6EXAMPLE", "eventType": "viewer-request"},
        "viewer": {"ip": "198.51.100.11"},
        "request": {
            "method": "GET",
            "uri": "/index.html",
            "querystring": {},
            "cookies": {},
            "headers": headers
        }
    })
    .to_string()
}
