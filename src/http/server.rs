//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the echo and health handlers
//! - Wire up middleware (tracing, request ID, timeout, forwarded host)
//! - Serve on a listener until the shutdown signal fires

use std::collections::BTreeMap;
use std::time::Duration;

use axum::{
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::http::forwarded_host::ForwardedHostLayer;
use crate::http::request::{request_id_of, UuidRequestId};
use crate::observability::metrics;

/// The request as the upstream would receive it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EchoedRequest {
    pub method: String,
    pub uri: String,
    pub headers: BTreeMap<String, String>,
}

/// HTTP server running the forwarder in front of an echo upstream.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    pub fn new(config: ServiceConfig) -> Self {
        let router = Self::build_router(&config);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig) -> Router {
        Router::new()
            .route("/healthz", get(health_handler))
            .route("/", any(echo_handler))
            .route("/{*path}", any(echo_handler))
            .layer(ForwardedHostLayer::new(config.forwarding.forwarder()))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
            .layer(middleware::from_fn(record_status))
            .layer(TraceLayer::new_for_http())
    }

    /// A clone of the fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Serve on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn echo_handler(request: Request) -> Json<EchoedRequest> {
    let headers = request
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();

    tracing::debug!(
        request_id = %request_id_of(&request),
        method = %request.method(),
        uri = %request.uri(),
        "Echoing request"
    );

    Json(EchoedRequest {
        method: request.method().to_string(),
        uri: request.uri().to_string(),
        headers,
    })
}

async fn health_handler() -> &'static str {
    "ok"
}

async fn record_status(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    metrics::record_http_request(response.status().as_u16());
    response
}
