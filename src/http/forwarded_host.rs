//! Tower middleware that sets `X-Forwarded-Host` from `Host`.

use std::task::{Context, Poll};

use axum::http::Request;
use tower::{Layer, Service};

use crate::forwarder::HeaderForwarder;

/// Layer applying [`HeaderForwarder::forward_http`] to every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForwardedHostLayer {
    forwarder: HeaderForwarder,
}

impl ForwardedHostLayer {
    pub fn new(forwarder: HeaderForwarder) -> Self {
        Self { forwarder }
    }
}

impl<S> Layer<S> for ForwardedHostLayer {
    type Service = ForwardedHost<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ForwardedHost {
            inner,
            forwarder: self.forwarder,
        }
    }
}

/// Service produced by [`ForwardedHostLayer`].
#[derive(Debug, Clone)]
pub struct ForwardedHost<S> {
    inner: S,
    forwarder: HeaderForwarder,
}

impl<S, B> Service<Request<B>> for ForwardedHost<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<B>) -> Self::Future {
        self.forwarder.forward_http(request.headers_mut());
        self.inner.call(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;
    use tower::{service_fn, ServiceExt};

    async fn forwarded_host_of(request: Request<()>) -> Option<String> {
        let service = ForwardedHostLayer::default().layer(service_fn(|req: Request<()>| async move {
            Ok::<_, Infallible>(
                req.headers()
                    .get("x-forwarded-host")
                    .map(|v| v.to_str().unwrap().to_string()),
            )
        }));
        service.oneshot(request).await.unwrap()
    }

    #[tokio::test]
    async fn inner_service_sees_forwarded_host() {
        let request = Request::builder()
            .header("host", "example.com")
            .header("x-forwarded-host", "stale.com")
            .body(())
            .unwrap();
        assert_eq!(forwarded_host_of(request).await.as_deref(), Some("example.com"));
    }

    #[tokio::test]
    async fn passes_through_without_host() {
        let request = Request::builder().body(()).unwrap();
        assert_eq!(forwarded_host_of(request).await, None);
    }
}
