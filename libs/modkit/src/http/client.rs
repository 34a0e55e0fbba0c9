//! Traced HTTP client.
//!
//! Wraps `reqwest::Client` so every outbound call runs inside an
//! `outgoing_http` span carrying method, URL, status and trace id, and
//! carries a `traceparent` header.

use crate::http::traceparent::TraceParent;
use tracing::{field::Empty, Instrument, Level};

#[derive(Clone)]
pub struct TracedClient {
    inner: reqwest::Client,
}

impl TracedClient {
    pub fn new(inner: reqwest::Client) -> Self {
        Self { inner }
    }

    /// Execute a built request inside an `outgoing_http` span.
    pub async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        let tp = TraceParent::generate();
        tp.inject(req.headers_mut());

        let span = tracing::span!(
            Level::INFO,
            "outgoing_http",
            http.method = %req.method(),
            http.url = %redacted_url(req.url()),
            http.status_code = Empty,
            trace_id = %tp.trace_id,
            otel.kind = "client",
            error = Empty,
        );

        async {
            let result = self.inner.execute(req).await;
            let current = tracing::Span::current();
            match &result {
                Ok(response) => {
                    current.record("http.status_code", response.status().as_u16());
                    if response.status().is_client_error() || response.status().is_server_error()
                    {
                        current.record("error", true);
                    }
                }
                Err(_) => {
                    current.record("error", true);
                }
            }
            result
        }
        .instrument(span)
        .await
    }

    /// Build and execute a request from a builder obtained via [`TracedClient::request`].
    pub async fn send(&self, builder: reqwest::RequestBuilder) -> reqwest::Result<reqwest::Response> {
        let req = builder.build()?;
        self.execute(req).await
    }

    /// Start a request builder on the underlying client.
    pub fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        self.inner.request(method, url)
    }

    pub fn inner(&self) -> &reqwest::Client {
        &self.inner
    }
}

/// URL without query string; queries may carry API keys.
fn redacted_url(url: &reqwest::Url) -> String {
    let mut shown = url.clone();
    shown.set_query(None);
    shown.to_string()
}

impl From<reqwest::Client> for TracedClient {
    fn from(c: reqwest::Client) -> Self {
        Self::new(c)
    }
}

impl Default for TracedClient {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}
