//! Outbound payload delivery
//!
//! Best-effort push to the observability backend. Success and failure are
//! both terminal for a payload: no retry, no backoff, no queue. Sums are
//! cumulative, so a dropped payload only delays visibility; it never loses
//! a delta.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use tracing::{trace, warn};

use crate::error::TelemetryError;

/// Where and how to deliver a payload
#[derive(Debug, Clone)]
pub struct Endpoint {
    /// Backend URL
    pub url: String,
    /// Bearer credential
    pub api_key: String,
    /// Content type of the payload body
    pub content_type: &'static str,
}

/// Delivery seam, implemented by the HTTP client in production and by mocks
/// in tests
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Attempt one delivery of `body` to `endpoint`
    async fn push(&self, endpoint: &Endpoint, body: String) -> Result<(), TelemetryError>;
}

/// HTTPS POST transport with a bounded request timeout
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport whose every request is bounded by `timeout`
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn push(&self, endpoint: &Endpoint, body: String) -> Result<(), TelemetryError> {
        let response = self
            .client
            .post(&endpoint.url)
            .header(CONTENT_TYPE, endpoint.content_type)
            .header(AUTHORIZATION, format!("Bearer {}", endpoint.api_key))
            .body(body)
            .send()
            .await
            .map_err(|err| TelemetryError::Network(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            // Keep the backend's response body for diagnosis
            let body = response.text().await.unwrap_or_default();
            Err(TelemetryError::Rejected {
                status: status.as_u16(),
                body,
            })
        }
    }
}

/// Fire-and-forget payload delivery to one endpoint.
///
/// Cheap to clone; every component that exports shares the transport through
/// an `Arc`.
#[derive(Clone)]
pub struct Exporter {
    transport: Arc<dyn Transport>,
    endpoint: Endpoint,
    /// Which stream this exporter serves ("metrics" or "logs"), for log lines
    stream: &'static str,
}

impl Exporter {
    /// Create an exporter over any transport
    pub fn new(transport: Arc<dyn Transport>, endpoint: Endpoint, stream: &'static str) -> Self {
        Self {
            transport,
            endpoint,
            stream,
        }
    }

    /// Create an exporter over the HTTP transport
    pub fn over_http(endpoint: Endpoint, timeout: Duration, stream: &'static str) -> Self {
        Self::new(Arc::new(HttpTransport::new(timeout)), endpoint, stream)
    }

    /// Attempt one delivery. The outcome is terminal either way and is
    /// logged here; the returned error is informational only.
    ///
    /// The log line distinguishes "never sent" (transport failure) from
    /// "sent but rejected" (non-success response).
    pub async fn push(&self, body: String) -> Result<(), TelemetryError> {
        match self.transport.push(&self.endpoint, body).await {
            Ok(()) => {
                trace!(stream = self.stream, "payload delivered");
                Ok(())
            }
            Err(TelemetryError::Rejected { status, body }) => {
                warn!(
                    stream = self.stream,
                    status,
                    response = %body,
                    "payload sent but rejected by backend"
                );
                Err(TelemetryError::Rejected { status, body })
            }
            Err(err) => {
                warn!(stream = self.stream, error = %err, "payload never sent");
                Err(err)
            }
        }
    }

    /// Deliver without waiting: spawn the push and return immediately.
    ///
    /// The outcome is not awaited by anything else in the system; an
    /// in-flight push is not cancelled on shutdown.
    pub fn send(&self, body: String) {
        let exporter = self.clone();
        tokio::spawn(async move {
            let _ = exporter.push(body).await;
        });
    }
}
