//! Correlation IDs for tying log lines to one processing run.
//!
//! A [`RunContext`] is created per batch run or per HTTP request and passed
//! explicitly to the code doing the work. Its span carries the ID into every
//! log line emitted inside it.

use axum::{
    body::Body,
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::{Instrument, Span};
use uuid::Uuid;

/// Header name for the correlation ID.
pub static CORRELATION_ID_HEADER: HeaderName = HeaderName::from_static("x-correlation-id");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    correlation_id: Uuid,
}

impl RunContext {
    /// A context with a freshly generated correlation ID.
    pub fn new() -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
        }
    }

    pub fn with_correlation_id(correlation_id: Uuid) -> Self {
        Self { correlation_id }
    }

    /// Parse a header value; anything that is not a UUID is rejected.
    pub fn from_header(value: &str) -> Option<Self> {
        Uuid::parse_str(value.trim())
            .ok()
            .map(Self::with_correlation_id)
    }

    pub fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    pub fn span(&self) -> Span {
        tracing::info_span!("run", correlation_id = %self.correlation_id)
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Middleware that attaches a [`RunContext`] to the request and echoes its ID.
pub async fn correlation_middleware(mut request: Request, next: Next) -> Response<Body> {
    // Reuse a valid client supplied ID, otherwise generate one
    let ctx = request
        .headers()
        .get(&CORRELATION_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(RunContext::from_header)
        .unwrap_or_default();

    let span = tracing::info_span!(
        "request",
        correlation_id = %ctx.correlation_id(),
        method = %request.method(),
        uri = %request.uri(),
    );

    let header_value = HeaderValue::from_str(&ctx.correlation_id().to_string()).ok();
    request.extensions_mut().insert(ctx);

    async move {
        tracing::info!("Request started");

        let mut response = next.run(request).await;

        if let Some(value) = header_value {
            response
                .headers_mut()
                .insert(CORRELATION_ID_HEADER.clone(), value);
        }

        tracing::info!(status = %response.status().as_u16(), "Request completed");

        response
    }
    .instrument(span)
    .await
}
