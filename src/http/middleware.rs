//! Request logging middleware for axum
//!
//! Install with
//! `axum::middleware::from_fn_with_state(logger, log_request)`.
//! The entry line is written before the inner service runs. The
//! completion line is written once the response body has been fully
//! handed to the transport, has errored, or has been dropped.

use std::net::SocketAddr;
use std::pin::Pin;
use std::task::{Context, Poll};

use axum::{
    body::Body,
    extract::{ConnectInfo, OriginalUri, Request, State},
    middleware::Next,
    response::Response,
};
use bytes::Bytes;
use http_body::{Body as HttpBody, Frame, SizeHint};
use tracing::error;

use crate::core::context::RequestContext;
use crate::core::error::LoggerError;
use crate::core::logger::{PendingRequest, RequestLogger};

/// Request logging middleware
///
/// A failure writing the entry line is returned as the response
/// (500), the same way any handler error would be. Failures writing
/// the completion line are reported through `tracing`, since the
/// response is already on its way to the client by then.
///
/// # Arguments
///
/// * `logger` - The configured request logger
/// * `request` - The incoming HTTP request
/// * `next` - The next middleware or handler in the chain
pub async fn log_request(
    State(logger): State<RequestLogger>,
    request: Request,
    next: Next,
) -> Result<Response, LoggerError> {
    let ctx = request_context(&request, &logger);
    let pending = logger.begin(ctx)?;

    let response = next.run(request).await;
    let status = response.status().as_u16();

    Ok(response.map(|body| Body::new(LoggedBody::new(body, pending, status))))
}

fn request_context(request: &Request, logger: &RequestLogger) -> RequestContext {
    // Nested routers rewrite the URI; log what the client asked for
    let uri = request
        .extensions()
        .get::<OriginalUri>()
        .map(|original| &original.0)
        .unwrap_or_else(|| request.uri());
    let path = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());

    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip());

    RequestContext::from_parts(
        request.method().as_str(),
        path,
        request.headers(),
        &logger.config().ip_header,
        peer,
    )
}

/// Fires the completion line at most once
struct CompletionGuard {
    pending: Option<PendingRequest>,
    status: u16,
}

impl CompletionGuard {
    fn complete(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };

        if let Err(e) = pending.finish(self.status) {
            error!(error = %e, "Failed to write completion log line");
        }
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        self.complete();
    }
}

/// Response body that reports when it is done
///
/// Done means end of stream, a body error, or the body being dropped
/// before the end (client went away, server shut down).
pub struct LoggedBody {
    inner: Body,
    guard: CompletionGuard,
}

impl LoggedBody {
    pub fn new(inner: Body, pending: PendingRequest, status: u16) -> Self {
        Self {
            inner,
            guard: CompletionGuard {
                pending: Some(pending),
                status,
            },
        }
    }
}

impl HttpBody for LoggedBody {
    type Data = Bytes;
    type Error = axum::Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        let this = self.get_mut();
        let poll = Pin::new(&mut this.inner).poll_frame(cx);

        match &poll {
            Poll::Ready(None) | Poll::Ready(Some(Err(_))) => this.guard.complete(),
            Poll::Ready(Some(Ok(_))) if this.inner.is_end_stream() => this.guard.complete(),
            _ => {}
        }

        poll
    }

    fn is_end_stream(&self) -> bool {
        self.inner.is_end_stream()
    }

    fn size_hint(&self) -> SizeHint {
        self.inner.size_hint()
    }
}
