//! Transport middleware wrapped around the whole router.
//!
//! - `x-request-id`: kept from the request or generated, echoed on the response
//! - access log per request (`TraceLayer`, filtered by `RUST_LOG`)
//! - bodies over 1 MiB are refused before reaching a handler
//! - `REQUEST_TIMEOUT_SECONDS` bounds each request; expiry answers 408
//!
//! Config guarantees the request timeout is longer than the authority check
//! timeout, so a slow authority still ends in the gate's 401.

use std::time::Duration;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::http::{StatusCode, header::HeaderName};
use tower::timeout::{TimeoutLayer, error::Elapsed};
use tower::{BoxError, ServiceBuilder};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

const BODY_LIMIT_BYTES: usize = 1024 * 1024;

async fn timeout_or_internal(err: BoxError) -> StatusCode {
    if err.is::<Elapsed>() {
        tracing::warn!("request exceeded REQUEST_TIMEOUT_SECONDS");
        return StatusCode::REQUEST_TIMEOUT;
    }
    tracing::error!(error = %err, "unhandled middleware error");
    StatusCode::INTERNAL_SERVER_ERROR
}

pub fn apply(router: Router, request_timeout: Duration) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    // outermost first; HandleErrorLayer turns the timeout's BoxError into a response
    let stack = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(timeout_or_internal))
        .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
        .layer(PropagateRequestIdLayer::new(request_id))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http());

    router.layer(stack)
}
