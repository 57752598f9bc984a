//! Request middleware
//!
//! Bearer-token guard for protected routes and the per-request logging span.

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::{ConnectInfo, Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::{info_span, warn, Span};

use crate::api::AppState;
use crate::auth::TokenError;
use crate::error::AppError;

pub const UNAUTHORIZED: &str = "No autorizado";

/// Rejects the request with 401 unless it carries a valid bearer token.
///
/// Verified claims are added to the request extensions.
pub async fn require_bearer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let verified = match extract_bearer(req.headers()) {
        Some(token) => state.verifier.verify(token),
        None => Err(TokenError::Missing),
    };

    let claims = verified.map_err(|err| {
        warn!(error = %err, path = %req.uri().path(), "Rejected request");
        AppError::Unauthorized(UNAUTHORIZED.to_string())
    })?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let token = headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")?
        .trim();

    (!token.is_empty()).then_some(token)
}

/// Span for one request: method, path and remote address.
pub fn request_span(request: &axum::http::Request<Body>) -> Span {
    let remote = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "-".to_string());

    info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        remote = %remote,
    )
}
