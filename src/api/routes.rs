//! API Routes
//!
//! Configures the Axum router with all CRM server endpoints.

use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use super::customers::{
    create_customer, delete_customer, get_customer, list_customers, update_customer,
};
use super::demo::{
    handle_delete, handle_get, handle_post, handle_put, handle_secure, handle_upload,
};
use super::middleware::{request_span, require_bearer};
use super::AppState;
use crate::error::AppError;

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed("Método no permitido".to_string())
}

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// Outermost first:
/// - Tracing: one span per request with method, path and remote address
/// - CORS: mirrors the caller's origin with credentials, answers preflight
/// - Bearer auth: `/secure` only
///
/// An auth rejection passes back out through the CORS layer, so it still
/// carries the CORS headers.
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .allow_credentials(true);

    let trace = TraceLayer::new_for_http()
        .make_span_with(request_span)
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let secure = Router::new()
        .route("/secure", get(handle_secure).fallback(method_not_allowed))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer));

    let upload_limit = DefaultBodyLimit::max(state.max_upload_bytes);

    Router::new()
        .route(
            "/customers",
            get(list_customers).fallback(method_not_allowed),
        )
        .route(
            "/customers/add",
            post(create_customer).fallback(method_not_allowed),
        )
        .route(
            "/customers/:id",
            get(get_customer).fallback(method_not_allowed),
        )
        .route(
            "/customers/update/:id",
            put(update_customer)
                .post(update_customer)
                .fallback(method_not_allowed),
        )
        .route(
            "/customers/delete/:id",
            delete(delete_customer)
                .post(delete_customer)
                .fallback(method_not_allowed),
        )
        .route("/get", get(handle_get).fallback(method_not_allowed))
        .route("/post", post(handle_post).fallback(method_not_allowed))
        .route("/put", put(handle_put).fallback(method_not_allowed))
        .route("/delete", delete(handle_delete).fallback(method_not_allowed))
        .route(
            "/upload",
            post(handle_upload)
                .layer(upload_limit)
                .fallback(method_not_allowed),
        )
        .merge(secure)
        .layer(cors)
        .layer(trace)
        .with_state(state)
}
