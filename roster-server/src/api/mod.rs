//! API routes for roster-server

pub mod health;
pub mod search;

use axum::Router;
use axum::middleware as axum_middleware;
use axum::routing::{get, post};
use http::{HeaderName, HeaderValue};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::middleware::{REQUEST_ID_HEADER, logging_middleware};
use crate::state::AppState;

/// UUID v4 request id generator
#[derive(Clone, Copy, Default)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<AppState> {
    Router::new()
        .route("/search", post(search::search))
        .route("/health", get(health::health_check))
}

/// Build the application: routes, middleware and state
pub fn router(state: AppState) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    build_router()
        // CORS - the search form is served from another origin
        .layer(CorsLayer::permissive())
        // Request logging
        .layer(axum_middleware::from_fn(logging_middleware))
        // Trace - Request tracing spans
        .layer(TraceLayer::new_for_http())
        // Request ID - copy to the response, generated outermost so logging sees it
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(SetRequestIdLayer::new(request_id, XRequestId))
        .with_state(state)
}
