//! HTTP route table.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! All routes share one `ApiContext`; the access logger wraps the stack.
//!
//! NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;

/// Build the service router with every route and the access-log layer.
pub fn api_router(ctx: ApiContext) -> Router {
    Router::new()
        .route("/", get(endpoints::meta::root))
        .route("/about", get(endpoints::meta::about))
        .route("/view", get(endpoints::patients::view))
        .route("/patient/:id", get(endpoints::patients::detail))
        .route("/sort", get(endpoints::patients::sort))
        .route("/create", post(endpoints::patients::create))
        .route("/update/:id", put(endpoints::patients::update))
        .route("/delete_patient/:id", delete(endpoints::patients::delete))
        .route("/predict", post(endpoints::predict::premium))
        .with_state(ctx)
        .layer(axum::middleware::from_fn(middleware::access_log::log_requests))
}
