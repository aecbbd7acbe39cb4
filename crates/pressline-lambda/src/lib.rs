//! pressline-lambda
//!
//! HTTP surface of the PDF renderer: one method-dispatched route plus a
//! health check, runnable under the Lambda runtime or as a plain server.

use axum::middleware as axum_mw;
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use state::AppState;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let route = state.config.route.clone();
    let [credentials, origin, methods, headers] = middleware::cors::headers();
    let cors = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(credentials.0, credentials.1))
        .layer(SetResponseHeaderLayer::overriding(origin.0, origin.1))
        .layer(SetResponseHeaderLayer::overriding(methods.0, methods.1))
        .layer(SetResponseHeaderLayer::overriding(headers.0, headers.1));

    // The layer sits on the method router so the 405 fallback gets the
    // CORS headers too.
    let render = post(routes::generate::generate_pdf)
        .options(routes::generate::preflight)
        .fallback(routes::generate::method_not_allowed)
        .layer(cors);

    Router::new()
        // Health (no CORS headers)
        .route("/health", get(routes::health::health_check))
        .route(&route, render)
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .with_state(state)
}
