//! Router configuration for the web server.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::portfolio_page))
        .route("/healthz", get(handlers::healthz))
        // Simulations: POST with a kind starts one, GET with an id polls it
        .route(
            "/api/simulations/:id",
            get(handlers::simulation_status).post(handlers::start_simulation),
        )
        .route(
            "/api/simulations/:id/cancel",
            post(handlers::cancel_simulation),
        )
        // Static assets (CSS/JS)
        .route("/static/style.css", get(handlers::serve_css))
        .route("/static/portfolio.js", get(handlers::serve_js))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
