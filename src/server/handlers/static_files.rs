//! Static asset handlers.

use axum::{extract::State, http::header, response::IntoResponse};

use super::super::assets;
use super::super::AppState;

/// Serve the configured stylesheet.
pub async fn serve_css(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        state.stylesheet.css().to_string(),
    )
}

/// Serve JavaScript.
pub async fn serve_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        assets::JS,
    )
}
