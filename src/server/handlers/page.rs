//! Portfolio page handler.

use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use super::super::template_structs::{ErrorTemplate, PortfolioTemplate};
use super::super::AppState;
use crate::http_client::fetch_all;

/// Render the full page. Animations are fetched fresh for every request.
pub async fn portfolio_page(State(state): State<AppState>) -> Response {
    let animations = fetch_all(state.assets.as_ref(), &state.site.animations).await;
    tracing::debug!("Rendering page with {}/4 animations", animations.len());

    let template = PortfolioTemplate::build(&state.site, &animations);
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Failed to render portfolio page: {}", e);
            let message = format!("Failed to render page: {}", e);
            let page = ErrorTemplate {
                title: "Error",
                message: &message,
            };
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(page.render().unwrap_or_else(|_| e.to_string())),
            )
                .into_response()
        }
    }
}

/// Liveness probe.
pub async fn healthz() -> &'static str {
    "ok"
}

/// Plain-text 404 for unknown routes.
pub async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found")
}
