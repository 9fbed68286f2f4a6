//! Web server for the portfolio page.
//!
//! Serves the single page, its static assets and the simulation API.
//! Animations are fetched per page request and never cached.

pub(crate) mod assets;
mod handlers;
mod routes;
mod template_structs;

pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::{AnimationUrls, Settings};
use crate::http_client::{AnimationFetcher, AnimationSource};
use crate::models::{ContactForm, Profile};
use crate::simulation::SimulationRunner;
use crate::style::{StyleError, Stylesheet};

/// Everything the page renders that does not change per request.
#[derive(Debug, Clone)]
pub struct SiteContent {
    pub title: String,
    pub profile: Profile,
    pub contact: ContactForm,
    pub animations: AnimationUrls,
}

impl SiteContent {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            title: settings.title.clone(),
            profile: settings.profile.clone(),
            contact: settings.contact.clone(),
            animations: settings.animations.clone(),
        }
    }
}

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub assets: Arc<dyn AnimationSource>,
    pub site: Arc<SiteContent>,
    pub stylesheet: Stylesheet,
    pub simulations: SimulationRunner,
}

impl AppState {
    /// Build state with an HTTP fetcher configured from settings.
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let mut builder = AnimationFetcher::builder(settings.request_timeout());
        if let Some(ref ua) = settings.user_agent {
            builder = builder.user_agent(ua);
        }
        let fetcher = builder.build()?;

        Ok(Self::with_source(settings, Arc::new(fetcher))?)
    }

    /// Build state around any animation source.
    ///
    /// # Errors
    /// Fails if the configured stylesheet file cannot be read.
    pub fn with_source(
        settings: &Settings,
        assets: Arc<dyn AnimationSource>,
    ) -> Result<Self, StyleError> {
        let stylesheet = Stylesheet::load(&settings.stylesheet)?;

        Ok(Self {
            assets,
            site: Arc::new(SiteContent::from_settings(settings)),
            stylesheet,
            simulations: SimulationRunner::new(settings.pacing),
        })
    }
}

/// Start the web server.
pub async fn serve(settings: &Settings, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(settings)?;
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use crate::models::{AnimationPayload, AnimationSlot, NAVIGATION};
    use crate::simulation::SimulationPacing;
    use crate::style::StylesheetSource;

    /// Returns `{"v":1}` for the listed URLs and nothing for the rest.
    struct StubSource {
        loaded: HashSet<String>,
    }

    #[async_trait]
    impl AnimationSource for StubSource {
        async fn fetch_animation(&self, url: &str) -> Option<AnimationPayload> {
            self.loaded
                .contains(url)
                .then(|| AnimationPayload::new(serde_json::json!({"v": 1})))
        }
    }

    fn test_settings() -> Settings {
        Settings {
            pacing: SimulationPacing::instant(),
            ..Default::default()
        }
    }

    fn setup_test_app(loaded: &[AnimationSlot]) -> axum::Router {
        let settings = test_settings();
        let loaded = loaded
            .iter()
            .map(|slot| settings.animations.url(*slot).to_string())
            .collect();
        let state = AppState::with_source(&settings, Arc::new(StubSource { loaded })).unwrap();
        create_router(state)
    }

    async fn get(app: axum::Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    async fn post_json(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn player_marker(slot: AnimationSlot) -> String {
        format!(
            r#"class="lottie-player" data-animation-key="{}""#,
            slot.key()
        )
    }

    fn fallback_marker(slot: AnimationSlot) -> String {
        format!(
            r#"class="fallback-notice" role="status" data-animation-key="{}""#,
            slot.key()
        )
    }

    #[tokio::test]
    async fn test_page_all_animations_absent() {
        let app = setup_test_app(&[]);
        let (status, html) = get(app, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(!html.contains("class=\"lottie-player\""));
        for slot in AnimationSlot::all() {
            assert!(html.contains(&fallback_marker(*slot)), "{}", slot);
            assert!(html.contains(slot.fallback_notice().split('\'').next().unwrap()));
        }
        assert_eq!(html.matches("animation failed to load.").count(), 4);
    }

    #[tokio::test]
    async fn test_page_all_animations_loaded() {
        let app = setup_test_app(AnimationSlot::all());
        let (status, html) = get(app, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(!html.contains("class=\"fallback-notice\""));
        assert!(!html.contains("animation failed to load."));
        for slot in AnimationSlot::all() {
            assert!(html.contains(&player_marker(*slot)), "{}", slot);
        }
        assert_eq!(html.matches("&quot;v&quot;:1").count(), 4);
    }

    #[tokio::test]
    async fn test_each_slot_is_player_xor_fallback() {
        for loaded in AnimationSlot::all() {
            let app = setup_test_app(&[*loaded]);
            let (_, html) = get(app, "/").await;

            for slot in AnimationSlot::all() {
                let has_player = html.contains(&player_marker(*slot));
                let has_fallback = html.contains(&fallback_marker(*slot));
                assert_ne!(has_player, has_fallback, "slot {}", slot);
                assert_eq!(has_player, slot == loaded, "slot {}", slot);
            }
        }
    }

    #[tokio::test]
    async fn test_navigation_targets_exist_once() {
        let app = setup_test_app(&[]);
        let (_, html) = get(app, "/").await;

        let mut last_link = 0;
        for entry in NAVIGATION {
            let id = format!(r#"id="{}""#, entry.anchor);
            assert_eq!(html.matches(&id).count(), 1, "anchor {}", entry.anchor);

            let link = format!(r#"data-target="{}">{}</a>"#, entry.anchor, entry.label);
            let pos = html.find(&link).unwrap();
            assert!(pos > last_link, "nav order at {}", entry.label);
            last_link = pos;
        }
    }

    #[tokio::test]
    async fn test_sections_in_order_before_sidebar() {
        let app = setup_test_app(&[]);
        let (_, html) = get(app, "/").await;

        let positions: Vec<usize> = ["home", "about", "skills", "projects", "contact"]
            .iter()
            .map(|a| html.find(&format!(r#"id="{}""#, a)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        let sidebar = html.find(r#"class="sidebar""#).unwrap();
        assert!(positions[4] < sidebar);
    }

    #[tokio::test]
    async fn test_page_content() {
        let app = setup_test_app(&[]);
        let (_, html) = get(app, "/").await;

        assert!(html.contains("<title>My Animated Portfolio</title>"));
        assert!(html.contains("formsubmit.co"));
        assert!(html.contains("your.email@example.com"));
        assert!(html.contains(r#"data-simulation="resume_download""#));
        assert!(html.contains(r#"data-simulation="dashboard_load""#));
        assert!(html.contains(r#"data-simulation="model_training""#));
        assert!(html.contains("Download My Resume (Simulated)"));
        assert!(html.contains("Jupyter Notebooks"));
        assert!(html.contains("3. Web Scraping Tool for Research"));
    }

    #[tokio::test]
    async fn test_serve_embedded_css() {
        let app = setup_test_app(&[]);
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/static/style.css")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/css; charset=utf-8"
        );
    }

    #[tokio::test]
    async fn test_serve_file_stylesheet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.css");
        std::fs::write(&path, ".custom { color: teal; }").unwrap();

        let settings = Settings {
            stylesheet: StylesheetSource::File(path),
            ..test_settings()
        };
        let source = StubSource {
            loaded: HashSet::new(),
        };
        let state = AppState::with_source(&settings, Arc::new(source)).unwrap();
        let (_, css) = get(create_router(state), "/static/style.css").await;

        assert_eq!(css, ".custom { color: teal; }");
    }

    #[test]
    fn test_missing_stylesheet_fails_state() {
        let settings = Settings {
            stylesheet: StylesheetSource::File("/nonexistent/site.css".into()),
            ..test_settings()
        };
        let source = StubSource {
            loaded: HashSet::new(),
        };
        assert!(AppState::with_source(&settings, Arc::new(source)).is_err());
    }

    #[tokio::test]
    async fn test_serve_js() {
        let (status, js) = get(setup_test_app(&[]), "/static/portfolio.js").await;
        assert_eq!(status, StatusCode::OK);
        assert!(js.contains("scrollIntoView"));
    }

    #[tokio::test]
    async fn test_healthz_and_unknown_route() {
        let (status, body) = get(setup_test_app(&[]), "/healthz").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");

        let (status, body) = get(setup_test_app(&[]), "/resume.pdf").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "Not found");
    }

    #[tokio::test]
    async fn test_simulation_api_runs_to_completion() {
        let app = setup_test_app(&[]);

        let (status, started) = post_json(app.clone(), "/api/simulations/model_training").await;
        assert_eq!(status, StatusCode::ACCEPTED);
        assert_eq!(started["kind"], "model_training");
        let id = started["id"].as_str().unwrap().to_string();

        let mut snapshot = serde_json::Value::Null;
        for _ in 0..500 {
            let (status, body) = get(app.clone(), &format!("/api/simulations/{}", id)).await;
            assert_eq!(status, StatusCode::OK);
            snapshot = serde_json::from_str(&body).unwrap();
            if snapshot["state"] != "running" {
                break;
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
        }

        assert_eq!(snapshot["state"], "completed");
        assert_eq!(snapshot["progress"], 100);
        let events = snapshot["events"].as_array().unwrap();
        let successes = events.iter().filter(|e| e["type"] == "success").count();
        assert_eq!(successes, 1);
    }

    #[tokio::test]
    async fn test_simulation_api_unknown() {
        let app = setup_test_app(&[]);

        let (status, body) = post_json(app.clone(), "/api/simulations/deploy").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("deploy"));

        let (status, _) = get(app.clone(), "/api/simulations/not-a-uuid").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let missing = uuid::Uuid::new_v4();
        let (status, _) = post_json(app, &format!("/api/simulations/{}/cancel", missing)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_simulation_api_cancel() {
        let settings = Settings::default();
        let source = StubSource {
            loaded: HashSet::new(),
        };
        let app = create_router(AppState::with_source(&settings, Arc::new(source)).unwrap());

        let (_, started) = post_json(app.clone(), "/api/simulations/dashboard_load").await;
        let id = started["id"].as_str().unwrap().to_string();

        let (status, cancelled) =
            post_json(app, &format!("/api/simulations/{}/cancel", id)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cancelled["state"], "cancelled");
        assert!(cancelled["events"]
            .as_array()
            .unwrap()
            .iter()
            .all(|e| e["type"] != "success"));
    }
}
