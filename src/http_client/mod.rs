//! HTTP client for remote Lottie assets.
//!
//! Every failure class (bad status, transport fault, malformed body)
//! degrades to an absent animation. The page then shows the slot's fallback
//! notice instead of a player. Failures are logged with their typed cause.

mod error;

pub use error::FetchError;

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::config::AnimationUrls;
use crate::models::{AnimationPayload, AnimationSlot};

/// Default user agent for asset requests.
pub const USER_AGENT: &str = concat!("portfolio/", env!("CARGO_PKG_VERSION"));

/// Anything that can turn a URL into an animation payload.
#[async_trait]
pub trait AnimationSource: Send + Sync {
    /// Fetch and parse an animation. `None` means the asset is absent.
    async fn fetch_animation(&self, url: &str) -> Option<AnimationPayload>;
}

/// Builder for [`AnimationFetcher`].
pub struct AnimationFetcherBuilder {
    timeout: Duration,
    user_agent: Option<String>,
}

impl AnimationFetcherBuilder {
    /// Override the user agent. Without this, [`USER_AGENT`] is sent.
    pub fn user_agent(mut self, ua: &str) -> Self {
        self.user_agent = Some(ua.to_string());
        self
    }

    /// Build the fetcher.
    ///
    /// # Errors
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn build(self) -> Result<AnimationFetcher, FetchError> {
        let user_agent = self.user_agent.as_deref().unwrap_or(USER_AGENT);
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(self.timeout)
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(FetchError::Transport)?;

        tracing::debug!(
            "Animation fetcher ready (timeout {:?}, user agent {})",
            self.timeout,
            user_agent
        );

        Ok(AnimationFetcher { client })
    }
}

/// Fetches Lottie JSON over HTTP. One GET per call; no retries, no cache.
#[derive(Clone)]
pub struct AnimationFetcher {
    client: Client,
}

impl AnimationFetcher {
    pub fn builder(timeout: Duration) -> AnimationFetcherBuilder {
        AnimationFetcherBuilder {
            timeout,
            user_agent: None,
        }
    }

    /// Fetch an animation, reporting why it failed.
    pub async fn try_fetch(&self, url: &str) -> Result<AnimationPayload, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await.map_err(FetchError::Transport)?;
        let value: serde_json::Value =
            serde_json::from_slice(&body).map_err(FetchError::Decode)?;

        Ok(AnimationPayload::new(value))
    }
}

#[async_trait]
impl AnimationSource for AnimationFetcher {
    async fn fetch_animation(&self, url: &str) -> Option<AnimationPayload> {
        match self.try_fetch(url).await {
            Ok(payload) => Some(payload),
            Err(e) => {
                tracing::warn!("Animation unavailable from {}: {}", url, e);
                None
            }
        }
    }
}

/// Fetch every slot concurrently. Absent slots are missing from the map.
pub async fn fetch_all(
    source: &dyn AnimationSource,
    urls: &AnimationUrls,
) -> HashMap<AnimationSlot, AnimationPayload> {
    let (hello, about, projects, contact) = tokio::join!(
        source.fetch_animation(urls.url(AnimationSlot::Hello)),
        source.fetch_animation(urls.url(AnimationSlot::About)),
        source.fetch_animation(urls.url(AnimationSlot::Projects)),
        source.fetch_animation(urls.url(AnimationSlot::Contact)),
    );

    [
        (AnimationSlot::Hello, hello),
        (AnimationSlot::About, about),
        (AnimationSlot::Projects, projects),
        (AnimationSlot::Contact, contact),
    ]
    .into_iter()
    .filter_map(|(slot, payload)| payload.map(|p| (slot, p)))
    .collect()
}
