//! ActivityClient: the two read operations of the activity service.
//!
//! `GET {base}/random` and `GET {base}/filter?type={category}`. An optional
//! proxy prefix is prepended verbatim to the full target URL.

use reqwest::Client;
use tracing::{error, info};
use url::Url;

use super::selector::{select, select_with, ActivityPayload, SelectedReward};
use crate::error::{ActivityError, FetchError};
use crate::storage::ActivityConfig;

/// Which endpoint to query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    Random,
    Filter(String),
}

impl Category {
    /// `"random"` and blank tags map to the random endpoint.
    pub fn parse(tag: &str) -> Self {
        let tag = tag.trim();
        if tag.is_empty() || tag.eq_ignore_ascii_case("random") {
            Category::Random
        } else {
            Category::Filter(tag.to_string())
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            Category::Random => "random",
            Category::Filter(tag) => tag,
        }
    }

    fn endpoint(&self) -> String {
        match self {
            Category::Random => "/random".to_string(),
            Category::Filter(tag) => format!("/filter?type={}", urlencoding::encode(tag)),
        }
    }
}

/// Client for the activity-suggestion service.
pub struct ActivityClient {
    base_url: String,
    proxy_prefix: Option<String>,
    http_client: Client,
}

impl ActivityClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            proxy_prefix: None,
            http_client: Client::new(),
        }
    }

    pub fn from_config(config: &ActivityConfig) -> Self {
        let mut client = Self::new(&config.base_url);
        client.proxy_prefix = config.proxy_prefix.clone().filter(|p| !p.is_empty());
        client
    }

    pub fn with_proxy(mut self, prefix: impl Into<String>) -> Self {
        self.proxy_prefix = Some(prefix.into());
        self
    }

    /// Full request URL for a category, proxy included.
    pub fn request_url(&self, category: &Category) -> Result<Url, FetchError> {
        let target = format!("{}{}", self.base_url, category.endpoint());
        let raw = match &self.proxy_prefix {
            Some(prefix) => format!("{prefix}{target}"),
            None => target,
        };
        Url::parse(&raw).map_err(|source| FetchError::InvalidUrl { url: raw, source })
    }

    /// Fetch and classify the response body.
    pub async fn fetch(&self, category: &Category) -> Result<Option<ActivityPayload>, FetchError> {
        let url = self.request_url(category)?;
        info!(category = category.tag(), %url, "fetching activity");

        let resp = self.http_client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body: serde_json::Value = resp.json().await?;
        Ok(ActivityPayload::from_json(body))
    }

    /// Fetch and pick one reward.
    pub async fn fetch_reward(&self, category: &Category) -> Result<SelectedReward, ActivityError> {
        let payload = self.fetch_logged(category).await?;
        Ok(select(payload)?)
    }

    /// Like [`fetch_reward`](Self::fetch_reward) with a caller-supplied RNG.
    pub async fn fetch_reward_with<R: rand::Rng + ?Sized>(
        &self,
        category: &Category,
        rng: &mut R,
    ) -> Result<SelectedReward, ActivityError> {
        let payload = self.fetch_logged(category).await?;
        Ok(select_with(payload, rng)?)
    }

    async fn fetch_logged(&self, category: &Category) -> Result<Option<ActivityPayload>, FetchError> {
        self.fetch(category).await.map_err(|e| {
            error!(category = category.tag(), "failed to fetch activity: {e}");
            e
        })
    }
}
