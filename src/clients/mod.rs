/// Launch API client module
use crate::config::HttpSettings;
use crate::domain::{Described, LaunchDetail, LaunchSummary};
use crate::errors::{ApiError, ApiResult};
use crate::utils::{is_falsy, name_of, s_pick};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP client wrapper with common configuration
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(timeout_seconds: u64) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .user_agent("launch-search/0.1")
            .build()?;
        Ok(Self { client })
    }

    pub fn get_client(&self) -> &Client {
        &self.client
    }
}

/// Read access to launch data.
///
/// Implementors provide the discriminated `try_*` lookups. The page views use
/// `search_launches` / `get_launch`, which collapse every failure to `None`
/// after logging it.
#[async_trait]
pub trait LaunchApi: Send + Sync {
    async fn try_search_launches(&self, query: &str) -> ApiResult<Vec<LaunchSummary>>;

    async fn try_get_launch(&self, id: &str) -> ApiResult<LaunchDetail>;

    async fn search_launches(&self, query: &str) -> Option<Vec<LaunchSummary>> {
        match self.try_search_launches(query).await {
            Ok(results) => Some(results),
            Err(e) => {
                warn!(code = e.code(), "unable to search launches for {:?}: {}", query, e);
                None
            }
        }
    }

    async fn get_launch(&self, id: &str) -> Option<LaunchDetail> {
        match self.try_get_launch(id).await {
            Ok(launch) => Some(launch),
            Err(e) => {
                warn!(code = e.code(), "unable to fetch launch {:?}: {}", id, e);
                None
            }
        }
    }
}

/// Client for the launch library REST API
pub struct LaunchClient {
    http_client: HttpClient,
    base_url: Url,
    max_results: usize,
}

impl LaunchClient {
    pub fn new(base_url: Url, settings: &HttpSettings) -> ApiResult<Self> {
        Ok(Self {
            http_client: HttpClient::new(settings.timeout_seconds)?,
            base_url,
            max_results: settings.max_results,
        })
    }

    /// Get base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of the list-mode search resource for `query`
    pub fn search_url(&self, query: &str) -> ApiResult<Url> {
        let mut url = self
            .base_url
            .join("launch/")
            .map_err(|e| ApiError::Internal(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("mode", "list")
            .append_pair("search", query);
        Ok(url)
    }

    /// URL of a single launch; the id is escaped as one path segment
    pub fn launch_url(&self, id: &str) -> ApiResult<Url> {
        let mut url = self
            .base_url
            .join("launch/")
            .map_err(|e| ApiError::Internal(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Internal(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .push(id)
            .push("");
        Ok(url)
    }

    async fn query_api(&self, url: Url) -> ApiResult<Value> {
        debug!("GET {}", url);
        let resp = self.http_client.get_client().get(url.clone()).send().await?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(ApiError::UpstreamStatus(status.as_u16()));
        }

        let body = resp.bytes().await?;
        let json: Value = serde_json::from_slice(&body)?;
        if is_falsy(&json) {
            return Err(ApiError::Internal(format!("empty payload from {}", url)));
        }
        Ok(json)
    }
}

#[async_trait]
impl LaunchApi for LaunchClient {
    /// Search launches, keeping the failure reason
    async fn try_search_launches(&self, query: &str) -> ApiResult<Vec<LaunchSummary>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ApiError::InvalidInput("search query is empty".to_string()));
        }
        let payload = self.query_api(self.search_url(query)?).await?;
        Ok(summaries_from(&payload, self.max_results))
    }

    /// Fetch one launch, keeping the failure reason
    async fn try_get_launch(&self, id: &str) -> ApiResult<LaunchDetail> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ApiError::InvalidInput("launch id is empty".to_string()));
        }
        let payload = self.query_api(self.launch_url(id)?).await?;
        Ok(detail_from(&payload))
    }
}

/// Map a list-mode payload to summaries.
///
/// Only the first `max_results` raw entries are considered; entries without
/// an id are dropped afterwards, so the result may be shorter.
pub fn summaries_from(payload: &Value, max_results: usize) -> Vec<LaunchSummary> {
    let Some(results) = payload.get("results").and_then(|r| r.as_array()) else {
        return Vec::new();
    };

    results
        .iter()
        .take(max_results)
        .filter_map(|item| {
            let id = s_pick(item, &["id"])?;
            Some(LaunchSummary {
                id,
                name: s_pick(item, &["name"]).unwrap_or_default(),
                status: name_of(item, "status").unwrap_or_default(),
                mission: name_of(item, "mission").unwrap_or_default(),
            })
        })
        .collect()
}

/// Map a single-launch payload to a detail record
pub fn detail_from(payload: &Value) -> LaunchDetail {
    LaunchDetail {
        name: s_pick(payload, &["name"]).unwrap_or_default(),
        status: described(payload.get("status")),
        window_start: s_pick(payload, &["window_start"]),
        window_end: s_pick(payload, &["window_end"]),
        mission: described(payload.get("mission")),
        image: s_pick(payload, &["image"]),
    }
}

fn described(v: Option<&Value>) -> Option<Described> {
    let v = v.filter(|v| v.is_object())?;
    Some(Described {
        name: s_pick(v, &["name"]),
        description: s_pick(v, &["description"]),
    })
}
