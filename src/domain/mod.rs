/// Domain models for the application
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One row of a launch search result list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchSummary {
    pub id: String,
    pub name: String,
    pub status: String,
    pub mission: String,
}

/// Name and description pair, used for both launch status and mission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Described {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// A single launch as shown on its detail page.
///
/// Fields are passed through from the API without defaults; the detail
/// view decides what to show when something is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LaunchDetail {
    pub name: String,
    pub status: Option<Described>,
    pub window_start: Option<String>,
    pub window_end: Option<String>,
    pub mission: Option<Described>,
    pub image: Option<String>,
}

/// Health check response
#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub now: DateTime<Utc>,
}
