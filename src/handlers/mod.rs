/// HTTP request handlers
use crate::clients::LaunchApi;
use crate::domain::Health;
use crate::errors::ApiError;
use crate::services::{DetailController, SearchController, SearchState};
use crate::utils::non_blank;
use crate::views::{document, render_detail_view, render_search_view};
use axum::{
    extract::{Path, Query, State},
    response::Html,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn LaunchApi>,
}

/// Successful response wrapper
#[derive(Serialize)]
pub struct SuccessResponse<T: Serialize> {
    pub ok: bool,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self { ok: true, data }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub id: Option<String>,
    pub query: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}

/// Health check handler
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        now: Utc::now(),
    })
}

/// Front page: a launch by `id`, a search by `query`, or just the form
pub async fn index(
    Query(params): Query<PageParams>,
    State(state): State<AppState>,
) -> Html<String> {
    if let Some(id) = non_blank(params.id.as_deref()) {
        let controller = DetailController::new(state.api.clone());
        controller.load(id).await;
        let view = render_detail_view(&controller.snapshot());
        return Html(document("Launch", view));
    }

    let view = match non_blank(params.query.as_deref()) {
        Some(query) => {
            let controller = SearchController::new(state.api.clone());
            controller.search(query).await;
            render_search_view(&controller.snapshot())
        }
        None => render_search_view(&SearchState::Idle),
    };
    Html(document("Launch search", view))
}

/// Search launches as JSON, reporting why a lookup failed
pub async fn search_launches(
    Query(params): Query<SearchParams>,
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    let search = params.search.unwrap_or_default();
    info!("api search for {:?}", search);
    let results = state.api.try_search_launches(&search).await?;
    Ok(Json(serde_json::json!(SuccessResponse::new(
        serde_json::json!({
            "results": results
        })
    ))))
}

/// Single launch as JSON
pub async fn get_launch(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    let launch = state.api.try_get_launch(&id).await?;
    Ok(Json(serde_json::json!(SuccessResponse::new(
        serde_json::json!({
            "launch": launch
        })
    ))))
}
