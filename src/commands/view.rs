// View commands - sidebar lists and single-view listings

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::common::{ApiError, ApiResult, TaskInfo};
use crate::models::ViewFilter;
use crate::storage::StorageState;
use crate::store::summarize;

/// Sidebar entry
#[derive(Debug, Serialize)]
pub struct ViewInfo {
    pub key: &'static str,
    pub name: &'static str,
    /// Open tasks in the view (finished tasks for Completed)
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct ViewResponse {
    pub key: &'static str,
    pub name: &'static str,
    pub active: usize,
    pub completed: usize,
    pub tasks: Vec<TaskInfo>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ViewQuery {
    pub q: Option<String>,
}

/// GET /views
pub async fn getViews(State(storage): State<StorageState>) -> Json<Vec<ViewInfo>> {
    let store = storage.store.read();
    let views = ViewFilter::ALL
        .iter()
        .map(|view| ViewInfo {
            key: view.key(),
            name: view.name(),
            count: store.count(*view),
        })
        .collect();
    Json(views)
}

/// GET /views/{key}
pub async fn getView(
    State(storage): State<StorageState>,
    Path(key): Path<String>,
    Query(query): Query<ViewQuery>,
) -> ApiResult<Json<ViewResponse>> {
    let view = ViewFilter::fromKey(&key).ok_or_else(|| ApiError::unknownView(&key))?;
    let store = storage.store.read();
    let tasks = store.view(view, query.q.as_deref().unwrap_or_default());
    let summary = summarize(&tasks);

    Ok(Json(ViewResponse {
        key: view.key(),
        name: view.name(),
        active: summary.active,
        completed: summary.completed,
        tasks: TaskInfo::list(&tasks, &store),
    }))
}
