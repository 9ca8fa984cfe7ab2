// Task commands - CRUD over the in-memory store
// GET/POST /tasks, GET/PUT/DELETE /tasks/{id}, POST /tasks/{id}/complete|important

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::debug;

use super::common::{ApiError, ApiResult, TaskInfo};
use crate::models::{TaskId, TaskPatch, ViewFilter};
use crate::storage::StorageState;

#[derive(Debug, Default, Deserialize)]
pub struct TaskListQuery {
    pub filter: Option<String>,
    pub q: Option<String>,
}

/// GET /tasks
///
/// Without parameters: the full list in insertion order. With `filter`
/// and/or `q`: the sorted view.
pub async fn getTasks(
    State(storage): State<StorageState>,
    Query(query): Query<TaskListQuery>,
) -> ApiResult<Json<Vec<TaskInfo>>> {
    let store = storage.store.read();

    if query.filter.is_none() && query.q.is_none() {
        return Ok(Json(TaskInfo::list(store.tasks(), &store)));
    }

    let filter = match query.filter.as_deref() {
        Some(key) => ViewFilter::fromKey(key)
            .ok_or_else(|| ApiError::new(StatusCode::BAD_REQUEST, format!("Unknown view `{}`", key)))?,
        None => ViewFilter::All,
    };
    let search = query.q.as_deref().unwrap_or_default();
    let tasks = store.view(filter, search);
    debug!(filter = filter.key(), search, count = tasks.len(), "listed tasks");
    Ok(Json(TaskInfo::list(&tasks, &store)))
}

/// GET /tasks/{id}
pub async fn getTaskById(
    State(storage): State<StorageState>,
    Path(id): Path<TaskId>,
) -> ApiResult<Json<TaskInfo>> {
    let store = storage.store.read();
    let task = store.get(id).ok_or_else(ApiError::taskNotFound)?;
    Ok(Json(TaskInfo::build(task, &store)))
}

#[derive(Debug, Deserialize)]
pub struct CreateTaskInput {
    #[serde(alias = "title")]
    pub text: String,
    pub category: Option<String>,
}

/// POST /tasks
pub async fn createTask(
    State(storage): State<StorageState>,
    Json(input): Json<CreateTaskInput>,
) -> ApiResult<(StatusCode, Json<TaskInfo>)> {
    let task = storage
        .createTask(&input.text, input.category.as_deref())
        .ok_or_else(|| ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, "Task text cannot be empty"))?;

    let store = storage.store.read();
    Ok((StatusCode::CREATED, Json(TaskInfo::build(&task, &store))))
}

/// PUT /tasks/{id}
pub async fn updateTask(
    State(storage): State<StorageState>,
    Path(id): Path<TaskId>,
    Json(patch): Json<TaskPatch>,
) -> ApiResult<Json<TaskInfo>> {
    let mut store = storage.store.write();
    let task = store.update(id, patch).ok_or_else(ApiError::taskNotFound)?;
    debug!(id, "updated task");
    Ok(Json(TaskInfo::build(&task, &store)))
}

/// DELETE /tasks/{id}
///
/// Always 204: deleting something that is already gone is not an error.
pub async fn deleteTask(State(storage): State<StorageState>, Path(id): Path<TaskId>) -> StatusCode {
    storage.deleteTask(id);
    StatusCode::NO_CONTENT
}

/// POST /tasks/{id}/complete
pub async fn toggleCompleted(
    State(storage): State<StorageState>,
    Path(id): Path<TaskId>,
) -> ApiResult<Json<TaskInfo>> {
    let mut store = storage.store.write();
    let task = store.toggleCompleted(id).ok_or_else(ApiError::taskNotFound)?;
    debug!(id, completed = task.completed, "toggled completed");
    Ok(Json(TaskInfo::build(&task, &store)))
}

/// POST /tasks/{id}/important
pub async fn toggleImportant(
    State(storage): State<StorageState>,
    Path(id): Path<TaskId>,
) -> ApiResult<Json<TaskInfo>> {
    let mut store = storage.store.write();
    let task = store.toggleImportant(id).ok_or_else(ApiError::taskNotFound)?;
    debug!(id, important = task.important, "toggled important");
    Ok(Json(TaskInfo::build(&task, &store)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Priority, Settings};
    use crate::storage::Storage;
    use std::sync::Arc;
    use std::time::Duration;

    fn storage() -> StorageState {
        Arc::new(Storage::new(Settings::default()))
    }

    async fn create(storage: &StorageState, text: &str) -> TaskInfo {
        let input = CreateTaskInput {
            text: text.to_string(),
            category: None,
        };
        let (status, Json(task)) = createTask(State(storage.clone()), Json(input)).await.unwrap();
        assert_eq!(status, StatusCode::CREATED);
        task
    }

    async fn list(storage: &StorageState, filter: Option<&str>, q: Option<&str>) -> Vec<TaskId> {
        let query = TaskListQuery {
            filter: filter.map(str::to_string),
            q: q.map(str::to_string),
        };
        let Json(tasks) = getTasks(State(storage.clone()), Query(query)).await.unwrap();
        tasks.iter().map(|t| t.task.id).collect()
    }

    #[tokio::test]
    async fn create_returns_flagged_task() {
        let storage = storage();
        let task = create(&storage, "  Buy milk ").await;
        assert_eq!(task.task.id, 1);
        assert_eq!(task.task.text, "Buy milk");
        assert!(task.isNew);
        assert!(!task.isDeleting);
    }

    #[tokio::test]
    async fn create_rejects_blank_text() {
        let storage = storage();
        let input = CreateTaskInput {
            text: "   ".to_string(),
            category: None,
        };
        let err = createTask(State(storage.clone()), Json(input)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(storage.store.read().isEmpty());
    }

    #[test]
    fn create_accepts_title_alias() {
        let input: CreateTaskInput = serde_json::from_str(r#"{"title":"Walk dog"}"#).unwrap();
        assert_eq!(input.text, "Walk dog");
    }

    #[tokio::test]
    async fn list_without_params_keeps_insertion_order() {
        let storage = storage();
        for text in ["a", "b", "c"] {
            create(&storage, text).await;
        }
        assert_eq!(list(&storage, None, None).await, vec![1, 2, 3]);
        assert_eq!(list(&storage, Some("all"), None).await, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn list_with_search_only_uses_all_view() {
        let storage = storage();
        create(&storage, "Buy milk").await;
        create(&storage, "Walk dog").await;
        assert_eq!(list(&storage, None, Some("milk")).await, vec![1]);
    }

    #[tokio::test]
    async fn list_rejects_unknown_view() {
        let storage = storage();
        let query = TaskListQuery {
            filter: Some("someday".to_string()),
            q: None,
        };
        let err = getTasks(State(storage), Query(query)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_missing_task_is_not_found() {
        let storage = storage();
        create(&storage, "a").await;
        let patch = TaskPatch {
            text: Some("x".to_string()),
            ..TaskPatch::default()
        };
        let err = updateTask(State(storage.clone()), Path(999), Json(patch)).await.unwrap_err();
        assert_eq!(err, ApiError::taskNotFound());
        assert_eq!(storage.store.read().get(1).unwrap().text, "a");
    }

    #[tokio::test]
    async fn update_applies_patch() {
        let storage = storage();
        create(&storage, "a").await;
        let patch: TaskPatch =
            serde_json::from_str(r#"{"priority":"high","dueDate":"2026-10-20","notes":"n"}"#).unwrap();
        let Json(task) = updateTask(State(storage.clone()), Path(1), Json(patch)).await.unwrap();
        assert_eq!(task.task.priority, Priority::High);
        assert_eq!(task.task.notes, "n");
        assert!(task.task.dueDate.is_some());
    }

    #[tokio::test]
    async fn toggles_flip_flags_and_report_missing_ids() {
        let storage = storage();
        create(&storage, "Pay bills").await;

        let Json(task) = toggleImportant(State(storage.clone()), Path(1)).await.unwrap();
        assert!(task.task.important);
        let Json(task) = toggleCompleted(State(storage.clone()), Path(1)).await.unwrap();
        assert!(task.task.completed);

        assert!(toggleCompleted(State(storage.clone()), Path(5)).await.is_err());
        assert!(toggleImportant(State(storage), Path(5)).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn delete_is_no_content_and_removes_after_delay() {
        let storage = storage();
        create(&storage, "a").await;

        assert_eq!(deleteTask(State(storage.clone()), Path(1)).await, StatusCode::NO_CONTENT);
        let Json(task) = getTaskById(State(storage.clone()), Path(1)).await.unwrap();
        assert!(task.isDeleting);

        tokio::time::sleep(Duration::from_millis(350)).await;
        assert!(getTaskById(State(storage.clone()), Path(1)).await.is_err());

        // deleting again is still fine
        assert_eq!(deleteTask(State(storage), Path(1)).await, StatusCode::NO_CONTENT);
    }
}
