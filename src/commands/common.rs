// Common helpers for command handlers
// All using camelCase for direct JSON compatibility

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::models::Task;
use crate::store::TaskStore;

/// Task as sent to the UI: stored fields plus the transient presentation flags
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskInfo {
    #[serde(flatten)]
    pub task: Task,
    pub isNew: bool,
    pub isDeleting: bool,
}

impl TaskInfo {
    pub fn build(task: &Task, store: &TaskStore) -> Self {
        Self {
            task: task.clone(),
            isNew: store.isNew(task.id),
            isDeleting: store.isDeleting(task.id),
        }
    }

    pub fn list(tasks: &[Task], store: &TaskStore) -> Vec<Self> {
        tasks.iter().map(|t| Self::build(t, store)).collect()
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Error returned by handlers, rendered as `{"error": message}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn taskNotFound() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Task not found")
    }

    pub fn unknownView(key: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, format!("Unknown view `{}`", key))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
