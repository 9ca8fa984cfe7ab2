// Session commands - current view, search query and theme

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::common::TaskInfo;
use crate::models::{Theme, ViewFilter};
use crate::storage::StorageState;

#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub filter: ViewFilter,
    pub searchQuery: String,
    pub theme: Theme,
    /// Tasks of the current view, filtered by the current search
    pub tasks: Vec<TaskInfo>,
}

fn sessionInfo(storage: &StorageState) -> SessionInfo {
    let store = storage.store.read();
    let tasks = store.currentView();
    SessionInfo {
        filter: store.filter(),
        searchQuery: store.searchQuery().to_string(),
        theme: store.theme(),
        tasks: TaskInfo::list(&tasks, &store),
    }
}

/// GET /session
pub async fn getSession(State(storage): State<StorageState>) -> Json<SessionInfo> {
    Json(sessionInfo(&storage))
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateSessionInput {
    pub filter: Option<ViewFilter>,
    pub searchQuery: Option<String>,
}

/// PUT /session
pub async fn updateSession(
    State(storage): State<StorageState>,
    Json(input): Json<UpdateSessionInput>,
) -> Json<SessionInfo> {
    {
        let mut store = storage.store.write();
        if let Some(filter) = input.filter {
            debug!(filter = filter.key(), "switching view");
            store.setFilter(filter);
        }
        if let Some(query) = input.searchQuery {
            store.setSearchQuery(query);
        }
    }
    Json(sessionInfo(&storage))
}

/// POST /session/theme
pub async fn toggleTheme(State(storage): State<StorageState>) -> Json<SessionInfo> {
    let theme = storage.store.write().toggleTheme();
    debug!(?theme, "theme toggled");
    Json(sessionInfo(&storage))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Settings;
    use crate::storage::Storage;
    use std::sync::Arc;

    #[tokio::test]
    async fn session_starts_from_settings() {
        let storage = Arc::new(Storage::new(Settings {
            theme: Theme::Dark,
            defaultView: ViewFilter::Planned,
            ..Settings::default()
        }));
        let Json(session) = getSession(State(storage)).await;
        assert_eq!(session.theme, Theme::Dark);
        assert_eq!(session.filter, ViewFilter::Planned);
        assert!(session.searchQuery.is_empty());
    }

    #[tokio::test]
    async fn update_session_changes_current_view() {
        let storage = Arc::new(Storage::new(Settings::default()));
        storage.createTask("Buy milk", None).unwrap();
        storage.createTask("Walk dog", None).unwrap();

        let input: UpdateSessionInput =
            serde_json::from_str(r#"{"filter":"all","searchQuery":"dog"}"#).unwrap();
        let Json(session) = updateSession(State(storage.clone()), Json(input)).await;
        assert_eq!(session.filter, ViewFilter::All);
        assert_eq!(session.tasks.len(), 1);
        assert_eq!(session.tasks[0].task.text, "Walk dog");

        // tasks created now land in the current view's category
        let task = storage.createTask("Read book", None).unwrap();
        assert_eq!(task.category, "my-day");
    }

    #[tokio::test]
    async fn theme_toggle_round_trips() {
        let storage = Arc::new(Storage::new(Settings::default()));
        let Json(first) = toggleTheme(State(storage.clone())).await;
        assert_eq!(first.theme, Theme::Dark);
        let Json(second) = toggleTheme(State(storage)).await;
        assert_eq!(second.theme, Theme::Light);
    }
}
