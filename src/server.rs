// HTTP server: route table plus a start/stop manager with graceful shutdown

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use parking_lot::RwLock;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use crate::commands::{session, task, view};
use crate::storage::StorageState;

/// Build the API router
pub fn createRouter(storage: StorageState, corsEnabled: bool) -> Router {
    let router = Router::new()
        // Tasks
        .route("/tasks", get(task::getTasks).post(task::createTask))
        .route(
            "/tasks/{id}",
            get(task::getTaskById).put(task::updateTask).delete(task::deleteTask),
        )
        .route("/tasks/{id}/complete", post(task::toggleCompleted))
        .route("/tasks/{id}/important", post(task::toggleImportant))
        // Views
        .route("/views", get(view::getViews))
        .route("/views/{key}", get(view::getView))
        // Session
        .route("/session", get(session::getSession).put(session::updateSession))
        .route("/session/theme", post(session::toggleTheme))
        .with_state(storage);

    if corsEnabled {
        router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        router
    }
}

// Server state
pub struct ServerManager {
    isRunning: Arc<RwLock<bool>>,
    cancelToken: RwLock<Option<CancellationToken>>,
    handle: RwLock<Option<JoinHandle<()>>>,
}

impl Default for ServerManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerManager {
    pub fn new() -> Self {
        Self {
            isRunning: Arc::new(RwLock::new(false)),
            cancelToken: RwLock::new(None),
            handle: RwLock::new(None),
        }
    }

    pub fn isRunning(&self) -> bool {
        *self.isRunning.read()
    }

    /// Bind `bindAddress` and serve in the background.
    /// Returns the bound address (useful with port 0).
    pub async fn start(&self, storage: StorageState, bindAddress: &str) -> Result<SocketAddr, String> {
        if self.isRunning() {
            return Err("Server is already running".to_string());
        }

        let corsEnabled = storage.settings.read().corsEnabled;
        let router = createRouter(storage, corsEnabled);

        let listener = tokio::net::TcpListener::bind(bindAddress)
            .await
            .map_err(|e| format!("Failed to bind {}: {}", bindAddress, e))?;
        let localAddr = listener.local_addr().map_err(|e| e.to_string())?;

        let ct = CancellationToken::new();
        *self.cancelToken.write() = Some(ct.clone());
        *self.isRunning.write() = true;

        let isRunning = self.isRunning.clone();
        let handle = tokio::spawn(async move {
            info!(address = %localAddr, "server started");

            let result = axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    ct.cancelled().await;
                })
                .await;
            if let Err(e) = result {
                error!(error = %e, "server error");
            }

            *isRunning.write() = false;
            info!("server stopped");
        });
        *self.handle.write() = Some(handle);

        Ok(localAddr)
    }

    /// Request shutdown without waiting
    pub fn stop(&self) {
        if let Some(ct) = self.cancelToken.write().take() {
            info!("stopping server");
            ct.cancel();
        }
    }

    /// Wait for the background server task to finish
    pub async fn join(&self) {
        let handle = self.handle.write().take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                error!(error = %e, "server task failed");
            }
        }
    }
}
