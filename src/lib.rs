// Allow non-snake_case names for JSON serialization compatibility with the web UI
#![allow(non_snake_case)]

pub mod commands;
pub mod logging;
pub mod models;
pub mod server;
pub mod storage;
pub mod store;
pub mod transitions;

pub use models::{Priority, Settings, SettingsOverride, Task, TaskId, TaskPatch, Theme, ViewFilter};
pub use server::{createRouter, ServerManager};
pub use storage::{initStorage, Storage, StorageState};
pub use store::{SharedStore, TaskStore, ViewSummary};
pub use transitions::{TransitionKind, Transitions};

use tracing::{info, warn};

/// Boot the session: logging, settings, storage, HTTP server.
/// Returns when Ctrl-C is received and the server has drained.
pub async fn run() -> Result<(), String> {
    logging::initLogging();
    let settings = storage::loadSettings();
    if let Err(e) = logging::applyLevel(&settings.logLevel) {
        warn!(error = %e, "keeping the startup log level");
    }
    info!(
        version = env!("CARGO_PKG_VERSION"),
        bind = %settings.bindAddress,
        defaultView = settings.defaultView.key(),
        "starting taskflow"
    );

    let bindAddress = settings.bindAddress.clone();
    let storage = initStorage(settings);
    let manager = ServerManager::new();
    manager.start(storage.clone(), &bindAddress).await?;

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| format!("Failed to listen for Ctrl-C: {}", e))?;

    manager.stop();
    manager.join().await;
    storage.shutdown();
    Ok(())
}
