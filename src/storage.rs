// Session storage for TaskFlow
// Tasks are kept in memory only; the one file on disk is the settings file
// (~/.taskflow/config.md, YAML frontmatter + free-form markdown body)

use parking_lot::RwLock;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::models::{Settings, SettingsOverride, Task, TaskId};
use crate::store::{SharedStore, TaskStore};
use crate::transitions::Transitions;

// ============================================
// PATH HELPERS
// ============================================

/// Global config directory (~/.taskflow/)
pub fn globalConfigDir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".taskflow"))
}

/// Global config file path
pub fn globalConfigPath() -> Option<PathBuf> {
    globalConfigDir().map(|dir| dir.join("config.md"))
}

// ============================================
// FRONTMATTER
// ============================================

/// Split `---` delimited YAML frontmatter from a markdown document and
/// deserialize it. Returns the parsed header and the trimmed body.
pub fn parseFrontmatter<T: serde::de::DeserializeOwned>(content: &str) -> Result<(T, String), String> {
    let rest = content
        .trim_start()
        .strip_prefix("---")
        .ok_or("missing frontmatter opening `---`")?;
    let end = rest.find("\n---").ok_or("missing frontmatter closing `---`")?;

    let yaml = rest[..end].trim();
    let body = rest[end + 4..].trim().to_string();

    // An empty header means "all defaults"
    let header = if yaml.is_empty() { "{}" } else { yaml };
    let frontmatter = serde_yaml::from_str(header).map_err(|e| format!("YAML error: {}", e))?;
    Ok((frontmatter, body))
}

/// Serialize frontmatter + body to markdown
pub fn toMarkdown<T: serde::Serialize>(frontmatter: &T, body: &str) -> Result<String, String> {
    let yaml = serde_yaml::to_string(frontmatter).map_err(|e| format!("YAML error: {}", e))?;
    Ok(format!("---\n{}---\n\n{}\n", yaml, body.trim_end()))
}

const CONFIG_BODY: &str = "# TaskFlow\n\n\
Settings live in the header above. Environment variables (`TASKFLOW_THEME`,\n\
`TASKFLOW_DEFAULT_VIEW`, `TASKFLOW_BIND`, `TASKFLOW_LOG`, `TASKFLOW_NEW_TASK_MS`,\n\
`TASKFLOW_DELETE_MS`, `TASKFLOW_CORS`) take precedence over this file.";

// ============================================
// CONFIG FILE
// ============================================

/// Load settings from `path`.
///
/// A missing file yields defaults and is written out so the user has
/// something to edit. A broken file yields defaults and a warning.
pub fn loadConfig(path: &Path) -> Settings {
    if !path.exists() {
        info!(path = %path.display(), "config file not found, writing defaults");
        let settings = Settings::default();
        if let Err(e) = saveConfig(path, &settings) {
            warn!(path = %path.display(), error = %e, "failed to write default config");
        }
        return settings;
    }

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read config, using defaults");
            return Settings::default();
        }
    };
    debug!(path = %path.display(), bytes = content.len(), "loaded config file");

    match parseFrontmatter::<Settings>(&content) {
        Ok((settings, _body)) => settings,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to parse config, using defaults");
            Settings::default()
        }
    }
}

pub fn saveConfig(path: &Path, settings: &Settings) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| e.to_string())?;
    }
    let content = toMarkdown(settings, CONFIG_BODY)?;
    fs::write(path, content).map_err(|e| e.to_string())
}

/// Settings from the global config file merged with env overrides
pub fn loadSettings() -> Settings {
    let base = match globalConfigPath() {
        Some(path) => loadConfig(&path),
        None => {
            warn!("no home directory, using default settings");
            Settings::default()
        }
    };
    base.withOverride(&SettingsOverride::fromEnv())
}

// ============================================
// STORAGE STATE
// ============================================

/// Session state shared by every request handler
pub struct Storage {
    pub settings: RwLock<Settings>,
    pub store: SharedStore,
    pub transitions: Transitions,
}

impl Storage {
    pub fn new(settings: Settings) -> Self {
        let store = TaskStore::withPreferences(settings.defaultView, settings.theme).shared();
        let transitions = Transitions::new(
            store.clone(),
            Duration::from_millis(settings.newTaskHighlightMs),
            Duration::from_millis(settings.deleteDelayMs),
        );
        debug!(
            defaultView = settings.defaultView.key(),
            newTaskHighlightMs = settings.newTaskHighlightMs,
            deleteDelayMs = settings.deleteDelayMs,
            "storage initialized"
        );

        Self {
            settings: RwLock::new(settings),
            store,
            transitions,
        }
    }

    /// Create a task and schedule its highlight clear.
    /// Without a category the current view decides where the task goes.
    pub fn createTask(&self, text: &str, category: Option<&str>) -> Option<Task> {
        let created = {
            let mut store = self.store.write();
            match category.map(str::trim).filter(|c| !c.is_empty()) {
                Some(category) => store.create(text, category),
                None => store.createInView(text),
            }
        }?;
        self.transitions.scheduleNewFlagClear(created.id);
        info!(id = created.id, category = %created.category, "created task");
        Some(created)
    }

    /// Flag a task as deleting and schedule its removal.
    /// Returns false when the task does not exist. A task already on its way
    /// out keeps its original removal deadline.
    pub fn deleteTask(&self, id: TaskId) -> bool {
        {
            let mut store = self.store.write();
            if store.isDeleting(id) {
                debug!(id, "delete ignored, removal already pending");
                return true;
            }
            if !store.markDeleting(id) {
                debug!(id, "delete ignored, task not found");
                return false;
            }
        }
        self.transitions.scheduleRemoval(id);
        info!(id, "deleting task");
        true
    }

    pub fn shutdown(&self) {
        self.transitions.cancelAll();
    }
}

pub type StorageState = Arc<Storage>;

/// Initialize shared storage from resolved settings
pub fn initStorage(settings: Settings) -> StorageState {
    Arc::new(Storage::new(settings))
}
