// Configuration models for TaskFlow
// Settings live in the frontmatter of ~/.taskflow/config.md; env vars override them

use serde::{Deserialize, Serialize};

use super::common::{Theme, ViewFilter};

/// All settings (stored in config.md, can be overridden from the environment)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: Theme,
    pub defaultView: ViewFilter,
    pub bindAddress: String,
    pub logLevel: String,
    pub newTaskHighlightMs: u64,
    pub deleteDelayMs: u64,
    pub corsEnabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            defaultView: ViewFilter::MyDay,
            bindAddress: "127.0.0.1:5000".to_string(),
            logLevel: "info".to_string(),
            newTaskHighlightMs: 500,
            deleteDelayMs: 300,
            corsEnabled: true,
        }
    }
}

/// Partial settings (all fields optional)
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SettingsOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaultView: Option<ViewFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bindAddress: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logLevel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newTaskHighlightMs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleteDelayMs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corsEnabled: Option<bool>,
}

impl SettingsOverride {
    /// Read overrides from `TASKFLOW_*` environment variables
    pub fn fromEnv() -> Self {
        Self::fromLookup(|key| std::env::var(key).ok())
    }

    /// Build overrides from any key lookup. Unparseable values are skipped.
    pub fn fromLookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Self {
            theme: get("TASKFLOW_THEME").and_then(|v| Theme::fromKey(&v)),
            defaultView: get("TASKFLOW_DEFAULT_VIEW").and_then(|v| ViewFilter::fromKey(&v)),
            bindAddress: get("TASKFLOW_BIND"),
            logLevel: get("TASKFLOW_LOG"),
            newTaskHighlightMs: get("TASKFLOW_NEW_TASK_MS").and_then(|v| v.parse().ok()),
            deleteDelayMs: get("TASKFLOW_DELETE_MS").and_then(|v| v.parse().ok()),
            corsEnabled: get("TASKFLOW_CORS").and_then(|v| parseFlag(&v)),
        }
    }
}

fn parseFlag(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Settings {
    /// Merge with override
    pub fn withOverride(&self, over: &SettingsOverride) -> Self {
        Self {
            theme: over.theme.unwrap_or(self.theme),
            defaultView: over.defaultView.unwrap_or(self.defaultView),
            bindAddress: over.bindAddress.clone().unwrap_or_else(|| self.bindAddress.clone()),
            logLevel: over.logLevel.clone().unwrap_or_else(|| self.logLevel.clone()),
            newTaskHighlightMs: over.newTaskHighlightMs.unwrap_or(self.newTaskHighlightMs),
            deleteDelayMs: over.deleteDelayMs.unwrap_or(self.deleteDelayMs),
            corsEnabled: over.corsEnabled.unwrap_or(self.corsEnabled),
        }
    }
}
