// Task model for the in-memory store
// Field names are camelCase so the struct serializes straight to the UI's shape

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub type TaskId = u64;

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// A single to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
    pub important: bool,
    pub priority: Priority,
    pub dueDate: Option<NaiveDate>,
    pub notes: String,
    pub category: String,
    pub createdAt: DateTime<Utc>,
}

impl Task {
    /// Build a fresh task. `text` must already be trimmed and non-empty.
    pub fn new(id: TaskId, text: String, category: String, createdAt: DateTime<Utc>) -> Self {
        Self {
            id,
            text,
            completed: false,
            important: false,
            priority: Priority::default(),
            dueDate: None,
            notes: String::new(),
            category,
            createdAt,
        }
    }

    pub fn isDueOn(&self, day: NaiveDate) -> bool {
        self.dueDate == Some(day)
    }

    /// Case-insensitive substring match on text or notes.
    /// `queryLower` must already be lowercased.
    pub fn matchesQuery(&self, queryLower: &str) -> bool {
        self.text.to_lowercase().contains(queryLower)
            || self.notes.to_lowercase().contains(queryLower)
    }

    /// Apply a partial update. `id` and `createdAt` are not part of the patch.
    pub fn applyPatch(&mut self, patch: TaskPatch) {
        if let Some(text) = patch.text {
            let trimmed = text.trim();
            // text may never become blank
            if !trimmed.is_empty() {
                self.text = trimmed.to_string();
            }
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(important) = patch.important {
            self.important = important;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(dueDate) = patch.dueDate {
            self.dueDate = dueDate;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
    }
}

/// Partial task update (all fields optional).
///
/// `dueDate` is doubly optional: a missing key leaves the date alone, while
/// `null` or `""` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TaskPatch {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default)]
    pub important: Option<bool>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default, deserialize_with = "deserializeDueDate")]
    pub dueDate: Option<Option<NaiveDate>>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Parse a due date from `YYYY-MM-DD` or an RFC 3339 timestamp
pub fn parseDueDate(value: &str) -> Result<NaiveDate, String> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.date_naive())
        .map_err(|_| format!("invalid due date `{}`, expected YYYY-MM-DD", value))
}

fn deserializeDueDate<'de, D>(deserializer: D) -> Result<Option<Option<NaiveDate>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(Some(None)),
        Some(value) => parseDueDate(value)
            .map(|date| Some(Some(date)))
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Task {
        Task::new(7, "Buy milk".to_string(), "my-day".to_string(), Utc::now())
    }

    #[test]
    fn new_task_has_defaults() {
        let task = sample();
        assert!(!task.completed);
        assert!(!task.important);
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.dueDate, None);
        assert!(task.notes.is_empty());
    }

    #[test]
    fn task_serializes_with_camel_case_fields() {
        let mut task = sample();
        task.dueDate = NaiveDate::from_ymd_opt(2026, 10, 18);
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["dueDate"], "2026-10-18");
        assert_eq!(value["priority"], "medium");
        assert!(value.get("createdAt").is_some());
    }

    #[test]
    fn patch_distinguishes_missing_and_cleared_due_date() {
        let missing: TaskPatch = serde_json::from_str(r#"{"notes":"x"}"#).unwrap();
        assert_eq!(missing.dueDate, None);

        let cleared: TaskPatch = serde_json::from_str(r#"{"dueDate":null}"#).unwrap();
        assert_eq!(cleared.dueDate, Some(None));

        let blank: TaskPatch = serde_json::from_str(r#"{"dueDate":""}"#).unwrap();
        assert_eq!(blank.dueDate, Some(None));

        let set: TaskPatch = serde_json::from_str(r#"{"dueDate":"2026-10-18"}"#).unwrap();
        assert_eq!(set.dueDate, Some(NaiveDate::from_ymd_opt(2026, 10, 18)));
    }

    #[test]
    fn patch_accepts_rfc3339_due_dates() {
        let patch: TaskPatch =
            serde_json::from_str(r#"{"dueDate":"2026-10-18T09:30:00Z"}"#).unwrap();
        assert_eq!(patch.dueDate, Some(NaiveDate::from_ymd_opt(2026, 10, 18)));
    }

    #[test]
    fn patch_rejects_unknown_priority() {
        let result = serde_json::from_str::<TaskPatch>(r#"{"priority":"urgent"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn patch_ignores_id_and_created_at() {
        let mut task = sample();
        let before = task.createdAt;
        let patch: TaskPatch = serde_json::from_str(
            r#"{"id":99,"createdAt":"2000-01-01T00:00:00Z","text":"  Buy oat milk "}"#,
        )
        .unwrap();
        task.applyPatch(patch);
        assert_eq!(task.id, 7);
        assert_eq!(task.createdAt, before);
        assert_eq!(task.text, "Buy oat milk");
    }

    #[test]
    fn blank_text_in_patch_is_ignored() {
        let mut task = sample();
        task.applyPatch(TaskPatch {
            text: Some("   ".to_string()),
            priority: Some(Priority::High),
            ..TaskPatch::default()
        });
        assert_eq!(task.text, "Buy milk");
        assert_eq!(task.priority, Priority::High);
    }

    #[test]
    fn query_matches_notes_case_insensitively() {
        let mut task = sample();
        task.notes = "Semi-skimmed, from the CORNER shop".to_string();
        assert!(task.matchesQuery("corner"));
        assert!(task.matchesQuery("milk"));
        assert!(!task.matchesQuery("bread"));
    }
}
