// Common types shared by the task store, the API and the config file
// Keys match the ones the web UI sends (kebab-case views, lowercase themes)

use serde::{Deserialize, Serialize};

/// Named view over the task list, selected from the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ViewFilter {
    #[default]
    MyDay,
    Important,
    Planned,
    All,
    Active,
    Completed,
}

impl ViewFilter {
    /// Sidebar order
    pub const ALL: [ViewFilter; 6] = [
        Self::MyDay,
        Self::Important,
        Self::Planned,
        Self::All,
        Self::Active,
        Self::Completed,
    ];

    pub fn fromKey(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().as_str() {
            "my-day" => Some(Self::MyDay),
            "important" => Some(Self::Important),
            "planned" => Some(Self::Planned),
            "all" => Some(Self::All),
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::MyDay => "my-day",
            Self::Important => "important",
            Self::Planned => "planned",
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    /// Display name shown in the sidebar and the list header
    pub fn name(&self) -> &'static str {
        match self {
            Self::MyDay => "My Day",
            Self::Important => "Important",
            Self::Planned => "Planned",
            Self::All => "All Tasks",
            Self::Active => "Active",
            Self::Completed => "Completed",
        }
    }

    /// Category given to tasks created while this view is open.
    /// Views that are not lists of their own file new tasks under My Day.
    pub fn defaultCategory(&self) -> &'static str {
        match self {
            Self::All | Self::Active | Self::Completed => Self::MyDay.key(),
            other => other.key(),
        }
    }

    /// The sidebar badge of the Completed view counts finished tasks;
    /// every other badge counts what is still open.
    pub fn countsCompleted(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Color scheme; purely cosmetic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn fromKey(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_keys_round_trip_through_from_key() {
        for view in ViewFilter::ALL {
            assert_eq!(ViewFilter::fromKey(view.key()), Some(view));
        }
        assert_eq!(ViewFilter::fromKey(" My-Day "), Some(ViewFilter::MyDay));
        assert_eq!(ViewFilter::fromKey("someday"), None);
    }

    #[test]
    fn views_without_a_list_default_to_my_day() {
        assert_eq!(ViewFilter::All.defaultCategory(), "my-day");
        assert_eq!(ViewFilter::Completed.defaultCategory(), "my-day");
        assert_eq!(ViewFilter::Planned.defaultCategory(), "planned");
        assert_eq!(ViewFilter::Important.defaultCategory(), "important");
    }

    #[test]
    fn only_completed_view_counts_finished_tasks() {
        for view in ViewFilter::ALL {
            assert_eq!(view.countsCompleted(), view == ViewFilter::Completed);
        }
    }

    #[test]
    fn view_filter_serializes_as_kebab_case() {
        let json = serde_json::to_string(&ViewFilter::MyDay).unwrap();
        assert_eq!(json, "\"my-day\"");
    }

    #[test]
    fn theme_toggles_back_and_forth() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
    }
}
