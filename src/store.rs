// In-memory task store: the session's list of tasks plus the UI selections
// (current view, search query, theme) and the derived views over them.
//
// Every mutation is total: an unknown id or blank text is a silent no-op,
// reported only through the `Option`/`bool` return value.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Local, NaiveDate, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use tracing::debug;

use crate::models::{Task, TaskId, TaskPatch, Theme, ViewFilter};

/// Store shared between the API handlers and the transition timers
pub type SharedStore = Arc<RwLock<TaskStore>>;

/// Active/completed split of a view, used for the list header and the
/// collapsible "Completed" section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ViewSummary {
    pub active: usize,
    pub completed: usize,
}

#[derive(Debug)]
pub struct TaskStore {
    tasks: Vec<Task>,
    nextId: TaskId,
    filter: ViewFilter,
    searchQuery: String,
    theme: Theme,
    // Transient presentation flags, never part of `Task`
    fresh: HashSet<TaskId>,
    deleting: HashSet<TaskId>,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    pub fn new() -> Self {
        Self::withPreferences(ViewFilter::default(), Theme::default())
    }

    pub fn withPreferences(filter: ViewFilter, theme: Theme) -> Self {
        Self {
            tasks: Vec::new(),
            nextId: 1,
            filter,
            searchQuery: String::new(),
            theme,
            fresh: HashSet::new(),
            deleting: HashSet::new(),
        }
    }

    pub fn shared(self) -> SharedStore {
        Arc::new(RwLock::new(self))
    }

    // ============================================
    // MUTATIONS
    // ============================================

    /// Create a task at the end of the list.
    ///
    /// Returns `None` (and changes nothing) when `text` is blank after
    /// trimming. The new task is flagged "just created" until
    /// [`TaskStore::clearNewFlag`] runs.
    pub fn create(&mut self, text: &str, category: &str) -> Option<Task> {
        let text = text.trim();
        if text.is_empty() {
            debug!("ignoring create with blank text");
            return None;
        }

        let id = self.nextId;
        self.nextId += 1;

        let task = Task::new(id, text.to_string(), category.to_string(), Utc::now());
        self.tasks.push(task.clone());
        self.fresh.insert(id);
        debug!(id, category, "task created");
        Some(task)
    }

    /// Create a task in the category implied by the current view
    pub fn createInView(&mut self, text: &str) -> Option<Task> {
        let category = self.filter.defaultCategory();
        self.create(text, category)
    }

    pub fn toggleCompleted(&mut self, id: TaskId) -> Option<Task> {
        let task = self.findMut(id)?;
        task.completed = !task.completed;
        Some(task.clone())
    }

    pub fn toggleImportant(&mut self, id: TaskId) -> Option<Task> {
        let task = self.findMut(id)?;
        task.important = !task.important;
        Some(task.clone())
    }

    pub fn update(&mut self, id: TaskId, patch: TaskPatch) -> Option<Task> {
        let task = self.findMut(id)?;
        task.applyPatch(patch);
        Some(task.clone())
    }

    /// First half of a delete: flag the task so the UI can animate it out.
    /// The task stays in the list until [`TaskStore::remove`].
    pub fn markDeleting(&mut self, id: TaskId) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        self.deleting.insert(id);
        true
    }

    /// Authoritative removal. Also drops any transient flags for `id`.
    pub fn remove(&mut self, id: TaskId) -> Option<Task> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        self.fresh.remove(&id);
        self.deleting.remove(&id);
        let task = self.tasks.remove(index);
        debug!(id, "task removed");
        Some(task)
    }

    pub fn clearNewFlag(&mut self, id: TaskId) -> bool {
        self.fresh.remove(&id)
    }

    pub fn setFilter(&mut self, filter: ViewFilter) {
        self.filter = filter;
    }

    pub fn setSearchQuery(&mut self, query: impl Into<String>) {
        self.searchQuery = query.into();
    }

    pub fn toggleTheme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    // ============================================
    // ACCESSORS
    // ============================================

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// All tasks in insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn isEmpty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn filter(&self) -> ViewFilter {
        self.filter
    }

    pub fn searchQuery(&self) -> &str {
        &self.searchQuery
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn isNew(&self, id: TaskId) -> bool {
        self.fresh.contains(&id)
    }

    pub fn isDeleting(&self, id: TaskId) -> bool {
        self.deleting.contains(&id)
    }

    // ============================================
    // DERIVED VIEWS
    // ============================================

    /// Tasks of `filter` matching `query`, sorted for display
    pub fn view(&self, filter: ViewFilter, query: &str) -> Vec<Task> {
        self.viewOn(filter, query, today())
    }

    pub fn viewOn(&self, filter: ViewFilter, query: &str, today: NaiveDate) -> Vec<Task> {
        let queryLower = query.to_lowercase();

        let mut tasks: Vec<Task> = self
            .tasks
            .iter()
            .filter(|t| query.is_empty() || t.matchesQuery(&queryLower))
            .filter(|t| isMember(t, filter, today))
            .cloned()
            .collect();

        tasks.sort_by(displayOrder);
        tasks
    }

    /// View for the current filter and search query
    pub fn currentView(&self) -> Vec<Task> {
        self.view(self.filter, &self.searchQuery)
    }

    /// Sidebar badge for `filter`; search is ignored.
    /// Counts open members, or finished members for the Completed view.
    pub fn count(&self, filter: ViewFilter) -> usize {
        self.countOn(filter, today())
    }

    pub fn countOn(&self, filter: ViewFilter, today: NaiveDate) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.completed == filter.countsCompleted() && isMember(t, filter, today))
            .count()
    }

    pub fn summary(&self, filter: ViewFilter, query: &str) -> ViewSummary {
        summarize(&self.view(filter, query))
    }

    fn findMut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }
}

/// Current local calendar day
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn summarize(tasks: &[Task]) -> ViewSummary {
    let completed = tasks.iter().filter(|t| t.completed).count();
    ViewSummary {
        active: tasks.len() - completed,
        completed,
    }
}

fn isMember(task: &Task, filter: ViewFilter, today: NaiveDate) -> bool {
    match filter {
        ViewFilter::MyDay => task.category == ViewFilter::MyDay.key() || task.isDueOn(today),
        ViewFilter::Important => task.important,
        ViewFilter::Planned => task.dueDate.is_some(),
        ViewFilter::All => true,
        ViewFilter::Active => !task.completed,
        ViewFilter::Completed => task.completed,
    }
}

// Incomplete before completed, important before not, newest first.
// Id breaks ties between tasks created within the same clock tick.
fn displayOrder(a: &Task, b: &Task) -> Ordering {
    a.completed
        .cmp(&b.completed)
        .then_with(|| b.important.cmp(&a.important))
        .then_with(|| b.createdAt.cmp(&a.createdAt))
        .then_with(|| b.id.cmp(&a.id))
}
