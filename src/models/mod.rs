// Models module for TaskFlow
// All fields use camelCase for consistency with the web UI

pub mod common;
pub mod config;
pub mod task;

pub use common::{Theme, ViewFilter};
pub use config::{Settings, SettingsOverride};
pub use task::{Priority, Task, TaskId, TaskPatch};
