//! Core domain logic for LazyTodo.
//! This crate is the single source of truth for task-list invariants.

pub mod app;
pub mod clock;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use app::{AppError, AppResult, Command, TodoApp};
pub use clock::{end_of_local_day, Clock, FixedClock, SystemClock};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::label::LabelSet;
pub use model::task::{Task, TaskId, TaskValidationError};
pub use repo::kv_store::{KeyValueStore, KvError, KvResult, MemoryKvStore, SqliteKvStore};
pub use repo::task_repo::{KvTaskRepository, RepoError, RepoResult, TaskRepository};
pub use service::task_store::{CreateTask, StoreResult, TaskStore, TaskStoreError};
pub use view::filter::{FilterCriterion, FilterParseError};
pub use view::priority::{classify, PriorityClass};
pub use view::projector::{
    deadline_input_min, parse_deadline_input, to_calendar_events, to_display_rows,
    CalendarEvent, DeadlineParseError, DisplayRow,
};
pub use view::render::{CalendarSink, NoCalendar, RenderTarget};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
