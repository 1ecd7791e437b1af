//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose task-list commands and projections to Dart via FRB.
//! - Bind UI events (submit, checkbox, double-click edit, delete, filter
//!   select) to `TaskStore` commands.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every call loads persisted state, applies at most one command, and
//!   persists before returning.

use lazytodo_core::db::open_db;
use lazytodo_core::{
    core_version as core_version_inner, deadline_input_min, init_logging as init_logging_inner,
    parse_deadline_input, ping as ping_inner, to_calendar_events, to_display_rows, Clock,
    CreateTask, FilterCriterion, KvTaskRepository, SqliteKvStore, StoreResult, SystemClock,
    TaskId, TaskStore,
};
use std::path::PathBuf;
use std::sync::OnceLock;

const ENTRY_DB_FILE_NAME: &str = "lazytodo_entry.sqlite3";
const ENTRY_DB_PATH_ENV: &str = "LAZYTODO_DB_PATH";
static ENTRY_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

type EntryStore<'conn> = TaskStore<KvTaskRepository<SqliteKvStore<'conn>>, SystemClock>;

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Renderable task row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryTaskRow {
    pub id: i64,
    pub text: String,
    pub completed: bool,
    /// Pre-rendered `Due: ...` line.
    pub due_text: String,
    /// `overdue|urgent|upcoming|relaxed`.
    pub priority_class: String,
    pub is_overdue: bool,
    pub label: Option<String>,
}

/// List response envelope for the task list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryListResponse {
    pub ok: bool,
    pub items: Vec<EntryTaskRow>,
    /// Effective filter (`all|completed|pending|overdue`).
    pub applied_filter: String,
    pub message: String,
}

/// Calendar event in the widget's `{title, start, allDay}` shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryCalendarEvent {
    pub title: String,
    /// ISO-8601 UTC instant.
    pub start: String,
    pub all_day: bool,
}

/// Generic action response envelope for command flows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Affected task id, when known.
    pub task_id: Option<i64>,
    /// Human-readable response message; shown as a blocking notice on failure.
    pub message: String,
}

impl EntryActionResponse {
    fn success(message: impl Into<String>, task_id: TaskId) -> Self {
        Self {
            ok: true,
            task_id: Some(task_id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            task_id: None,
            message: message.into(),
        }
    }
}

/// Creates a task from the add form.
///
/// # FFI contract
/// - `deadline`: empty for end of today, `YYYY-MM-DDTHH:MM` local time, or RFC 3339.
/// - `label`: empty for none; a new label joins the label list.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_create_task(text: String, deadline: String, label: String) -> EntryActionResponse {
    if text.trim().is_empty() {
        return EntryActionResponse::failure("Please enter a task");
    }
    let deadline = match parse_deadline_input(&deadline, &SystemClock.zone()) {
        Ok(value) => value,
        Err(err) => {
            return EntryActionResponse::failure(format!("Please enter a valid deadline: {err}"))
        }
    };

    let request = CreateTask {
        text,
        deadline,
        label: Some(label),
    };
    match with_entry_store(|store| store.create(request).map(|task| task.id)) {
        Ok(task_id) => EntryActionResponse::success("Task created.", task_id),
        Err(err) => EntryActionResponse::failure(format!("entry_create_task failed: {err}")),
    }
}

/// Deletes a task; unknown ids succeed without changes.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_delete_task(task_id: i64) -> EntryActionResponse {
    match with_entry_store(|store| store.delete(task_id)) {
        Ok(()) => EntryActionResponse::success("Task deleted.", task_id),
        Err(err) => EntryActionResponse::failure(format!("entry_delete_task failed: {err}")),
    }
}

/// Flips completion for a task; unknown ids succeed without changes.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_toggle_task(task_id: i64) -> EntryActionResponse {
    match with_entry_store(|store| store.toggle_completed(task_id)) {
        Ok(()) => EntryActionResponse::success("Task updated.", task_id),
        Err(err) => EntryActionResponse::failure(format!("entry_toggle_task failed: {err}")),
    }
}

/// Replaces task text; blank text is rejected and nothing changes.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_edit_task(task_id: i64, text: String) -> EntryActionResponse {
    match with_entry_store(|store| store.edit_text(task_id, &text)) {
        Ok(()) => EntryActionResponse::success("Task updated.", task_id),
        Err(err) => EntryActionResponse::failure(format!("entry_edit_task failed: {err}")),
    }
}

/// Lists rows for the selected filter, sorted by deadline.
///
/// An unknown filter value falls back to `all`; the message carries a warning.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_list_tasks(filter: String) -> EntryListResponse {
    let (filter, notice) = match filter.parse::<FilterCriterion>() {
        Ok(filter) => (filter, None),
        Err(err) => {
            log::warn!("event=entry_list_tasks module=ffi status=fallback filter=all error={err}");
            (
                FilterCriterion::All,
                Some(format!("{err}; showing all tasks.")),
            )
        }
    };

    let listed = with_entry_store(|store| {
        let clock = store.clock();
        let now = clock.now();
        let visible = lazytodo_core::view::filter::apply(store.all(), filter, now);
        Ok(to_display_rows(&visible, now, &clock.zone()))
    });

    match listed {
        Ok(rows) => {
            let items = rows
                .into_iter()
                .map(|row| EntryTaskRow {
                    id: row.id,
                    due_text: row.due_text(),
                    priority_class: row.priority_class.as_str().to_string(),
                    text: row.text,
                    completed: row.completed,
                    is_overdue: row.is_overdue,
                    label: row.label,
                })
                .collect::<Vec<_>>();
            let mut message = if items.is_empty() {
                "No tasks.".to_string()
            } else {
                format!("{} task(s).", items.len())
            };
            if let Some(notice) = notice {
                message = format!("{notice} {message}");
            }
            EntryListResponse {
                ok: true,
                items,
                applied_filter: filter.as_str().to_string(),
                message,
            }
        }
        Err(err) => EntryListResponse {
            ok: false,
            items: Vec::new(),
            applied_filter: filter.as_str().to_string(),
            message: format!("entry_list_tasks failed: {err}"),
        },
    }
}

/// Known labels in insertion order; empty on storage failure.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_list_labels() -> Vec<String> {
    with_entry_store(|store| Ok(store.labels().to_vec())).unwrap_or_else(|err| {
        log::warn!("event=entry_list_labels module=ffi status=error error={err}");
        Vec::new()
    })
}

/// Full calendar event list; the widget replaces its events wholesale.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_calendar_events() -> Vec<EntryCalendarEvent> {
    let events = with_entry_store(|store| Ok(to_calendar_events(store.all())));
    match events {
        Ok(events) => events
            .into_iter()
            .map(|event| EntryCalendarEvent {
                title: event.title,
                start: event.start,
                all_day: event.all_day,
            })
            .collect(),
        Err(err) => {
            log::warn!("event=entry_calendar_events module=ffi status=error error={err}");
            Vec::new()
        }
    }
}

/// Minimum value for the deadline input field, fixed at call time.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_deadline_min() -> String {
    deadline_input_min(SystemClock.now())
}

fn resolve_entry_db_path() -> PathBuf {
    ENTRY_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(ENTRY_DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(ENTRY_DB_FILE_NAME)
        })
        .clone()
}

fn with_entry_store<T>(f: impl FnOnce(&mut EntryStore<'_>) -> StoreResult<T>) -> Result<T, String> {
    let conn = open_db(resolve_entry_db_path()).map_err(|err| format!("entry DB open failed: {err}"))?;
    let mut store = TaskStore::new(KvTaskRepository::new(SqliteKvStore::new(&conn)));
    store.load();
    f(&mut store).map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, entry_calendar_events, entry_create_task, entry_deadline_min,
        entry_delete_task, entry_edit_task, entry_list_labels, entry_list_tasks,
        entry_toggle_task, init_logging, ping,
    };
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_bad_input() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
        assert!(!init_logging("verbose".to_string(), "tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn create_rejects_blank_text_with_notice() {
        let response = entry_create_task("   ".to_string(), String::new(), String::new());
        assert!(!response.ok);
        assert_eq!(response.message, "Please enter a task");
    }

    #[test]
    fn create_rejects_malformed_deadline() {
        let response = entry_create_task(
            unique_token("bad-deadline"),
            "tomorrow-ish".to_string(),
            String::new(),
        );
        assert!(!response.ok);
        assert!(response.message.contains("deadline"));
    }

    #[test]
    fn created_task_flows_through_list_edit_toggle_and_delete() {
        let text = unique_token("entry-task");
        let label = unique_token("label");
        let created = entry_create_task(text.clone(), "2099-01-01T09:00".to_string(), label.clone());
        assert!(created.ok, "{}", created.message);
        let task_id = created.task_id.expect("create should return task_id");

        assert!(entry_list_labels().contains(&label));
        assert!(entry_calendar_events().iter().any(|event| event.title == text));

        let listed = entry_list_tasks("pending".to_string());
        assert!(listed.ok, "{}", listed.message);
        let row = listed
            .items
            .iter()
            .find(|row| row.id == task_id)
            .expect("created task should be listed");
        assert_eq!(row.priority_class, "relaxed");
        assert!(row.due_text.starts_with("Due: "));
        assert_eq!(row.label.as_deref(), Some(label.as_str()));

        let blank_edit = entry_edit_task(task_id, "  ".to_string());
        assert!(!blank_edit.ok);

        let renamed = format!("{text}-renamed");
        assert!(entry_edit_task(task_id, renamed.clone()).ok);
        assert!(entry_toggle_task(task_id).ok);

        let completed = entry_list_tasks("completed".to_string());
        let row = completed
            .items
            .iter()
            .find(|row| row.id == task_id)
            .expect("toggled task should be completed");
        assert_eq!(row.text, renamed);

        assert!(entry_delete_task(task_id).ok);
        assert!(entry_delete_task(task_id).ok);
        assert!(entry_list_tasks("all".to_string())
            .items
            .iter()
            .all(|row| row.id != task_id));
    }

    #[test]
    fn unknown_filter_falls_back_to_all_with_warning() {
        let text = unique_token("fallback-task");
        let created = entry_create_task(text.clone(), "2099-01-01T09:00".to_string(), String::new());
        assert!(created.ok, "{}", created.message);

        let response = entry_list_tasks("someday".to_string());
        assert!(response.ok, "{}", response.message);
        assert_eq!(response.applied_filter, "all");
        assert!(response.message.contains("someday"));
        assert!(response.message.contains("showing all tasks"));
        assert!(response.items.iter().any(|row| row.text == text));

        assert!(entry_delete_task(created.task_id.expect("create should return task_id")).ok);
    }

    #[test]
    fn deadline_min_has_minute_precision() {
        assert_eq!(entry_deadline_min().len(), "2026-10-18T07:05".len());
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
