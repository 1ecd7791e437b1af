//! Command dispatcher binding UI events to the task store.
//!
//! # Responsibility
//! - Translate UI commands into `TaskStore` calls.
//! - Re-render rows and calendar wholesale after each successful command.
//!
//! # Invariants
//! - A rejected command changes nothing and renders nothing.
//! - Rendered rows always reflect the latest persisted state.

use crate::clock::Clock;
use crate::model::task::{Task, TaskId};
use crate::repo::task_repo::TaskRepository;
use crate::service::task_store::{CreateTask, TaskStore, TaskStoreError};
use crate::view::filter::{self, FilterCriterion};
use crate::view::projector::{to_calendar_events, to_display_rows, DisplayRow};
use crate::view::render::{CalendarSink, RenderTarget};
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// User intent raised by the UI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Create(CreateTask),
    Delete(TaskId),
    Toggle(TaskId),
    EditText { id: TaskId, text: String },
    SetFilter(FilterCriterion),
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Self::Create(_) => "create",
            Self::Delete(_) => "delete",
            Self::Toggle(_) => "toggle",
            Self::EditText { .. } => "edit_text",
            Self::SetFilter(_) => "set_filter",
        }
    }
}

#[derive(Debug)]
pub enum AppError {
    Store(TaskStoreError),
}

impl AppError {
    /// Whether the error is user-correctable input (shown as a blocking notice).
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Store(TaskStoreError::Validation(_)))
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
        }
    }
}

impl From<TaskStoreError> for AppError {
    fn from(value: TaskStoreError) -> Self {
        Self::Store(value)
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Task list application: store plus its render collaborators.
pub struct TodoApp<R, C, T, K>
where
    R: TaskRepository,
    C: Clock,
    T: RenderTarget,
    K: CalendarSink,
{
    store: TaskStore<R, C>,
    filter: FilterCriterion,
    renderer: T,
    calendar: K,
}

impl<R, C, T, K> TodoApp<R, C, T, K>
where
    R: TaskRepository,
    C: Clock,
    T: RenderTarget,
    K: CalendarSink,
{
    pub fn new(store: TaskStore<R, C>, renderer: T, calendar: K) -> Self {
        Self {
            store,
            filter: FilterCriterion::All,
            renderer,
            calendar,
        }
    }

    /// Loads persisted state and performs the first full render.
    pub fn start(&mut self) {
        self.store.load();
        self.renderer.render_labels(self.store.labels());
        self.refresh();
    }

    /// Applies one command; returns the created task for `Command::Create`.
    ///
    /// # Errors
    /// - Validation and persistence failures from the store; nothing is
    ///   rendered in that case.
    pub fn dispatch(&mut self, command: Command) -> AppResult<Option<Task>> {
        let name = command.name();
        let result = match command {
            Command::Create(request) => {
                let labels_before = self.store.labels().len();
                self.store.create(request).map(|task| {
                    if self.store.labels().len() != labels_before {
                        self.renderer.render_labels(self.store.labels());
                    }
                    Some(task)
                })
            }
            Command::Delete(id) => self.store.delete(id).map(|()| None),
            Command::Toggle(id) => self.store.toggle_completed(id).map(|()| None),
            Command::EditText { id, text } => self.store.edit_text(id, &text).map(|()| None),
            Command::SetFilter(filter) => {
                self.filter = filter;
                Ok(None)
            }
        };

        match result {
            Ok(created) => {
                debug!("event=command module=app status=ok command={name}");
                self.refresh();
                Ok(created)
            }
            Err(err) => {
                warn!("event=command module=app status=rejected command={name} error={err}");
                Err(err.into())
            }
        }
    }

    /// Recomputes rows and calendar events from current state.
    pub fn refresh(&mut self) {
        let rows = self.rows();
        self.renderer.render_rows(&rows);
        self.calendar
            .replace_events(&to_calendar_events(self.store.all()));
    }

    /// Filtered, sorted and projected rows as of the clock's "now".
    pub fn rows(&self) -> Vec<DisplayRow> {
        let clock = self.store.clock();
        let now = clock.now();
        let visible = filter::apply(self.store.all(), self.filter, now);
        to_display_rows(&visible, now, &clock.zone())
    }

    pub fn filter(&self) -> FilterCriterion {
        self.filter
    }

    pub fn store(&self) -> &TaskStore<R, C> {
        &self.store
    }

    pub fn renderer(&self) -> &T {
        &self.renderer
    }

    pub fn calendar(&self) -> &K {
        &self.calendar
    }
}
