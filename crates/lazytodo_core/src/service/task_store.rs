//! Authoritative in-memory task list.
//!
//! # Responsibility
//! - Own the task collection and label set exclusively.
//! - Validate, mutate and persist on every command.
//!
//! # Invariants
//! - Task ids are unique for the lifetime of the store, even when the clock
//!   does not advance between creations.
//! - The new task collection and label set are persisted before they
//!   replace the in-memory ones; a failed write leaves state untouched.
//! - Missing ids are no-ops, not errors.

use crate::clock::{end_of_local_day, Clock, SystemClock};
use crate::model::label::LabelSet;
use crate::model::task::{normalize_text, Task, TaskId, TaskValidationError};
use crate::repo::task_repo::{RepoError, TaskRepository};
use chrono::{DateTime, Utc};
use log::{error, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Error for task store commands.
#[derive(Debug)]
pub enum TaskStoreError {
    /// User input rejected; nothing changed.
    Validation(TaskValidationError),
    /// The storage medium rejected the write; nothing changed.
    Persistence(RepoError),
}

impl Display for TaskStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Persistence(err) => write!(f, "failed to persist tasks: {err}"),
        }
    }
}

impl Error for TaskStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Persistence(err) => Some(err),
        }
    }
}

impl From<TaskValidationError> for TaskStoreError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for TaskStoreError {
    fn from(value: RepoError) -> Self {
        Self::Persistence(value)
    }
}

pub type StoreResult<T> = Result<T, TaskStoreError>;

/// Input for `TaskStore::create`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateTask {
    pub text: String,
    /// `None` means "end of today" in the viewer's time zone.
    pub deadline: Option<DateTime<Utc>>,
    pub label: Option<String>,
}

impl CreateTask {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Sole mutator of tasks and labels.
pub struct TaskStore<R: TaskRepository, C: Clock = SystemClock> {
    repo: R,
    clock: C,
    tasks: Vec<Task>,
    labels: LabelSet,
    last_issued_id: Option<TaskId>,
}

impl<R: TaskRepository> TaskStore<R, SystemClock> {
    /// Creates an empty store on the system clock. Call `load` to hydrate.
    pub fn new(repo: R) -> Self {
        Self::with_clock(repo, SystemClock)
    }
}

impl<R: TaskRepository, C: Clock> TaskStore<R, C> {
    /// Creates an empty store with an injected clock.
    pub fn with_clock(repo: R, clock: C) -> Self {
        Self {
            repo,
            clock,
            tasks: Vec::new(),
            labels: LabelSet::new(),
            last_issued_id: None,
        }
    }

    /// Replaces in-memory state with the persisted collections.
    ///
    /// Never fails. Stored tasks with blank text or an already-seen id are
    /// dropped.
    pub fn load(&mut self) {
        let mut seen = HashSet::new();
        let mut dropped = 0usize;
        let tasks = self
            .repo
            .load_tasks()
            .into_iter()
            .filter(|task| {
                let keep = task.validate().is_ok() && seen.insert(task.id);
                if !keep {
                    dropped += 1;
                }
                keep
            })
            .collect::<Vec<_>>();
        if dropped > 0 {
            warn!("event=store_load module=store status=recovered dropped={dropped}");
        }

        self.tasks = tasks;
        self.labels = LabelSet::from_names(self.repo.load_labels());
        self.last_issued_id = self.tasks.iter().map(|task| task.id).max();
        info!(
            "event=store_load module=store status=ok tasks={} labels={}",
            self.tasks.len(),
            self.labels.len()
        );
    }

    /// Creates and persists a task.
    ///
    /// A novel non-blank label joins the label set. The label set is written
    /// first, then the task collection.
    ///
    /// # Errors
    /// - `Validation` when the trimmed text is empty.
    /// - `Persistence` when either write fails; neither the task nor the
    ///   label is kept.
    pub fn create(&mut self, request: CreateTask) -> StoreResult<Task> {
        let text = normalize_text(&request.text)?;
        let now = self.clock.now();
        let deadline = request
            .deadline
            .unwrap_or_else(|| end_of_local_day(now, &self.clock.zone()));
        let id = self.next_id(now);
        let task = Task::new(id, &text, now, deadline, request.label.as_deref())?;

        let next_labels = match task.label.as_deref() {
            Some(label) if !self.labels.contains(label) => {
                let mut next_labels = self.labels.clone();
                next_labels.insert(label);
                if let Err(err) = self.repo.save_labels(&next_labels) {
                    error!(
                        "event=label_create module=store status=error task_id={id} error_code=persist_failed error={err}"
                    );
                    return Err(err.into());
                }
                Some(next_labels)
            }
            _ => None,
        };

        let mut next = self.tasks.clone();
        next.push(task.clone());
        if let Err(err) = self.commit_tasks(next, "task_create", id) {
            if let Some(next_labels) = next_labels {
                self.restore_labels(next_labels);
            }
            return Err(err);
        }
        self.last_issued_id = Some(id);

        if let Some(next_labels) = next_labels {
            self.labels = next_labels;
            info!(
                "event=label_create module=store status=ok task_id={id} labels={}",
                self.labels.len()
            );
        }

        Ok(task)
    }

    /// Removes the task with `id`, if any, and persists.
    pub fn delete(&mut self, id: TaskId) -> StoreResult<()> {
        let next = self
            .tasks
            .iter()
            .filter(|task| task.id != id)
            .cloned()
            .collect();
        self.commit_tasks(next, "task_delete", id)
    }

    /// Flips `completed` on the task with `id`, if any, and persists.
    pub fn toggle_completed(&mut self, id: TaskId) -> StoreResult<()> {
        let mut next = self.tasks.clone();
        if let Some(task) = next.iter_mut().find(|task| task.id == id) {
            task.completed = !task.completed;
        }
        self.commit_tasks(next, "task_toggle", id)
    }

    /// Replaces the text of the task with `id`, if any, and persists.
    ///
    /// # Errors
    /// - `Validation` when the trimmed text is empty; stored text is kept.
    pub fn edit_text(&mut self, id: TaskId, new_text: &str) -> StoreResult<()> {
        let text = normalize_text(new_text)?;
        let mut next = self.tasks.clone();
        if let Some(task) = next.iter_mut().find(|task| task.id == id) {
            task.text = text;
        }
        self.commit_tasks(next, "task_edit", id)
    }

    /// All tasks in insertion order.
    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Known labels in insertion order.
    pub fn labels(&self) -> &[String] {
        self.labels.as_slice()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    fn next_id(&self, now: DateTime<Utc>) -> TaskId {
        let floor = self
            .tasks
            .iter()
            .map(|task| task.id)
            .chain(self.last_issued_id)
            .max()
            .map_or(TaskId::MIN, |max| max.saturating_add(1));
        now.timestamp_millis().max(floor)
    }

    /// Rewrites the previous label set after a rejected task write. If that
    /// also fails, memory adopts `written` so it matches what is stored.
    fn restore_labels(&mut self, written: LabelSet) {
        match self.repo.save_labels(&self.labels) {
            Ok(()) => warn!(
                "event=label_create module=store status=rolled_back labels={}",
                self.labels.len()
            ),
            Err(err) => {
                error!(
                    "event=label_create module=store status=error error_code=rollback_failed error={err}"
                );
                self.labels = written;
            }
        }
    }

    fn commit_tasks(&mut self, next: Vec<Task>, event: &'static str, id: TaskId) -> StoreResult<()> {
        if let Err(err) = self.repo.save_tasks(&next) {
            error!(
                "event={event} module=store status=error task_id={id} error_code=persist_failed error={err}"
            );
            return Err(err.into());
        }
        let changed = next != self.tasks;
        self.tasks = next;
        info!(
            "event={event} module=store status=ok task_id={id} changed={changed} total={}",
            self.tasks.len()
        );
        Ok(())
    }
}
