//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record persisted under the `todos` key.
//! - Keep the wire shape compatible with previously stored collections.
//!
//! # Invariants
//! - `id` is unique across the live collection.
//! - `text` is trimmed and never empty after create/edit.
//! - `created_at` never changes after creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier for a task, derived from creation time in epoch ms.
pub type TaskId = i64;

/// Validation failures for task write paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Text is empty or whitespace-only.
    EmptyText,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "task text cannot be empty"),
        }
    }
}

impl Error for TaskValidationError {}

/// Canonical task record.
///
/// Serialized with camelCase keys and ISO-8601 timestamps so stored data
/// stays readable by older clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub text: String,
    pub completed: bool,
    pub id: TaskId,
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "iso_millis")]
    pub deadline: DateTime<Utc>,
    /// Free-text label. Older collections omit the field entirely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Task {
    /// Builds a pending task, trimming `text` and dropping blank labels.
    ///
    /// # Errors
    /// - Returns `TaskValidationError::EmptyText` when `text` is blank.
    pub fn new(
        id: TaskId,
        text: &str,
        created_at: DateTime<Utc>,
        deadline: DateTime<Utc>,
        label: Option<&str>,
    ) -> Result<Self, TaskValidationError> {
        let text = normalize_text(text)?;
        Ok(Self {
            text,
            completed: false,
            id,
            created_at,
            deadline,
            label: label.and_then(normalize_label),
        })
    }

    /// Validates invariants that must hold for every stored task.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.text.trim().is_empty() {
            return Err(TaskValidationError::EmptyText);
        }
        Ok(())
    }

    /// Returns whether the task is past due and still open at `now`.
    pub fn is_overdue_at(&self, now: DateTime<Utc>) -> bool {
        self.deadline < now && !self.completed
    }
}

/// Trims task text and rejects blank input.
pub fn normalize_text(text: &str) -> Result<String, TaskValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(TaskValidationError::EmptyText);
    }
    Ok(trimmed.to_string())
}

/// Trims a label; blank labels map to `None`.
pub fn normalize_label(label: &str) -> Option<String> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// ISO-8601 timestamps with millisecond precision and a `Z` suffix.
pub(crate) mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(raw.trim())
            .map(|value| value.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }

    pub fn format(value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}
