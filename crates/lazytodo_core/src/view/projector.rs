//! Projections of task state for the row renderer and calendar widget.
//!
//! # Responsibility
//! - Turn filtered tasks into display rows with derived urgency.
//! - Turn the full collection into calendar events (wholesale, no diffing).
//! - Parse and bound the deadline input field.

use crate::model::task::{iso_millis, Task, TaskId};
use crate::view::priority::{classify, PriorityClass};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Numeric year, abbreviated month, numeric day, 2-digit hour and minute.
pub const DEADLINE_DISPLAY_FORMAT: &str = "%b %-d, %Y, %I:%M %p";
const DEADLINE_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";
const DEADLINE_INPUT_FORMAT_SECONDS: &str = "%Y-%m-%dT%H:%M:%S";

/// Renderer-facing projection of one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayRow {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
    pub deadline_formatted: String,
    pub priority_class: PriorityClass,
    pub is_overdue: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl DisplayRow {
    pub fn due_text(&self) -> String {
        format!("Due: {}", self.deadline_formatted)
    }

    /// `None` for unlabeled tasks.
    pub fn label_text(&self) -> Option<String> {
        self.label.as_deref().map(|label| format!("Label: {label}"))
    }
}

/// Calendar widget event. Serialized as `{title, start, allDay}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub title: String,
    pub start: String,
    pub all_day: bool,
}

/// Projects already filtered and sorted tasks into display rows.
pub fn to_display_rows<Tz>(tasks: &[Task], now: DateTime<Utc>, zone: &Tz) -> Vec<DisplayRow>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    tasks
        .iter()
        .map(|task| DisplayRow {
            id: task.id,
            text: task.text.clone(),
            completed: task.completed,
            deadline_formatted: format_deadline(task.deadline, zone),
            priority_class: classify(task.deadline, now),
            is_overdue: task.is_overdue_at(now),
            label: task.label.clone().filter(|label| !label.is_empty()),
        })
        .collect()
}

/// One timed event per task, in collection order.
pub fn to_calendar_events(tasks: &[Task]) -> Vec<CalendarEvent> {
    tasks.iter().map(to_calendar_event).collect()
}

pub fn to_calendar_event(task: &Task) -> CalendarEvent {
    CalendarEvent {
        title: task.text.clone(),
        start: iso_millis::format(&task.deadline),
        all_day: false,
    }
}

/// Renders `deadline` in the viewer's zone.
pub fn format_deadline<Tz>(deadline: DateTime<Utc>, zone: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    deadline
        .with_timezone(zone)
        .format(DEADLINE_DISPLAY_FORMAT)
        .to_string()
}

/// Lower bound for the deadline input, `YYYY-MM-DDTHH:MM` of `now` in UTC.
pub fn deadline_input_min(now: DateTime<Utc>) -> String {
    now.format(DEADLINE_INPUT_FORMAT).to_string()
}

/// Deadline input that could not be turned into an instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeadlineParseError {
    /// Not RFC 3339 and not `YYYY-MM-DDTHH:MM[:SS]`.
    Malformed(String),
    /// Wall time skipped by a zone transition.
    NonexistentLocalTime(String),
}

impl Display for DeadlineParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(raw) => write!(f, "invalid deadline `{raw}`"),
            Self::NonexistentLocalTime(raw) => {
                write!(f, "deadline `{raw}` does not exist in the local time zone")
            }
        }
    }
}

impl Error for DeadlineParseError {}

/// Parses deadline input; blank input means "use the default deadline".
///
/// Offset-less input is read as wall time in `zone`.
pub fn parse_deadline_input<Tz: TimeZone>(
    raw: &str,
    zone: &Tz,
) -> Result<Option<DateTime<Utc>>, DeadlineParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if let Ok(value) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(Some(value.with_timezone(&Utc)));
    }

    let naive = NaiveDateTime::parse_from_str(trimmed, DEADLINE_INPUT_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, DEADLINE_INPUT_FORMAT_SECONDS))
        .map_err(|_| DeadlineParseError::Malformed(trimmed.to_string()))?;
    zone.from_local_datetime(&naive)
        .earliest()
        .map(|value| Some(value.with_timezone(&Utc)))
        .ok_or_else(|| DeadlineParseError::NonexistentLocalTime(trimmed.to_string()))
}
