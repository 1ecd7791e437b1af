//! Filter and ordering of the task list for display.
//!
//! # Invariants
//! - Overdue state is evaluated against `now` on every call.
//! - Output is sorted by deadline with a stable sort; input is never mutated.

use crate::model::task::Task;
use chrono::{DateTime, Utc};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Transient view selector. Not persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FilterCriterion {
    #[default]
    All,
    Completed,
    Pending,
    Overdue,
}

impl FilterCriterion {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Completed => "completed",
            Self::Pending => "pending",
            Self::Overdue => "overdue",
        }
    }

    /// Returns whether `task` is shown under this criterion at `now`.
    pub fn matches(self, task: &Task, now: DateTime<Utc>) -> bool {
        match self {
            Self::All => true,
            Self::Completed => task.completed,
            Self::Pending => !task.completed,
            Self::Overdue => task.is_overdue_at(now),
        }
    }
}

/// Unknown filter selector value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterParseError(pub String);

impl Display for FilterParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported filter `{}`; expected all|completed|pending|overdue",
            self.0
        )
    }
}

impl Error for FilterParseError {}

impl FromStr for FilterCriterion {
    type Err = FilterParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "completed" => Ok(Self::Completed),
            "pending" => Ok(Self::Pending),
            "overdue" => Ok(Self::Overdue),
            other => Err(FilterParseError(other.to_string())),
        }
    }
}

/// Selects tasks matching `filter` and orders them by ascending deadline.
pub fn apply(tasks: &[Task], filter: FilterCriterion, now: DateTime<Utc>) -> Vec<Task> {
    let mut selected = tasks
        .iter()
        .filter(|task| filter.matches(task, now))
        .cloned()
        .collect::<Vec<_>>();
    selected.sort_by_key(|task| task.deadline);
    selected
}

#[cfg(test)]
mod tests {
    use super::FilterCriterion;

    #[test]
    fn parses_selector_values() {
        assert_eq!("Overdue".parse::<FilterCriterion>().unwrap(), FilterCriterion::Overdue);
        assert_eq!("".parse::<FilterCriterion>().unwrap(), FilterCriterion::All);
        assert!("someday".parse::<FilterCriterion>().is_err());
    }
}
