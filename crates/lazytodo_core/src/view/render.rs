//! Output collaborators driven by the dispatcher.
//!
//! Both sinks receive full replacements; no incremental diffing is assumed.

use crate::view::projector::{CalendarEvent, DisplayRow};

/// Row renderer (task list and label picker).
pub trait RenderTarget {
    fn render_rows(&mut self, rows: &[DisplayRow]);
    fn render_labels(&mut self, labels: &[String]);
}

/// Calendar widget accepting a replace-all event list.
pub trait CalendarSink {
    fn replace_events(&mut self, events: &[CalendarEvent]);
}

/// Sink that drops everything, for hosts without a calendar.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCalendar;

impl CalendarSink for NoCalendar {
    fn replace_events(&mut self, _events: &[CalendarEvent]) {}
}
