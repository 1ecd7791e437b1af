//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `lazytodo_core` linkage.
//! - Render a small in-memory board to stdout through the same dispatcher
//!   the UI uses.

use chrono::Duration;
use lazytodo_core::{
    Clock, Command, CreateTask, DisplayRow, FilterCriterion, KvTaskRepository, MemoryKvStore,
    NoCalendar, RenderTarget, SystemClock, TaskStore, TodoApp,
};

struct StdoutRenderer;

impl RenderTarget for StdoutRenderer {
    fn render_rows(&mut self, rows: &[DisplayRow]) {
        println!("--");
        for row in rows {
            let mark = if row.completed { "x" } else { " " };
            let label = row.label_text().unwrap_or_default();
            println!(
                "[{mark}] {:<8} {} | {} {label}",
                row.priority_class.as_str(),
                row.text,
                row.due_text()
            );
        }
    }

    fn render_labels(&mut self, labels: &[String]) {
        println!("labels: {}", labels.join(", "));
    }
}

fn main() {
    println!("lazytodo_core ping={}", lazytodo_core::ping());
    println!("lazytodo_core version={}", lazytodo_core::core_version());

    let now = SystemClock.now();
    let store = TaskStore::new(KvTaskRepository::new(MemoryKvStore::new()));
    let mut app = TodoApp::new(store, StdoutRenderer, NoCalendar);
    app.start();

    let demo = [
        CreateTask::new("Buy milk"),
        CreateTask::new("Send invoice")
            .deadline(now + Duration::hours(30))
            .label("Work"),
        CreateTask::new("Renew passport").deadline(now - Duration::hours(2)),
    ];
    for request in demo {
        if let Err(err) = app.dispatch(Command::Create(request)) {
            eprintln!("demo create failed: {err}");
            return;
        }
    }
    if let Err(err) = app.dispatch(Command::SetFilter(FilterCriterion::Overdue)) {
        eprintln!("demo filter failed: {err}");
    }
}
