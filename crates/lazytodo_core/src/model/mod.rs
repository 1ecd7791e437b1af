//! Domain model for the task list.
//!
//! # Responsibility
//! - Define the task record and label set owned by `TaskStore`.
//! - Keep the stored JSON shape stable across sessions.
//!
//! # Invariants
//! - Every task is identified by a unique `TaskId`.
//! - Deletion is a hard delete; labels outlive the tasks that use them.

pub mod label;
pub mod task;
