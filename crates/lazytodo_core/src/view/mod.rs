//! Read-side pipeline: classify, filter/sort, project, render.
//!
//! # Responsibility
//! - Derive display state from immutable task snapshots.
//! - Define the sinks that receive projected state.

pub mod filter;
pub mod priority;
pub mod projector;
pub mod render;
