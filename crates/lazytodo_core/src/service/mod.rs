//! Core use-case services.
//!
//! # Responsibility
//! - Own authoritative task state and orchestrate repository writes.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod task_store;
