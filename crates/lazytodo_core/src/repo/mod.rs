//! Persistence layer for tasks and labels.
//!
//! # Responsibility
//! - Define the key-value medium contract and its implementations.
//! - Serialize task and label collections to string values.
//!
//! # Invariants
//! - Corrupt or missing stored data reads as an empty collection.

pub mod kv_store;
pub mod task_repo;
