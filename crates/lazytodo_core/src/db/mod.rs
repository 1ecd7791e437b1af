//! SQLite backing for `SqliteKvStore`.
//!
//! # Responsibility
//! - Open connections whose `kv_entries` table is ready before any key is
//!   read or written.
//!
//! # Invariants
//! - The kv schema version is tracked via `PRAGMA user_version`.
//! - Failures are reported as `KvError`; the kv store owns the taxonomy.

mod open;
mod schema;

pub use open::{open_db, open_db_in_memory};
pub use schema::KV_SCHEMA_VERSION;
