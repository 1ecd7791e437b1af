//! Task/label repository over a string key-value medium.
//!
//! # Responsibility
//! - Encode the task collection under `todos` and labels under `labels`.
//! - Turn absent or undecodable values into empty collections.
//!
//! # Invariants
//! - Reads never fail: storage and decode errors are logged and recovered.
//! - Writes replace the whole collection for a key.

use crate::model::label::LabelSet;
use crate::model::task::Task;
use crate::repo::kv_store::{KeyValueStore, KvError};
use log::{info, warn};
use serde::de::DeserializeOwned;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const TODOS_KEY: &str = "todos";
pub const LABELS_KEY: &str = "labels";

pub type RepoResult<T> = Result<T, RepoError>;

/// Write-path failure for the task repository.
#[derive(Debug)]
pub enum RepoError {
    Kv(KvError),
    Encode(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Kv(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode collection: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Kv(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<KvError> for RepoError {
    fn from(value: KvError) -> Self {
        Self::Kv(value)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Repository interface used by `TaskStore`.
pub trait TaskRepository {
    /// Loads the stored task collection; empty when missing or malformed.
    fn load_tasks(&self) -> Vec<Task>;
    /// Loads the stored label names; empty when missing or malformed.
    fn load_labels(&self) -> Vec<String>;
    fn save_tasks(&self, tasks: &[Task]) -> RepoResult<()>;
    fn save_labels(&self, labels: &LabelSet) -> RepoResult<()>;
}

/// JSON-in-key-value implementation of `TaskRepository`.
pub struct KvTaskRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> KvTaskRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the wrapped medium.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn load_array<T: DeserializeOwned>(&self, key: &'static str) -> Vec<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                info!("event=repo_load module=repo status=empty key={key}");
                return Vec::new();
            }
            Err(err) => {
                warn!(
                    "event=repo_load module=repo status=error key={key} error_code=kv_read_failed error={err}"
                );
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(items) => {
                info!(
                    "event=repo_load module=repo status=ok key={key} count={}",
                    items.len()
                );
                items
            }
            Err(err) => {
                warn!(
                    "event=repo_load module=repo status=recovered key={key} error_code=decode_failed bytes={} error={err}",
                    raw.len()
                );
                Vec::new()
            }
        }
    }
}

impl<S: KeyValueStore> TaskRepository for KvTaskRepository<S> {
    fn load_tasks(&self) -> Vec<Task> {
        self.load_array(TODOS_KEY)
    }

    fn load_labels(&self) -> Vec<String> {
        self.load_array(LABELS_KEY)
    }

    fn save_tasks(&self, tasks: &[Task]) -> RepoResult<()> {
        let encoded = serde_json::to_string(tasks)?;
        self.store.set(TODOS_KEY, &encoded)?;
        Ok(())
    }

    fn save_labels(&self, labels: &LabelSet) -> RepoResult<()> {
        let encoded = serde_json::to_string(labels)?;
        self.store.set(LABELS_KEY, &encoded)?;
        Ok(())
    }
}
