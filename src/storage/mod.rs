//! Device-local key/value storage for leafscan
//!
//! Every persisted record lives under one string key with a JSON-encoded
//! string value. Stores that own a record (config, history, current result)
//! take an [`SharedStore`] and never touch each other's keys.
//!
//! # Backends
//!
//! - [`FileStore`]: one file per key under `~/.leafscan/storage/`
//! - [`MemoryStore`]: in-process map, with a failure switch for tests
//!
//! # Example
//!
//! ```no_run
//! use leafscan::storage::{FileStore, KeyValueStore};
//!
//! let store = FileStore::open(leafscan::paths::storage_dir())?;
//! store.set("prediction_history", "[]")?;
//! assert_eq!(store.get("prediction_history")?.as_deref(), Some("[]"));
//! # Ok::<(), anyhow::Error>(())
//! ```

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use anyhow::Result;
use std::sync::Arc;

/// Key holding the inference credential record
pub const CONFIG_KEY: &str = "huggingface_config";

/// Key holding the diagnosis history
pub const HISTORY_KEY: &str = "prediction_history";

/// Key holding the last diagnosis shown to the user
pub const CURRENT_RESULT_KEY: &str = "current_result";

/// String key → JSON string value storage.
///
/// Reads and writes are synchronous. Implementations must be shareable
/// across threads so the orchestrator can be driven from any caller.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value for `key`, `None` if never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value for `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Read-modify-write `key` under an exclusive lock.
    ///
    /// `apply` sees the current value (or the read error) and returns the
    /// value to store. No other `update` of the same key, in this process
    /// or another one sharing the backend, interleaves with it.
    fn update(&self, key: &str, apply: &mut Update<'_>) -> Result<()>;
}

/// Callback handed to [`KeyValueStore::update`]
pub type Update<'a> = dyn FnMut(Result<Option<String>>) -> Result<String> + 'a;

/// Handle shared by every store that persists through the same backend
pub type SharedStore = Arc<dyn KeyValueStore>;
