//! In-process storage backend.

use super::{KeyValueStore, Update};
use anyhow::{bail, Result};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

/// HashMap-backed store. Nothing survives the process.
///
/// `fail_writes(true)` makes every `set`/`remove` fail the way a full or
/// disabled disk would; `fail_reads(true)` does the same for `get`. Both let
/// callers' PersistenceError handling be tested.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    failing_writes: AtomicBool,
    failing_reads: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle simulated write failures
    pub fn fail_writes(&self, failing: bool) {
        self.failing_writes.store(failing, Ordering::SeqCst);
    }

    /// Toggle simulated read failures
    pub fn fail_reads(&self, failing: bool) {
        self.failing_reads.store(failing, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<()> {
        if self.failing_writes.load(Ordering::SeqCst) {
            bail!("storage quota exceeded");
        }
        Ok(())
    }

    fn check_readable(&self) -> Result<()> {
        if self.failing_reads.load(Ordering::SeqCst) {
            bail!("storage is unavailable");
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.check_readable()?;
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.check_writable()?;
        self.entries
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.check_writable()?;
        self.entries.lock().remove(key);
        Ok(())
    }

    fn update(&self, key: &str, apply: &mut Update<'_>) -> Result<()> {
        let mut entries = self.entries.lock();
        let current = self.check_readable().map(|_| entries.get(key).cloned());
        let value = apply(current)?;
        self.check_writable()?;
        entries.insert(key.to_string(), value);
        Ok(())
    }
}
