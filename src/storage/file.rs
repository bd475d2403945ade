//! File-per-key storage backend.
//!
//! Values are replaced atomically: written to a fresh owner-only temp file
//! in the same directory, then renamed over `<key>.json`. Readers see the
//! old value or the new one, never a torn write.

use super::{KeyValueStore, Update};
use crate::paths;
use anyhow::{Context, Result};
use fd_lock::RwLock;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a storage directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create storage directory: {:?}", dir))?;
        Ok(Self { dir })
    }

    /// Directory this store writes into
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Write `value` to a uniquely named temp file next to `path`.
fn write_temp(path: &Path, value: &str) -> Result<PathBuf> {
    let tmp = path.with_extension(format!("json.{:016x}.tmp", fastrand::u64(..)));

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    // Owner-only (0o600) from creation: the credential record is cleartext
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options
        .open(&tmp)
        .with_context(|| format!("Failed to create {:?}", tmp))?;
    let written = file
        .write_all(value.as_bytes())
        .and_then(|_| file.sync_all());
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(e).with_context(|| format!("Failed to write {:?}", tmp));
    }
    Ok(tmp)
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = paths::storage_entry(&self.dir, key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {:?}", path)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = paths::storage_entry(&self.dir, key);
        let tmp = write_temp(&path, value)?;
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(e).with_context(|| format!("Failed to replace {:?}", path));
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = paths::storage_entry(&self.dir, key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove {:?}", path)),
        }
    }

    fn update(&self, key: &str, apply: &mut Update<'_>) -> Result<()> {
        let lock_path = paths::storage_lock(&self.dir, key);
        let lock_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .with_context(|| format!("Failed to open {:?}", lock_path))?;

        // Blocks until any other writer of this key is done
        let mut lock = RwLock::new(lock_file);
        let _held = lock
            .write()
            .with_context(|| format!("Failed to lock {:?}", lock_path))?;

        let value = apply(self.get(key))?;
        self.set(key, &value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[cfg(unix)]
    use std::os::unix::fs::PermissionsExt;
    use std::sync::Arc;
    use std::thread;
    use tempfile::TempDir;

    #[test]
    fn test_missing_key_reads_none() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert!(store.get("nothing_here").unwrap().is_none());
    }

    #[test]
    fn test_set_then_get_and_remove() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path().join("storage")).unwrap();

        store.set("prediction_history", "[]").unwrap();
        assert_eq!(
            store.get("prediction_history").unwrap().as_deref(),
            Some("[]")
        );
        assert!(store.dir().join("prediction_history.json").is_file());

        store.remove("prediction_history").unwrap();
        assert!(store.get("prediction_history").unwrap().is_none());
        // Second remove is a no-op
        store.remove("prediction_history").unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_values_are_owner_only() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        store.set("huggingface_config", "{}").unwrap();

        let mode = fs::metadata(dir.path().join("huggingface_config.json"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_set_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        store.set("current_result", "{}").unwrap();
        store.set("current_result", "{\"a\":1}").unwrap();

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["current_result.json".to_string()]);
    }

    #[test]
    fn test_update_sees_current_value() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        store
            .update("counter", &mut |current| {
                assert!(current.unwrap().is_none());
                Ok("1".to_string())
            })
            .unwrap();
        store
            .update("counter", &mut |current| {
                let n: u32 = current.unwrap().unwrap().parse().unwrap();
                Ok((n + 1).to_string())
            })
            .unwrap();
        assert_eq!(store.get("counter").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_failed_update_keeps_old_value() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        store.set("counter", "7").unwrap();

        let result = store.update("counter", &mut |_| anyhow::bail!("nope"));
        assert!(result.is_err());
        assert_eq!(store.get("counter").unwrap().as_deref(), Some("7"));
    }

    #[test]
    fn test_updates_from_separate_handles_do_not_interleave() {
        // Each thread opens its own store, like separate CLI runs
        let dir = Arc::new(TempDir::new().unwrap());
        let writers: Vec<_> = (0..8)
            .map(|_| {
                let dir = dir.clone();
                thread::spawn(move || {
                    let store = FileStore::open(dir.path()).unwrap();
                    for _ in 0..25 {
                        store
                            .update("counter", &mut |current| {
                                let n: u32 = current?
                                    .map(|raw| raw.parse())
                                    .transpose()?
                                    .unwrap_or(0);
                                Ok((n + 1).to_string())
                            })
                            .unwrap();
                    }
                })
            })
            .collect();
        for writer in writers {
            writer.join().unwrap();
        }

        let store = FileStore::open(dir.path()).unwrap();
        assert_eq!(store.get("counter").unwrap().as_deref(), Some("200"));
    }
}
