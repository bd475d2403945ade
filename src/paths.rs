//! Single source of truth for ALL leafscan filesystem layout.
//!
//! This module defines WHERE data lives. It has no I/O, no validation,
//! no business logic. One file shows the entire filesystem layout.
//!
//! # User-Level Paths (~/.leafscan/)
//!
//! ```text
//! ~/.leafscan/
//! ├── config.toml              # App settings (inference host, crops, sensor snapshot)
//! └── storage/                 # Device-local key/value storage
//!     ├── huggingface_config.json
//!     ├── prediction_history.json
//!     ├── prediction_history.lock  # Held while history is rewritten
//!     └── current_result.json
//! ```
//!
//! Set `LEAFSCAN_HOME` to relocate the whole tree (tests, portable installs).

use std::path::{Path, PathBuf};

/// Environment variable that overrides the home directory
pub const ENV_HOME: &str = "LEAFSCAN_HOME";

/// User's leafscan home directory: `~/.leafscan/` (or `$LEAFSCAN_HOME`)
pub fn leafscan_home() -> PathBuf {
    if let Some(home) = std::env::var_os(ENV_HOME) {
        return PathBuf::from(home);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".leafscan")
}

/// App settings file: `~/.leafscan/config.toml`
pub fn config_path() -> PathBuf {
    config_path_in(&leafscan_home())
}

/// Key/value storage directory: `~/.leafscan/storage/`
pub fn storage_dir() -> PathBuf {
    storage_dir_in(&leafscan_home())
}

/// `config.toml` under an explicit home
pub fn config_path_in(home: &Path) -> PathBuf {
    home.join("config.toml")
}

/// `storage/` under an explicit home
pub fn storage_dir_in(home: &Path) -> PathBuf {
    home.join("storage")
}

/// File backing one storage key: `storage/<key>.json`
pub fn storage_entry(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("{}.json", key))
}

/// Lock file guarding read-modify-write of one key: `storage/<key>.lock`
pub fn storage_lock(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("{}.lock", key))
}
