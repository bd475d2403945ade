//! Wiring: settings + stores over one storage backend.

use crate::config::ConfigStore;
use crate::current::CurrentResult;
use crate::diagnosis::Diagnoser;
use crate::history::HistoryStore;
use crate::inference::Client;
use crate::mock::MockPredictor;
use crate::paths;
use crate::settings::Settings;
use crate::storage::{FileStore, SharedStore};
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

/// Everything a command needs, opened once per process.
pub struct App {
    pub settings: Settings,
    pub config: ConfigStore,
    pub history: HistoryStore,
    pub current: CurrentResult,
}

impl App {
    /// Open `~/.leafscan/` (or `$LEAFSCAN_HOME`).
    pub fn open() -> Result<Self> {
        let settings = Settings::load()?;
        let store: SharedStore = Arc::new(FileStore::open(paths::storage_dir())?);
        Ok(Self::with_store(settings, store))
    }

    /// Open an explicit home directory, ignoring environment overrides.
    pub fn open_at(home: &Path) -> Result<Self> {
        let settings = Settings::load_from(&paths::config_path_in(home))?;
        let store: SharedStore = Arc::new(FileStore::open(paths::storage_dir_in(home))?);
        Ok(Self::with_store(settings, store))
    }

    pub fn with_store(settings: Settings, store: SharedStore) -> Self {
        Self {
            settings,
            config: ConfigStore::new(store.clone()),
            history: HistoryStore::new(store.clone()),
            current: CurrentResult::new(store),
        }
    }

    /// Orchestrator backed by the hosted client and the configured mock delay.
    pub fn diagnoser(&self) -> Result<Diagnoser<'_, Client>> {
        let client = Client::new(
            self.settings.inference.base_url.clone(),
            self.settings.inference.timeout(),
        )?;
        let mock = MockPredictor::new(self.settings.capture.mock_delay());
        Ok(Diagnoser::new(&self.config, &self.history, client, mock))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceConfig;
    use tempfile::TempDir;

    #[test]
    fn test_stores_share_one_home() {
        let dir = TempDir::new().unwrap();
        {
            let app = App::open_at(dir.path()).unwrap();
            app.config.set(&ServiceConfig::new("hf_x", "m/n")).unwrap();
            app.history.record("Tomato", "Tomato Healthy", true, chrono::Utc::now());
        }

        let app = App::open_at(dir.path()).unwrap();
        assert!(app.config.is_configured());
        assert_eq!(app.history.load().len(), 1);
        assert!(dir.path().join("storage/huggingface_config.json").is_file());
        assert!(dir.path().join("storage/prediction_history.json").is_file());
    }
}
