//! Inference service credentials (the `huggingface_config` record).
//!
//! One record, overwritten wholesale on save. Stored in cleartext: this is a
//! local single-user convenience store, not a secret vault.

use crate::storage::{SharedStore, CONFIG_KEY};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Model used when the user leaves the model field blank
pub const DEFAULT_MODEL_ID: &str = "nateraw/food";

/// Credential + model selection for the hosted inference endpoint.
///
/// Persisted as `{"apiKey": "...", "modelId": "..."}`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Opaque bearer token
    #[serde(rename = "apiKey")]
    pub credential: String,
    /// Hosted model to invoke, e.g. `nateraw/food`
    #[serde(rename = "modelId")]
    pub model_id: String,
}

impl ServiceConfig {
    pub fn new(credential: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            credential: credential.into(),
            model_id: model_id.into(),
        }
    }

    /// Build from user input: trims both fields, blank model falls back to
    /// [`DEFAULT_MODEL_ID`]. Returns `None` for a blank credential.
    pub fn from_input(credential: &str, model_id: Option<&str>) -> Option<Self> {
        let credential = credential.trim();
        if credential.is_empty() {
            return None;
        }
        let model_id = model_id
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_MODEL_ID);
        Some(Self::new(credential, model_id))
    }

    /// Credential safe for display: `hf_…`
    pub fn masked_credential(&self) -> String {
        let prefix: String = self.credential.chars().take(3).collect();
        format!("{}…", prefix)
    }
}

// Never print the credential, not even in debug logs
impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("credential", &self.masked_credential())
            .field("model_id", &self.model_id)
            .finish()
    }
}

/// Reads and writes the single [`ServiceConfig`] record.
#[derive(Clone)]
pub struct ConfigStore {
    store: SharedStore,
}

impl ConfigStore {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Stored config, or `None` if never set, unreadable or corrupt.
    pub fn get(&self) -> Option<ServiceConfig> {
        let raw = match self.store.get(CONFIG_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("Failed to read service config: {:#}", e);
                return None;
            }
        };

        // A stored `null` is the same as never saved
        match serde_json::from_str::<Option<ServiceConfig>>(&raw) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring corrupt service config: {}", e);
                None
            }
        }
    }

    /// Persist `config`, replacing any prior record.
    pub fn set(&self, config: &ServiceConfig) -> Result<()> {
        let json = serde_json::to_string(config)?;
        self.store
            .set(CONFIG_KEY, &json)
            .context("Failed to save service config")
    }

    /// Forget the stored record. Predictions go back to the mock path.
    pub fn clear(&self) -> Result<()> {
        self.store
            .remove(CONFIG_KEY)
            .context("Failed to clear service config")
    }

    pub fn is_configured(&self) -> bool {
        self.get().is_some()
    }
}
