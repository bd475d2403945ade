//! "Current result" slot: the last diagnosis, shown by `leafscan result`.
//!
//! Single slot, overwritten by every capture. Owned by the presentation
//! layer; the orchestrator never reads it.

use crate::diagnosis::DiagnosisResult;
use crate::sensor::SensorSnapshot;
use crate::storage::{SharedStore, CURRENT_RESULT_KEY};

#[derive(Clone)]
pub struct CurrentResult {
    store: SharedStore,
}

impl CurrentResult {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Last stored diagnosis, or `None` before the first capture.
    pub fn get(&self) -> Option<DiagnosisResult> {
        let raw = match self.store.get(CURRENT_RESULT_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                log::error!("Failed to read current result: {:#}", e);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(result) => Some(result),
            Err(e) => {
                log::warn!("Ignoring corrupt current result: {}", e);
                None
            }
        }
    }

    /// Last diagnosis or the "Awaiting Analysis" placeholder
    pub fn get_or_awaiting(&self, sensors: &SensorSnapshot) -> DiagnosisResult {
        self.get()
            .unwrap_or_else(|| DiagnosisResult::awaiting(sensors))
    }

    /// Overwrite the slot. Failures are logged; the caller still has the result.
    pub fn replace(&self, result: &DiagnosisResult) {
        let saved = serde_json::to_string(result)
            .map_err(anyhow::Error::from)
            .and_then(|json| self.store.set(CURRENT_RESULT_KEY, &json));
        if let Err(e) = saved {
            log::error!("Failed to save current result: {:#}", e);
        }
    }
}
