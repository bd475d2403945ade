//! Rolling diagnosis history (the `prediction_history` record).
//!
//! Newest first, capped at [`HISTORY_CAP`]. Records are never edited; the
//! oldest falls off the end when the cap is exceeded.
//!
//! Persisted as a JSON array:
//!
//! ```text
//! [{"id": "1718000000000", "cropName": "Tomato",
//!   "date": "2024-06-10T06:13:20.000Z", "disease": "Tomato Late Blight",
//!   "isHealthy": false}, ...]
//! ```

use crate::storage::{SharedStore, HISTORY_KEY};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of records kept
pub const HISTORY_CAP: usize = 50;

/// One past diagnosis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    /// Milliseconds since the epoch at creation, as a string
    pub id: String,
    pub crop_name: String,
    #[serde(rename = "date", with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "disease")]
    pub disease_name: String,
    pub is_healthy: bool,
}

/// Counts shown under the history list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistorySummary {
    pub total: usize,
    pub healthy: usize,
}

impl HistorySummary {
    pub fn of(records: &[HistoryRecord]) -> Self {
        Self {
            total: records.len(),
            healthy: records.iter().filter(|r| r.is_healthy).count(),
        }
    }

    pub fn diseased(&self) -> usize {
        self.total - self.healthy
    }
}

#[derive(Clone)]
pub struct HistoryStore {
    store: SharedStore,
}

impl HistoryStore {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Persisted records, newest first. Missing or corrupt data reads as empty.
    pub fn load(&self) -> Vec<HistoryRecord> {
        decode(self.store.get(HISTORY_KEY))
    }

    /// Prepend `record`, keep the newest [`HISTORY_CAP`], persist, and return
    /// the updated list.
    ///
    /// A failed write is logged and the in-memory list is still returned.
    pub fn append(&self, record: HistoryRecord) -> Vec<HistoryRecord> {
        self.push(|_| record.clone())
    }

    /// Build a record stamped `at` with a fresh id and append it.
    pub fn record(
        &self,
        crop_name: &str,
        disease_name: &str,
        is_healthy: bool,
        at: DateTime<Utc>,
    ) -> Vec<HistoryRecord> {
        self.push(|records| HistoryRecord {
            id: next_id(at, records.first().map(|r| r.id.as_str())),
            crop_name: crop_name.to_string(),
            timestamp: at,
            disease_name: disease_name.to_string(),
            is_healthy,
        })
    }

    /// Read, prepend and write back under the store's lock, so concurrent
    /// writers never drop each other's records.
    fn push(&self, make: impl Fn(&[HistoryRecord]) -> HistoryRecord) -> Vec<HistoryRecord> {
        let mut updated = None;
        let result = self.store.update(HISTORY_KEY, &mut |current| {
            let records = prepend(decode(current), &make);
            let json = serde_json::to_string(&records)?;
            updated = Some(records);
            Ok(json)
        });

        match (result, updated) {
            (Ok(()), Some(records)) => records,
            (result, updated) => {
                if let Err(e) = result {
                    log::error!("Failed to save history: {:#}", e);
                }
                updated.unwrap_or_else(|| prepend(self.load(), &make))
            }
        }
    }
}

fn decode(raw: anyhow::Result<Option<String>>) -> Vec<HistoryRecord> {
    let raw = match raw {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            log::error!("Failed to load history: {:#}", e);
            return Vec::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(records) => records,
        Err(e) => {
            log::warn!("Ignoring corrupt history: {}", e);
            Vec::new()
        }
    }
}

fn prepend(
    mut records: Vec<HistoryRecord>,
    make: impl Fn(&[HistoryRecord]) -> HistoryRecord,
) -> Vec<HistoryRecord> {
    let record = make(&records);
    records.insert(0, record);
    if records.len() > HISTORY_CAP {
        log::debug!("Evicting {} history record(s)", records.len() - HISTORY_CAP);
        records.truncate(HISTORY_CAP);
    }
    records
}

/// Time-derived id, bumped past the newest existing id so two records made
/// within the same millisecond stay distinct.
fn next_id(at: DateTime<Utc>, newest: Option<&str>) -> String {
    let millis = at.timestamp_millis();
    let floor = newest
        .and_then(|id| id.parse::<i64>().ok())
        .map(|n| n.saturating_add(1))
        .unwrap_or(i64::MIN);
    millis.max(floor).to_string()
}

/// `2024-06-10T06:13:20.000Z` on the way out, any RFC 3339 on the way in.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(at: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|at| at.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
