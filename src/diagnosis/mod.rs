//! Capture → diagnosis orchestration
//!
//! ```text
//! CaptureRequest
//!      │
//!      ├── config stored? ──yes──▶ Classifier (hosted) ──ok──┐
//!      │         │                       │                   │
//!      │         no                    error                 │
//!      │         ▼                       ▼                   │
//!      │     MockPredictor ◀─────────────┘                   │
//!      │         │                                           │
//!      │         └──────▶ top prediction ◀───────────────────┘
//!      │                       │
//!      │            humanize / score / advise
//!      │                       │
//!      └──────────▶ DiagnosisResult ──▶ HistoryStore::record
//! ```
//!
//! Failures never escape: the hosted path degrades to the mock path and
//! the caller learns why through [`Outcome::DegradedOk`]. The only error is
//! [`CaptureBusy`] when a second capture arrives mid-diagnosis.

mod gate;
pub mod label;
pub mod recommend;

pub use gate::{CaptureBusy, CaptureGate};

use crate::config::ConfigStore;
use crate::history::HistoryStore;
use crate::inference::{Classifier, InferenceError, RawPrediction};
use crate::mock::MockPredictor;
use crate::sensor::SensorSnapshot;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// One captured leaf image plus the context the caller holds.
#[derive(Debug, Clone)]
pub struct CaptureRequest {
    pub image: Vec<u8>,
    /// Crop the user selected before capturing
    pub crop: String,
    pub sensors: SensorSnapshot,
    /// Where the image came from, if it can be shown again
    pub image_reference: Option<String>,
}

/// Everything the result view shows. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisResult {
    pub disease_name: String,
    pub confidence_percent: u8,
    pub is_healthy: bool,
    pub crop_loss_percent: u8,
    pub temperature: f64,
    pub humidity: f64,
    pub recommendation_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_reference: Option<String>,
}

impl DiagnosisResult {
    /// What the result view shows before the first capture
    pub fn awaiting(sensors: &SensorSnapshot) -> Self {
        Self {
            disease_name: "Awaiting Analysis".to_string(),
            confidence_percent: 0,
            is_healthy: true,
            crop_loss_percent: 0,
            temperature: sensors.temperature,
            humidity: sensors.humidity,
            recommendation_text: "Please capture an image to begin disease detection."
                .to_string(),
            image_reference: None,
        }
    }

    pub fn is_mock(&self) -> bool {
        self.recommendation_text.ends_with(recommend::MOCK_DISCLAIMER)
    }
}

/// Why a diagnosis came from the mock path
#[derive(Debug)]
pub enum DegradeReason {
    /// No service config stored
    Unconfigured,
    /// Hosted classifier failed; the message is safe to show the user
    Upstream(InferenceError),
}

/// Result of one capture.
#[derive(Debug)]
pub enum Outcome {
    /// Hosted classifier answered
    Ok(DiagnosisResult),
    /// Mock path answered, with the disclaimer appended
    DegradedOk(DiagnosisResult, DegradeReason),
}

impl Outcome {
    pub fn diagnosis(&self) -> &DiagnosisResult {
        match self {
            Self::Ok(d) | Self::DegradedOk(d, _) => d,
        }
    }

    pub fn into_diagnosis(self) -> DiagnosisResult {
        match self {
            Self::Ok(d) | Self::DegradedOk(d, _) => d,
        }
    }

    pub fn degrade_reason(&self) -> Option<&DegradeReason> {
        match self {
            Self::Ok(_) => None,
            Self::DegradedOk(_, reason) => Some(reason),
        }
    }

    /// Transient error to show alongside the result, if any
    pub fn upstream_error(&self) -> Option<&InferenceError> {
        match self.degrade_reason() {
            Some(DegradeReason::Upstream(e)) => Some(e),
            _ => None,
        }
    }
}

/// Winning prediction plus where it came from
struct Pick {
    prediction: RawPrediction,
    healthy: bool,
    mock: bool,
}

/// Runs captures against the stores it borrows.
///
/// Owns no persistent state: config is read and history written through the
/// stores on every call.
pub struct Diagnoser<'a, C: Classifier> {
    config: &'a ConfigStore,
    history: &'a HistoryStore,
    classifier: C,
    mock: MockPredictor,
    gate: CaptureGate,
}

impl<'a, C: Classifier> Diagnoser<'a, C> {
    pub fn new(
        config: &'a ConfigStore,
        history: &'a HistoryStore,
        classifier: C,
        mock: MockPredictor,
    ) -> Self {
        Self {
            config,
            history,
            classifier,
            mock,
            gate: CaptureGate::new(),
        }
    }

    /// Diagnose one capture and append it to history.
    ///
    /// Rejects with [`CaptureBusy`] if another diagnosis is still running on
    /// this orchestrator; stores are untouched in that case.
    pub fn diagnose(&self, request: &CaptureRequest) -> Result<Outcome, CaptureBusy> {
        let _pass = self.gate.try_enter()?;

        let (pick, reason) = match self.config.get() {
            Some(config) => {
                log::info!("Using hosted model {} for predictions", config.model_id);
                match self
                    .classifier
                    .classify(&request.image, &config)
                    .and_then(top_prediction)
                {
                    Ok(prediction) => {
                        let healthy = label::is_healthy(&prediction.label);
                        let pick = Pick {
                            prediction,
                            healthy,
                            mock: false,
                        };
                        (pick, None)
                    }
                    Err(e) => {
                        log::warn!("Prediction error, falling back to mock: {}", e);
                        (self.mock_pick(), Some(DegradeReason::Upstream(e)))
                    }
                }
            }
            None => {
                log::warn!("Inference not configured, using mock predictions");
                (self.mock_pick(), Some(DegradeReason::Unconfigured))
            }
        };

        let diagnosis = build(pick, request);
        self.history.record(
            &request.crop,
            &diagnosis.disease_name,
            diagnosis.is_healthy,
            Utc::now(),
        );

        Ok(match reason {
            None => Outcome::Ok(diagnosis),
            Some(reason) => Outcome::DegradedOk(diagnosis, reason),
        })
    }

    pub fn is_busy(&self) -> bool {
        self.gate.is_busy()
    }

    fn mock_pick(&self) -> Pick {
        let entry = self.mock.predict_mock();
        Pick {
            prediction: RawPrediction::new(entry.label, entry.score),
            healthy: entry.healthy,
            mock: true,
        }
    }
}

/// Only index 0 is consulted; upstream ordering is trusted.
fn top_prediction(predictions: Vec<RawPrediction>) -> Result<RawPrediction, InferenceError> {
    predictions
        .into_iter()
        .next()
        .ok_or(InferenceError::NoPredictions)
}

fn build(pick: Pick, request: &CaptureRequest) -> DiagnosisResult {
    let Pick {
        prediction,
        healthy,
        mock,
    } = pick;

    let disease_name = label::humanize(&prediction.label);
    let mut recommendation_text = recommend::recommend(&disease_name, healthy).to_string();
    if mock {
        recommendation_text.push_str(recommend::MOCK_DISCLAIMER);
    }

    DiagnosisResult {
        confidence_percent: label::confidence_percent(prediction.score),
        crop_loss_percent: label::crop_loss_percent(prediction.score, healthy),
        is_healthy: healthy,
        disease_name,
        temperature: request.sensors.temperature,
        humidity: request.sensors.humidity,
        recommendation_text,
        image_reference: request.image_reference.clone(),
    }
}
