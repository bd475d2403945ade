//! Hosted image-classification client
//!
//! Posts raw image bytes to `<base_url>/models/<model_id>` and returns the
//! ranked `{label, score}` list the host sends back, unmodified.
//!
//! # Wire format
//!
//! ```text
//! POST /models/nateraw/food
//! Authorization: Bearer hf_...
//! Content-Type: application/octet-stream
//!
//! <image bytes>
//!
//! 200 OK
//! [{"label": "tomato_healthy", "score": 0.95}, ...]
//! ```
//!
//! One attempt per call: no retry, and no timeout unless one is configured.

mod internal;

pub use internal::Client;

use crate::config::ServiceConfig;
use serde::{Deserialize, Serialize};

/// Public Hugging Face inference host
pub const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co";

/// One ranked label from the classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPrediction {
    pub label: String,
    /// 0.0..=1.0 as reported upstream
    pub score: f64,
}

impl RawPrediction {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Why the hosted classifier could not produce predictions.
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    /// Host answered with a non-success status
    #[error("inference API error: {reason}")]
    Status { status: u16, reason: String },

    /// Connection, TLS or body transfer failure
    #[error("inference request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Body was not a JSON array of `{label, score}`
    #[error("malformed inference response: {0}")]
    MalformedBody(#[from] serde_json::Error),

    /// Host returned an empty prediction list
    #[error("inference response contained no predictions")]
    NoPredictions,
}

impl InferenceError {
    /// HTTP status, when the host got far enough to send one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Anything that turns image bytes into ranked predictions.
///
/// [`Client`] is the real implementation; tests substitute their own.
pub trait Classifier: Send + Sync {
    fn classify(
        &self,
        image: &[u8],
        config: &ServiceConfig,
    ) -> Result<Vec<RawPrediction>, InferenceError>;
}

/// Endpoint for a model under a base URL
pub fn endpoint(base_url: &str, model_id: &str) -> String {
    format!("{}/models/{}", base_url.trim_end_matches('/'), model_id)
}
