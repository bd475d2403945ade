//! Internal HTTP client implementation for inference

use super::{endpoint, Classifier, InferenceError, RawPrediction};
use crate::config::ServiceConfig;
use anyhow::{Context, Result};
use reqwest::blocking::Client as HttpClient;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use std::time::Duration;

/// Inference client
pub struct Client {
    base_url: String,
    http: HttpClient,
}

impl Client {
    /// Create a client for `base_url`. `timeout: None` disables the
    /// client-side timeout entirely.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let http = HttpClient::builder()
            .user_agent(concat!("leafscan/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            base_url: base_url.into(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST `image` to the configured model and parse the ranked predictions.
    pub fn predict(
        &self,
        image: &[u8],
        config: &ServiceConfig,
    ) -> Result<Vec<RawPrediction>, InferenceError> {
        let url = endpoint(&self.base_url, &config.model_id);
        log::debug!("POST {} ({} bytes)", url, image.len());

        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", config.credential))
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(image.to_vec())
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(InferenceError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response.bytes()?;
        let predictions: Vec<RawPrediction> = serde_json::from_slice(&body)?;
        Ok(predictions)
    }
}

impl Classifier for Client {
    fn classify(
        &self,
        image: &[u8],
        config: &ServiceConfig,
    ) -> Result<Vec<RawPrediction>, InferenceError> {
        self.predict(image, config)
    }
}
