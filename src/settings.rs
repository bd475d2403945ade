//! App settings (`~/.leafscan/config.toml`).
//!
//! Every field has a default, so a missing file or a partial file both load.
//!
//! ```toml
//! [inference]
//! base_url = "https://api-inference.huggingface.co"
//! # timeout_secs = 60        # unset: wait as long as the transport allows
//!
//! [capture]
//! default_crop = "Tomato"
//! crops = ["Tomato"]
//! mock_delay_ms = 1500
//!
//! [sensor]
//! temperature = 28.0
//! humidity = 72.0
//! soil_moisture = 55.0
//! ```

use crate::inference::DEFAULT_BASE_URL;
use crate::paths;
use crate::sensor::SensorSnapshot;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Environment variable that overrides `[inference] base_url`
pub const ENV_INFERENCE_URL: &str = "LEAFSCAN_INFERENCE_URL";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub inference: InferenceSettings,
    pub capture: CaptureSettings,
    pub sensor: SensorSnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceSettings {
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for InferenceSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
        }
    }
}

impl InferenceSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureSettings {
    pub default_crop: String,
    pub crops: Vec<String>,
    pub mock_delay_ms: u64,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            default_crop: "Tomato".to_string(),
            crops: vec!["Tomato".to_string()],
            mock_delay_ms: 1500,
        }
    }
}

impl CaptureSettings {
    pub fn mock_delay(&self) -> Duration {
        Duration::from_millis(self.mock_delay_ms)
    }

    /// Resolve the crop for a capture: explicit choice or the default,
    /// matched case-insensitively against the configured list.
    pub fn resolve_crop(&self, requested: Option<&str>) -> Result<String> {
        let wanted = requested.unwrap_or(&self.default_crop).trim();
        match self.crops.iter().find(|c| c.eq_ignore_ascii_case(wanted)) {
            Some(crop) => Ok(crop.clone()),
            None => bail!(
                "Unknown crop '{}'. Available: {}",
                wanted,
                self.crops.join(", ")
            ),
        }
    }
}

impl Settings {
    /// Load `~/.leafscan/config.toml` and apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut settings = Self::load_from(&paths::config_path())?;
        if let Ok(url) = std::env::var(ENV_INFERENCE_URL) {
            log::info!("Using {} for inference host", ENV_INFERENCE_URL);
            settings.inference.base_url = url;
        }
        Ok(settings)
    }

    /// Load from a path, or defaults if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings: {:?}", path))?;

        toml::from_str(&content).with_context(|| format!("Failed to parse {:?}", path))
    }

    /// Save to a path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let header = "# leafscan settings\n\n";
        let content = toml::to_string_pretty(self)?;
        fs::write(path, format!("{}{}", header, content))
            .with_context(|| format!("Failed to write settings: {:?}", path))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.inference.base_url, DEFAULT_BASE_URL);
        assert!(settings.inference.timeout().is_none());
        assert_eq!(settings.capture.mock_delay(), Duration::from_millis(1500));
        assert_eq!(settings.sensor.temperature, 28.0);
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[capture]\nmock_delay_ms = 0\n\n[sensor]\nsoil_moisture = 12.5\n",
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.capture.mock_delay_ms, 0);
        assert_eq!(settings.capture.default_crop, "Tomato");
        assert_eq!(settings.sensor.soil_moisture, 12.5);
        assert_eq!(settings.sensor.humidity, 72.0);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[capture\nmock_delay_ms = ").unwrap();
        assert!(Settings::load_from(&path).is_err());
    }

    #[test]
    fn test_save_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.inference.timeout_secs = Some(45);
        settings.capture.crops.push("Potato".to_string());
        settings.save_to(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("soil_moisture"));
        assert_eq!(Settings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn test_resolve_crop() {
        let capture = CaptureSettings {
            crops: vec!["Tomato".to_string(), "Potato".to_string()],
            ..Default::default()
        };
        assert_eq!(capture.resolve_crop(None).unwrap(), "Tomato");
        assert_eq!(capture.resolve_crop(Some(" potato ")).unwrap(), "Potato");

        let err = capture.resolve_crop(Some("Maize")).unwrap_err();
        assert!(err.to_string().contains("Tomato, Potato"));
    }
}
