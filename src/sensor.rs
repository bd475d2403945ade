//! Static field sensor snapshot.
//!
//! There is no sensor hardware behind this: the values come from
//! `[sensor]` in `config.toml` and are copied into every diagnosis.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Optimal air temperature, °C
pub const TEMPERATURE_RANGE: RangeInclusive<f64> = 20.0..=30.0;
/// Optimal relative humidity, %
pub const HUMIDITY_RANGE: RangeInclusive<f64> = 60.0..=80.0;
/// Optimal soil moisture, %
pub const SOIL_MOISTURE_RANGE: RangeInclusive<f64> = 40.0..=60.0;

/// One reading of the field sensors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorSnapshot {
    pub temperature: f64,
    pub humidity: f64,
    pub soil_moisture: f64,
}

impl Default for SensorSnapshot {
    fn default() -> Self {
        Self {
            temperature: 28.0,
            humidity: 72.0,
            soil_moisture: 55.0,
        }
    }
}

/// A single labelled reading with its optimal band
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub name: &'static str,
    pub value: f64,
    pub unit: &'static str,
    /// Full-scale value for progress bars
    pub scale: f64,
    pub optimal: RangeInclusive<f64>,
}

impl Reading {
    pub fn in_range(&self) -> bool {
        self.optimal.contains(&self.value)
    }

    /// Position on the gauge, 0.0..=1.0
    pub fn fraction(&self) -> f64 {
        (self.value / self.scale).clamp(0.0, 1.0)
    }
}

impl SensorSnapshot {
    /// Readings in display order
    pub fn readings(&self) -> [Reading; 3] {
        [
            Reading {
                name: "Temperature",
                value: self.temperature,
                unit: "°C",
                scale: 50.0,
                optimal: TEMPERATURE_RANGE,
            },
            Reading {
                name: "Humidity",
                value: self.humidity,
                unit: "%",
                scale: 100.0,
                optimal: HUMIDITY_RANGE,
            },
            Reading {
                name: "Soil Moisture",
                value: self.soil_moisture,
                unit: "%",
                scale: 100.0,
                optimal: SOIL_MOISTURE_RANGE,
            },
        ]
    }
}
