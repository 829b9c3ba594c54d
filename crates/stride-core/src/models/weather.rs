// ABOUTME: Ambient weather sample attached to an activity
// ABOUTME: Distinguishes measured historical readings from the 20C/50% fallback default
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Performance Analytics

use crate::constants::weather_defaults;
use serde::{Deserialize, Serialize};

/// Temperature and humidity at the start of an activity
///
/// The historical lookup itself is the caller's concern; the engine only sees
/// the resulting sample. Fields are private so a sample cannot change after it
/// has been attached to an activity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    temperature_c: f64,
    humidity_pct: f64,
    #[serde(default)]
    is_measured: bool,
}

impl WeatherSample {
    /// A real historical reading
    #[must_use]
    pub const fn measured(temperature_c: f64, humidity_pct: f64) -> Self {
        Self {
            temperature_c,
            humidity_pct,
            is_measured: true,
        }
    }

    /// Standard conditions used when no reading is available
    #[must_use]
    pub const fn fallback() -> Self {
        Self {
            temperature_c: weather_defaults::TEMPERATURE_C,
            humidity_pct: weather_defaults::HUMIDITY_PCT,
            is_measured: false,
        }
    }

    /// Convert the outcome of an external lookup, falling back when it failed
    ///
    /// A reading with a non-finite value is treated as a failed lookup.
    #[must_use]
    pub fn from_lookup(reading: Option<(f64, f64)>) -> Self {
        match reading {
            Some((temperature, humidity)) if temperature.is_finite() && humidity.is_finite() => {
                Self::measured(temperature, humidity)
            }
            Some(_) => {
                tracing::warn!("Discarding non-finite weather reading, using fallback");
                Self::fallback()
            }
            None => Self::fallback(),
        }
    }

    /// Ambient temperature (Celsius)
    #[must_use]
    pub const fn temperature_c(&self) -> f64 {
        self.temperature_c
    }

    /// Relative humidity (percent)
    #[must_use]
    pub const fn humidity_pct(&self) -> f64 {
        self.humidity_pct
    }

    /// Whether this is a real reading rather than the fallback
    #[must_use]
    pub const fn is_measured(&self) -> bool {
        self.is_measured
    }
}

impl Default for WeatherSample {
    fn default() -> Self {
        Self::fallback()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_defaults() {
        let sample = WeatherSample::default();
        assert!((sample.temperature_c() - 20.0).abs() < f64::EPSILON);
        assert!((sample.humidity_pct() - 50.0).abs() < f64::EPSILON);
        assert!(!sample.is_measured());
    }

    #[test]
    fn test_lookup_conversion() {
        assert!(WeatherSample::from_lookup(Some((27.5, 70.0))).is_measured());
        assert!(!WeatherSample::from_lookup(None).is_measured());
        assert!(!WeatherSample::from_lookup(Some((f64::NAN, 70.0))).is_measured());
    }
}
