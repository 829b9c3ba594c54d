// ABOUTME: Stream-level activity measurements feeding the scoring system
// ABOUTME: Aerobic decoupling, power and heart-rate zones, efficiency factor, adjusted duration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Performance Analytics

//! Metrics calculation over raw activity streams
//!
//! Short or missing streams are expected and never an error: each function
//! returns a defined neutral result (zero drift, an empty distribution, a
//! labelled zero efficiency factor) instead.

pub mod factors;

use crate::statistics::{count_to_f64, mean, round_to};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use stride_core::constants::{efficiency_factor, streams};
use stride_core::models::{ActivityMetrics, HrZoneDefinition};
use tracing::debug;

/// Percentage of samples per zone label (`Z1`, `Z2`, ...), one decimal
pub type ZoneDistribution = BTreeMap<String, f64>;

/// Aerobic base rating derived from the efficiency factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EfficiencyRating {
    /// Below 1.1 W/bpm
    #[serde(rename = "Low Aerobic Base")]
    LowAerobicBase,
    /// 1.1 to 1.3 W/bpm
    #[serde(rename = "Good (Amateur)")]
    Good,
    /// 1.3 to 1.5 W/bpm
    #[serde(rename = "Very Good (Competitive)")]
    VeryGood,
    /// 1.5 W/bpm and above
    #[serde(rename = "Elite / Pro")]
    Elite,
    /// Streams missing or of different lengths
    #[serde(rename = "N/A")]
    NotAvailable,
    /// No sample survived noise filtering
    #[serde(rename = "Insufficient Data")]
    InsufficientData,
}

impl EfficiencyRating {
    /// Rate a raw (unrounded) efficiency factor
    #[must_use]
    pub fn from_value(ef: f64) -> Self {
        if ef >= efficiency_factor::ELITE {
            Self::Elite
        } else if ef >= efficiency_factor::VERY_GOOD {
            Self::VeryGood
        } else if ef >= efficiency_factor::GOOD {
            Self::Good
        } else {
            Self::LowAerobicBase
        }
    }

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::LowAerobicBase => "Low Aerobic Base",
            Self::Good => "Good (Amateur)",
            Self::VeryGood => "Very Good (Competitive)",
            Self::Elite => "Elite / Pro",
            Self::NotAvailable => "N/A",
            Self::InsufficientData => "Insufficient Data",
        }
    }
}

/// Power-to-heart-rate ratio over the noise-filtered samples
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EfficiencyFactor {
    /// Mean power over mean heart rate, two decimals (0 when unavailable)
    pub value: f64,
    /// Rating of the unrounded value
    #[serde(rename = "label")]
    pub rating: EfficiencyRating,
    /// Mean of the kept power samples, one decimal
    pub cleaned_avg_power: f64,
    /// Mean of the kept heart-rate samples, whole bpm
    pub cleaned_avg_hr: f64,
}

impl EfficiencyFactor {
    const fn unavailable(rating: EfficiencyRating) -> Self {
        Self {
            value: 0.0,
            rating,
            cleaned_avg_power: 0.0,
            cleaned_avg_hr: 0.0,
        }
    }
}

/// Stateless calculator over raw activity streams
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsCalculator;

impl MetricsCalculator {
    /// Aerobic decoupling: relative rise of heart-rate cost per watt from the
    /// first half of the activity to the second
    ///
    /// Both streams are split at the power stream's midpoint. Returns 0 when
    /// either stream has fewer than 120 samples, when a half is empty or its
    /// mean is not positive, or when economy improved (negative drift).
    #[must_use]
    pub fn calculate_decoupling(power: &[f64], heart_rate: &[f64]) -> f64 {
        if power.len() < streams::MIN_DECOUPLING_SAMPLES
            || heart_rate.len() < streams::MIN_DECOUPLING_SAMPLES
        {
            debug!(
                power_samples = power.len(),
                hr_samples = heart_rate.len(),
                metric_name = "decoupling",
                "Not enough samples for decoupling, using zero drift"
            );
            return 0.0;
        }

        let split = power.len() / 2;
        let (power_first, power_second) = power.split_at(split);
        let (hr_first, hr_second) = heart_rate.split_at(split.min(heart_rate.len()));

        let (Some(p1), Some(p2), Some(h1), Some(h2)) = (
            mean(power_first),
            mean(power_second),
            mean(hr_first),
            mean(hr_second),
        ) else {
            return 0.0;
        };
        if p1 <= 0.0 || p2 <= 0.0 || h1 <= 0.0 || h2 <= 0.0 {
            return 0.0;
        }

        let cost_first = h1 / p1;
        let cost_second = h2 / p2;
        let drift = (cost_second - cost_first) / cost_first;

        debug!(drift, metric_name = "decoupling", "Computed aerobic decoupling");
        if drift.is_finite() {
            drift.max(0.0)
        } else {
            0.0
        }
    }

    /// Share of power samples in each Coggan zone (Z1..Z7)
    ///
    /// A sample belongs to the first zone whose upper bound it is strictly
    /// below; Z7 is open-ended. Empty stream or non-positive FTP yields an
    /// empty map.
    #[must_use]
    pub fn calculate_zones(power: &[f64], ftp_watts: f64) -> ZoneDistribution {
        if power.is_empty() || ftp_watts.is_nan() || ftp_watts <= 0.0 {
            return ZoneDistribution::new();
        }

        let thresholds = streams::POWER_ZONE_UPPER_BOUNDS.map(|ratio| ftp_watts * ratio);

        // Thread-local counts merged at the end
        let counts = power
            .par_iter()
            .fold(
                || [0usize; 7],
                |mut counts, &watts| {
                    let zone_idx = thresholds
                        .iter()
                        .position(|&limit| watts < limit)
                        .unwrap_or(thresholds.len());
                    counts[zone_idx] += 1;
                    counts
                },
            )
            .reduce(
                || [0usize; 7],
                |mut a, b| {
                    for (total, count) in a.iter_mut().zip(b) {
                        *total += count;
                    }
                    a
                },
            );

        percentages(&counts, power.len())
    }

    /// Share of heart-rate samples in each provider-defined zone
    ///
    /// Bounds are inclusive; an upper bound of -1 means 300 bpm. The first
    /// matching zone wins, and samples matching no zone only count toward the
    /// total.
    #[must_use]
    pub fn calculate_hr_zones(heart_rate: &[f64], zones: &HrZoneDefinition) -> ZoneDistribution {
        if heart_rate.is_empty() || zones.zones.is_empty() {
            return ZoneDistribution::new();
        }

        let limits: Vec<(f64, f64)> = zones
            .zones
            .iter()
            .map(|zone| {
                let max = if zone.is_unbounded() {
                    streams::UNBOUNDED_HR_CEILING
                } else {
                    zone.max
                };
                (zone.min, max)
            })
            .collect();

        let mut counts = vec![0usize; limits.len()];
        for &bpm in heart_rate {
            if let Some(idx) = limits
                .iter()
                .position(|&(min, max)| min <= bpm && bpm <= max)
            {
                counts[idx] += 1;
            }
        }

        percentages(&counts, heart_rate.len())
    }

    /// Efficiency factor after dropping samples at or below 10 W or 40 bpm
    #[must_use]
    pub fn calculate_efficiency_factor(watts: &[f64], heart_rate: &[f64]) -> EfficiencyFactor {
        if watts.is_empty() || heart_rate.is_empty() || watts.len() != heart_rate.len() {
            return EfficiencyFactor::unavailable(EfficiencyRating::NotAvailable);
        }

        let (kept_power, kept_hr): (Vec<f64>, Vec<f64>) = watts
            .iter()
            .zip(heart_rate)
            .filter(|&(&w, &h)| {
                w > streams::MIN_VALID_POWER_WATTS && h > streams::MIN_VALID_HEART_RATE
            })
            .map(|(&w, &h)| (w, h))
            .unzip();

        let (Some(avg_power), Some(avg_hr)) = (mean(&kept_power), mean(&kept_hr)) else {
            return EfficiencyFactor::unavailable(EfficiencyRating::InsufficientData);
        };

        let ef = avg_power / avg_hr;
        debug!(
            ef,
            kept_samples = kept_power.len(),
            total_samples = watts.len(),
            metric_name = "efficiency_factor",
            "Computed efficiency factor"
        );

        EfficiencyFactor {
            value: round_to(ef, 2),
            rating: EfficiencyRating::from_value(ef),
            cleaned_avg_power: round_to(avg_power, 1),
            cleaned_avg_hr: avg_hr.trunc(),
        }
    }

    /// Moving duration normalized for age, sex, and heat
    ///
    /// Falls back to the raw duration when the combined factor is not a
    /// positive number.
    #[must_use]
    pub fn calculate_adjusted_duration(metrics: &ActivityMetrics) -> f64 {
        let denominator = factors::age_factor(metrics.athlete.age)
            * factors::sex_factor(metrics.athlete.sex)
            * factors::env_factor(metrics.weather.temperature_c());

        if denominator > 0.0 && denominator.is_finite() {
            metrics.moving_time_s / denominator
        } else {
            metrics.moving_time_s
        }
    }
}

fn percentages(counts: &[usize], total: usize) -> ZoneDistribution {
    let total = count_to_f64(total);
    counts
        .iter()
        .enumerate()
        .map(|(idx, &count)| {
            (
                format!("Z{}", idx + 1),
                round_to(count_to_f64(count) / total * 100.0, 1),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stride_core::models::{AthletePhysiology, Sex, WeatherSample};

    #[test]
    fn test_decoupling_requires_enough_samples() {
        let power = vec![200.0; 119];
        let hr = vec![150.0; 200];
        assert!(MetricsCalculator::calculate_decoupling(&power, &hr).abs() < f64::EPSILON);
    }

    #[test]
    fn test_decoupling_detects_cardiac_drift() {
        let power = vec![200.0; 200];
        let mut hr = vec![140.0; 100];
        hr.extend(vec![154.0; 100]);
        let drift = MetricsCalculator::calculate_decoupling(&power, &hr);
        assert!((drift - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_decoupling_ignores_improving_economy() {
        let power = vec![200.0; 200];
        let mut hr = vec![150.0; 100];
        hr.extend(vec![140.0; 100]);
        assert!(MetricsCalculator::calculate_decoupling(&power, &hr).abs() < f64::EPSILON);
    }

    #[test]
    fn test_power_zone_boundaries() {
        // 55% of FTP is the first value outside Z1
        let power = [0.0, 137.4, 137.5, 200.0, 400.0];
        let zones = MetricsCalculator::calculate_zones(&power, 250.0);
        assert_eq!(zones.len(), 7);
        assert!((zones["Z1"] - 40.0).abs() < f64::EPSILON);
        assert!((zones["Z2"] - 20.0).abs() < f64::EPSILON);
        assert!((zones["Z3"] - 20.0).abs() < f64::EPSILON);
        assert!((zones["Z7"] - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_power_zones_empty_inputs() {
        assert!(MetricsCalculator::calculate_zones(&[], 250.0).is_empty());
        assert!(MetricsCalculator::calculate_zones(&[200.0], 0.0).is_empty());
    }

    #[test]
    fn test_hr_zones_inclusive_and_unbounded() {
        let zones = HrZoneDefinition::from_bounds(&[(0.0, 120.0), (121.0, 150.0), (151.0, -1.0)]);
        let hr = [120.0, 121.0, 150.0, 151.0, 210.0, 120.5];
        let dist = MetricsCalculator::calculate_hr_zones(&hr, &zones);
        assert!((dist["Z1"] - 16.7).abs() < 1e-9);
        assert!((dist["Z2"] - 33.3).abs() < 1e-9);
        assert!((dist["Z3"] - 33.3).abs() < 1e-9);
    }

    #[test]
    fn test_efficiency_factor_filters_noise() {
        let watts = [250.0, 5.0, 250.0, 250.0];
        let hr = [125.0, 130.0, 30.0, 125.0];
        let ef = MetricsCalculator::calculate_efficiency_factor(&watts, &hr);
        assert!((ef.value - 2.0).abs() < f64::EPSILON);
        assert_eq!(ef.rating, EfficiencyRating::Elite);
        assert!((ef.cleaned_avg_power - 250.0).abs() < f64::EPSILON);
        assert!((ef.cleaned_avg_hr - 125.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_efficiency_factor_degenerate_streams() {
        let mismatched = MetricsCalculator::calculate_efficiency_factor(&[200.0], &[150.0, 150.0]);
        assert_eq!(mismatched.rating, EfficiencyRating::NotAvailable);
        assert!(mismatched.value.abs() < f64::EPSILON);

        let noise = MetricsCalculator::calculate_efficiency_factor(&[5.0, 8.0], &[150.0, 150.0]);
        assert_eq!(noise.rating, EfficiencyRating::InsufficientData);
    }

    #[test]
    fn test_efficiency_rating_bands() {
        assert_eq!(EfficiencyRating::from_value(1.09), EfficiencyRating::LowAerobicBase);
        assert_eq!(EfficiencyRating::from_value(1.1), EfficiencyRating::Good);
        assert_eq!(EfficiencyRating::from_value(1.3), EfficiencyRating::VeryGood);
        assert_eq!(EfficiencyRating::from_value(1.5), EfficiencyRating::Elite);
    }

    #[test]
    fn test_adjusted_duration() {
        let athlete = AthletePhysiology::new(60.0, 50.0, 190.0, 30.0, Sex::Female, 220.0);
        let metrics = ActivityMetrics::new(
            220.0,
            150.0,
            10_000.0,
            3_300.0,
            0.0,
            athlete,
            WeatherSample::measured(10.0, 50.0),
        );
        let adjusted = MetricsCalculator::calculate_adjusted_duration(&metrics);
        assert!((adjusted - 3_000.0).abs() < 1e-9);
    }
}
