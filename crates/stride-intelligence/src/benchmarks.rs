// ABOUTME: Comparisons of one activity against static and personal benchmarks
// ABOUTME: World-record power-to-weight share, personal-best proximity, and adjusted-time baselines
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Performance Analytics

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use stride_core::constants::personal_best_windows;
use stride_core::models::DistanceClass;

/// Best recorded time of the athlete over a standard distance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalBest {
    /// Distance the record was set over
    pub distance_class: DistanceClass,
    /// Record time (s)
    pub best_time_s: f64,
}

/// Benchmark enrichment attached to an engine result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkComparison {
    /// Power-to-weight as a percentage of the world-record benchmark
    pub wr_power_pct: f64,
    /// Record time over activity time, when a comparable personal best exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_best_pct: Option<f64>,
    /// The personal best that was compared against
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_best: Option<PersonalBest>,
    /// Whether the adjusted duration beats the stored baseline for its class
    #[serde(skip_serializing_if = "Option::is_none")]
    pub improves_adjusted_baseline: Option<bool>,
}

/// Average power-to-weight as a share of the world-record benchmark
///
/// Zero when power or weight is not positive.
#[must_use]
pub fn wr_power_percentage(avg_power_w: f64, weight_kg: f64, wr_power_to_weight: f64) -> f64 {
    if avg_power_w <= 0.0 || weight_kg <= 0.0 || wr_power_to_weight <= 0.0 {
        return 0.0;
    }
    (avg_power_w / weight_kg) / wr_power_to_weight * 100.0
}

fn comparison_window(class: DistanceClass) -> Option<(f64, f64)> {
    match class {
        DistanceClass::FiveK => Some(personal_best_windows::FIVE_K),
        DistanceClass::TenK => Some(personal_best_windows::TEN_K),
        DistanceClass::HalfMarathon => Some(personal_best_windows::HALF_MARATHON),
        DistanceClass::Marathon | DistanceClass::Other => None,
    }
}

/// First personal best whose distance window contains `distance_m`
#[must_use]
pub fn find_relevant_best(distance_m: f64, bests: &[PersonalBest]) -> Option<&PersonalBest> {
    bests.iter().find(|best| {
        comparison_window(best.distance_class)
            .is_some_and(|(min, max)| min <= distance_m && distance_m <= max)
    })
}

/// Record time over activity time as a percentage; 100 means record pace
#[must_use]
pub fn personal_best_percentage(best: &PersonalBest, moving_time_s: f64) -> Option<f64> {
    if best.best_time_s > 0.0 && moving_time_s > 0.0 {
        Some(best.best_time_s / moving_time_s * 100.0)
    } else {
        None
    }
}

/// Best (lowest) adjusted duration seen per distance class
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdjustedBaselines {
    best: BTreeMap<DistanceClass, f64>,
}

impl AdjustedBaselines {
    /// No baselines yet
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current baseline for a class
    #[must_use]
    pub fn get(&self, class: DistanceClass) -> Option<f64> {
        self.best.get(&class).copied()
    }

    /// Whether `adjusted_s` would set a new baseline
    #[must_use]
    pub fn is_improvement(&self, class: DistanceClass, adjusted_s: f64) -> bool {
        adjusted_s > 0.0
            && adjusted_s.is_finite()
            && self.get(class).is_none_or(|current| adjusted_s < current)
    }

    /// Store `adjusted_s` if it beats the current baseline; returns whether it did
    pub fn record(&mut self, class: DistanceClass, adjusted_s: f64) -> bool {
        if self.is_improvement(class, adjusted_s) {
            self.best.insert(class, adjusted_s);
            true
        } else {
            false
        }
    }
}
