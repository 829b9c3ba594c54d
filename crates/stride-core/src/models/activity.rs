// ABOUTME: Activity data models consumed by the score engine
// ABOUTME: DistanceClass, ActivityMetrics, ActivityInput, ActivityRecord, and run eligibility
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Performance Analytics

use super::athlete::AthletePhysiology;
use super::weather::WeatherSample;
use crate::constants::{distances, eligibility};
use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Race-distance bucket used to select a comparable reference time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DistanceClass {
    /// 5 km
    #[serde(rename = "5k")]
    FiveK,
    /// 10 km
    #[serde(rename = "10k")]
    TenK,
    /// Half marathon
    #[serde(rename = "hm", alias = "half")]
    HalfMarathon,
    /// Marathon
    #[serde(rename = "m", alias = "marathon")]
    Marathon,
    /// Not classifiable (non-positive or non-finite distance)
    #[serde(rename = "other")]
    Other,
}

impl DistanceClass {
    /// The four classes that carry a reference time
    pub const STANDARD: [Self; 4] = [Self::FiveK, Self::TenK, Self::HalfMarathon, Self::Marathon];

    /// Bucket a distance by the label boundaries (8 km, 16 km, 30 km)
    #[must_use]
    pub fn from_distance(distance_m: f64) -> Self {
        if !distance_m.is_finite() || distance_m <= 0.0 {
            Self::Other
        } else if distance_m < distances::FIVE_K_UPPER_BOUND {
            Self::FiveK
        } else if distance_m < distances::TEN_K_UPPER_BOUND {
            Self::TenK
        } else if distance_m < distances::HALF_MARATHON_UPPER_BOUND {
            Self::HalfMarathon
        } else {
            Self::Marathon
        }
    }

    /// The standard class whose race distance is nearest to `distance_m`
    ///
    /// Ties go to the shorter class. Never returns `Other`; a NaN distance maps
    /// to the 5k.
    #[must_use]
    pub fn closest_standard(distance_m: f64) -> Self {
        let mut best = Self::FiveK;
        let mut best_gap = f64::INFINITY;
        for class in Self::STANDARD {
            let gap = (class.standard_distance_m() - distance_m).abs();
            if gap < best_gap {
                best = class;
                best_gap = gap;
            }
        }
        best
    }

    /// Official race distance in meters (0 for `Other`)
    #[must_use]
    pub const fn standard_distance_m(self) -> f64 {
        match self {
            Self::FiveK => distances::FIVE_K,
            Self::TenK => distances::TEN_K,
            Self::HalfMarathon => distances::HALF_MARATHON,
            Self::Marathon => distances::MARATHON,
            Self::Other => 0.0,
        }
    }

    /// Short label used by the world-record table and stored baselines
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FiveK => "5k",
            Self::TenK => "10k",
            Self::HalfMarathon => "hm",
            Self::Marathon => "m",
            Self::Other => "other",
        }
    }

    /// Parse a short label; unknown labels yield `None`
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "5k" => Some(Self::FiveK),
            "10k" => Some(Self::TenK),
            "hm" | "half" | "half_marathon" => Some(Self::HalfMarathon),
            "m" | "marathon" => Some(Self::Marathon),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl fmt::Display for DistanceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Aggregate measurements of one activity, ready for scoring
///
/// Created once per activity. `decoupling` starts at zero and is filled in
/// with `with_decoupling` after the stream calculator has run; the value is
/// read-only from then on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityMetrics {
    /// Average power (W)
    pub avg_power_w: f64,
    /// Average heart rate (bpm)
    pub avg_hr_bpm: f64,
    /// Distance (m)
    pub distance_m: f64,
    /// Moving duration (s)
    pub moving_time_s: f64,
    /// Elevation gain (m)
    pub elevation_gain_m: f64,
    /// Athlete snapshot at the time of the activity
    pub athlete: AthletePhysiology,
    /// Ambient conditions
    pub weather: WeatherSample,
    decoupling: f64,
}

impl ActivityMetrics {
    /// Build metrics with zero decoupling
    #[must_use]
    pub fn new(
        avg_power_w: f64,
        avg_hr_bpm: f64,
        distance_m: f64,
        moving_time_s: f64,
        elevation_gain_m: f64,
        athlete: AthletePhysiology,
        weather: WeatherSample,
    ) -> Self {
        Self {
            avg_power_w,
            avg_hr_bpm,
            distance_m,
            moving_time_s,
            elevation_gain_m,
            athlete,
            weather,
            decoupling: 0.0,
        }
    }

    /// Attach the aerobic decoupling computed from the raw streams
    ///
    /// Negative or non-finite values are stored as zero drift.
    #[must_use]
    pub fn with_decoupling(mut self, decoupling: f64) -> Self {
        self.decoupling = if decoupling.is_finite() {
            decoupling.max(0.0)
        } else {
            0.0
        };
        self
    }

    /// Aerobic decoupling fraction (>= 0)
    #[must_use]
    pub const fn decoupling(&self) -> f64 {
        self.decoupling
    }

    /// Power-to-weight ratio (W/kg)
    #[must_use]
    pub fn power_to_weight(&self) -> f64 {
        self.avg_power_w / self.athlete.effective_weight_kg()
    }

    /// Distance bucket of this activity
    #[must_use]
    pub fn distance_class(&self) -> DistanceClass {
        DistanceClass::from_distance(self.distance_m)
    }

    /// Moving duration in minutes
    #[must_use]
    pub fn duration_minutes(&self) -> f64 {
        self.moving_time_s / 60.0
    }
}

/// Ordered heart-rate zone bounds supplied by the athlete's provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HrZoneDefinition {
    /// Zones in definition order
    pub zones: Vec<HrZoneBound>,
}

/// Inclusive bpm range of one heart-rate zone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HrZoneBound {
    /// Lower bound (bpm, inclusive)
    #[serde(default)]
    pub min: f64,
    /// Upper bound (bpm, inclusive); `-1` marks an open-ended zone
    #[serde(default = "default_zone_max")]
    pub max: f64,
}

const fn default_zone_max() -> f64 {
    250.0
}

impl HrZoneBound {
    /// Whether this zone has no upper bound
    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        self.max < 0.0
    }
}

impl HrZoneDefinition {
    /// Build from `(min, max)` pairs as providers return them
    #[must_use]
    pub fn from_bounds(bounds: &[(f64, f64)]) -> Self {
        Self {
            zones: bounds
                .iter()
                .map(|&(min, max)| HrZoneBound { min, max })
                .collect(),
        }
    }
}

/// One activity as handed to the engine facade (engine input contract)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityInput {
    /// Average power (W, >= 0)
    #[serde(default)]
    pub avg_power_w: f64,
    /// Average heart rate (bpm, >= 0)
    #[serde(default)]
    pub avg_hr_bpm: f64,
    /// Distance (m, > 0)
    pub distance_m: f64,
    /// Moving duration (s, > 0)
    pub moving_time_s: f64,
    /// Elevation gain (m, >= 0)
    #[serde(default)]
    pub elevation_gain_m: f64,
    /// Local start date, used for weekly consistency
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Ambient conditions (fallback when absent)
    #[serde(default)]
    pub weather: WeatherSample,
    /// Raw power samples (may be empty)
    #[serde(default)]
    pub power_stream: Vec<f64>,
    /// Raw heart-rate samples (may be empty)
    #[serde(default)]
    pub hr_stream: Vec<f64>,
    /// Heart-rate zone definition for time-in-zone analysis
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hr_zones: Option<HrZoneDefinition>,
}

impl ActivityInput {
    /// Check the input contract: finite values, positive distance and duration,
    /// non-negative averages and elevation
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::InvalidInput` naming the first offending field.
    pub fn validate(&self) -> AppResult<()> {
        let scalars = [
            ("avg_power_w", self.avg_power_w),
            ("avg_hr_bpm", self.avg_hr_bpm),
            ("distance_m", self.distance_m),
            ("moving_time_s", self.moving_time_s),
            ("elevation_gain_m", self.elevation_gain_m),
            ("weather.temperature_c", self.weather.temperature_c()),
            ("weather.humidity_pct", self.weather.humidity_pct()),
        ];
        if let Some((field, _)) = scalars.iter().find(|(_, value)| !value.is_finite()) {
            return Err(AppError::invalid_input(format!("{field} must be a finite number")));
        }
        if self.distance_m <= 0.0 {
            return Err(AppError::invalid_input("distance_m must be greater than zero"));
        }
        if self.moving_time_s <= 0.0 {
            return Err(AppError::invalid_input(
                "moving_time_s must be greater than zero",
            ));
        }
        for (field, value) in [
            ("avg_power_w", self.avg_power_w),
            ("avg_hr_bpm", self.avg_hr_bpm),
            ("elevation_gain_m", self.elevation_gain_m),
        ] {
            if value < 0.0 {
                return Err(AppError::invalid_input(format!("{field} must not be negative")));
            }
        }
        Ok(())
    }

    /// Aggregate metrics for this activity (decoupling not yet attached)
    #[must_use]
    pub fn to_metrics(&self, athlete: &AthletePhysiology) -> ActivityMetrics {
        ActivityMetrics::new(
            self.avg_power_w,
            self.avg_hr_bpm,
            self.distance_m,
            self.moving_time_s,
            self.elevation_gain_m,
            athlete.clone(),
            self.weather,
        )
    }
}

/// One row of an athlete's tabular activity history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Local activity date
    pub date: NaiveDate,
    /// Moving duration (s)
    #[serde(default)]
    pub moving_time_s: f64,
    /// Distance (m)
    #[serde(default)]
    pub distance_m: f64,
    /// Normalized score, when the activity has been scored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl ActivityRecord {
    /// Record without a score
    #[must_use]
    pub const fn new(date: NaiveDate, moving_time_s: f64, distance_m: f64) -> Self {
        Self {
            date,
            moving_time_s,
            distance_m,
            score: None,
        }
    }

    /// Attach a score
    #[must_use]
    pub const fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }
}

/// Provider activity summary as seen at sync time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivitySummary {
    /// Provider activity type (`Run`, `Ride`, ...)
    pub activity_type: String,
    /// Distance (m)
    #[serde(default)]
    pub distance_m: f64,
    /// Moving time (s)
    #[serde(default)]
    pub moving_time_s: f64,
    /// Summary average power (W)
    #[serde(default)]
    pub average_watts: f64,
    /// Summary average heart rate (bpm)
    #[serde(default)]
    pub average_heartrate: f64,
    /// Whether power samples were retrieved
    #[serde(default)]
    pub has_power_stream: bool,
    /// Whether heart-rate samples were retrieved
    #[serde(default)]
    pub has_hr_stream: bool,
}

/// Why a synced activity is not scored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Not a running activity
    NotARun,
    /// Distance below the GPS minimum
    DistanceTooShort,
    /// Moving time below one minute
    TooShort,
    /// Neither power nor heart-rate data, in summary or streams
    NoSensorData,
}

impl SkipReason {
    /// Human-readable explanation
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::NotARun => "Not a run",
            Self::DistanceTooShort => "No GPS data (distance too low)",
            Self::TooShort => "Too short (moving time < 60s)",
            Self::NoSensorData => "No power or HR data (summary or streams)",
        }
    }
}

/// Outcome of the admission filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "reason")]
pub enum Eligibility {
    /// Activity can be scored
    Eligible,
    /// Activity must be skipped
    Skipped(SkipReason),
}

impl ActivitySummary {
    /// Apply the sync-time admission rules in order
    #[must_use]
    pub fn eligibility(&self) -> Eligibility {
        if !self.activity_type.eq_ignore_ascii_case("run") {
            return Eligibility::Skipped(SkipReason::NotARun);
        }
        if self.distance_m.is_nan() || self.distance_m < eligibility::MIN_DISTANCE_M {
            return Eligibility::Skipped(SkipReason::DistanceTooShort);
        }
        if self.moving_time_s.is_nan() || self.moving_time_s < eligibility::MIN_MOVING_TIME_S {
            return Eligibility::Skipped(SkipReason::TooShort);
        }
        let has_summary = self.average_watts > 0.0 || self.average_heartrate > 0.0;
        if !has_summary && !self.has_power_stream && !self.has_hr_stream {
            return Eligibility::Skipped(SkipReason::NoSensorData);
        }
        Eligibility::Eligible
    }
}
