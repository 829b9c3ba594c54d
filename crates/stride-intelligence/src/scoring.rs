// ABOUTME: Competition-relative composite score for a single running activity
// ABOUTME: Log-linear efficiency model against a personalized world-record reference, plus rank tiers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Performance Analytics

//! # Scoring System
//!
//! The score multiplies four efficiencies in natural space and subtracts an
//! aerobic stability penalty in log space:
//!
//! ```text
//! raw   = exp(ln W_eff - ln HRR_eff + ln WCF + ln P_eff - penalty)
//! score = 100 * (1 - exp(-1.8 * raw))
//! ```
//!
//! `P_eff` compares the actual duration with an elite reference time scaled
//! for age, sex, level, and heat, so the same score means the same relative
//! effort across distances and athletes.

use crate::config::ScoreThresholds;
use crate::metrics::factors;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use stride_core::constants::{level_factors, scoring};
use stride_core::errors::{AppError, AppResult};
use stride_core::models::{ActivityMetrics, DistanceClass, ScoreBreakdown, WorldRecordTable};
use tracing::{debug, warn};

/// Competitive level of the athlete, scaling the elite reference time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AthleteLevel {
    /// World-class
    Elite,
    /// National class
    SubElite,
    /// Competitive club runner
    Advanced,
    /// Regular recreational runner
    #[default]
    Intermediate,
    /// Occasional runner
    Amateur,
}

impl AthleteLevel {
    /// Parse a level name; `None` when unrecognized
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "elite" => Some(Self::Elite),
            "sub_elite" | "subelite" => Some(Self::SubElite),
            "advanced" => Some(Self::Advanced),
            "intermediate" => Some(Self::Intermediate),
            "amateur" => Some(Self::Amateur),
            _ => None,
        }
    }

    /// Parse a level name, falling back to `Intermediate`
    #[must_use]
    pub fn from_str_or_default(value: &str) -> Self {
        Self::parse(value).unwrap_or_default()
    }

    /// Reference-time multiplier of this level
    #[must_use]
    pub const fn factor(self) -> f64 {
        match self {
            Self::Elite => level_factors::ELITE,
            Self::SubElite => level_factors::SUB_ELITE,
            Self::Advanced => level_factors::ADVANCED,
            Self::Intermediate => level_factors::INTERMEDIATE,
            Self::Amateur => level_factors::AMATEUR,
        }
    }

    /// Canonical name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Elite => "elite",
            Self::SubElite => "sub_elite",
            Self::Advanced => "advanced",
            Self::Intermediate => "intermediate",
            Self::Amateur => "amateur",
        }
    }
}

impl fmt::Display for AthleteLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rank tier of a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    /// Below the intermediate threshold
    Rookie,
    /// Solid tier
    Intermediate,
    /// Great tier
    Advanced,
    /// Epic tier
    Pro,
    /// Maximum score
    Elite,
}

impl Rank {
    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Elite => "Elite",
            Self::Pro => "Pro",
            Self::Advanced => "Advanced",
            Self::Intermediate => "Intermediate",
            Self::Rookie => "Rookie",
        }
    }

    /// Presentation hint (text color class)
    #[must_use]
    pub const fn style_hint(self) -> &'static str {
        match self {
            Self::Elite => "text-purple-600",
            Self::Pro => "text-blue-600",
            Self::Advanced => "text-green-600",
            Self::Intermediate => "text-yellow-600",
            Self::Rookie => "text-gray-600",
        }
    }
}

/// Quality label of a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunQuality {
    /// Zero, negative, or undefined score
    #[serde(rename = "N/D")]
    NotAvailable,
    /// Epic tier
    #[serde(rename = "Epic Run")]
    Epic,
    /// Great tier
    #[serde(rename = "Great Run")]
    Great,
    /// Solid tier
    #[serde(rename = "Solid Run")]
    Solid,
    /// Below the solid threshold
    #[serde(rename = "Weak Run")]
    Weak,
}

impl RunQuality {
    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotAvailable => "N/D",
            Self::Epic => "Epic Run",
            Self::Great => "Great Run",
            Self::Solid => "Solid Run",
            Self::Weak => "Weak Run",
        }
    }

    /// Theme color key
    #[must_use]
    pub const fn color_key(self) -> &'static str {
        match self {
            Self::NotAvailable => "score_wasted",
            Self::Epic => "score_epic",
            Self::Great => "score_great",
            Self::Solid => "score_solid",
            Self::Weak => "score_weak",
        }
    }
}

/// Saturating transform from raw composite score to [0, 100]
#[must_use]
pub fn saturate(raw_score: f64) -> f64 {
    if raw_score.is_nan() {
        return 0.0;
    }
    (scoring::MAX_SCORE * (1.0 - (-scoring::SATURATION_RATE * raw_score).exp()))
        .clamp(0.0, scoring::MAX_SCORE)
}

/// Scores activities against a shared world-record table
#[derive(Debug, Clone)]
pub struct ScoringSystem {
    world_records: Arc<WorldRecordTable>,
    thresholds: ScoreThresholds,
}

impl ScoringSystem {
    /// Create a scoring system over a loaded table
    #[must_use]
    pub const fn new(world_records: Arc<WorldRecordTable>, thresholds: ScoreThresholds) -> Self {
        Self {
            world_records,
            thresholds,
        }
    }

    /// Compute the normalized score and its full breakdown
    ///
    /// `metrics` must already carry its decoupling. A non-positive nominal
    /// power falls back to 1.0 W/kg and a non-positive target to 0.75. A
    /// numeric failure (overflow, NaN) is not an error: it yields score 0 and
    /// a breakdown with `valid == false`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if the table has no reference time for the
    /// closest standard distance.
    pub fn compute_score(
        &self,
        metrics: &ActivityMetrics,
        nominal_power_per_kg: f64,
        target_hr_efficiency: f64,
        level: AthleteLevel,
    ) -> AppResult<(f64, ScoreBreakdown)> {
        let class = DistanceClass::closest_standard(metrics.distance_m);
        let t_wr = self.world_records.reference_time(class).ok_or_else(|| {
            AppError::config_invalid(format!("no world-record reference time for {class}"))
        })?;

        let age_factor = factors::age_factor(metrics.athlete.age);
        let sex_factor = factors::sex_factor(metrics.athlete.sex);
        let level_factor = level.factor();
        let env_factor = factors::env_factor(metrics.weather.temperature_c());
        let t_ref = t_wr * age_factor * sex_factor * level_factor * env_factor;
        let t_act = metrics.moving_time_s;

        let nominal = if nominal_power_per_kg > 0.0 {
            nominal_power_per_kg
        } else {
            scoring::FALLBACK_NOMINAL_POWER_PER_KG
        };
        let mechanical_efficiency =
            (metrics.power_to_weight() / nominal).max(scoring::EFFICIENCY_FLOOR);

        let mut hr_reserve = metrics.athlete.max_hr - metrics.athlete.resting_hr;
        if hr_reserve <= 0.0 {
            hr_reserve = scoring::FALLBACK_HR_RESERVE;
        }
        let hrr = (metrics.avg_hr_bpm - metrics.athlete.resting_hr) / hr_reserve;
        let target = if target_hr_efficiency > 0.0 {
            target_hr_efficiency
        } else {
            scoring::FALLBACK_TARGET_HR_EFFICIENCY
        };
        let metabolic_efficiency = (hrr / target).max(scoring::EFFICIENCY_FLOOR);

        let weather_correction_factor = 1.0
            + (scoring::WCF_TEMPERATURE_COEFFICIENT
                * (metrics.weather.temperature_c() - scoring::WCF_REFERENCE_TEMPERATURE_C))
                .max(0.0)
            + (scoring::WCF_HUMIDITY_COEFFICIENT
                * (metrics.weather.humidity_pct() - scoring::WCF_REFERENCE_HUMIDITY_PCT))
                .max(0.0);

        let performance_efficiency = (t_ref / t_act).max(scoring::EFFICIENCY_FLOOR);

        let minutes = metrics.duration_minutes().max(1.0);
        let stability_penalty = scoring::STABILITY_ALPHA * (metrics.decoupling() / minutes).sqrt();

        let log_score = mechanical_efficiency.ln() - metabolic_efficiency.ln()
            + weather_correction_factor.ln()
            + performance_efficiency.ln()
            - stability_penalty;
        let raw_score = log_score.exp();

        let breakdown = ScoreBreakdown {
            distance_class: class,
            t_wr,
            t_ref,
            t_act,
            age_factor,
            sex_factor,
            level_factor,
            env_factor,
            nominal_power_per_kg: nominal,
            mechanical_efficiency,
            metabolic_efficiency,
            weather_correction_factor,
            performance_efficiency,
            stability_penalty,
            raw_score,
            normalized_score: saturate(raw_score),
            valid: true,
        };

        if !log_score.is_finite() || !raw_score.is_finite() || !breakdown.normalized_score.is_finite()
        {
            warn!(
                log_score,
                raw_score,
                distance_m = metrics.distance_m,
                moving_time_s = t_act,
                "Score computation hit a numeric failure, scoring zero"
            );
            return Ok((0.0, breakdown.invalidated()));
        }

        debug!(
            distance_class = %class,
            raw_score,
            score = breakdown.normalized_score,
            "Computed activity score"
        );
        Ok((breakdown.normalized_score, breakdown))
    }

    /// Rank tier; total over every input, NaN ranks `Rookie`
    #[must_use]
    pub fn rank(&self, score: f64) -> Rank {
        let t = &self.thresholds;
        if score >= t.elite {
            Rank::Elite
        } else if score >= t.epic {
            Rank::Pro
        } else if score >= t.great {
            Rank::Advanced
        } else if score >= t.solid {
            Rank::Intermediate
        } else {
            Rank::Rookie
        }
    }

    /// Run quality tier; zero, negative, or NaN scores are `NotAvailable`
    #[must_use]
    pub fn run_quality(&self, score: f64) -> RunQuality {
        let t = &self.thresholds;
        if score.is_nan() || score <= 0.0 {
            RunQuality::NotAvailable
        } else if score >= t.epic {
            RunQuality::Epic
        } else if score >= t.great {
            RunQuality::Great
        } else if score >= t.solid {
            RunQuality::Solid
        } else {
            RunQuality::Weak
        }
    }

    /// Tier boundaries in use
    #[must_use]
    pub const fn thresholds(&self) -> &ScoreThresholds {
        &self.thresholds
    }
}
