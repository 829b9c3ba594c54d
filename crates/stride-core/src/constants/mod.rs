// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Physiological defaults, scoring coefficients, and stream-processing thresholds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Performance Analytics

//! Constants module
//!
//! Values are grouped by the part of the engine that consumes them. Anything an
//! operator may reasonably want to tune lives in the engine configuration and
//! only takes its default from here.

/// Athlete profile fallbacks used when the caller has no measured value
pub mod physiology_defaults {
    /// Body weight used when the recorded weight is missing or non-positive (kg)
    pub const WEIGHT_KG: f64 = 70.0;
    /// Default maximum heart rate (bpm)
    pub const MAX_HR: f64 = 185.0;
    /// Default resting heart rate (bpm)
    pub const RESTING_HR: f64 = 50.0;
    /// Default functional threshold power (W)
    pub const FTP_WATTS: f64 = 250.0;
    /// Default age (years); also the age at which the age factor is neutral
    pub const AGE_YEARS: f64 = 30.0;
    /// Nominal W/kg used when weight is unusable and FTP cannot be normalized
    pub const NOMINAL_POWER_PER_KG: f64 = 3.0;
    /// Strava places the power zone 4 ceiling at FTP x 1.05
    pub const ZONE4_MAX_FTP_RATIO: f64 = 1.05;
}

/// Fallback weather when no historical reading is available
pub mod weather_defaults {
    /// Ambient temperature (Celsius)
    pub const TEMPERATURE_C: f64 = 20.0;
    /// Relative humidity (percent)
    pub const HUMIDITY_PCT: f64 = 50.0;
}

/// Distance classification boundaries and standard race distances (meters)
pub mod distances {
    /// Below this an activity is labelled 5k
    pub const FIVE_K_UPPER_BOUND: f64 = 8_000.0;
    /// Below this an activity is labelled 10k
    pub const TEN_K_UPPER_BOUND: f64 = 16_000.0;
    /// Below this an activity is labelled half marathon
    pub const HALF_MARATHON_UPPER_BOUND: f64 = 30_000.0;

    /// 5 km
    pub const FIVE_K: f64 = 5_000.0;
    /// 10 km
    pub const TEN_K: f64 = 10_000.0;
    /// Half marathon
    pub const HALF_MARATHON: f64 = 21_097.0;
    /// Marathon
    pub const MARATHON: f64 = 42_195.0;
}

/// Demographic and environmental reference-time factors
///
/// Shared by the adjusted-duration calculation and the reference time used in
/// scoring so both describe the same athlete in the same conditions.
pub mod reference_factors {
    /// Quadratic age coefficient, neutral at 30 years
    pub const AGE_COEFFICIENT: f64 = 0.15;
    /// Age at which the age factor equals 1.0
    pub const AGE_PIVOT_YEARS: f64 = 30.0;
    /// Benchmark gap applied to female athletes
    pub const FEMALE_FACTOR: f64 = 1.10;
    /// Male athletes are the world-record baseline
    pub const MALE_FACTOR: f64 = 1.0;
    /// Heat penalty per degree above the neutral temperature
    pub const HEAT_PENALTY_PER_DEGREE: f64 = 0.01;
    /// Temperature above which the environment factor grows (Celsius)
    pub const NEUTRAL_TEMPERATURE_C: f64 = 15.0;
}

/// Athlete level multipliers applied to the elite reference time
pub mod level_factors {
    /// Elite
    pub const ELITE: f64 = 1.00;
    /// Sub-elite
    pub const SUB_ELITE: f64 = 1.05;
    /// Advanced
    pub const ADVANCED: f64 = 1.12;
    /// Intermediate (also the fallback for unknown levels)
    pub const INTERMEDIATE: f64 = 1.20;
    /// Amateur
    pub const AMATEUR: f64 = 1.35;
}

/// Coefficients of the log-linear composite score
pub mod scoring {
    /// Floor applied to every efficiency ratio so logarithms stay defined
    pub const EFFICIENCY_FLOOR: f64 = 0.01;
    /// Heart-rate reserve used when max HR does not exceed resting HR (bpm)
    pub const FALLBACK_HR_RESERVE: f64 = 60.0;
    /// Target HR efficiency used when the configured target is non-positive
    pub const FALLBACK_TARGET_HR_EFFICIENCY: f64 = 0.75;
    /// Nominal W/kg used when the supplied nominal power is non-positive
    pub const FALLBACK_NOMINAL_POWER_PER_KG: f64 = 1.0;
    /// Heat penalty per degree above the weather reference temperature
    pub const WCF_TEMPERATURE_COEFFICIENT: f64 = 0.012;
    /// Weather reference temperature (Celsius)
    pub const WCF_REFERENCE_TEMPERATURE_C: f64 = 20.0;
    /// Humidity penalty per percent above the reference humidity
    pub const WCF_HUMIDITY_COEFFICIENT: f64 = 0.005;
    /// Weather reference humidity (percent)
    pub const WCF_REFERENCE_HUMIDITY_PCT: f64 = 60.0;
    /// Aerobic stability coefficient
    pub const STABILITY_ALPHA: f64 = 0.15;
    /// Saturation rate of the normalized score
    pub const SATURATION_RATE: f64 = 1.8;
    /// Upper bound of the normalized score
    pub const MAX_SCORE: f64 = 100.0;
    /// World-record power-to-weight benchmark (W/kg)
    pub const WORLD_RECORD_POWER_TO_WEIGHT: f64 = 6.4;
}

/// Raw stream processing thresholds
pub mod streams {
    /// Minimum samples in each stream before decoupling is computed
    pub const MIN_DECOUPLING_SAMPLES: usize = 120;
    /// Power samples at or below this are treated as rest or sensor noise (W)
    pub const MIN_VALID_POWER_WATTS: f64 = 10.0;
    /// Heart-rate samples at or below this are treated as sensor noise (bpm)
    pub const MIN_VALID_HEART_RATE: f64 = 40.0;
    /// Ceiling used for an open-ended heart-rate zone (bpm)
    pub const UNBOUNDED_HR_CEILING: f64 = 300.0;
    /// Coggan power zone upper bounds as fractions of FTP (Z1..Z6; Z7 is open)
    pub const POWER_ZONE_UPPER_BOUNDS: [f64; 6] = [0.55, 0.75, 0.90, 1.05, 1.20, 1.50];
}

/// Efficiency factor rating boundaries (W per bpm)
pub mod efficiency_factor {
    /// Lower bound of a good (amateur) aerobic base
    pub const GOOD: f64 = 1.1;
    /// Lower bound of a very good (competitive) aerobic base
    pub const VERY_GOOD: f64 = 1.3;
    /// Lower bound of an elite aerobic base
    pub const ELITE: f64 = 1.5;
}

/// Score tier thresholds for rank and run quality
pub mod score_tiers {
    /// Elite rank
    pub const ELITE: f64 = 100.0;
    /// Pro rank / epic run
    pub const EPIC: f64 = 80.0;
    /// Advanced rank / great run
    pub const GREAT: f64 = 70.0;
    /// Intermediate rank / solid run
    pub const SOLID: f64 = 60.0;
}

/// Achievement badge thresholds
pub mod achievements {
    /// Last score for the legendary badge
    pub const LEGENDARY: f64 = 95.0;
    /// Mean of the last five scores for the consistency badge
    pub const CONSISTENCY_AVERAGE: f64 = 80.0;
    /// Mean of the last ten scores for the engine badge
    pub const ENGINE_AVERAGE: f64 = 75.0;
    /// Score four activities back that qualifies as a slump for the comeback badge
    pub const COMEBACK_FLOOR: f64 = 50.0;
    /// Window of the consistency badge
    pub const CONSISTENCY_WINDOW: usize = 5;
    /// Window of the engine badge
    pub const ENGINE_WINDOW: usize = 10;
}

/// Trend detection parameters
pub mod trend {
    /// Short moving-average window (activities)
    pub const SHORT_WINDOW: usize = 7;
    /// Long moving-average window (activities)
    pub const LONG_WINDOW: usize = 28;
    /// Number of most recent scores used to measure volatility
    pub const VOLATILITY_WINDOW: usize = 30;
    /// Scores required in the volatility window before the threshold adapts
    pub const MIN_VOLATILITY_SAMPLES: usize = 5;
    /// Threshold when there is not enough history to measure volatility
    pub const DEFAULT_THRESHOLD: f64 = 2.0;
    /// Lower bound of the adaptive threshold
    pub const MIN_THRESHOLD: f64 = 1.0;
    /// Fraction of the standard deviation used as the threshold
    pub const VOLATILITY_MULTIPLIER: f64 = 0.5;
}

/// Weekly consistency scoring parameters
pub mod consistency {
    /// Prior weeks averaged into the target frequency
    pub const TARGET_WEEKS: usize = 3;
    /// Lower bound of the Gaussian tolerance band (activities)
    pub const MIN_SIGMA: f64 = 1.0;
    /// Tolerance band as a fraction of the target
    pub const SIGMA_RATIO: f64 = 0.5;
    /// Raw points per activity in the current week
    pub const POINTS_PER_ACTIVITY: f64 = 20.0;
    /// Logarithmic compression constant
    pub const COMPRESSION_K: f64 = 5.0;
}

/// Run admission filter applied before scoring synced activities
pub mod eligibility {
    /// Minimum distance to count as a GPS-recorded run (m)
    pub const MIN_DISTANCE_M: f64 = 100.0;
    /// Minimum moving time (s)
    pub const MIN_MOVING_TIME_S: f64 = 60.0;
}

/// Distance windows used to match an activity to a personal best (m)
pub mod personal_best_windows {
    /// 5k window
    pub const FIVE_K: (f64, f64) = (4_500.0, 5_500.0);
    /// 10k window
    pub const TEN_K: (f64, f64) = (9_000.0, 11_000.0);
    /// Half marathon window
    pub const HALF_MARATHON: (f64, f64) = (20_000.0, 22_000.0);
}

/// Service identity used in structured logs
pub mod service_names {
    /// Main service name
    pub const STRIDE_SCORE: &str = "stride-score";
}
