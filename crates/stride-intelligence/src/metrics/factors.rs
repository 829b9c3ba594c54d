// ABOUTME: Demographic and environmental multipliers shared by duration adjustment and scoring
// ABOUTME: Age, sex, and heat factors applied to reference and adjusted times
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Performance Analytics

use stride_core::constants::reference_factors::{
    AGE_COEFFICIENT, AGE_PIVOT_YEARS, FEMALE_FACTOR, HEAT_PENALTY_PER_DEGREE, MALE_FACTOR,
    NEUTRAL_TEMPERATURE_C,
};
use stride_core::models::Sex;

/// Quadratic age multiplier, exactly 1.0 at 30 years
#[must_use]
pub fn age_factor(age_years: f64) -> f64 {
    AGE_COEFFICIENT.mul_add(((age_years - AGE_PIVOT_YEARS) / AGE_PIVOT_YEARS).powi(2), 1.0)
}

/// Benchmark gap between sexes; men are the baseline
#[must_use]
pub const fn sex_factor(sex: Sex) -> f64 {
    match sex {
        Sex::Male => MALE_FACTOR,
        Sex::Female => FEMALE_FACTOR,
    }
}

/// Heat multiplier, growing by 1% per degree above 15C
#[must_use]
pub fn env_factor(temperature_c: f64) -> f64 {
    HEAT_PENALTY_PER_DEGREE.mul_add((temperature_c - NEUTRAL_TEMPERATURE_C).max(0.0), 1.0)
}
