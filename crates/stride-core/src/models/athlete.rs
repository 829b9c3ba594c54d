// ABOUTME: Athlete physiology models and profile resolution
// ABOUTME: Sex, AthletePhysiology, partial AthleteProfile, and the defaults they resolve against
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Performance Analytics

use crate::constants::physiology_defaults;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Biological sex used for the benchmark gap factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Sex {
    /// Male (world-record baseline)
    #[default]
    #[serde(rename = "M", alias = "male", alias = "m")]
    Male,
    /// Female
    #[serde(rename = "F", alias = "female", alias = "f")]
    Female,
}

impl Sex {
    /// Parse provider text, falling back to `Male` for anything unrecognized
    #[must_use]
    pub fn from_str_or_default(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "f" | "female" | "w" | "woman" => Self::Female,
            _ => Self::Male,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => write!(f, "M"),
            Self::Female => write!(f, "F"),
        }
    }
}

/// Fallback values an incomplete profile resolves against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysiologyDefaults {
    /// Body weight (kg)
    pub weight_kg: f64,
    /// Maximum heart rate (bpm)
    pub max_hr: f64,
    /// Resting heart rate (bpm)
    pub resting_hr: f64,
    /// Age (years)
    pub age: f64,
    /// Functional threshold power (W)
    pub ftp_watts: f64,
}

impl Default for PhysiologyDefaults {
    fn default() -> Self {
        Self {
            weight_kg: physiology_defaults::WEIGHT_KG,
            max_hr: physiology_defaults::MAX_HR,
            resting_hr: physiology_defaults::RESTING_HR,
            age: physiology_defaults::AGE_YEARS,
            ftp_watts: physiology_defaults::FTP_WATTS,
        }
    }
}

/// Physiological parameters of one athlete at the time of an activity
///
/// Owned by the caller and passed by reference into the engine. The weight is
/// guaranteed positive: construction replaces a non-positive or non-finite
/// weight with the 70 kg default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthletePhysiology {
    /// Body weight (kg, > 0)
    pub weight_kg: f64,
    /// Resting heart rate (bpm)
    pub resting_hr: f64,
    /// Maximum heart rate (bpm)
    pub max_hr: f64,
    /// Age (years)
    pub age: f64,
    /// Biological sex
    pub sex: Sex,
    /// Functional threshold power (W)
    pub ftp_watts: f64,
}

impl AthletePhysiology {
    /// Build a physiology snapshot, enforcing a positive weight
    #[must_use]
    pub fn new(
        weight_kg: f64,
        resting_hr: f64,
        max_hr: f64,
        age: f64,
        sex: Sex,
        ftp_watts: f64,
    ) -> Self {
        Self {
            weight_kg: sanitize_weight(weight_kg),
            resting_hr,
            max_hr,
            age,
            sex,
            ftp_watts,
        }
    }

    /// Weight with the positive-weight invariant re-applied
    ///
    /// Deserialized snapshots bypass `new`, so readers go through this.
    #[must_use]
    pub fn effective_weight_kg(&self) -> f64 {
        sanitize_weight(self.weight_kg)
    }

    /// FTP normalized by body weight, the athlete's nominal W/kg
    #[must_use]
    pub fn nominal_power_per_kg(&self) -> f64 {
        if self.weight_kg > 0.0 && self.weight_kg.is_finite() && self.ftp_watts > 0.0 {
            self.ftp_watts / self.weight_kg
        } else {
            physiology_defaults::NOMINAL_POWER_PER_KG
        }
    }
}

impl Default for AthletePhysiology {
    fn default() -> Self {
        let defaults = PhysiologyDefaults::default();
        Self::new(
            defaults.weight_kg,
            defaults.resting_hr,
            defaults.max_hr,
            defaults.age,
            Sex::Male,
            defaults.ftp_watts,
        )
    }
}

fn sanitize_weight(weight_kg: f64) -> f64 {
    if weight_kg > 0.0 && weight_kg.is_finite() {
        weight_kg
    } else {
        physiology_defaults::WEIGHT_KG
    }
}

/// Partial athlete profile as stored or fetched from a provider
///
/// Every field is optional; `resolve` fills the gaps once, before the engine
/// runs, so no calculator has to re-derive a fallback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AthleteProfile {
    /// Body weight (kg)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    /// Maximum heart rate (bpm)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_hr: Option<f64>,
    /// Resting heart rate (bpm)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resting_hr: Option<f64>,
    /// Age (years)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<f64>,
    /// Biological sex
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<Sex>,
    /// Functional threshold power (W)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ftp_watts: Option<f64>,
}

impl AthleteProfile {
    /// Resolve against defaults; zero or negative stored values count as missing
    #[must_use]
    pub fn resolve(&self, defaults: &PhysiologyDefaults) -> AthletePhysiology {
        let pick = |value: Option<f64>, fallback: f64| {
            value
                .filter(|v| *v > 0.0 && v.is_finite())
                .unwrap_or(fallback)
        };

        AthletePhysiology::new(
            pick(self.weight_kg, defaults.weight_kg),
            pick(self.resting_hr, defaults.resting_hr),
            pick(self.max_hr, defaults.max_hr),
            pick(self.age, defaults.age),
            self.sex.unwrap_or_default(),
            pick(self.ftp_watts, defaults.ftp_watts),
        )
    }
}

/// Age in whole years on `today` for someone born on `birthdate`
///
/// Returns `None` when the birthdate lies in the future.
#[must_use]
pub fn age_from_birthdate(birthdate: NaiveDate, today: NaiveDate) -> Option<u32> {
    let mut years = today.year() - birthdate.year();
    if (today.month(), today.day()) < (birthdate.month(), birthdate.day()) {
        years -= 1;
    }
    u32::try_from(years).ok()
}

/// Infer FTP from the provider's power zone 4 ceiling (whole watts)
#[must_use]
pub fn infer_ftp_from_zone4_max(zone4_max_watts: f64) -> Option<f64> {
    if zone4_max_watts > 0.0 && zone4_max_watts.is_finite() {
        Some((zone4_max_watts / physiology_defaults::ZONE4_MAX_FTP_RATIO).trunc())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_positive_weight_falls_back() {
        let athlete = AthletePhysiology::new(0.0, 50.0, 190.0, 30.0, Sex::Male, 250.0);
        assert!((athlete.weight_kg - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_nominal_power_per_kg() {
        let athlete = AthletePhysiology::new(62.5, 50.0, 190.0, 30.0, Sex::Female, 250.0);
        assert!((athlete.nominal_power_per_kg() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_profile_resolution_prefers_stored_values() {
        let profile = AthleteProfile {
            weight_kg: Some(64.0),
            max_hr: Some(0.0),
            sex: Some(Sex::Female),
            ..AthleteProfile::default()
        };
        let athlete = profile.resolve(&PhysiologyDefaults::default());
        assert!((athlete.weight_kg - 64.0).abs() < f64::EPSILON);
        assert!((athlete.max_hr - 185.0).abs() < f64::EPSILON);
        assert_eq!(athlete.sex, Sex::Female);
    }

    #[test]
    fn test_sex_parsing() {
        assert_eq!(Sex::from_str_or_default("F"), Sex::Female);
        assert_eq!(Sex::from_str_or_default("female"), Sex::Female);
        assert_eq!(Sex::from_str_or_default("unknown"), Sex::Male);
        let parsed: Sex = serde_json::from_str("\"F\"").unwrap();
        assert_eq!(parsed, Sex::Female);
    }

    #[test]
    fn test_age_from_birthdate() {
        let birth = NaiveDate::from_ymd_opt(1990, 6, 15).unwrap();
        let before = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
        let on = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert_eq!(age_from_birthdate(birth, before), Some(33));
        assert_eq!(age_from_birthdate(birth, on), Some(34));
        assert_eq!(age_from_birthdate(on, birth), None);
    }

    #[test]
    fn test_infer_ftp_from_zone4() {
        assert_eq!(infer_ftp_from_zone4_max(263.0), Some(250.0));
        assert_eq!(infer_ftp_from_zone4_max(0.0), None);
    }
}
