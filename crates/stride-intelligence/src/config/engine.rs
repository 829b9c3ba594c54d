// ABOUTME: Engine configuration resolved once at startup and passed explicitly
// ABOUTME: Athlete level, HR efficiency target, score tiers, badge thresholds, and profile defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Performance Analytics

use super::error::ConfigError;
use crate::scoring::AthleteLevel;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use stride_core::constants::{achievements, score_tiers, scoring};
use stride_core::models::PhysiologyDefaults;
use tracing::warn;

/// Target HR reserve efficiency used unless configured otherwise
const DEFAULT_TARGET_HR_EFFICIENCY: f64 = 1.0;

/// Score boundaries of the rank and run-quality tiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreThresholds {
    /// Elite rank
    pub elite: f64,
    /// Pro rank and epic run
    pub epic: f64,
    /// Advanced rank and great run
    pub great: f64,
    /// Intermediate rank and solid run
    pub solid: f64,
}

impl Default for ScoreThresholds {
    fn default() -> Self {
        Self {
            elite: score_tiers::ELITE,
            epic: score_tiers::EPIC,
            great: score_tiers::GREAT,
            solid: score_tiers::SOLID,
        }
    }
}

impl ScoreThresholds {
    /// Load score tiers from environment, keeping defaults for unset or unparsable values
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            elite: env::var("STRIDE_THRESHOLD_ELITE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(score_tiers::ELITE),
            epic: env::var("STRIDE_THRESHOLD_EPIC")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(score_tiers::EPIC),
            great: env::var("STRIDE_THRESHOLD_GREAT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(score_tiers::GREAT),
            solid: env::var("STRIDE_THRESHOLD_SOLID")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(score_tiers::SOLID),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.elite <= self.epic || self.epic <= self.great || self.great <= self.solid {
            return Err(ConfigError::InvalidRange(
                "score thresholds must satisfy elite > epic > great > solid",
            ));
        }
        if self.solid <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "solid score threshold must be positive",
            ));
        }
        Ok(())
    }
}

/// Score thresholds of the achievement badges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AchievementThresholds {
    /// Last score for the legendary badge
    pub legendary: f64,
    /// Last score for the epic badge
    pub epic: f64,
    /// Last score for the great badge, also the comeback target
    pub great: f64,
    /// Mean of the last five scores for the consistency badge
    pub consistency_average: f64,
    /// Mean of the last ten scores for the engine badge
    pub engine_average: f64,
    /// Score four activities back that counts as a slump
    pub comeback_floor: f64,
}

impl Default for AchievementThresholds {
    fn default() -> Self {
        Self {
            legendary: achievements::LEGENDARY,
            epic: score_tiers::EPIC,
            great: score_tiers::GREAT,
            consistency_average: achievements::CONSISTENCY_AVERAGE,
            engine_average: achievements::ENGINE_AVERAGE,
            comeback_floor: achievements::COMEBACK_FLOOR,
        }
    }
}

impl AchievementThresholds {
    /// Load badge thresholds from environment, keeping defaults for unset or unparsable values
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            legendary: env::var("STRIDE_ACHIEVEMENT_LEGENDARY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(achievements::LEGENDARY),
            epic: env::var("STRIDE_ACHIEVEMENT_EPIC")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(score_tiers::EPIC),
            great: env::var("STRIDE_ACHIEVEMENT_GREAT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(score_tiers::GREAT),
            consistency_average: env::var("STRIDE_ACHIEVEMENT_CONSISTENCY_AVERAGE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(achievements::CONSISTENCY_AVERAGE),
            engine_average: env::var("STRIDE_ACHIEVEMENT_ENGINE_AVERAGE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(achievements::ENGINE_AVERAGE),
            comeback_floor: env::var("STRIDE_ACHIEVEMENT_COMEBACK_FLOOR")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(achievements::COMEBACK_FLOOR),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.legendary <= self.epic || self.epic <= self.great {
            return Err(ConfigError::InvalidRange(
                "achievement tiers must satisfy legendary > epic > great",
            ));
        }
        if self.comeback_floor >= self.great {
            return Err(ConfigError::InvalidRange(
                "comeback floor must be below the great threshold",
            ));
        }
        Ok(())
    }
}

/// Single resolved configuration for the score engine
///
/// Built once (defaults, then environment overrides, then validation) and
/// passed by value into `ScoreEngine::new`. Nothing reads configuration from
/// ambient state after that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Competitive level applied to the reference time
    pub athlete_level: AthleteLevel,
    /// Target heart-rate reserve usage
    pub target_hr_efficiency: f64,
    /// Fixed nominal W/kg; derived from FTP and weight when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nominal_power_override: Option<f64>,
    /// World-record power-to-weight benchmark (W/kg)
    pub wr_power_to_weight: f64,
    /// Rank and quality tiers
    pub thresholds: ScoreThresholds,
    /// Achievement badge thresholds
    pub achievements: AchievementThresholds,
    /// Fallbacks for incomplete athlete profiles
    pub defaults: PhysiologyDefaults,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            athlete_level: AthleteLevel::default(),
            target_hr_efficiency: DEFAULT_TARGET_HR_EFFICIENCY,
            nominal_power_override: None,
            wr_power_to_weight: scoring::WORLD_RECORD_POWER_TO_WEIGHT,
            thresholds: ScoreThresholds::default(),
            achievements: AchievementThresholds::default(),
            defaults: PhysiologyDefaults::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from `STRIDE_*` environment variables and validate it
    ///
    /// # Errors
    ///
    /// Returns an error if a scalar override cannot be parsed or the resulting
    /// configuration fails validation
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self {
            thresholds: ScoreThresholds::from_env(),
            achievements: AchievementThresholds::from_env(),
            ..Self::default()
        };

        if let Ok(level) = env::var("STRIDE_ATHLETE_LEVEL") {
            config.athlete_level = AthleteLevel::from_str_or_default(&level);
            if AthleteLevel::parse(&level).is_none() {
                warn!(level = %level, "Unknown athlete level, using intermediate");
            }
        }
        Self::apply_env_var(
            "STRIDE_TARGET_HR_EFFICIENCY",
            &mut config.target_hr_efficiency,
        )?;
        Self::apply_env_var(
            "STRIDE_WR_POWER_TO_WEIGHT",
            &mut config.wr_power_to_weight,
        )?;
        if let Ok(val) = env::var("STRIDE_NOMINAL_POWER_PER_KG") {
            let nominal: f64 = val
                .parse()
                .map_err(|_| ConfigError::Parse("Invalid STRIDE_NOMINAL_POWER_PER_KG".into()))?;
            config.nominal_power_override = Some(nominal);
        }

        Self::apply_env_var("STRIDE_DEFAULT_WEIGHT_KG", &mut config.defaults.weight_kg)?;
        Self::apply_env_var("STRIDE_DEFAULT_MAX_HR", &mut config.defaults.max_hr)?;
        Self::apply_env_var("STRIDE_DEFAULT_RESTING_HR", &mut config.defaults.resting_hr)?;
        Self::apply_env_var("STRIDE_DEFAULT_AGE", &mut config.defaults.age)?;
        Self::apply_env_var("STRIDE_DEFAULT_FTP", &mut config.defaults.ftp_watts)?;

        config.validate()?;
        Ok(config)
    }

    /// Check targets are positive and tiers ordered
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_positive(self.target_hr_efficiency) {
            return Err(ConfigError::ValueOutOfRange(
                "target_hr_efficiency must be a positive number",
            ));
        }
        if !is_positive(self.wr_power_to_weight) {
            return Err(ConfigError::ValueOutOfRange(
                "wr_power_to_weight must be a positive number",
            ));
        }
        if self.nominal_power_override.is_some_and(|n| !is_positive(n)) {
            return Err(ConfigError::ValueOutOfRange(
                "nominal power override must be a positive number",
            ));
        }
        if !is_positive(self.defaults.weight_kg) {
            return Err(ConfigError::ValueOutOfRange(
                "default weight must be a positive number",
            ));
        }
        if self.defaults.max_hr <= self.defaults.resting_hr {
            return Err(ConfigError::InvalidRange(
                "default max HR must exceed default resting HR",
            ));
        }
        self.thresholds.validate()?;
        self.achievements.validate()
    }

    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }
}

fn is_positive(value: f64) -> bool {
    value > 0.0 && value.is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_unordered_thresholds_rejected() {
        let config = EngineConfig {
            thresholds: ScoreThresholds {
                great: 85.0,
                ..ScoreThresholds::default()
            },
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_non_positive_target_rejected() {
        let config = EngineConfig {
            target_hr_efficiency: 0.0,
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValueOutOfRange(_))
        ));
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        env::set_var("STRIDE_ATHLETE_LEVEL", "advanced");
        env::set_var("STRIDE_TARGET_HR_EFFICIENCY", "0.85");
        env::set_var("STRIDE_THRESHOLD_SOLID", "not-a-number");

        let config = EngineConfig::from_env().unwrap();
        assert_eq!(config.athlete_level, AthleteLevel::Advanced);
        assert!((config.target_hr_efficiency - 0.85).abs() < f64::EPSILON);
        assert!((config.thresholds.solid - 60.0).abs() < f64::EPSILON);

        env::remove_var("STRIDE_ATHLETE_LEVEL");
        env::remove_var("STRIDE_TARGET_HR_EFFICIENCY");
        env::remove_var("STRIDE_THRESHOLD_SOLID");
    }

    #[test]
    #[serial]
    fn test_unparsable_scalar_is_error() {
        env::set_var("STRIDE_WR_POWER_TO_WEIGHT", "six");
        let result = EngineConfig::from_env();
        env::remove_var("STRIDE_WR_POWER_TO_WEIGHT");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
