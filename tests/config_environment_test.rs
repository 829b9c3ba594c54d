// ABOUTME: Integration tests for environment-driven engine settings
// ABOUTME: Tests STRIDE_* overrides, world-record file loading, and invalid configuration handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Performance Analytics

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;
use std::io::Write;
use std::sync::Arc;

use serial_test::serial;
use stride_score::config::environment::WORLD_RECORDS_PATH_VAR;
use stride_score::config::{EngineSettings, WorldRecordSource};
use stride_score::errors::ErrorCode;
use stride_score::intelligence::{AthleteLevel, ScoreEngine};
use stride_score::models::{
    ActivityInput, AthletePhysiology, DistanceClass, ScoreHistory, Sex, WeatherSample,
};
use tempfile::NamedTempFile;

const ENGINE_VARS: [&str; 6] = [
    "STRIDE_ATHLETE_LEVEL",
    "STRIDE_NOMINAL_POWER_PER_KG",
    "STRIDE_THRESHOLD_ELITE",
    "STRIDE_DEFAULT_WEIGHT_KG",
    "STRIDE_TARGET_HR_EFFICIENCY",
    WORLD_RECORDS_PATH_VAR,
];

fn clear_env() {
    for var in ENGINE_VARS {
        env::remove_var(var);
    }
}

fn ten_k(moving_time_s: f64) -> ActivityInput {
    ActivityInput {
        avg_power_w: 250.0,
        avg_hr_bpm: 150.0,
        distance_m: 10_000.0,
        moving_time_s,
        elevation_gain_m: 20.0,
        start_date: None,
        weather: WeatherSample::fallback(),
        power_stream: Vec::new(),
        hr_stream: Vec::new(),
        hr_zones: None,
    }
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_env();
    let settings = EngineSettings::from_env().unwrap();
    assert_eq!(settings.world_records, WorldRecordSource::Bundled);
    assert_eq!(settings.engine.athlete_level, AthleteLevel::Intermediate);
    assert!(settings.engine.nominal_power_override.is_none());
    assert!(settings.load_world_records().is_ok());
}

#[test]
#[serial]
fn test_environment_overrides_reach_engine_config() {
    clear_env();
    env::set_var("STRIDE_ATHLETE_LEVEL", "elite");
    env::set_var("STRIDE_NOMINAL_POWER_PER_KG", "4.5");
    env::set_var("STRIDE_THRESHOLD_ELITE", "97");
    env::set_var("STRIDE_DEFAULT_WEIGHT_KG", "62");

    let settings = EngineSettings::from_env().unwrap();
    clear_env();

    assert_eq!(settings.engine.athlete_level, AthleteLevel::Elite);
    assert_eq!(settings.engine.nominal_power_override, Some(4.5));
    assert!((settings.engine.thresholds.elite - 97.0).abs() < f64::EPSILON);
    assert!((settings.engine.defaults.weight_kg - 62.0).abs() < f64::EPSILON);
}

#[test]
#[serial]
fn test_invalid_scalar_fails_startup() {
    clear_env();
    env::set_var("STRIDE_TARGET_HR_EFFICIENCY", "-1");
    let result = EngineSettings::from_env();
    clear_env();

    let message = format!("{:#}", result.unwrap_err());
    assert!(message.contains("engine configuration"), "{message}");
}

#[test]
#[serial]
fn test_world_records_file_from_environment() {
    clear_env();
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"version": "test", "records": {{
            "5k": {{"men_elite": 800.0}},
            "10k": {{"men_elite": 1700.0, "women_elite": 1850.0}},
            "hm": {{"men_elite": 3600.0}},
            "m": {{"men_elite": 7500.0}}
        }}}}"#
    )
    .unwrap();
    env::set_var(WORLD_RECORDS_PATH_VAR, file.path());

    let settings = EngineSettings::from_env().unwrap();
    clear_env();

    assert_eq!(
        settings.world_records,
        WorldRecordSource::File(file.path().to_path_buf())
    );
    let table = settings.load_world_records().unwrap();
    assert_eq!(table.version(), Some("test"));
    assert_eq!(table.reference_time(DistanceClass::TenK), Some(1_700.0));

    let engine = ScoreEngine::new(settings.engine.clone(), Arc::new(table));
    let athlete = AthletePhysiology::new(65.0, 48.0, 190.0, 30.0, Sex::Male, 260.0);
    let result = engine
        .evaluate(&ten_k(2_400.0), &athlete, &ScoreHistory::new(), &[])
        .unwrap();
    assert!((result.breakdown.t_wr - 1_700.0).abs() < f64::EPSILON);
}

#[test]
#[serial]
fn test_blank_world_records_path_means_bundled() {
    clear_env();
    env::set_var(WORLD_RECORDS_PATH_VAR, "  ");
    let settings = EngineSettings::from_env().unwrap();
    clear_env();
    assert_eq!(settings.world_records, WorldRecordSource::Bundled);
}

#[test]
fn test_incomplete_world_records_file_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{"records": {{"5k": {{"men_elite": 755.0}}}}}}"#).unwrap();
    let settings = EngineSettings {
        world_records: WorldRecordSource::File(file.path().to_path_buf()),
        ..EngineSettings::default()
    };
    let err = settings.load_world_records().unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigInvalid);
}
