// ABOUTME: Integration tests for the engine facade and batch scoring
// ABOUTME: Tests the full metrics-scoring-insights path, input validation, and batch equivalence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Performance Analytics

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::sync::Arc;
use std::thread;

use chrono::{Duration, NaiveDate};
use stride_score::batch::score_activities;
use stride_score::errors::ErrorCode;
use stride_score::intelligence::benchmarks::PersonalBest;
use stride_score::intelligence::{EngineConfig, EvaluationContext, ScoreEngine};
use stride_score::models::{
    ActivityInput, ActivityRecord, AthletePhysiology, AthleteProfile, DistanceClass,
    HrZoneDefinition, PhysiologyDefaults, ScoreHistory, Sex, WeatherSample, WorldRecordTable,
};

fn engine() -> ScoreEngine {
    ScoreEngine::new(
        EngineConfig::default(),
        Arc::new(WorldRecordTable::bundled().unwrap()),
    )
}

fn athlete() -> AthletePhysiology {
    AthletePhysiology::new(68.0, 48.0, 192.0, 34.0, Sex::Male, 285.0)
}

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()
}

fn activity(day: i64, moving_time_s: f64) -> ActivityInput {
    let mut hr = vec![148.0; 900];
    hr.extend(vec![156.0; 900]);
    ActivityInput {
        avg_power_w: 265.0,
        avg_hr_bpm: 152.0,
        distance_m: 10_000.0,
        moving_time_s,
        elevation_gain_m: 55.0,
        start_date: Some(start() + Duration::days(day)),
        weather: WeatherSample::measured(22.0, 65.0),
        power_stream: vec![265.0; 1_800],
        hr_stream: hr,
        hr_zones: Some(HrZoneDefinition::from_bounds(&[
            (0.0, 140.0),
            (141.0, 160.0),
            (161.0, -1.0),
        ])),
    }
}

#[test]
fn test_full_evaluation() {
    let result = engine()
        .evaluate(&activity(0, 2_600.0), &athlete(), &ScoreHistory::new(), &[])
        .unwrap();

    assert!((0.0..=100.0).contains(&result.score));
    // cost ratio rises from 148/265 to 156/265
    assert!((result.decoupling - 8.0 / 148.0).abs() < 1e-12);
    assert!((result.breakdown.stability_penalty
        - 0.15 * (result.decoupling / (2_600.0 / 60.0)).sqrt())
    .abs()
        < 1e-12);
    assert!((result.zones.values().sum::<f64>() - 100.0).abs() < 0.35);
    let hr_zones = result.hr_zones.as_ref().unwrap();
    assert!((hr_zones["Z2"] - 100.0).abs() < f64::EPSILON);
    assert!(result.adjusted_duration > 0.0 && result.adjusted_duration < 2_600.0);
    assert_eq!(result.history.as_slice(), &[result.score]);
    assert_eq!(result.trend.message, "Stable Trend");
    assert_eq!(result.consistency.current_week_count, 1);
}

#[test]
fn test_empty_streams_degrade_gracefully() {
    let mut input = activity(0, 2_600.0);
    input.power_stream.clear();
    input.hr_stream.clear();
    input.hr_zones = None;

    let result = engine()
        .evaluate(&input, &athlete(), &ScoreHistory::new(), &[])
        .unwrap();
    assert!(result.decoupling.abs() < f64::EPSILON);
    assert!(result.zones.is_empty());
    assert!(result.efficiency_factor.value.abs() < f64::EPSILON);
    assert!(result.score > 0.0);
}

#[test]
fn test_input_contract_violations() {
    let engine = engine();
    let cases: Vec<(&str, Box<dyn Fn(&mut ActivityInput)>)> = vec![
        ("distance", Box::new(|i: &mut ActivityInput| i.distance_m = -1.0)),
        ("duration", Box::new(|i: &mut ActivityInput| i.moving_time_s = 0.0)),
        ("power", Box::new(|i: &mut ActivityInput| i.avg_power_w = -5.0)),
        ("heart rate", Box::new(|i: &mut ActivityInput| i.avg_hr_bpm = f64::NAN)),
        ("elevation", Box::new(|i: &mut ActivityInput| i.elevation_gain_m = f64::INFINITY)),
    ];
    for (name, mutate) in cases {
        let mut input = activity(0, 2_600.0);
        mutate(&mut input);
        let err = engine
            .evaluate(&input, &athlete(), &ScoreHistory::new(), &[])
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput, "{name}");
    }
}

#[test]
fn test_history_is_not_mutated() {
    let history = ScoreHistory::from(vec![55.0, 61.0, 64.0]);
    let records = vec![ActivityRecord::new(start() + Duration::days(1), 2_500.0, 9_800.0).with_score(64.0)];
    let result = engine()
        .evaluate(&activity(2, 2_500.0), &athlete(), &history, &records)
        .unwrap();
    assert_eq!(history.len(), 3);
    assert_eq!(records.len(), 1);
    assert_eq!(result.history.len(), 4);
    assert_eq!(result.consistency.current_week_count, 2);
}

#[test]
fn test_faster_run_scores_higher_through_facade() {
    let engine = engine();
    let slow = engine
        .evaluate(&activity(0, 3_000.0), &athlete(), &ScoreHistory::new(), &[])
        .unwrap();
    let fast = engine
        .evaluate(&activity(0, 2_400.0), &athlete(), &ScoreHistory::new(), &[])
        .unwrap();
    assert!(fast.score > slow.score);
    assert!(fast.adjusted_duration < slow.adjusted_duration);
}

#[test]
fn test_profile_resolution_feeds_engine() {
    let profile: AthleteProfile =
        serde_json::from_str(r#"{"weight_kg": 0, "ftp_watts": 300}"#).unwrap();
    let physiology = profile.resolve(&PhysiologyDefaults::default());
    assert!((physiology.weight_kg - 70.0).abs() < f64::EPSILON);

    let result = engine()
        .evaluate(&activity(0, 2_600.0), &physiology, &ScoreHistory::new(), &[])
        .unwrap();
    assert!((result.breakdown.nominal_power_per_kg - 300.0 / 70.0).abs() < 1e-12);
}

#[test]
fn test_personal_best_enrichment() {
    let context = EvaluationContext {
        personal_bests: vec![PersonalBest {
            distance_class: DistanceClass::TenK,
            best_time_s: 2_340.0,
        }],
        adjusted_baselines: None,
    };
    let result = engine()
        .evaluate_with_context(
            &activity(0, 2_600.0),
            &athlete(),
            &ScoreHistory::new(),
            &[],
            &context,
        )
        .unwrap();
    assert!((result.benchmarks.personal_best_pct.unwrap() - 90.0).abs() < 1e-9);
    assert!(result.benchmarks.improves_adjusted_baseline.is_none());
}

#[test]
fn test_engine_shared_across_threads() {
    let engine = Arc::new(engine());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                engine
                    .evaluate(
                        &activity(i, 2_600.0),
                        &athlete(),
                        &ScoreHistory::new(),
                        &[],
                    )
                    .unwrap()
                    .score
            })
        })
        .collect();
    let scores: Vec<f64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(scores.windows(2).all(|w| (w[0] - w[1]).abs() < f64::EPSILON));
}

#[test]
fn test_batch_matches_sequential_evaluation() {
    let engine = engine();
    let inputs: Vec<ActivityInput> = (0..12_i32)
        .map(|i| activity(i64::from(i) * 2, f64::from(i).mul_add(25.0, 2_400.0)))
        .collect();

    let report = score_activities(&engine, &inputs, &athlete(), &ScoreHistory::new(), &[]);
    assert!(report.failures.is_empty());
    assert_eq!(report.results.len(), inputs.len());

    let mut history = ScoreHistory::new();
    let mut records = Vec::new();
    for (input, batched) in inputs.iter().zip(&report.results) {
        let single = engine.evaluate(input, &athlete(), &history, &records).unwrap();
        assert_eq!(&single, batched);
        history = single.history.clone();
        records.push(
            ActivityRecord::new(input.start_date.unwrap(), input.moving_time_s, input.distance_m)
                .with_score(single.score),
        );
    }
    assert_eq!(report.history, history);
}

#[test]
fn test_batch_reports_rejected_activities() {
    let engine = engine();
    let mut bad = activity(1, 2_500.0);
    bad.moving_time_s = -3.0;
    let inputs = vec![activity(0, 2_500.0), bad, activity(2, 2_450.0)];

    let report = score_activities(&engine, &inputs, &athlete(), &ScoreHistory::new(), &[]);
    assert_eq!(report.results.len(), 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].index, 1);
    assert_eq!(report.failures[0].code, ErrorCode::InvalidInput);
    assert_eq!(report.history.len(), 2);
}
