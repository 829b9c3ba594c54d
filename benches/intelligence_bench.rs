// ABOUTME: Criterion benchmarks for stream metrics, scoring, and the engine facade
// ABOUTME: Measures zones, decoupling, efficiency factor, score computation, and batch scoring
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Performance Analytics

//! Criterion benchmarks for the score engine.
//!
//! Stream metrics are measured over streams of increasing length, the facade
//! over single activities and over chronological batches.

#![allow(clippy::missing_docs_in_private_items, clippy::unwrap_used, missing_docs)]

use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use stride_score::batch::score_activities;
use stride_score::intelligence::{
    AthleteLevel, EngineConfig, MetricsCalculator, ScoreEngine, ScoreThresholds, ScoringSystem,
};
use stride_score::models::{
    ActivityInput, ActivityMetrics, AthletePhysiology, ScoreHistory, Sex, WeatherSample,
    WorldRecordTable,
};

/// Stream lengths in samples (1 Hz): 10 minutes, 1 hour, 4 hours
const STREAM_LENGTHS: [usize; 3] = [600, 3_600, 14_400];

/// Batch sizes for the facade benchmarks
const BATCH_SIZES: [usize; 3] = [10, 100, 500];

#[allow(clippy::cast_precision_loss)]
fn power_stream(len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| 180.0 + ((i * 37) % 160) as f64)
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn hr_stream(len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| 135.0 + (i as f64 / len as f64) * 20.0 + ((i * 13) % 7) as f64)
        .collect()
}

fn athlete() -> AthletePhysiology {
    AthletePhysiology::new(68.0, 48.0, 190.0, 33.0, Sex::Male, 280.0)
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_possible_wrap
)]
fn generate_inputs(count: usize) -> Vec<ActivityInput> {
    let base_date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    (0..count)
        .map(|index| {
            let moving_time_s = 1_800.0 + ((index * 137) % 3_600) as f64;
            let samples = moving_time_s as usize;
            ActivityInput {
                avg_power_w: 230.0 + ((index * 13) % 60) as f64,
                avg_hr_bpm: 140.0 + ((index * 17) % 30) as f64,
                distance_m: 5_000.0 + ((index * 251) % 16_000) as f64,
                moving_time_s,
                elevation_gain_m: ((index * 31) % 300) as f64,
                start_date: Some(base_date + Duration::days((index * 2) as i64)),
                weather: WeatherSample::measured(
                    8.0 + ((index * 5) % 22) as f64,
                    40.0 + ((index * 7) % 50) as f64,
                ),
                power_stream: power_stream(samples),
                hr_stream: hr_stream(samples),
                hr_zones: None,
            }
        })
        .collect()
}

fn engine() -> ScoreEngine {
    ScoreEngine::new(
        EngineConfig::default(),
        Arc::new(WorldRecordTable::bundled().unwrap()),
    )
}

/// Benchmark stream metrics with varying stream lengths
#[allow(clippy::cast_possible_truncation)]
fn bench_stream_metrics(c: &mut Criterion) {
    let mut group = c.benchmark_group("stream_metrics");

    for len in STREAM_LENGTHS {
        let power = power_stream(len);
        let hr = hr_stream(len);
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("zones", len), &power, |b, power| {
            b.iter(|| MetricsCalculator::calculate_zones(black_box(power), black_box(280.0)));
        });
        group.bench_with_input(
            BenchmarkId::new("decoupling", len),
            &(&power, &hr),
            |b, (power, hr)| {
                b.iter(|| MetricsCalculator::calculate_decoupling(black_box(power), black_box(hr)));
            },
        );
        group.bench_with_input(
            BenchmarkId::new("efficiency_factor", len),
            &(&power, &hr),
            |b, (power, hr)| {
                b.iter(|| {
                    MetricsCalculator::calculate_efficiency_factor(black_box(power), black_box(hr))
                });
            },
        );
    }

    group.finish();
}

/// Benchmark the composite score on a single activity
fn bench_compute_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("scoring");
    let scoring = ScoringSystem::new(
        Arc::new(WorldRecordTable::bundled().unwrap()),
        ScoreThresholds::default(),
    );
    let metrics = ActivityMetrics::new(
        265.0,
        152.0,
        10_000.0,
        2_600.0,
        55.0,
        athlete(),
        WeatherSample::measured(24.0, 70.0),
    )
    .with_decoupling(0.04);

    group.bench_function("compute_score", |b| {
        b.iter(|| {
            scoring.compute_score(
                black_box(&metrics),
                black_box(4.1),
                black_box(1.0),
                AthleteLevel::Intermediate,
            )
        });
    });

    group.finish();
}

/// Benchmark the facade on one activity with full streams
fn bench_engine_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine");
    let engine = engine();
    let input = generate_inputs(1).remove(0);
    let history = ScoreHistory::from((0..60).map(|i| 60.0 + f64::from(i % 20)).collect::<Vec<_>>());

    group.bench_function("evaluate", |b| {
        b.iter(|| engine.evaluate(black_box(&input), &athlete(), black_box(&history), &[]));
    });

    group.finish();
}

/// Benchmark chronological batch scoring with varying batch sizes
#[allow(clippy::cast_possible_truncation)]
fn bench_batch_scoring(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");
    group.sample_size(20);
    let engine = engine();

    for count in BATCH_SIZES {
        let inputs = generate_inputs(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(
            BenchmarkId::new("score_activities", count),
            &inputs,
            |b, inputs| {
                b.iter(|| {
                    score_activities(
                        &engine,
                        black_box(inputs),
                        &athlete(),
                        &ScoreHistory::new(),
                        &[],
                    )
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_stream_metrics,
    bench_compute_score,
    bench_engine_evaluate,
    bench_batch_scoring
);
criterion_main!(benches);
