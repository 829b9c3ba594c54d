// ABOUTME: Running score engine built on the stride-core data model
// ABOUTME: Metrics calculator, scoring system, insights engine, benchmarks, and the engine facade
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Performance Analytics

#![deny(unsafe_code)]

//! # Stride Intelligence
//!
//! The calculators that turn one activity and an athlete's history into a
//! score and feedback. Components are layered and must run in order:
//!
//! 1. **metrics**: stream-level measurements (decoupling, zones, efficiency factor)
//! 2. **scoring**: the log-linear composite score and its rank/quality tiers
//! 3. **insights**: achievements, trend, and weekly consistency over history
//!
//! `engine::ScoreEngine` runs the three for one activity and returns a single
//! `EngineResult`. Everything is synchronous and holds no state between calls.

/// Engine configuration resolved once at startup
pub mod config;

/// Stream-level activity measurements
pub mod metrics;

/// Composite score, rank, and run quality
pub mod scoring;

/// Achievements, trend, and weekly consistency
pub mod insights;

/// Personal-best and world-record comparisons
pub mod benchmarks;

/// Engine facade running every component in order
pub mod engine;

mod statistics;

pub use config::{AchievementThresholds, ConfigError, EngineConfig, ScoreThresholds};
pub use engine::{EngineResult, EvaluationContext, ScoreEngine};
pub use metrics::{EfficiencyFactor, EfficiencyRating, MetricsCalculator, ZoneDistribution};
pub use scoring::{AthleteLevel, Rank, RunQuality, ScoringSystem};

// Re-export the data model so dependents need a single import path
pub use stride_core::errors::{AppError, AppResult, ErrorCode};
pub use stride_core::models;
