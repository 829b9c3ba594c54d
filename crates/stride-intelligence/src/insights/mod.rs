// ABOUTME: Longitudinal feedback over an athlete's score and activity history
// ABOUTME: Re-exports achievements, trend analysis, and weekly consistency scoring
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Performance Analytics

//! Insights engine
//!
//! Stateless functions over history the caller owns. The engine facade feeds
//! them a history that already includes the activity just scored.

mod achievements;
mod consistency;
mod trend;

pub use achievements::{achievements, Achievement};
pub use consistency::{consistency_score, ConsistencyReport, WeeklyBucket};
pub use trend::{
    analyze_trend, analyze_trend_records, ma7_delta, moving_averages, MovingAveragePoint,
    TrendAnalysis, TrendDirection,
};
