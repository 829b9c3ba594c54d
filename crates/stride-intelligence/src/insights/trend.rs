// ABOUTME: Score trend detection from short and long trailing moving averages
// ABOUTME: Volatility-adaptive significance threshold and per-point moving-average series
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Performance Analytics

use crate::statistics::{mean, sample_std_dev};
use serde::{Deserialize, Serialize};
use stride_core::constants::trend::{
    DEFAULT_THRESHOLD, LONG_WINDOW, MIN_THRESHOLD, MIN_VOLATILITY_SAMPLES, SHORT_WINDOW,
    VOLATILITY_MULTIPLIER, VOLATILITY_WINDOW,
};
use stride_core::models::ActivityRecord;

const INSUFFICIENT_DATA: &str = "Insufficient Data";

/// Direction of the recent score trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    /// Short and long averages within the threshold
    Flat,
    /// Short average above the long one by more than the threshold
    Up,
    /// Short average below the long one by more than the threshold
    Down,
}

impl TrendDirection {
    /// Compact symbol
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Flat => "=",
            Self::Up => "+",
            Self::Down => "-",
        }
    }

    /// Human-readable message
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Flat => "Stable Trend",
            Self::Up => "Positive Trend",
            Self::Down => "Negative Trend",
        }
    }
}

/// Result of comparing the 7- and 28-activity averages
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendAnalysis {
    /// Trend direction
    pub direction: TrendDirection,
    /// `=`, `+`, or `-`
    pub symbol: &'static str,
    /// Human-readable message
    pub message: &'static str,
    /// Latest MA7 minus latest MA28
    pub delta: f64,
    /// Significance threshold the delta was compared against
    pub threshold: f64,
}

impl TrendAnalysis {
    fn classified(delta: f64, threshold: f64) -> Self {
        let direction = if delta.abs() <= threshold {
            TrendDirection::Flat
        } else if delta > threshold {
            TrendDirection::Up
        } else {
            TrendDirection::Down
        };
        Self {
            direction,
            symbol: direction.symbol(),
            message: direction.message(),
            delta,
            threshold,
        }
    }

    fn insufficient() -> Self {
        Self {
            direction: TrendDirection::Flat,
            symbol: TrendDirection::Flat.symbol(),
            message: INSUFFICIENT_DATA,
            delta: 0.0,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Trailing moving averages at one point of the history
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovingAveragePoint {
    /// Score at this point
    pub score: f64,
    /// Mean of up to seven scores ending here
    pub ma7: f64,
    /// Mean of up to twenty-eight scores ending here
    pub ma28: f64,
}

fn trailing_mean(scores: &[f64], end: usize, window: usize) -> f64 {
    let start = end.saturating_sub(window);
    mean(&scores[start..end]).unwrap_or(0.0)
}

/// MA7 and MA28 for every point; windows shorter than full use what exists
#[must_use]
pub fn moving_averages(scores: &[f64]) -> Vec<MovingAveragePoint> {
    scores
        .iter()
        .enumerate()
        .map(|(idx, &score)| MovingAveragePoint {
            score,
            ma7: trailing_mean(scores, idx + 1, SHORT_WINDOW),
            ma28: trailing_mean(scores, idx + 1, LONG_WINDOW),
        })
        .collect()
}

/// Change of MA7 caused by the latest score; `None` below two scores
#[must_use]
pub fn ma7_delta(scores: &[f64]) -> Option<f64> {
    if scores.len() < 2 {
        return None;
    }
    let latest = trailing_mean(scores, scores.len(), SHORT_WINDOW);
    let previous = trailing_mean(scores, scores.len() - 1, SHORT_WINDOW);
    Some(latest - previous)
}

/// Trend of a chronologically ordered score series
///
/// The threshold adapts to volatility: with at least five of the last thirty
/// scores it is half their sample standard deviation, never below 1.0.
#[must_use]
pub fn analyze_trend(scores: &[f64]) -> TrendAnalysis {
    if scores.is_empty() {
        return TrendAnalysis::insufficient();
    }

    let recent = &scores[scores.len().saturating_sub(VOLATILITY_WINDOW)..];
    let threshold = if recent.len() >= MIN_VOLATILITY_SAMPLES {
        let volatility = sample_std_dev(recent)
            .filter(|v| v.is_finite())
            .unwrap_or(0.0);
        (volatility * VOLATILITY_MULTIPLIER).max(MIN_THRESHOLD)
    } else {
        DEFAULT_THRESHOLD
    };

    let ma_short = trailing_mean(scores, scores.len(), SHORT_WINDOW);
    let ma_long = trailing_mean(scores, scores.len(), LONG_WINDOW);
    TrendAnalysis::classified(ma_short - ma_long, threshold)
}

/// Trend over the scored rows of an activity table, ordered by date
#[must_use]
pub fn analyze_trend_records(records: &[ActivityRecord]) -> TrendAnalysis {
    let mut dated: Vec<&ActivityRecord> = records.iter().filter(|r| r.score.is_some()).collect();
    dated.sort_by_key(|r| r.date);
    let scores: Vec<f64> = dated.iter().filter_map(|r| r.score).collect();
    analyze_trend(&scores)
}
