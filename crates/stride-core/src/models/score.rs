// ABOUTME: Score breakdown audit record and the athlete's score history
// ABOUTME: ScoreBreakdown serializes with the engine output contract key names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Performance Analytics

use super::activity::DistanceClass;
use serde::{Deserialize, Serialize};

/// Every intermediate factor of one scoring call
///
/// Produced once per call and never mutated. `raw_score` is kept unrounded so
/// that saturating it again reproduces `normalized_score` exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    /// Standard class the reference time was taken from
    pub distance_class: DistanceClass,
    /// Elite reference time for the class (s)
    #[serde(rename = "T_WR")]
    pub t_wr: f64,
    /// Personalized reference time (s)
    #[serde(rename = "T_ref")]
    pub t_ref: f64,
    /// Actual moving time (s)
    #[serde(rename = "T_act")]
    pub t_act: f64,
    /// Age multiplier
    pub age_factor: f64,
    /// Sex multiplier
    pub sex_factor: f64,
    /// Athlete level multiplier
    pub level_factor: f64,
    /// Heat multiplier
    pub env_factor: f64,
    /// Nominal W/kg the mechanical efficiency was measured against
    pub nominal_power_per_kg: f64,
    /// Power-to-weight relative to nominal (floored)
    pub mechanical_efficiency: f64,
    /// Heart-rate reserve usage relative to target (floored)
    pub metabolic_efficiency: f64,
    /// Weather correction factor (>= 1)
    pub weather_correction_factor: f64,
    /// Reference time over actual time (floored)
    pub performance_efficiency: f64,
    /// Aerobic stability penalty subtracted in log space
    pub stability_penalty: f64,
    /// Composite score before saturation
    pub raw_score: f64,
    /// Final score in [0, 100]
    pub normalized_score: f64,
    /// False when the computation hit a numeric failure and the score was zeroed
    pub valid: bool,
}

impl ScoreBreakdown {
    /// Mark a breakdown as the product of a numeric failure
    #[must_use]
    pub const fn invalidated(mut self) -> Self {
        self.raw_score = 0.0;
        self.normalized_score = 0.0;
        self.valid = false;
        self
    }
}

/// Ordered normalized scores of one athlete, oldest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreHistory {
    scores: Vec<f64>,
}

impl ScoreHistory {
    /// Empty history
    #[must_use]
    pub const fn new() -> Self {
        Self { scores: Vec::new() }
    }

    /// Append a score in place
    pub fn push(&mut self, score: f64) {
        self.scores.push(score);
    }

    /// Snapshot with `score` appended; `self` is left untouched
    #[must_use]
    pub fn with_appended(&self, score: f64) -> Self {
        let mut next = self.clone();
        next.push(score);
        next
    }

    /// Most recent score
    #[must_use]
    pub fn last(&self) -> Option<f64> {
        self.scores.last().copied()
    }

    /// The last `n` scores (fewer when the history is shorter)
    #[must_use]
    pub fn tail(&self, n: usize) -> &[f64] {
        &self.scores[self.scores.len().saturating_sub(n)..]
    }

    /// Number of scores
    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Whether no score has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// All scores, oldest first
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.scores
    }
}

impl From<Vec<f64>> for ScoreHistory {
    fn from(scores: Vec<f64>) -> Self {
        Self { scores }
    }
}

impl FromIterator<f64> for ScoreHistory {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self {
            scores: iter.into_iter().collect(),
        }
    }
}
