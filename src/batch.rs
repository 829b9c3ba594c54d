// ABOUTME: Batch scoring of many activities for one athlete
// ABOUTME: Scores independent activities in parallel, then derives history-dependent insights in order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Performance Analytics

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use stride_core::errors::{AppResult, ErrorCode};
use stride_core::models::{ActivityInput, ActivityRecord, AthletePhysiology, ScoreHistory};
use stride_intelligence::insights::{achievements, analyze_trend, consistency_score};
use stride_intelligence::{EngineResult, ScoreEngine};
use tracing::{info, warn};

/// An activity the engine rejected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchFailure {
    /// Position of the activity in the input slice
    pub index: usize,
    /// Error classification
    pub code: ErrorCode,
    /// Error message
    pub message: String,
}

/// Outcome of scoring a batch
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    /// Results of accepted activities, in input order
    pub results: Vec<EngineResult>,
    /// Rejected activities
    pub failures: Vec<BatchFailure>,
    /// History after every accepted score was appended
    pub history: ScoreHistory,
}

/// Score `inputs` (chronological order) as if each was evaluated one at a time
///
/// Each accepted activity sees the history and activity table as they stand
/// after every earlier accepted activity: its score appended to the history
/// and, when dated, a row appended to the table. Rejected activities leave
/// both untouched.
#[must_use]
pub fn score_activities(
    engine: &ScoreEngine,
    inputs: &[ActivityInput],
    physiology: &AthletePhysiology,
    history: &ScoreHistory,
    records: &[ActivityRecord],
) -> BatchReport {
    // Scores do not depend on history, so every activity is scored in isolation
    let empty = ScoreHistory::new();
    let scored: Vec<AppResult<EngineResult>> = inputs
        .par_iter()
        .map(|input| engine.evaluate(input, physiology, &empty, &[]))
        .collect();

    let mut running = history.clone();
    let mut table = records.to_vec();
    let mut results = Vec::with_capacity(inputs.len());
    let mut failures = Vec::new();

    for (index, (outcome, input)) in scored.into_iter().zip(inputs).enumerate() {
        match outcome {
            Ok(mut result) => {
                running.push(result.score);
                if let Some(date) = input.start_date {
                    table.push(
                        ActivityRecord::new(date, input.moving_time_s, input.distance_m)
                            .with_score(result.score),
                    );
                }
                result.achievements =
                    achievements(running.as_slice(), &engine.config().achievements);
                result.trend = analyze_trend(running.as_slice());
                result.consistency = consistency_score(&table);
                result.history = running.clone();
                results.push(result);
            }
            Err(error) => {
                warn!(index, code = ?error.code, message = %error.message, "Skipping activity");
                failures.push(BatchFailure {
                    index,
                    code: error.code,
                    message: error.message,
                });
            }
        }
    }

    info!(
        accepted = results.len(),
        rejected = failures.len(),
        history_len = running.len(),
        "Scored activity batch"
    );

    BatchReport {
        results,
        failures,
        history: running,
    }
}
