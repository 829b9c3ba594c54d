// ABOUTME: Weekly training consistency score from the tabular activity history
// ABOUTME: Weekly buckets closing on Monday, Gaussian tolerance around recent frequency, log compression
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Performance Analytics

use crate::statistics::{count_to_f64, mean, round_to};
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use stride_core::constants::consistency::{
    COMPRESSION_K, MIN_SIGMA, POINTS_PER_ACTIVITY, SIGMA_RATIO, TARGET_WEEKS,
};
use stride_core::models::ActivityRecord;
use tracing::debug;

/// Activities of one Tuesday-to-Monday week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyBucket {
    /// Monday closing the week
    pub week_end: NaiveDate,
    /// Number of activities
    pub count: usize,
    /// Summed moving time (s)
    pub total_moving_time_s: f64,
}

/// Consistency of the current week against the recent weekly frequency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyReport {
    /// Compressed score in [0, 100), one decimal
    pub score: f64,
    /// Gaussian closeness of the current count to the target, in (0, 1]
    pub consistency_factor: f64,
    /// Activities in the current (last) week
    pub current_week_count: usize,
    /// Mean count of up to three weeks before the current one
    pub target_weekly_count: f64,
    /// Every week from the first activity to the last, gaps included
    pub weeks: Vec<WeeklyBucket>,
}

impl ConsistencyReport {
    fn empty() -> Self {
        Self {
            score: 0.0,
            consistency_factor: 0.0,
            current_week_count: 0,
            target_weekly_count: 0.0,
            weeks: Vec::new(),
        }
    }
}

/// Monday closing the week of `date`; a Monday closes its own week
fn week_end(date: NaiveDate) -> NaiveDate {
    let days_until_monday = (7 - date.weekday().num_days_from_monday()) % 7;
    date + Duration::days(i64::from(days_until_monday))
}

fn weekly_buckets(records: &[ActivityRecord]) -> Vec<WeeklyBucket> {
    let mut by_week: BTreeMap<NaiveDate, (usize, f64)> = BTreeMap::new();
    for record in records {
        let entry = by_week.entry(week_end(record.date)).or_insert((0, 0.0));
        entry.0 += 1;
        if record.moving_time_s.is_finite() {
            entry.1 += record.moving_time_s;
        }
    }

    let (Some(&first), Some(&last)) = (by_week.keys().next(), by_week.keys().next_back()) else {
        return Vec::new();
    };

    let mut weeks = Vec::new();
    let mut cursor = first;
    while cursor <= last {
        let (count, total_moving_time_s) = by_week.get(&cursor).copied().unwrap_or((0, 0.0));
        weeks.push(WeeklyBucket {
            week_end: cursor,
            count,
            total_moving_time_s,
        });
        cursor += Duration::weeks(1);
    }
    weeks
}

/// Score how well the current week's frequency matches the recent habit
///
/// The current week is the week of the latest record. With no earlier week the
/// target equals the current count, so a first week always has factor 1.
#[must_use]
pub fn consistency_score(records: &[ActivityRecord]) -> ConsistencyReport {
    let weeks = weekly_buckets(records);
    let Some((current, previous)) = weeks.split_last() else {
        return ConsistencyReport::empty();
    };

    let current_count = count_to_f64(current.count);
    let prior: Vec<f64> = previous
        .iter()
        .rev()
        .take(TARGET_WEEKS)
        .map(|week| count_to_f64(week.count))
        .collect();
    let target = mean(&prior).unwrap_or(current_count);

    let sigma = (target * SIGMA_RATIO).max(MIN_SIGMA);
    let consistency_factor = (-(current_count - target).powi(2) / (2.0 * sigma.powi(2))).exp();
    let raw_score = current_count * POINTS_PER_ACTIVITY * consistency_factor;
    let log_val = raw_score.ln_1p();
    let score = round_to(100.0 * log_val / (log_val + COMPRESSION_K), 1);

    debug!(
        current_count = current.count,
        target,
        consistency_factor,
        score,
        "Computed weekly consistency"
    );

    ConsistencyReport {
        score,
        consistency_factor,
        current_week_count: current.count,
        target_weekly_count: target,
        weeks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_on(date: NaiveDate) -> ActivityRecord {
        ActivityRecord::new(date, 1_800.0, 5_000.0)
    }

    fn monday(week: u32) -> NaiveDate {
        // 2024-01-01 is a Monday
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::weeks(i64::from(week))
    }

    /// Tuesday opening the week closed by `monday(week)`
    fn tuesday(week: u32) -> NaiveDate {
        monday(week) - Duration::days(6)
    }

    #[test]
    fn test_empty_table_scores_zero() {
        let report = consistency_score(&[]);
        assert!(report.score.abs() < f64::EPSILON);
        assert!(report.consistency_factor.abs() < f64::EPSILON);
    }

    #[test]
    fn test_week_end_is_next_monday() {
        assert_eq!(week_end(monday(1)), monday(1));
        assert_eq!(week_end(tuesday(1)), monday(1));
        assert_eq!(week_end(monday(1) - Duration::days(1)), monday(1));
        assert_eq!(week_end(monday(1) + Duration::days(1)), monday(2));
    }

    #[test]
    fn test_sunday_and_following_monday_share_a_week() {
        let sunday = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
        let report = consistency_score(&[run_on(sunday), run_on(monday(1))]);
        assert_eq!(report.weeks.len(), 1);
        assert_eq!(report.weeks[0].week_end, monday(1));
        assert_eq!(report.current_week_count, 2);
    }

    #[test]
    fn test_tuesday_through_monday_is_one_week() {
        let report = consistency_score(&[run_on(tuesday(1)), run_on(monday(1))]);
        assert_eq!(report.weeks.len(), 1);
        assert_eq!(report.current_week_count, 2);
        assert!((report.target_weekly_count - 2.0).abs() < f64::EPSILON);
        // raw = 40, score = 100 * ln 41 / (ln 41 + 5)
        assert!((report.score - 42.6).abs() < 1e-9);
    }

    #[test]
    fn test_monday_closes_its_own_week() {
        let report = consistency_score(&[run_on(monday(0)), run_on(tuesday(1))]);
        assert_eq!(report.weeks.len(), 2);
        assert_eq!(report.weeks[0].week_end, monday(0));
        assert_eq!(report.weeks[1].week_end, monday(1));
        assert_eq!(report.current_week_count, 1);
    }

    #[test]
    fn test_first_week_is_its_own_target() {
        let report = consistency_score(&[run_on(tuesday(1)), run_on(tuesday(1) + Duration::days(2))]);
        assert!((report.consistency_factor - 1.0).abs() < f64::EPSILON);
        assert!((report.target_weekly_count - 2.0).abs() < f64::EPSILON);
        let expected = round_to(100.0 * 41.0_f64.ln() / (41.0_f64.ln() + 5.0), 1);
        assert!((report.score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_steady_three_per_week() {
        let records: Vec<ActivityRecord> = (1..5)
            .flat_map(|week| (0..3).map(move |day| run_on(tuesday(week) + Duration::days(day * 2))))
            .collect();
        let report = consistency_score(&records);
        assert_eq!(report.weeks.len(), 4);
        assert!((report.consistency_factor - 1.0).abs() < f64::EPSILON);
        assert!((report.score - 45.1).abs() < 1e-9);
    }

    #[test]
    fn test_gap_weeks_count_toward_target() {
        let records = vec![
            run_on(tuesday(1)),
            run_on(tuesday(1) + Duration::days(1)),
            run_on(tuesday(4)),
        ];
        let report = consistency_score(&records);
        assert_eq!(report.weeks.len(), 4);
        assert!((report.target_weekly_count - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_deviation_lowers_factor() {
        let mut records: Vec<ActivityRecord> = (1..4)
            .flat_map(|week| (0..4).map(move |day| run_on(tuesday(week) + Duration::days(day))))
            .collect();
        records.push(run_on(tuesday(4)));
        let report = consistency_score(&records);
        // target 4, sigma 2, current 1
        let expected = (-(9.0_f64) / 8.0).exp();
        assert!((report.consistency_factor - expected).abs() < 1e-12);
    }
}
