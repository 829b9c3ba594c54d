// ABOUTME: Engine facade running metrics, scoring, and insights for one activity
// ABOUTME: Validates the input contract and assembles the serializable engine result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Performance Analytics

use crate::benchmarks::{
    find_relevant_best, personal_best_percentage, wr_power_percentage, AdjustedBaselines,
    BenchmarkComparison, PersonalBest,
};
use crate::config::EngineConfig;
use crate::insights::{
    achievements, analyze_trend, consistency_score, Achievement, ConsistencyReport, TrendAnalysis,
};
use crate::metrics::{EfficiencyFactor, MetricsCalculator, ZoneDistribution};
use crate::scoring::{Rank, RunQuality, ScoringSystem};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use stride_core::errors::AppResult;
use stride_core::models::{
    ActivityInput, ActivityRecord, AthletePhysiology, DistanceClass, ScoreBreakdown, ScoreHistory,
    WorldRecordTable,
};
use tracing::{debug, info};

/// Optional per-athlete benchmarks supplied alongside an activity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationContext {
    /// Personal-best times over standard distances
    pub personal_bests: Vec<PersonalBest>,
    /// Best adjusted durations seen per distance class
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjusted_baselines: Option<AdjustedBaselines>,
}

/// Everything the engine derived from one activity
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineResult {
    /// Normalized score in [0, 100]
    pub score: f64,
    /// Rank tier
    pub rank: Rank,
    /// Presentation hint for the rank
    pub rank_style: String,
    /// Run quality tier
    pub quality: RunQuality,
    /// Run quality display label
    pub quality_label: String,
    /// Theme color key for the quality label
    pub quality_color: String,
    /// Every intermediate value of the score computation
    pub breakdown: ScoreBreakdown,
    /// Time in power zones (%)
    pub zones: ZoneDistribution,
    /// Time in heart-rate zones (%), when a zone definition was supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hr_zones: Option<ZoneDistribution>,
    /// Efficiency factor of the streams
    pub efficiency_factor: EfficiencyFactor,
    /// Aerobic decoupling fraction
    pub decoupling: f64,
    /// Duration normalized for age, sex, and heat (s)
    pub adjusted_duration: f64,
    /// World-record and personal-best comparisons
    pub benchmarks: BenchmarkComparison,
    /// Badges earned on the updated history
    pub achievements: Vec<Achievement>,
    /// Trend of the updated history
    pub trend: TrendAnalysis,
    /// Weekly consistency including this activity
    pub consistency: ConsistencyReport,
    /// History with this activity's score appended
    pub history: ScoreHistory,
}

/// Stateless facade over the scoring components
///
/// Holds only immutable configuration and the shared world-record table, so
/// one engine can serve many threads.
#[derive(Debug, Clone)]
pub struct ScoreEngine {
    config: EngineConfig,
    scoring: ScoringSystem,
}

impl ScoreEngine {
    /// Create an engine from a resolved configuration and a loaded table
    #[must_use]
    pub fn new(config: EngineConfig, world_records: Arc<WorldRecordTable>) -> Self {
        let scoring = ScoringSystem::new(world_records, config.thresholds.clone());
        Self { config, scoring }
    }

    /// Configuration in use
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Scoring system in use
    #[must_use]
    pub const fn scoring(&self) -> &ScoringSystem {
        &self.scoring
    }

    /// Evaluate one activity without personal benchmarks
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the activity violates the input contract
    /// and `ConfigInvalid` when the world-record table lacks a reference time.
    pub fn evaluate(
        &self,
        input: &ActivityInput,
        physiology: &AthletePhysiology,
        history: &ScoreHistory,
        records: &[ActivityRecord],
    ) -> AppResult<EngineResult> {
        self.evaluate_with_context(
            input,
            physiology,
            history,
            records,
            &EvaluationContext::default(),
        )
    }

    /// Evaluate one activity, comparing it against the supplied benchmarks
    ///
    /// Neither `history` nor `records` is modified; the updated history is
    /// part of the result.
    ///
    /// # Errors
    ///
    /// Same as [`ScoreEngine::evaluate`].
    pub fn evaluate_with_context(
        &self,
        input: &ActivityInput,
        physiology: &AthletePhysiology,
        history: &ScoreHistory,
        records: &[ActivityRecord],
        context: &EvaluationContext,
    ) -> AppResult<EngineResult> {
        input.validate()?;

        let decoupling = MetricsCalculator::calculate_decoupling(&input.power_stream, &input.hr_stream);
        let zones = MetricsCalculator::calculate_zones(&input.power_stream, physiology.ftp_watts);
        let hr_zones = input
            .hr_zones
            .as_ref()
            .map(|definition| MetricsCalculator::calculate_hr_zones(&input.hr_stream, definition));
        let efficiency_factor =
            MetricsCalculator::calculate_efficiency_factor(&input.power_stream, &input.hr_stream);

        let metrics = input.to_metrics(physiology).with_decoupling(decoupling);
        let adjusted_duration = MetricsCalculator::calculate_adjusted_duration(&metrics);

        let nominal = self
            .config
            .nominal_power_override
            .unwrap_or_else(|| physiology.nominal_power_per_kg());
        let (score, breakdown) = self.scoring.compute_score(
            &metrics,
            nominal,
            self.config.target_hr_efficiency,
            self.config.athlete_level,
        )?;
        let rank = self.scoring.rank(score);
        let quality = self.scoring.run_quality(score);

        let updated = history.with_appended(score);
        let earned = achievements(updated.as_slice(), &self.config.achievements);
        let trend = analyze_trend(updated.as_slice());
        let consistency = input.start_date.map_or_else(
            || consistency_score(records),
            |date| {
                let mut table = records.to_vec();
                table.push(
                    ActivityRecord::new(date, input.moving_time_s, input.distance_m)
                        .with_score(score),
                );
                consistency_score(&table)
            },
        );

        let benchmarks = self.benchmarks(input, physiology, adjusted_duration, context);

        info!(
            score,
            rank = rank.label(),
            quality = quality.label(),
            history_len = updated.len(),
            "Evaluated activity"
        );
        debug!(
            decoupling,
            adjusted_duration,
            achievements = earned.len(),
            trend = trend.symbol,
            "Engine insights"
        );

        Ok(EngineResult {
            score,
            rank,
            rank_style: rank.style_hint().to_owned(),
            quality,
            quality_label: quality.label().to_owned(),
            quality_color: quality.color_key().to_owned(),
            breakdown,
            zones,
            hr_zones,
            efficiency_factor,
            decoupling,
            adjusted_duration,
            benchmarks,
            achievements: earned,
            trend,
            consistency,
            history: updated,
        })
    }

    fn benchmarks(
        &self,
        input: &ActivityInput,
        physiology: &AthletePhysiology,
        adjusted_duration: f64,
        context: &EvaluationContext,
    ) -> BenchmarkComparison {
        let personal_best = find_relevant_best(input.distance_m, &context.personal_bests).cloned();
        let personal_best_pct = personal_best
            .as_ref()
            .and_then(|best| personal_best_percentage(best, input.moving_time_s));
        let improves_adjusted_baseline = context.adjusted_baselines.as_ref().map(|baselines| {
            baselines.is_improvement(DistanceClass::from_distance(input.distance_m), adjusted_duration)
        });

        BenchmarkComparison {
            wr_power_pct: wr_power_percentage(
                input.avg_power_w,
                physiology.effective_weight_kg(),
                self.config.wr_power_to_weight,
            ),
            personal_best_pct,
            personal_best,
            improves_adjusted_baseline,
        }
    }
}
