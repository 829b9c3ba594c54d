// ABOUTME: Achievement badges awarded from the most recent scores
// ABOUTME: Score tier, rolling averages, improving streak, and comeback detection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Performance Analytics

use crate::config::AchievementThresholds;
use crate::statistics::mean;
use serde::{Deserialize, Serialize};
use stride_core::constants::achievements::{CONSISTENCY_WINDOW, ENGINE_WINDOW};

/// Badge earned by the latest activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Achievement {
    /// Latest score at the legendary threshold
    #[serde(rename = "Legendary Run")]
    LegendaryRun,
    /// Latest score at the epic threshold
    #[serde(rename = "Epic Run")]
    EpicRun,
    /// Latest score at the great threshold
    #[serde(rename = "Great Run")]
    GreatRun,
    /// High average over the last five activities
    #[serde(rename = "Consistency Beast (5 runs)")]
    ConsistencyBeast,
    /// High average over the last ten activities
    #[serde(rename = "Iron Engine (10 runs)")]
    IronEngine,
    /// Three strictly improving scores in a row
    #[serde(rename = "On Fire (3 improving runs)")]
    OnFire,
    /// Great score four activities after a weak one
    #[serde(rename = "Comeback")]
    Comeback,
}

impl Achievement {
    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::LegendaryRun => "Legendary Run",
            Self::EpicRun => "Epic Run",
            Self::GreatRun => "Great Run",
            Self::ConsistencyBeast => "Consistency Beast (5 runs)",
            Self::IronEngine => "Iron Engine (10 runs)",
            Self::OnFire => "On Fire (3 improving runs)",
            Self::Comeback => "Comeback",
        }
    }
}

/// Badges for the last entry of `scores` (oldest first)
///
/// The three score tiers are mutually exclusive; every other badge is
/// evaluated independently.
#[must_use]
pub fn achievements(scores: &[f64], thresholds: &AchievementThresholds) -> Vec<Achievement> {
    let mut earned = Vec::new();
    let Some(&last) = scores.last() else {
        return earned;
    };

    if last >= thresholds.legendary {
        earned.push(Achievement::LegendaryRun);
    } else if last >= thresholds.epic {
        earned.push(Achievement::EpicRun);
    } else if last >= thresholds.great {
        earned.push(Achievement::GreatRun);
    }

    if scores.len() >= CONSISTENCY_WINDOW
        && mean(&scores[scores.len() - CONSISTENCY_WINDOW..])
            .is_some_and(|avg| avg >= thresholds.consistency_average)
    {
        earned.push(Achievement::ConsistencyBeast);
    }

    if scores.len() >= ENGINE_WINDOW
        && mean(&scores[scores.len() - ENGINE_WINDOW..])
            .is_some_and(|avg| avg >= thresholds.engine_average)
    {
        earned.push(Achievement::IronEngine);
    }

    if let [.., third, second, latest] = scores {
        if latest > second && second > third {
            earned.push(Achievement::OnFire);
        }
    }

    if let [.., fourth_back, _, _, latest] = scores {
        if *fourth_back < thresholds.comeback_floor && *latest >= thresholds.great {
            earned.push(Achievement::Comeback);
        }
    }

    earned
}
