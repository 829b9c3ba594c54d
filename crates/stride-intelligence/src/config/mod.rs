// ABOUTME: Configuration module for stride-intelligence crate
// ABOUTME: Re-exports engine configuration and its validation error
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Performance Analytics

/// Engine configuration (athlete level, targets, score tiers, badge thresholds)
pub mod engine;

/// Configuration validation errors
pub mod error;

pub use engine::{AchievementThresholds, EngineConfig, ScoreThresholds};
pub use error::ConfigError;
