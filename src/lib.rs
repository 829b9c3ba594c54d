// ABOUTME: Main library entry point for the Stride running score engine
// ABOUTME: Re-exports the engine crates and adds logging, environment configuration, and batch scoring
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Performance Analytics

#![deny(unsafe_code)]

//! # Stride Score
//!
//! Competition-relative scoring of running activities. One activity plus the
//! athlete's physiology and history goes in; a score in [0, 100], its full
//! breakdown, stream metrics, and longitudinal insights come out.
//!
//! ## Crates
//!
//! - **`stride-core`**: data model, error types, and scoring constants
//! - **`stride-intelligence`**: metrics calculator, scoring system, insights, engine facade
//! - **`stride_score`** (this crate): logging, environment configuration, batch scoring, CLI
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use stride_score::config::environment::EngineSettings;
//! use stride_score::intelligence::ScoreEngine;
//! use stride_score::models::{ActivityInput, AthletePhysiology, ScoreHistory};
//!
//! fn main() -> anyhow::Result<()> {
//!     let settings = EngineSettings::from_env()?;
//!     let engine = ScoreEngine::new(settings.engine.clone(), Arc::new(settings.load_world_records()?));
//!     let input = ActivityInput {
//!         avg_power_w: 260.0,
//!         avg_hr_bpm: 152.0,
//!         distance_m: 10_000.0,
//!         moving_time_s: 2_700.0,
//!         ..ActivityInput::default()
//!     };
//!     let result = engine.evaluate(&input, &AthletePhysiology::default(), &ScoreHistory::new(), &[])?;
//!     println!("{} ({})", result.score, result.quality_label);
//!     Ok(())
//! }
//! ```

/// Batch scoring of many activities over a rayon pool
pub mod batch;

/// Environment-driven settings for the engine and its data files
pub mod config;

/// Structured logging setup
pub mod logging;

pub use stride_core::constants;
pub use stride_core::errors;
pub use stride_core::models;
pub use stride_intelligence as intelligence;
