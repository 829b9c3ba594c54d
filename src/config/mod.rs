// ABOUTME: Configuration module for the score engine binary and library consumers
// ABOUTME: Resolves engine, logging, and data-file settings from the environment once at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Performance Analytics

//! Configuration for Stride Score
//!
//! - **Environment**: engine settings, world-record source, and logging from `STRIDE_*` variables

/// Environment-driven settings
pub mod environment;

pub use environment::{EngineSettings, WorldRecordSource};
