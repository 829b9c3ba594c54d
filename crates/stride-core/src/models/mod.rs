// ABOUTME: Core data models consumed and produced by the score engine
// ABOUTME: Re-exports athlete, weather, activity, score, and world-record types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Performance Analytics

//! # Data Models
//!
//! Plain data shared by every engine component. Nothing here performs scoring;
//! the calculators in `stride-intelligence` read these types and produce new
//! ones.
//!
//! ## Core Models
//!
//! - `AthletePhysiology`: resolved physiological snapshot of one athlete
//! - `WeatherSample`: ambient conditions, measured or fallback
//! - `ActivityMetrics`: aggregate measurements of one activity
//! - `ScoreBreakdown`: immutable audit record of one scoring call
//! - `WorldRecordTable`: elite reference times per distance class

mod activity;
mod athlete;
mod score;
mod weather;
mod world_records;

pub use activity::{
    ActivityInput, ActivityMetrics, ActivityRecord, ActivitySummary, DistanceClass, Eligibility,
    HrZoneBound, HrZoneDefinition, SkipReason,
};
pub use athlete::{
    age_from_birthdate, infer_ftp_from_zone4_max, AthletePhysiology, AthleteProfile,
    PhysiologyDefaults, Sex,
};
pub use score::{ScoreBreakdown, ScoreHistory};
pub use weather::WeatherSample;
pub use world_records::WorldRecordTable;
