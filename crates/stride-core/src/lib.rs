// ABOUTME: Core types and constants for the Stride score engine
// ABOUTME: Foundation crate with error handling, constants, and the shared data model
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Performance Analytics

#![deny(unsafe_code)]

//! # Stride Core
//!
//! Foundation crate providing shared types and constants for the Stride score
//! engine. It has no scoring logic of its own, so it changes rarely and the
//! calculators built on top of it recompile independently.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Physiological defaults and scoring coefficients organized by domain
//! - **models**: Athlete, weather, activity, breakdown, and world-record types

/// Unified error handling system with standard error codes
pub mod errors;

/// Engine constants organized by domain
pub mod constants;

/// Core data models shared by every engine component
pub mod models;
