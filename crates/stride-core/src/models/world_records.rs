// ABOUTME: Elite reference-time table keyed by standard distance class
// ABOUTME: Loads and validates the world-record JSON, with a bundled copy compiled in
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Performance Analytics

use super::activity::DistanceClass;
use crate::errors::{AppError, AppResult};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use tracing::debug;

const BUNDLED_WORLD_RECORDS: &str = include_str!("../../data/world_records.json");

#[derive(Debug, Deserialize)]
struct RawTable {
    #[serde(default)]
    version: Option<String>,
    records: BTreeMap<String, RawRecord>,
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    men_elite: Option<f64>,
}

/// Men's elite reference times (seconds) for the four standard distances
///
/// Loaded once at startup and shared read-only. A table that loads
/// successfully always has a positive, finite time for every standard class.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldRecordTable {
    version: Option<String>,
    men_elite: HashMap<DistanceClass, f64>,
}

impl WorldRecordTable {
    /// The table shipped with the engine
    ///
    /// # Errors
    ///
    /// Only fails if the bundled JSON itself is malformed.
    pub fn bundled() -> AppResult<Self> {
        Self::from_json_str(BUNDLED_WORLD_RECORDS)
    }

    /// Parse and validate a table from JSON text
    ///
    /// # Errors
    ///
    /// `SerializationError` for unparsable JSON, `ConfigInvalid` when a standard
    /// class is missing or its `men_elite` time is not a positive number.
    pub fn from_json_str(json: &str) -> AppResult<Self> {
        let raw: RawTable = serde_json::from_str(json)?;

        let mut men_elite = HashMap::new();
        for (label, record) in &raw.records {
            let Some(class) = DistanceClass::from_label(label) else {
                debug!(label = %label, "Ignoring unknown world-record distance");
                continue;
            };
            if let Some(time) = record.men_elite {
                men_elite.insert(class, time);
            }
        }

        for class in DistanceClass::STANDARD {
            match men_elite.get(&class) {
                Some(time) if *time > 0.0 && time.is_finite() => {}
                Some(time) => {
                    return Err(AppError::config_invalid(format!(
                        "world record for {class} must be a positive number of seconds, got {time}"
                    )));
                }
                None => {
                    return Err(AppError::config_invalid(format!(
                        "world record table has no men_elite time for {class}"
                    )));
                }
            }
        }

        Ok(Self {
            version: raw.version,
            men_elite,
        })
    }

    /// Read a table from a JSON file
    ///
    /// # Errors
    ///
    /// `StorageError` when the file cannot be read, otherwise as `from_json_str`.
    pub fn from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            AppError::storage(format!(
                "failed to read world records from {}: {e}",
                path.display()
            ))
            .with_source(e)
        })?;
        Self::from_json_str(&contents)
    }

    /// Elite reference time for a class; `None` for `Other`
    #[must_use]
    pub fn reference_time(&self, class: DistanceClass) -> Option<f64> {
        self.men_elite.get(&class).copied()
    }

    /// Table version tag, when present
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}
