// ABOUTME: Environment configuration for engine settings and the world-record data source
// ABOUTME: Reads STRIDE_* variables once and loads the world-record table from disk or the bundled copy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Performance Analytics

//! Environment-based configuration

use crate::logging::LoggingConfig;
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use stride_core::errors::AppResult;
use stride_core::models::WorldRecordTable;
use stride_intelligence::config::EngineConfig;
use tracing::{debug, info};

/// Environment variable naming a world-record JSON file
pub const WORLD_RECORDS_PATH_VAR: &str = "STRIDE_WORLD_RECORDS_PATH";

/// Where the world-record table comes from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WorldRecordSource {
    /// Table compiled into the binary
    #[default]
    Bundled,
    /// JSON file on disk
    File(PathBuf),
}

/// Everything the engine needs, resolved once at startup
#[derive(Debug, Clone, Default)]
pub struct EngineSettings {
    /// World-record table source
    pub world_records: WorldRecordSource,
    /// Validated engine configuration
    pub engine: EngineConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl EngineSettings {
    /// Load settings from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if an engine override cannot be parsed or the
    /// resulting engine configuration is invalid
    pub fn from_env() -> Result<Self> {
        info!("Loading engine settings from environment variables");

        let world_records = env::var(WORLD_RECORDS_PATH_VAR)
            .ok()
            .filter(|path| !path.trim().is_empty())
            .map_or(WorldRecordSource::Bundled, |path| {
                WorldRecordSource::File(PathBuf::from(path))
            });
        let engine = EngineConfig::from_env().context("Invalid engine configuration")?;

        let settings = Self {
            world_records,
            engine,
            logging: LoggingConfig::from_env(),
        };
        settings.log_summary();
        Ok(settings)
    }

    /// Read the configured world-record table
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the file cannot be read and
    /// `ConfigInvalid` when the table is malformed or incomplete
    pub fn load_world_records(&self) -> AppResult<WorldRecordTable> {
        let table = match &self.world_records {
            WorldRecordSource::Bundled => WorldRecordTable::bundled()?,
            WorldRecordSource::File(path) => WorldRecordTable::from_path(path)?,
        };
        info!(
            source = ?self.world_records,
            version = table.version().unwrap_or("unversioned"),
            "Loaded world-record table"
        );
        Ok(table)
    }

    fn log_summary(&self) {
        debug!(
            athlete_level = %self.engine.athlete_level,
            target_hr_efficiency = self.engine.target_hr_efficiency,
            nominal_power_override = ?self.engine.nominal_power_override,
            wr_power_to_weight = self.engine.wr_power_to_weight,
            world_records = ?self.world_records,
            "Engine settings resolved"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stride_core::errors::ErrorCode;

    #[test]
    fn test_default_uses_bundled_table() {
        let settings = EngineSettings::default();
        assert_eq!(settings.world_records, WorldRecordSource::Bundled);
        let table = settings.load_world_records().unwrap();
        assert!(table.version().is_some());
    }

    #[test]
    fn test_missing_file_is_storage_error() {
        let settings = EngineSettings {
            world_records: WorldRecordSource::File(PathBuf::from("/nonexistent/records.json")),
            ..EngineSettings::default()
        };
        let err = settings.load_world_records().unwrap_err();
        assert_eq!(err.code, ErrorCode::StorageError);
    }
}
