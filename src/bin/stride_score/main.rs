// ABOUTME: Stride Score CLI - command-line front end for the running score engine
// ABOUTME: Scores activities from JSON files and inspects ranks and power zones
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Performance Analytics
//!
//! Usage:
//! ```bash
//! # Score one activity against a profile and history
//! stride-score score --activity run.json --profile athlete.json --history scores.json
//!
//! # Score a chronological list of activities in parallel
//! stride-score batch --activities runs.json --records table.json
//!
//! # Show rank and run quality for a score
//! stride-score rank 82.5
//!
//! # Time in power zones for a stream
//! stride-score zones --power power.json --ftp 280
//! ```

mod commands;
mod helpers;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use stride_score::config::environment::EngineSettings;
use stride_score::intelligence::{AthleteLevel, ScoreEngine};
use tracing::{info, warn};

use commands::score::AthleteFiles;

#[derive(Parser)]
#[command(
    name = "stride-score",
    about = "Stride running score engine",
    long_about = "Competition-relative scoring of running activities with stream metrics and training insights."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Athlete level override (elite, sub_elite, advanced, intermediate, amateur)
    #[arg(long, global = true)]
    level: Option<String>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Score one activity and print the engine result
    Score {
        /// Activity JSON file
        #[arg(long)]
        activity: PathBuf,

        #[command(flatten)]
        athlete: AthleteArgs,

        /// Personal bests and adjusted baselines JSON file
        #[arg(long)]
        context: Option<PathBuf>,
    },

    /// Score a chronological list of activities
    Batch {
        /// JSON file holding an array of activities
        #[arg(long)]
        activities: PathBuf,

        #[command(flatten)]
        athlete: AthleteArgs,
    },

    /// Print rank and run quality labels for a score
    Rank {
        /// Normalized score
        score: f64,
    },

    /// Print time in power zones for a power stream
    Zones {
        /// JSON file holding an array of power samples (W)
        #[arg(long)]
        power: PathBuf,

        /// Functional threshold power (W)
        #[arg(long)]
        ftp: f64,
    },
}

#[derive(Args)]
struct AthleteArgs {
    /// Athlete profile JSON file
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Score history JSON file (array of scores, oldest first)
    #[arg(long)]
    history: Option<PathBuf>,

    /// Activity table JSON file for weekly consistency
    #[arg(long)]
    records: Option<PathBuf>,
}

impl From<AthleteArgs> for AthleteFiles {
    fn from(args: AthleteArgs) -> Self {
        Self {
            profile: args.profile,
            history: args.history,
            records: args.records,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = EngineSettings::from_env()?;
    if cli.verbose {
        settings.logging = settings.logging.with_level("debug");
    }
    settings.logging.init()?;

    if let Some(level) = cli.level.as_deref() {
        match AthleteLevel::parse(level) {
            Some(parsed) => settings.engine.athlete_level = parsed,
            None => warn!(level, "Unknown athlete level, keeping {}", settings.engine.athlete_level),
        }
    }

    let world_records = Arc::new(settings.load_world_records()?);
    let engine = ScoreEngine::new(settings.engine.clone(), world_records);
    info!(level = %settings.engine.athlete_level, "Score engine ready");

    match cli.command {
        Command::Score {
            activity,
            athlete,
            context,
        } => commands::score::score(
            &engine,
            &settings.engine.defaults,
            &activity,
            &athlete.into(),
            context.as_deref(),
            cli.pretty,
        ),
        Command::Batch {
            activities,
            athlete,
        } => commands::score::batch(
            &engine,
            &settings.engine.defaults,
            &activities,
            &athlete.into(),
            cli.pretty,
        ),
        Command::Rank { score } => commands::inspect::rank(&engine, score),
        Command::Zones { power, ftp } => commands::inspect::zones(&power, ftp, cli.pretty),
    }
}
