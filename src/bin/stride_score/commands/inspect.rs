// ABOUTME: Inspection commands for stride-score
// ABOUTME: Prints rank and quality labels for a score and power-zone distributions for a stream

use std::path::Path;

use anyhow::{bail, Result};
use serde_json::json;
use stride_score::intelligence::{MetricsCalculator, ScoreEngine};

use crate::helpers::io::{print_json, read_json};

/// Print rank and run quality for a score
pub fn rank(engine: &ScoreEngine, score: f64) -> Result<()> {
    let rank = engine.scoring().rank(score);
    let quality = engine.scoring().run_quality(score);
    print_json(
        &json!({
            "score": score,
            "rank": rank.label(),
            "rankStyle": rank.style_hint(),
            "qualityLabel": quality.label(),
            "qualityColor": quality.color_key(),
        }),
        false,
    )
}

/// Print time in power zones for a power stream
pub fn zones(power: &Path, ftp: f64, pretty: bool) -> Result<()> {
    if ftp.is_nan() || ftp <= 0.0 {
        bail!("--ftp must be a positive number of watts");
    }
    let samples: Vec<f64> = read_json(power)?;
    let distribution = MetricsCalculator::calculate_zones(&samples, ftp);
    print_json(&distribution, pretty)
}
