// ABOUTME: Activity scoring commands for stride-score
// ABOUTME: Scores one activity or a chronological list of activities and prints the JSON results

use std::path::{Path, PathBuf};

use anyhow::Result;
use stride_score::batch::score_activities;
use stride_score::intelligence::{EvaluationContext, ScoreEngine};
use stride_score::models::{
    ActivityInput, ActivityRecord, AthleteProfile, PhysiologyDefaults, ScoreHistory,
};
use tracing::info;

use crate::helpers::io::{print_json, read_json, read_json_or_default};

/// Athlete documents shared by both scoring commands
pub struct AthleteFiles {
    pub profile: Option<PathBuf>,
    pub history: Option<PathBuf>,
    pub records: Option<PathBuf>,
}

struct AthleteState {
    profile: AthleteProfile,
    history: ScoreHistory,
    records: Vec<ActivityRecord>,
}

fn load_athlete(files: &AthleteFiles) -> Result<AthleteState> {
    Ok(AthleteState {
        profile: read_json_or_default(files.profile.as_deref())?,
        history: read_json_or_default(files.history.as_deref())?,
        records: read_json_or_default(files.records.as_deref())?,
    })
}

/// Score one activity
pub fn score(
    engine: &ScoreEngine,
    defaults: &PhysiologyDefaults,
    activity: &Path,
    files: &AthleteFiles,
    context: Option<&Path>,
    pretty: bool,
) -> Result<()> {
    let input: ActivityInput = read_json(activity)?;
    let athlete = load_athlete(files)?;
    let context: EvaluationContext = read_json_or_default(context)?;
    let physiology = athlete.profile.resolve(defaults);

    let result = engine.evaluate_with_context(
        &input,
        &physiology,
        &athlete.history,
        &athlete.records,
        &context,
    )?;
    info!(
        score = result.score,
        rank = result.rank.label(),
        "Scored {}",
        activity.display()
    );
    print_json(&result, pretty)
}

/// Score a chronological list of activities
pub fn batch(
    engine: &ScoreEngine,
    defaults: &PhysiologyDefaults,
    activities: &Path,
    files: &AthleteFiles,
    pretty: bool,
) -> Result<()> {
    let inputs: Vec<ActivityInput> = read_json(activities)?;
    let athlete = load_athlete(files)?;
    let physiology = athlete.profile.resolve(defaults);

    let report = score_activities(
        engine,
        &inputs,
        &physiology,
        &athlete.history,
        &athlete.records,
    );
    info!(
        accepted = report.results.len(),
        rejected = report.failures.len(),
        "Scored {}",
        activities.display()
    );
    print_json(&report, pretty)
}
