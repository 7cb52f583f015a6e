//! Report generation: the aggregate summary, the per-trial detail view,
//! and the machine-readable JSON export.

use crate::analysis::Pipeline;
use crate::banner::Rarity;
use crate::build_info;
use crate::campaign::{CampaignConfig, Trial};
use crate::session::SessionResult;
use serde::Serialize;
use std::time::Duration;

/// Wall-clock split between running trials and aggregating them.
#[derive(Debug, Clone, Copy)]
pub struct RunTimings {
    pub simulation: Duration,
    pub analysis: Duration,
}

/// Render the full aggregate report: header, then each analyzer's block
/// in pipeline order, blank-line separated.
pub fn summary_text(config: &CampaignConfig, pipeline: &Pipeline, timings: &RunTimings) -> String {
    let mut report = String::new();

    report.push_str("═══════════════════════════════════════════════════════════════\n");
    report.push_str("                    SIMULATION REPORT\n");
    report.push_str("═══════════════════════════════════════════════════════════════\n\n");

    report.push_str(&format!(
        "Ran {} trials in {}ms; analysis took {}ms. (build {})\n",
        config.trials,
        timings.simulation.as_millis(),
        timings.analysis.as_millis(),
        build_info::BUILD_DATE
    ));
    report.push_str(&format!(
        "{} pulls were available per trial.\n",
        config.pull_budget
    ));
    if let Some(seed) = config.seed {
        report.push_str(&format!("Seed: {}\n", seed));
    }
    report.push('\n');

    for block in pipeline.summaries() {
        for line in block {
            report.push_str(&line);
            report.push('\n');
        }
        report.push('\n');
    }

    report.push_str("═══════════════════════════════════════════════════════════════\n");
    report
}

/// Render the step-by-step detail of one trial. `number` is one-based,
/// as shown to the user.
pub fn trial_detail_text(number: usize, trial: &Trial) -> String {
    let mut report = String::new();

    report.push_str(&format!(
        "── TRIAL {} ─────────────────────────────────────────────────────\n",
        number
    ));

    for (index, session) in trial.iter().enumerate() {
        report.push('\n');
        report.push_str(&format!(
            "Banner {}: {} ({})\n",
            index + 1,
            session.featured_epic,
            session.pool_type.name()
        ));
        session_detail(&mut report, session);
    }

    report
}

fn session_detail(report: &mut String, session: &SessionResult) {
    let epics = session.epics();
    if epics.is_empty() {
        report.push_str("No Epic pulled.\n");
    } else {
        for outcome in epics {
            // Only a featured win makes the leftover budget meaningful.
            if outcome.item.is_standard() {
                report.push_str(&format!("Epic in {} pulls.\n", outcome.pity));
            } else {
                report.push_str(&format!(
                    "Epic in {} pulls with {} pulls remaining.\n",
                    outcome.pity, session.pulls_remaining
                ));
            }
        }
    }

    report.push_str(&format!("{} pulls remaining.\n", session.pulls_remaining));
    report.push_str(&format!("{} extra pulls earned.\n", session.extra_pulls));
    report.push('\n');

    for outcome in &session.outcomes {
        if outcome.item.rarity == Rarity::Common {
            continue;
        }
        report.push_str(&format!("{}\n", outcome));
    }
}

/// Machine-readable mirror of the aggregate report.
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport {
    pub trials: u32,
    pub pull_budget: u32,
    pub seed: Option<u64>,
    pub simulation_ms: u128,
    pub analysis_ms: u128,
    pub summaries: Vec<Vec<String>>,
}

impl JsonReport {
    pub fn new(config: &CampaignConfig, pipeline: &Pipeline, timings: &RunTimings) -> Self {
        Self {
            trials: config.trials,
            pull_budget: config.pull_budget,
            seed: config.seed,
            simulation_ms: timings.simulation.as_millis(),
            analysis_ms: timings.analysis.as_millis(),
            summaries: pipeline.summaries(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
