//! Streaming analysis pipeline.
//!
//! Each analyzer sees every `(trial, step, SessionResult)` exactly once,
//! in trial-major order, keeps its own running accumulator, and renders a
//! block of summary lines on demand. Analyzers never retain raw results,
//! so the pipeline's memory use is independent of the trial count.

use crate::session::SessionResult;
use std::collections::BTreeMap;

/// One streaming accumulator. New analyzers plug in without touching the
/// session or campaign runners.
pub trait Analyzer {
    /// Called once per step of every trial, in trial-major, step-minor order.
    fn observe(&mut self, trial: usize, step: usize, session: &SessionResult);

    /// Render the accumulated statistics as human-readable lines.
    fn summarize(&self) -> Vec<String>;
}

/// An ordered set of analyzers fed from one pass over the results.
#[derive(Default)]
pub struct Pipeline {
    analyzers: Vec<Box<dyn Analyzer>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// The fixed standard battery, in reporting order.
    pub fn standard(steps_per_trial: usize, focus_step: usize) -> Self {
        let mut pipeline = Self::new();
        pipeline.push(Box::new(OverallSuccess::new(steps_per_trial)));
        pipeline.push(Box::new(StepSuccess::new(focus_step)));
        pipeline.push(Box::new(UniqueEpics::new()));
        pipeline.push(Box::new(ExtraPulls::new(steps_per_trial)));
        pipeline.push(Box::new(RemainingPulls::new(steps_per_trial)));
        pipeline.push(Box::new(PeakEpics::new(steps_per_trial)));
        pipeline
    }

    pub fn push(&mut self, analyzer: Box<dyn Analyzer>) {
        self.analyzers.push(analyzer);
    }

    pub fn observe(&mut self, trial: usize, step: usize, session: &SessionResult) {
        for analyzer in &mut self.analyzers {
            analyzer.observe(trial, step, session);
        }
    }

    /// Feed one whole trial, step by step.
    pub fn observe_trial(&mut self, trial: usize, sessions: &[SessionResult]) {
        for (step, session) in sessions.iter().enumerate() {
            self.observe(trial, step, session);
        }
    }

    /// One block of lines per analyzer, in insertion order.
    pub fn summaries(&self) -> Vec<Vec<String>> {
        self.analyzers
            .iter()
            .map(|analyzer| analyzer.summarize())
            .collect()
    }
}

/// Percentage of `part` in `whole`.
fn percent(part: u32, whole: u32) -> f64 {
    part as f64 / whole as f64 * 100.0
}

/// Round to the nearest integer, ties to even.
fn round_half_even(value: f64) -> i64 {
    let floor = value.floor();
    if (value - floor - 0.5).abs() < f64::EPSILON {
        let below = floor as i64;
        if below % 2 == 0 {
            below
        } else {
            below + 1
        }
    } else {
        value.round() as i64
    }
}

/// Running mean/min/max without retaining samples.
#[derive(Debug, Clone, Copy, Default)]
struct RunningStats {
    count: u32,
    sum: u64,
    min: u32,
    max: u32,
}

impl RunningStats {
    fn record(&mut self, value: u32) {
        if self.count == 0 || value < self.min {
            self.min = value;
        }
        if self.count == 0 || value > self.max {
            self.max = value;
        }
        self.count += 1;
        self.sum += value as u64;
    }

    fn mean(&self) -> f64 {
        self.sum as f64 / self.count as f64
    }

    fn rounded_mean(&self) -> i64 {
        round_half_even(self.mean())
    }
}

/// Did every banner of a trial produce a featured Epic? Reports the
/// all-banners rate and, for multi-banner campaigns, the at-least-one rate.
pub struct OverallSuccess {
    steps_per_trial: usize,
    trials_seen: u32,
    all_succeeded: u32,
    any_succeeded: u32,
    current_all: bool,
    current_any: bool,
}

impl OverallSuccess {
    pub fn new(steps_per_trial: usize) -> Self {
        Self {
            steps_per_trial,
            trials_seen: 0,
            all_succeeded: 0,
            any_succeeded: 0,
            current_all: true,
            current_any: false,
        }
    }
}

impl Analyzer for OverallSuccess {
    fn observe(&mut self, _trial: usize, step: usize, session: &SessionResult) {
        if step == 0 {
            self.current_all = true;
            self.current_any = false;
        }

        let succeeded = session.has_featured_epic();
        self.current_all &= succeeded;
        self.current_any |= succeeded;

        if step + 1 == self.steps_per_trial {
            self.trials_seen += 1;
            if self.current_all {
                self.all_succeeded += 1;
            }
            if self.current_any {
                self.any_succeeded += 1;
            }
        }
    }

    fn summarize(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "{} of {} trials won the featured Epic on every banner ({:.3}%)",
            self.all_succeeded,
            self.trials_seen,
            percent(self.all_succeeded, self.trials_seen)
        )];
        if self.steps_per_trial > 1 {
            lines.push(format!(
                "{} of {} trials won a featured Epic on at least one banner ({:.3}%)",
                self.any_succeeded,
                self.trials_seen,
                percent(self.any_succeeded, self.trials_seen)
            ));
        }
        lines
    }
}

/// Success rate of one designated banner step.
pub struct StepSuccess {
    step: usize,
    trials_seen: u32,
    succeeded: u32,
}

impl StepSuccess {
    /// `step` is zero-based; summaries display it one-based.
    pub fn new(step: usize) -> Self {
        Self {
            step,
            trials_seen: 0,
            succeeded: 0,
        }
    }
}

impl Analyzer for StepSuccess {
    fn observe(&mut self, _trial: usize, step: usize, session: &SessionResult) {
        if step != self.step {
            return;
        }
        self.trials_seen += 1;
        if session.has_featured_epic() {
            self.succeeded += 1;
        }
    }

    fn summarize(&self) -> Vec<String> {
        vec![format!(
            "Banner {} was won in {} of {} trials ({:.3}%)",
            self.step + 1,
            self.succeeded,
            self.trials_seen,
            percent(self.succeeded, self.trials_seen)
        )]
    }
}

/// Per-item occurrence and pity statistics over every Epic drawn.
pub struct UniqueEpics {
    trials_seen: u32,
    by_name: BTreeMap<String, RunningStats>,
}

impl UniqueEpics {
    pub fn new() -> Self {
        Self {
            trials_seen: 0,
            by_name: BTreeMap::new(),
        }
    }
}

impl Default for UniqueEpics {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for UniqueEpics {
    fn observe(&mut self, _trial: usize, step: usize, session: &SessionResult) {
        if step == 0 {
            self.trials_seen += 1;
        }
        for outcome in session.epics() {
            self.by_name
                .entry(outcome.item.name.clone())
                .or_default()
                .record(outcome.pity);
        }
    }

    fn summarize(&self) -> Vec<String> {
        self.by_name
            .iter()
            .map(|(name, stats)| {
                format!(
                    "{} copies of {}: average pity {}, {:.3}% per trial, min pity {}, max pity {}",
                    stats.count,
                    name,
                    stats.rounded_mean(),
                    percent(stats.count, self.trials_seen),
                    stats.min,
                    stats.max
                )
            })
            .collect()
    }
}

/// Distribution of extra pulls bought with stardust, measured at each
/// trial's final banner.
pub struct ExtraPulls {
    steps_per_trial: usize,
    stats: RunningStats,
}

impl ExtraPulls {
    pub fn new(steps_per_trial: usize) -> Self {
        Self {
            steps_per_trial,
            stats: RunningStats::default(),
        }
    }
}

impl Analyzer for ExtraPulls {
    fn observe(&mut self, _trial: usize, step: usize, session: &SessionResult) {
        if step + 1 == self.steps_per_trial {
            self.stats.record(session.extra_pulls);
        }
    }

    fn summarize(&self) -> Vec<String> {
        vec![format!(
            "Average of {} extra pulls earned, min {}, max {}",
            self.stats.rounded_mean(),
            self.stats.min,
            self.stats.max
        )]
    }
}

/// Distribution of unused budget at each trial's final banner, plus which
/// trial banked the most.
pub struct RemainingPulls {
    steps_per_trial: usize,
    stats: RunningStats,
    best_trial: usize,
    best_remaining: u32,
}

impl RemainingPulls {
    pub fn new(steps_per_trial: usize) -> Self {
        Self {
            steps_per_trial,
            stats: RunningStats::default(),
            best_trial: 0,
            best_remaining: 0,
        }
    }
}

impl Analyzer for RemainingPulls {
    fn observe(&mut self, trial: usize, step: usize, session: &SessionResult) {
        if step + 1 != self.steps_per_trial {
            return;
        }
        self.stats.record(session.pulls_remaining);
        if session.pulls_remaining > self.best_remaining {
            self.best_remaining = session.pulls_remaining;
            self.best_trial = trial;
        }
    }

    fn summarize(&self) -> Vec<String> {
        vec![format!(
            "Average of {} pulls remaining, min {}, max {} (trial {})",
            self.stats.rounded_mean(),
            self.stats.min,
            self.stats.max,
            self.best_trial + 1
        )]
    }
}

/// The single luckiest trial: most Epic awards summed across its banners.
pub struct PeakEpics {
    steps_per_trial: usize,
    current_count: usize,
    best_count: usize,
    best_trial: usize,
}

impl PeakEpics {
    pub fn new(steps_per_trial: usize) -> Self {
        Self {
            steps_per_trial,
            current_count: 0,
            best_count: 0,
            best_trial: 0,
        }
    }
}

impl Analyzer for PeakEpics {
    fn observe(&mut self, trial: usize, step: usize, session: &SessionResult) {
        if step == 0 {
            self.current_count = 0;
        }
        self.current_count += session.epics().len();

        if step + 1 == self.steps_per_trial && self.current_count > self.best_count {
            self.best_count = self.current_count;
            self.best_trial = trial;
        }
    }

    fn summarize(&self) -> Vec<String> {
        vec![format!(
            "The most Epics pulled was {} (trial {})",
            self.best_count,
            self.best_trial + 1
        )]
    }
}
