//! Session runner: drives one banner through a bounded pull budget,
//! converting stardust into extra pulls and honoring a stop rule.

use crate::banner::{Banner, PoolType, PullOutcome, Rarity};
use crate::catalogue::Catalogue;
use crate::constants::{STARDUST_PASS_COST, STARDUST_STARTING_BALANCE};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// When to end a session before the budget runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopRule {
    /// Spend the whole budget.
    Never,
    /// Stop after any Epic award, featured or standard.
    AnyEpic,
    /// Stop once the featured Epic is secured.
    FeaturedEpic,
}

impl StopRule {
    pub fn should_stop(&self, outcome: &PullOutcome) -> bool {
        match self {
            StopRule::Never => false,
            StopRule::AnyEpic => outcome.item.rarity == Rarity::Epic,
            StopRule::FeaturedEpic => {
                outcome.item.rarity == Rarity::Epic && !outcome.item.is_standard()
            }
        }
    }
}

/// Everything one session produced, owned by the trial until analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionResult {
    pub pool_type: PoolType,
    pub featured_epic: String,
    pub pulls_requested: u32,
    pub pulls_remaining: u32,
    pub outcomes: Vec<PullOutcome>,
    pub by_rarity: HashMap<Rarity, Vec<PullOutcome>>,
    pub extra_pulls: u32,
}

impl SessionResult {
    pub fn rarity_outcomes(&self, rarity: Rarity) -> &[PullOutcome] {
        self.by_rarity.get(&rarity).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn epics(&self) -> &[PullOutcome] {
        self.rarity_outcomes(Rarity::Epic)
    }

    /// True if any Epic award was the featured item rather than the
    /// standard-pool one.
    pub fn has_featured_epic(&self) -> bool {
        self.epics().iter().any(|outcome| !outcome.item.is_standard())
    }
}

/// Run one banner until the budget is spent or the stop rule fires.
///
/// The stardust balance bootstraps at a fixed amount. After every pull the
/// pull's stardust is banked, and a full pass (one extra pull) is bought at
/// most once per pull; leftover stardust waits for later pulls rather than
/// compounding inside one iteration.
pub fn run_session<R: Rng>(
    pull_budget: u32,
    banner: &mut Banner,
    catalogue: &mut Catalogue,
    stop_rule: StopRule,
    rng: &mut R,
) -> SessionResult {
    let mut pulls = pull_budget;
    let mut stardust = STARDUST_STARTING_BALANCE;
    let mut extra_pulls = 0;
    let mut outcomes = Vec::new();
    let mut by_rarity: HashMap<Rarity, Vec<PullOutcome>> = HashMap::from([
        (Rarity::Common, Vec::new()),
        (Rarity::Rare, Vec::new()),
        (Rarity::Epic, Vec::new()),
    ]);

    while pulls > 0 {
        let (outcome, earned) = banner.pull(catalogue, rng);
        stardust += earned;
        pulls -= 1;

        if stardust >= STARDUST_PASS_COST {
            stardust -= STARDUST_PASS_COST;
            pulls += 1;
            extra_pulls += 1;
        }

        let stop = stop_rule.should_stop(&outcome);
        by_rarity
            .entry(outcome.item.rarity)
            .or_default()
            .push(outcome.clone());
        outcomes.push(outcome);

        if stop {
            break;
        }
    }

    SessionResult {
        pool_type: banner.pool_type,
        featured_epic: banner.featured_epic.name.clone(),
        pulls_requested: pull_budget,
        pulls_remaining: pulls,
        outcomes,
        by_rarity,
        extra_pulls,
    }
}
