//! Campaign runner: sequences banners into one simulated player
//! trajectory and repeats it across independent trials.

use crate::analysis::Pipeline;
use crate::banner::{Banner, Item, PoolType, Rarity};
use crate::catalogue::{Catalogue, CatalogueMode};
use crate::constants::{DEFAULT_PULL_BUDGET, DEFAULT_TRIAL_COUNT};
use crate::session::{run_session, SessionResult, StopRule};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

/// One banner's declared reward table and starting state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannerConfig {
    pub pool_type: PoolType,
    pub featured_epic: String,
    /// Must be non-empty.
    pub featured_rares: Vec<String>,
    #[serde(default)]
    pub start_pity: u32,
    #[serde(default)]
    pub start_rare_pity: u32,
    #[serde(default)]
    pub start_guaranteed_epic: bool,
    #[serde(default)]
    pub start_guaranteed_rare: bool,
    /// Shares a pity pool with the banner before it: pity counters and
    /// guarantee flags carry over from that banner's end state instead of
    /// the starting values above.
    #[serde(default)]
    pub carries_pity: bool,
}

impl BannerConfig {
    /// Construct a fresh banner at this config's declared starting state.
    pub fn build(&self) -> Banner {
        Banner::with_state(
            self.pool_type,
            Item::new(self.featured_epic.clone(), Rarity::Epic),
            self.featured_rares
                .iter()
                .map(|name| Item::new(name.clone(), Rarity::Rare))
                .collect(),
            self.start_pity,
            self.start_rare_pity,
            self.start_guaranteed_epic,
            self.start_guaranteed_rare,
        )
    }
}

/// Configuration for a full simulation batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignConfig {
    /// Banners pulled in order within each trial.
    pub banners: Vec<BannerConfig>,

    /// Number of independent trials.
    pub trials: u32,

    /// Pull budget for the first banner; unused budget flows onward.
    pub pull_budget: u32,

    /// Random seed for reproducibility (None = entropy).
    pub seed: Option<u64>,

    /// When a session ends before its budget does.
    pub stop_rule: StopRule,

    /// Whether the ownership table resets between trials.
    pub catalogue_mode: CatalogueMode,

    /// Item name -> copies owned before the first pull.
    #[serde(default)]
    pub owned_copies: HashMap<String, u32>,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per-trial)
    #[serde(default)]
    pub verbosity: u8,
}

impl Default for CampaignConfig {
    /// The demo campaign: a character banner joined mid-cycle (pity 42,
    /// Epic guarantee armed) followed by an equipment banner at pity 21,
    /// with a partially built roster.
    fn default() -> Self {
        Self {
            banners: vec![
                BannerConfig {
                    pool_type: PoolType::Primary,
                    featured_epic: "Seraphina".to_string(),
                    featured_rares: vec![
                        "Wren".to_string(),
                        "Halvard".to_string(),
                        "Imke".to_string(),
                    ],
                    start_pity: 42,
                    start_rare_pity: 2,
                    start_guaranteed_epic: true,
                    start_guaranteed_rare: false,
                    carries_pity: false,
                },
                BannerConfig {
                    pool_type: PoolType::Secondary,
                    featured_epic: "Gilded Hourglass".to_string(),
                    featured_rares: vec![
                        "Ember Lantern".to_string(),
                        "Drifting Compass".to_string(),
                        "Moth-Eaten Banner".to_string(),
                    ],
                    start_pity: 21,
                    start_rare_pity: 2,
                    start_guaranteed_epic: false,
                    start_guaranteed_rare: false,
                    carries_pity: false,
                },
            ],
            trials: DEFAULT_TRIAL_COUNT,
            pull_budget: DEFAULT_PULL_BUDGET,
            seed: None,
            stop_rule: StopRule::FeaturedEpic,
            catalogue_mode: CatalogueMode::PerTrial,
            owned_copies: HashMap::from([
                ("Wren".to_string(), 2),
                ("Halvard".to_string(), 1),
                ("Imke".to_string(), 0),
            ]),
            verbosity: 1,
        }
    }
}

impl CampaignConfig {
    /// Quick config for smoke-testing a campaign shape.
    pub fn quick_test() -> Self {
        Self {
            trials: 1_000,
            seed: Some(1),
            verbosity: 0,
            ..Default::default()
        }
    }

    /// Load a campaign from a JSON file.
    pub fn load(path: &Path) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    pub fn steps_per_trial(&self) -> usize {
        self.banners.len()
    }
}

/// One full simulated player trajectory: one session per banner.
pub type Trial = Vec<SessionResult>;

/// Run one trial: every banner in order, fresh state, shared budget.
pub fn run_trial<R: Rng>(
    config: &CampaignConfig,
    catalogue: &mut Catalogue,
    rng: &mut R,
) -> Trial {
    let mut results = Vec::with_capacity(config.banners.len());
    let mut budget = config.pull_budget;
    let mut previous: Option<Banner> = None;

    for banner_config in &config.banners {
        let mut banner = banner_config.build();
        if banner_config.carries_pity {
            if let Some(prev) = &previous {
                banner.carry_state_from(prev);
            }
        }

        let session = run_session(budget, &mut banner, catalogue, config.stop_rule, rng);
        budget = session.pulls_remaining;
        previous = Some(banner);
        results.push(session);
    }

    results
}

/// Run the full batch and keep every trial (needed for the per-trial
/// inspection view).
pub fn run_campaign(config: &CampaignConfig) -> Vec<Trial> {
    let base_catalogue = Catalogue::seeded(&config.owned_copies);
    let mut shared_catalogue = base_catalogue.clone();
    let mut trials = Vec::with_capacity(config.trials as usize);

    for trial_idx in 0..config.trials {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed + trial_idx as u64),
            None => ChaCha8Rng::from_entropy(),
        };

        let trial = match config.catalogue_mode {
            CatalogueMode::PerTrial => {
                let mut catalogue = base_catalogue.clone();
                run_trial(config, &mut catalogue, &mut rng)
            }
            CatalogueMode::SharedAcrossTrials => {
                run_trial(config, &mut shared_catalogue, &mut rng)
            }
        };

        if config.verbosity >= 2 {
            let epics: usize = trial.iter().map(|session| session.epics().len()).sum();
            let remaining = trial.last().map(|session| session.pulls_remaining).unwrap_or(0);
            println!(
                "Trial {}/{} - {} Epics, {} pulls remaining",
                trial_idx + 1,
                config.trials,
                epics,
                remaining
            );
        }

        trials.push(trial);
    }

    trials
}

/// Run the full batch, streaming each trial straight into the analysis
/// pipeline without retaining raw results.
pub fn run_streaming(config: &CampaignConfig, pipeline: &mut Pipeline) {
    let base_catalogue = Catalogue::seeded(&config.owned_copies);
    let mut shared_catalogue = base_catalogue.clone();

    for trial_idx in 0..config.trials {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed + trial_idx as u64),
            None => ChaCha8Rng::from_entropy(),
        };

        let trial = match config.catalogue_mode {
            CatalogueMode::PerTrial => {
                let mut catalogue = base_catalogue.clone();
                run_trial(config, &mut catalogue, &mut rng)
            }
            CatalogueMode::SharedAcrossTrials => {
                run_trial(config, &mut shared_catalogue, &mut rng)
            }
        };

        pipeline.observe_trial(trial_idx as usize, &trial);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    fn two_banner_config() -> CampaignConfig {
        CampaignConfig {
            trials: 1,
            pull_budget: 10,
            seed: Some(0),
            stop_rule: StopRule::AnyEpic,
            verbosity: 0,
            ..Default::default()
        }
    }

    #[test]
    fn test_budget_flows_between_sessions() {
        let config = two_banner_config();
        let mut catalogue = Catalogue::seeded(&config.owned_copies);
        // Every roll is a featured Epic: each session stops after one pull.
        let mut rng = StepRng::new(0, 0);

        let trial = run_trial(&config, &mut catalogue, &mut rng);
        assert_eq!(trial.len(), 2);
        assert_eq!(trial[0].pulls_remaining, 9);
        assert_eq!(trial[1].pulls_requested, 9);
        assert_eq!(trial[1].pulls_remaining, 8);
    }

    #[test]
    fn test_carried_pity_overrides_starting_state() {
        let mut config = two_banner_config();
        config.banners[1].carries_pity = true;
        let mut catalogue = Catalogue::seeded(&config.owned_copies);
        let mut rng = StepRng::new(0, 0);

        let trial = run_trial(&config, &mut catalogue, &mut rng);
        // Banner one's Epic reset its pity to 0; banner two inherits that
        // instead of its configured start_pity of 21, so its first pull
        // lands at pity 1.
        assert_eq!(trial[1].outcomes[0].pity, 1);
    }

    #[test]
    fn test_independent_pity_uses_starting_state() {
        let config = two_banner_config();
        let mut catalogue = Catalogue::seeded(&config.owned_copies);
        let mut rng = StepRng::new(0, 0);

        let trial = run_trial(&config, &mut catalogue, &mut rng);
        // No shared pity pool: banner two starts from its own pity 21.
        assert_eq!(trial[1].outcomes[0].pity, 22);
    }

    #[test]
    fn test_trials_reset_banner_state() {
        let mut config = two_banner_config();
        config.trials = 3;
        config.stop_rule = StopRule::Never;
        config.pull_budget = 5;

        let trials = run_campaign(&config);
        assert_eq!(trials.len(), 3);
        for trial in &trials {
            // Every trial re-enters banner one at its configured pity 42.
            assert_eq!(trial[0].outcomes[0].pity, 43);
        }
    }

    #[test]
    fn test_seeded_campaigns_are_reproducible() {
        let mut config = two_banner_config();
        config.trials = 20;
        config.stop_rule = StopRule::FeaturedEpic;
        config.seed = Some(99);

        let first = run_campaign(&config);
        let second = run_campaign(&config);
        assert_eq!(first, second);
    }

    /// An rng whose every `gen::<f64>()` yields roughly `value`.
    fn fixed_roll(value: f64) -> StepRng {
        StepRng::new(((value * (1u64 << 53) as f64) as u64) << 11, 0)
    }

    fn single_rare_config() -> CampaignConfig {
        CampaignConfig {
            banners: vec![BannerConfig {
                pool_type: PoolType::Primary,
                featured_epic: "Seraphina".to_string(),
                featured_rares: vec!["Imke".to_string()],
                start_pity: 0,
                start_rare_pity: 0,
                start_guaranteed_epic: false,
                start_guaranteed_rare: false,
                carries_pity: false,
            }],
            trials: 2,
            pull_budget: 2,
            seed: Some(0),
            stop_rule: StopRule::Never,
            catalogue_mode: CatalogueMode::PerTrial,
            owned_copies: HashMap::from([("Imke".to_string(), 0)]),
            verbosity: 0,
        }
    }

    #[test]
    fn test_catalogue_sharing_inflates_later_trials() {
        // 0.05 lands in the Rare band and wins every tie-break, so every
        // pull awards the single featured Rare.
        let config = single_rare_config();
        let base = Catalogue::seeded(&config.owned_copies);

        // Fresh table per trial: identical stardust income both times.
        let mut per_trial_extras = Vec::new();
        for _ in 0..2 {
            let mut catalogue = base.clone();
            let trial = run_trial(&config, &mut catalogue, &mut fixed_roll(0.05));
            per_trial_extras.push(trial[0].extra_pulls);
        }
        assert_eq!(per_trial_extras, vec![1, 1]);

        // One table across the batch: the second trial inherits the first
        // trial's copies, every award pays the duplicate amount, and the
        // trial buys an extra pass it should not have.
        let mut shared = base.clone();
        let first = run_trial(&config, &mut shared, &mut fixed_roll(0.05));
        let second = run_trial(&config, &mut shared, &mut fixed_roll(0.05));
        assert_eq!(first[0].extra_pulls, 1);
        assert_eq!(second[0].extra_pulls, 2);
    }

    #[test]
    fn test_run_campaign_wires_catalogue_modes() {
        let mut config = single_rare_config();
        config.seed = Some(5);

        // Shared mode must equal hand-threading one catalogue through the
        // same per-trial rng streams.
        config.catalogue_mode = CatalogueMode::SharedAcrossTrials;
        let campaign = run_campaign(&config);

        let mut catalogue = Catalogue::seeded(&config.owned_copies);
        let mut expected = Vec::new();
        for trial_idx in 0..config.trials {
            let mut rng = ChaCha8Rng::seed_from_u64(5 + trial_idx as u64);
            expected.push(run_trial(&config, &mut catalogue, &mut rng));
        }
        assert_eq!(campaign, expected);

        // Per-trial mode must equal a fresh clone per trial.
        config.catalogue_mode = CatalogueMode::PerTrial;
        let campaign = run_campaign(&config);

        let base = Catalogue::seeded(&config.owned_copies);
        let mut expected = Vec::new();
        for trial_idx in 0..config.trials {
            let mut rng = ChaCha8Rng::seed_from_u64(5 + trial_idx as u64);
            let mut catalogue = base.clone();
            expected.push(run_trial(&config, &mut catalogue, &mut rng));
        }
        assert_eq!(campaign, expected);
    }

    #[test]
    fn test_config_json_roundtrip() {
        let config = CampaignConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: CampaignConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.banners.len(), config.banners.len());
        assert_eq!(parsed.pull_budget, config.pull_budget);
        assert_eq!(parsed.owned_copies, config.owned_copies);
    }
}
