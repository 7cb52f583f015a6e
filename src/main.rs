//! Gacha banner probability simulator CLI.
//!
//! Estimates the odds of clearing a sequence of banners within a pull
//! budget by running many independent trials.
//!
//! Usage:
//!   cargo run -- [OPTIONS]
//!
//! Examples:
//!   cargo run                          # Prompts for a pull budget
//!   cargo run -- -p 102 -n 10000      # 10k trials of 102 pulls
//!   cargo run -- --seed 42 -p 102     # Reproducible run

use gachasim::analysis::Pipeline;
use gachasim::campaign::{run_campaign, CampaignConfig, Trial};
use gachasim::catalogue::CatalogueMode;
use gachasim::constants::{DEFAULT_PULL_BUDGET, DEFAULT_TRIAL_COUNT};
use gachasim::report::{self, JsonReport, RunTimings};
use gachasim::session::StopRule;
use std::env;
use std::io;
use std::path::Path;
use std::time::Instant;

struct CliOptions {
    budget_given: bool,
    save_json: bool,
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let (mut config, opts) = parse_args(&args);

    if !opts.budget_given {
        if let Some(budget) = prompt_pull_budget() {
            config.pull_budget = budget;
        }
    }

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              GACHA BANNER SIMULATOR                           ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Trials:         {}", config.trials);
    println!("  Pull Budget:    {}", config.pull_budget);
    println!("  Banners:        {}", config.banners.len());
    println!("  Stop Rule:      {:?}", config.stop_rule);
    if config.catalogue_mode == CatalogueMode::SharedAcrossTrials {
        println!("  Catalogue:      shared across trials");
    }
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let sim_start = Instant::now();
    let trials = run_campaign(&config);
    let simulation = sim_start.elapsed();

    let steps = config.steps_per_trial();
    let mut pipeline = Pipeline::standard(steps, steps.saturating_sub(1));
    let analysis_start = Instant::now();
    for (trial_idx, trial) in trials.iter().enumerate() {
        pipeline.observe_trial(trial_idx, trial);
    }
    let analysis = analysis_start.elapsed();

    let timings = RunTimings {
        simulation,
        analysis,
    };
    println!("{}", report::summary_text(&config, &pipeline, &timings));

    if opts.save_json {
        let json = JsonReport::new(&config, &pipeline, &timings).to_json();
        let filename = format!(
            "gachasim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        std::fs::write(&filename, json).expect("Failed to write JSON report");
        println!("JSON report saved to: {}", filename);
    }

    inspect_loop(&trials);
}

/// Re-prompt until a valid non-negative pull count is read. Returns None
/// on end of input, leaving the configured default in place.
fn prompt_pull_budget() -> Option<u32> {
    loop {
        println!("Input the number of pulls each trial should use:");
        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) | Err(_) => return None,
            Ok(_) => {}
        }
        if let Ok(budget) = line.trim().parse::<u32>() {
            return Some(budget);
        }
    }
}

/// Let the user page through individual trials until any non-number or
/// out-of-range input.
fn inspect_loop(trials: &[Trial]) {
    loop {
        println!();
        println!(
            "Input a number from 1-{} (inclusive) to view that trial's pulls. Input anything else to exit.",
            trials.len()
        );

        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }

        let selection = match line.trim().parse::<usize>() {
            Ok(number) if (1..=trials.len()).contains(&number) => number,
            _ => break,
        };

        println!();
        println!("{}", report::trial_detail_text(selection, &trials[selection - 1]));
    }
}

fn parse_args(args: &[String]) -> (CampaignConfig, CliOptions) {
    let mut config = CampaignConfig::default();
    let mut opts = CliOptions {
        budget_given: false,
        save_json: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                if i + 1 < args.len() {
                    config = CampaignConfig::load(Path::new(&args[i + 1]))
                        .expect("Failed to load campaign config");
                    i += 1;
                }
            }
            "-n" | "--trials" => {
                if i + 1 < args.len() {
                    config.trials = args[i + 1].parse().unwrap_or(DEFAULT_TRIAL_COUNT);
                    i += 1;
                }
            }
            "-p" | "--pulls" => {
                if i + 1 < args.len() {
                    config.pull_budget = args[i + 1].parse().unwrap_or(DEFAULT_PULL_BUDGET);
                    opts.budget_given = true;
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "--stop" => {
                if i + 1 < args.len() {
                    config.stop_rule = match args[i + 1].as_str() {
                        "never" => StopRule::Never,
                        "any-epic" => StopRule::AnyEpic,
                        _ => StopRule::FeaturedEpic,
                    };
                    i += 1;
                }
            }
            "--shared-catalogue" => {
                config.catalogue_mode = CatalogueMode::SharedAcrossTrials;
            }
            "--json" => {
                opts.save_json = true;
            }
            "--quick" => {
                config = CampaignConfig::quick_test();
                opts.budget_given = true;
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    (config, opts)
}

fn print_help() {
    println!("Gacha Banner Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --trials <N>      Number of trials (default: 100,000)");
    println!("    -p, --pulls <P>       Pull budget per trial (otherwise prompted)");
    println!("    -s, --seed <S>        Random seed for reproducibility");
    println!("    --config <FILE>       Load a campaign from a JSON file");
    println!("    --stop <RULE>         never | any-epic | featured (default: featured)");
    println!("    --shared-catalogue    One duplicate table for the whole batch");
    println!("    --json                Save a JSON report");
    println!("    --quick               Quick check (1,000 seeded trials)");
    println!("    -v, --verbose         Per-trial output");
    println!("    -h, --help            Show this help");
    println!();
    println!("EXAMPLES:");
    println!("    cargo run                          # Prompts for a pull budget");
    println!("    cargo run -- -p 102 -n 10000      # 10k trials of 102 pulls");
    println!("    cargo run -- --seed 42 -p 102     # Reproducible");
}
