//! brazier-replay: drive the brazier controller through a scripted scenario.
//!
//! Usage:
//!   brazier-replay run --scenario castle.json [--config controller.json]
//!
//! Log verbosity follows RUST_LOG (default: info).

mod scenario;

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use hecs::World;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use brazier_core::config::ControllerConfig;
use brazier_core::enums::ModifiedState;
use brazier_sim::dispatch::TerritoryDispatcher;
use brazier_sim::territory::ComponentTerritories;
use brazier_sim::world_setup;
use brazier_sim::ActivationController;

use scenario::{brazier_state, BrazierState, Scenario, Step};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "run" => {
            if let Err(e) = cmd_run(&args[2..]) {
                eprintln!("Error: {e:#}");
                process::exit(1);
            }
        }
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "brazier-replay: replay territory updates against the brazier controller\n\
         \n\
         Commands:\n\
         \n\
         run       Replay a scenario and print final brazier states as JSON\n\
         \n\
           --scenario <path>  Scenario JSON file\n\
           --config <path>    Controller config JSON (optional, default: built-in)\n\
         \n\
         Examples:\n\
         \n\
           brazier-replay run --scenario castle.json\n\
           RUST_LOG=brazier_sim=trace brazier-replay run --scenario castle.json --config tuned.json\n"
    );
}

fn parse_path(args: &[String], flag: &str) -> Option<PathBuf> {
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            return Some(PathBuf::from(&args[i + 1]));
        }
    }
    None
}

#[derive(Serialize)]
struct Output {
    updates: usize,
    braziers: Vec<BrazierState>,
}

fn cmd_run(args: &[String]) -> Result<()> {
    let scenario_path =
        parse_path(args, "--scenario").context("--scenario <path> is required")?;
    let config = match parse_path(args, "--config") {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            ControllerConfig::from_json(&json).context("parsing controller config")?
        }
        None => ControllerConfig::default(),
    };

    let json = std::fs::read_to_string(&scenario_path)
        .with_context(|| format!("reading {}", scenario_path.display()))?;
    let scenario = Scenario::from_json(&json)?;

    let mut world = World::new();
    let spawned = scenario.build(&mut world)?;
    info!(
        users = spawned.users.len(),
        braziers = spawned.braziers.len(),
        steps = scenario.steps.len(),
        "scenario loaded"
    );

    let features = config.features;
    let directory = ComponentTerritories::new(scenario.territories);
    let mut controller = ActivationController::new(config, directory, features);

    let mut updates = 0;
    {
        let mut dispatcher = TerritoryDispatcher::new();
        dispatcher.register(&mut controller);
        for step in &scenario.steps {
            match step {
                Step::Update { heart } => {
                    let (heart, territory) = spawned.heart(heart)?;
                    dispatcher.notify(&mut world, territory, heart);
                    updates += 1;
                }
                Step::Move {
                    user,
                    position,
                    territory,
                } => {
                    let character = spawned
                        .characters
                        .get(user)
                        .copied()
                        .with_context(|| format!("user {user:?} has no character"))?;
                    world_setup::move_entity(&mut world, character, *position, *territory)?;
                }
                Step::Connect { user, connected } => {
                    world_setup::set_connected(&mut world, spawned.user(user)?, *connected)?;
                }
                Step::Rename { brazier, name } => {
                    world_setup::rename(&mut world, spawned.brazier(*brazier)?, name)?;
                }
            }
        }
    }

    let braziers = spawned
        .braziers
        .iter()
        .map(|&brazier| {
            let modified = controller.state_of(brazier) == ModifiedState::Modified;
            brazier_state(&world, brazier, modified)
        })
        .collect::<Result<Vec<_>>>()?;

    let output = Output { updates, braziers };
    println!("{}", serde_json::to_string_pretty(&output)?);
    info!(updates, modified = controller.modified().total(), "replay complete");
    Ok(())
}
