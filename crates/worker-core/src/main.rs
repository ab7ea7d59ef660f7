//! Colony Simulation Runner
//!
//! Generates a sandbox room, then drives every worker through the behavior
//! engine tick by tick, persisting each worker's memory between ticks the
//! way the game server would.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use worker_core::config::{Config, ConfigError, DEFAULT_CONFIG_PATH};
use worker_core::sandbox::{DurableStore, SandboxError, SandboxWorld, StoreError};
use worker_core::world::{ObjectKind, WorldQuery};
use worker_core::{ActionStatus, Role, RoundRobinPolicy, TickOutcome, WorkerRole};
use worker_state::Goal;

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "colony_sim")]
#[command(about = "Runs colony workers against a sandbox room")]
struct Args {
    /// Random seed for room generation (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of ticks to simulate (overrides the config file)
    #[arg(long)]
    ticks: Option<u64>,

    /// Number of workers to spawn (overrides the config file)
    #[arg(long)]
    workers: Option<usize>,

    /// Configuration file; defaults to worker.toml if present
    #[arg(long)]
    config: Option<PathBuf>,

    /// Goals handed out in turn, e.g. `fill,build,upgrade`
    #[arg(long, value_delimiter = ',')]
    goals: Vec<Goal>,

    /// Write the final worker memory to this JSON file
    #[arg(long)]
    dump: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Sandbox(#[from] SandboxError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Tally of what workers did over the run
#[derive(Debug, Default)]
struct RunSummary {
    gathering: u64,
    working: u64,
    goals_released: u64,
    confused: u64,
}

impl RunSummary {
    fn record(&mut self, outcome: TickOutcome) {
        match outcome {
            TickOutcome::Gathering { .. } => self.gathering += 1,
            TickOutcome::Working { status, .. } => {
                self.working += 1;
                if status != ActionStatus::Ok {
                    self.goals_released += 1;
                }
            }
            TickOutcome::Confused => self.confused += 1,
        }
    }
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load_or_default(DEFAULT_CONFIG_PATH),
    };
    if let Some(workers) = args.workers {
        config.sandbox.workers.count = workers;
    }
    let seed = args.seed.unwrap_or(config.sandbox.simulation.seed);
    let ticks = args.ticks.unwrap_or(config.sandbox.simulation.default_ticks);
    let report_interval = config.sandbox.simulation.report_interval.max(1);

    tracing::info!(seed, ticks, workers = config.sandbox.workers.count, "starting colony simulation");

    let mut world = SandboxWorld::generate(&config.sandbox, seed)?;
    let mut store = DurableStore::new();
    let role: Box<dyn Role> = if args.goals.is_empty() {
        Box::new(WorkerRole::new(config.engine.clone()))
    } else {
        tracing::info!(goals = ?args.goals, "using round-robin goals");
        Box::new(WorkerRole::with_policy(
            config.engine.clone(),
            RoundRobinPolicy::new(args.goals.clone()),
        ))
    };

    let mut summary = RunSummary::default();
    for _ in 0..ticks {
        for name in world.worker_names() {
            let Some(worker) = world.worker(&name) else {
                continue;
            };
            let mut memory = store.load_or_init(&name, worker.room())?;
            summary.record(role.run(&worker, &mut memory, &mut world));
            store.save(&name, &memory)?;
        }

        world.advance();
        store.collect_garbage(|name| world.is_alive(name));

        if world.tick() % report_interval == 0 {
            report(&world, &config.sandbox.room.name);
        }
        if world.worker_names().is_empty() {
            tracing::info!(tick = world.tick(), "every worker has expired");
            break;
        }
    }

    report(&world, &config.sandbox.room.name);
    tracing::info!(
        gathering = summary.gathering,
        working = summary.working,
        goals_released = summary.goals_released,
        confused = summary.confused,
        role_count = world.role_count(&config.sandbox.room.name, role.name()),
        "simulation complete"
    );

    if let Some(path) = &args.dump {
        store.write_to(path)?;
        tracing::info!(path = %path.display(), records = store.len(), "wrote worker memory");
    }
    Ok(())
}

fn report(world: &SandboxWorld, room: &str) {
    let (level, progress) = match world.controller(room).map(|c| c.kind) {
        Some(ObjectKind::Controller(info)) => (info.level, info.progress),
        _ => (0, 0),
    };
    let stored: u32 = world
        .objects()
        .iter()
        .filter_map(|o| o.structure().and_then(|s| s.store))
        .map(|store| store.energy)
        .sum();
    let stats = world.stats();
    tracing::info!(
        tick = world.tick(),
        workers = world.worker_names().len(),
        controller_level = level,
        controller_progress = progress,
        stored_energy = stored,
        path_computations = stats.path_computations,
        moves = stats.moves,
        "progress"
    );
}
