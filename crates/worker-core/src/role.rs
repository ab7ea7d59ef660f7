//! Worker Role
//!
//! The per-tick entry point a colony scheduler calls for each worker.

use worker_state::WorkerMemory;

use crate::config::EngineConfig;
use crate::lifecycle;
use crate::machine::{self, DefaultGoalPolicy, GoalPolicy, TickOutcome};
use crate::world::WorldQuery;
use crate::worker::Worker;

/// A behavior a scheduler can run for a creep each tick.
pub trait Role {
    /// Role name, as used for head-count bookkeeping.
    fn name(&self) -> &str;

    fn run(&self, worker: &Worker, memory: &mut WorkerMemory, world: &mut dyn WorldQuery)
        -> TickOutcome;
}

/// General-purpose worker: gathers energy, then spends it on its goal.
#[derive(Debug, Clone, Default)]
pub struct WorkerRole<P = DefaultGoalPolicy> {
    pub config: EngineConfig,
    pub policy: P,
}

impl WorkerRole {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            policy: DefaultGoalPolicy,
        }
    }
}

impl<P: GoalPolicy> WorkerRole<P> {
    pub fn with_policy(config: EngineConfig, policy: P) -> Self {
        Self { config, policy }
    }
}

impl<P: GoalPolicy> Role for WorkerRole<P> {
    fn name(&self) -> &str {
        &self.config.lifecycle.role
    }

    fn run(
        &self,
        worker: &Worker,
        memory: &mut WorkerMemory,
        world: &mut dyn WorldQuery,
    ) -> TickOutcome {
        lifecycle::check_life(worker, memory, &mut *world, &self.config.lifecycle);
        machine::run(worker, memory, world, &self.config, &self.policy)
    }
}
