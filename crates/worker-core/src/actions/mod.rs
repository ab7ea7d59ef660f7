//! Action Library
//!
//! Goal-fulfilling primitives. Each one follows the same shape:
//! acquire or re-validate a target, approach it, then act on it, and
//! reports an [`ActionStatus`] the goal machine uses to keep or drop its goal.

pub mod build;
pub mod fill;
pub mod harvest;
pub mod melee;
pub mod pickup;
pub mod reinforce;
pub mod repair;
pub mod upgrade;

pub use build::build;
pub use fill::fill;
pub use harvest::harvest;
pub use melee::melee;
pub use pickup::pickup;
pub use reinforce::{reinforce, reinforce_threshold};
pub use repair::repair;
pub use upgrade::upgrade;

use worker_state::{ObjectId, Position, TargetKind, WorkerMemory};

use crate::config::EngineConfig;
use crate::movement::{self, MoveOutcome};
use crate::targets::{self, Lookup};
use crate::world::{HostResult, WorldObject, WorldQuery};
use crate::worker::Worker;

/// How close a worker must be before the terminal act.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reach {
    Adjacent,
    Within(u32),
}

/// Everything one primitive needs for one tick.
pub struct ActionContext<'a, W: WorldQuery + ?Sized> {
    pub worker: &'a Worker,
    pub memory: &'a mut WorkerMemory,
    pub world: &'a mut W,
    pub config: &'a EngineConfig,
}

impl<'a, W: WorldQuery + ?Sized> ActionContext<'a, W> {
    pub fn new(
        worker: &'a Worker,
        memory: &'a mut WorkerMemory,
        world: &'a mut W,
        config: &'a EngineConfig,
    ) -> Self {
        Self {
            worker,
            memory,
            world,
            config,
        }
    }

    /// Shows `marker` above the worker when status markers are enabled.
    pub fn announce(&mut self, marker: &str) {
        let status = &self.config.status;
        if status.verbose {
            self.world.say(&self.worker.name, marker, status.broadcast);
        }
    }

    /// Looks up the memoized target for `kind`, searching if the slot is empty.
    pub fn acquire<S, V>(&mut self, kind: TargetKind, search: S, is_valid: V) -> Lookup
    where
        S: FnOnce(&W) -> Option<ObjectId>,
        V: Fn(&WorldObject) -> bool,
    {
        targets::acquire(&*self.world, &mut self.memory.targets, kind, search, is_valid)
    }

    /// True when the worker is close enough to act on `target`; otherwise
    /// takes one optimized step toward it and returns false.
    pub fn approach(&mut self, target: &Position, reach: Reach) -> bool {
        let in_reach = match reach {
            Reach::Adjacent => self.world.is_adjacent(&self.worker.pos, target),
            Reach::Within(range) => self.world.is_within_range(&self.worker.pos, target, range),
        };
        if in_reach {
            return true;
        }

        let outcome =
            movement::optimized_move(&mut *self.world, self.worker, &mut self.memory.path, target);
        if outcome == MoveOutcome::NoPath {
            tracing::debug!(worker = %self.worker.name, %target, "no path to target");
        }
        false
    }
}

/// Logs a refused terminal act; the attempt itself still counts as progress.
pub(crate) fn note_refusal(worker: &Worker, act: &str, result: HostResult) {
    if let Err(e) = result {
        tracing::debug!(worker = %worker.name, act, "host refused: {}", e);
    }
}
