//! Shared helpers for unit tests that drive primitives against the sandbox.

use worker_state::{Position, WorkerMemory};

use crate::actions::ActionContext;
use crate::config::EngineConfig;
use crate::sandbox::SandboxWorld;
use crate::status::ActionStatus;

pub(crate) const ROOM: &str = "W1N1";

pub(crate) fn pos(x: i32, y: i32) -> Position {
    Position::new(x, y, ROOM)
}

/// Runs one primitive for `worker` with the default engine config.
pub(crate) fn act<F>(
    world: &mut SandboxWorld,
    worker: &str,
    memory: &mut WorkerMemory,
    primitive: F,
) -> ActionStatus
where
    F: FnOnce(&mut ActionContext<'_, SandboxWorld>) -> ActionStatus,
{
    let config = EngineConfig::default();
    act_with(world, worker, memory, &config, primitive)
}

pub(crate) fn act_with<F>(
    world: &mut SandboxWorld,
    worker: &str,
    memory: &mut WorkerMemory,
    config: &EngineConfig,
    primitive: F,
) -> ActionStatus
where
    F: FnOnce(&mut ActionContext<'_, SandboxWorld>) -> ActionStatus,
{
    let worker = world.worker(worker).expect("worker should exist");
    let mut ctx = ActionContext::new(&worker, memory, world, config);
    primitive(&mut ctx)
}
