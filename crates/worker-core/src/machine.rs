//! Goal State Machine
//!
//! Decides, once per tick, whether a worker gathers energy or spends it on
//! its current goal. Gathering and working alternate with hysteresis on the
//! carried load: a worker fills up completely before working and empties
//! completely before gathering again.

use std::cell::Cell;
use worker_state::{Goal, WorkerMemory};

use crate::actions::{self, ActionContext};
use crate::config::EngineConfig;
use crate::status::{markers, ActionStatus};
use crate::world::{ResourceType, WorldQuery};
use crate::worker::Worker;

/// Picks a goal for a worker whose goal is unset.
pub trait GoalPolicy {
    fn select(&self, worker: &Worker, memory: &WorkerMemory) -> Option<Goal>;
}

/// Every worker upgrades.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultGoalPolicy;

impl GoalPolicy for DefaultGoalPolicy {
    fn select(&self, _worker: &Worker, _memory: &WorkerMemory) -> Option<Goal> {
        Some(Goal::Upgrade)
    }
}

/// Hands out goals from a fixed list in turn.
#[derive(Debug, Clone, Default)]
pub struct RoundRobinPolicy {
    goals: Vec<Goal>,
    next: Cell<usize>,
}

impl RoundRobinPolicy {
    pub fn new(goals: Vec<Goal>) -> Self {
        Self {
            goals,
            next: Cell::new(0),
        }
    }
}

impl GoalPolicy for RoundRobinPolicy {
    fn select(&self, _worker: &Worker, _memory: &WorkerMemory) -> Option<Goal> {
        if self.goals.is_empty() {
            return None;
        }
        let i = self.next.get();
        self.next.set((i + 1) % self.goals.len());
        Some(self.goals[i])
    }
}

/// Which branch ran this tick, and how it went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Gathering energy. `pickup` is set when harvesting failed and pickup
    /// was tried as a fallback.
    Gathering {
        harvest: ActionStatus,
        pickup: Option<ActionStatus>,
    },
    /// Spending energy on `goal`.
    Working { goal: Goal, status: ActionStatus },
    /// Working with no goal to dispatch on.
    Confused,
}

/// Applies working-flag hysteresis for the current load.
pub fn update_working(worker: &Worker, memory: &mut WorkerMemory) {
    if worker.is_full() {
        memory.working = Some(true);
    } else if worker.is_empty() || memory.working.is_none() {
        memory.working = Some(false);
    }
}

/// Runs one tick of the goal machine for `worker`.
pub fn run<W, P>(
    worker: &Worker,
    memory: &mut WorkerMemory,
    world: &mut W,
    config: &EngineConfig,
    policy: &P,
) -> TickOutcome
where
    W: WorldQuery + ?Sized,
    P: GoalPolicy + ?Sized,
{
    if memory.goal.is_none() {
        memory.goal = policy.select(worker, memory);
        if let Some(goal) = memory.goal {
            tracing::debug!(worker = %worker.name, %goal, "selected goal");
        }
    }

    update_working(worker, memory);
    let working = memory.working == Some(true);
    let mut ctx = ActionContext::new(worker, memory, world, config);

    if !working {
        // Always shown, to everyone
        ctx.world.say(&worker.name, markers::HARVEST, true);
        let harvest = actions::harvest(&mut ctx);
        let pickup = (!harvest.is_ok()).then(|| actions::pickup(&mut ctx, ResourceType::Energy));
        return TickOutcome::Gathering { harvest, pickup };
    }

    let Some(goal) = ctx.memory.goal else {
        ctx.world.say(&worker.name, markers::CONFUSED, false);
        tracing::warn!(worker = %worker.name, "working without a goal");
        return TickOutcome::Confused;
    };

    let status = dispatch(goal, &mut ctx);
    if !status.is_ok() {
        tracing::debug!(worker = %worker.name, %goal, %status, "goal released");
        ctx.memory.goal = None;
    }
    TickOutcome::Working { goal, status }
}

/// Runs the primitive that serves `goal`.
pub fn dispatch<W: WorldQuery + ?Sized>(goal: Goal, ctx: &mut ActionContext<'_, W>) -> ActionStatus {
    match goal {
        Goal::Fill => actions::fill(ctx),
        Goal::Fix => actions::repair(ctx),
        Goal::Build => actions::build(ctx),
        Goal::Upgrade => actions::upgrade(ctx),
        Goal::Reinforce => actions::reinforce(ctx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StatusConfig;
    use crate::fixtures::pos;
    use crate::sandbox::{SandboxWorld, WorkerSpec};
    use crate::world::StructureType;
    use worker_state::{ObjectId, TargetKind};

    struct NoGoal;

    impl GoalPolicy for NoGoal {
        fn select(&self, _: &Worker, _: &WorkerMemory) -> Option<Goal> {
            None
        }
    }

    fn tick(world: &mut SandboxWorld, memory: &mut WorkerMemory) -> TickOutcome {
        let worker = world.worker("w1").unwrap();
        run(&worker, memory, world, &EngineConfig::default(), &DefaultGoalPolicy)
    }

    #[test]
    fn test_round_robin_cycles_goals() {
        let policy = RoundRobinPolicy::new(vec![Goal::Fill, Goal::Build]);
        let worker = Worker::new("w", pos(1, 1));
        let memory = WorkerMemory::new();

        let picks: Vec<_> = (0..3).map(|_| policy.select(&worker, &memory)).collect();
        assert_eq!(picks, [Some(Goal::Fill), Some(Goal::Build), Some(Goal::Fill)]);
        assert_eq!(RoundRobinPolicy::new(vec![]).select(&worker, &memory), None);
    }

    #[test]
    fn test_working_flag_hysteresis() {
        let pos = pos(1, 1);
        let mut memory = WorkerMemory::new();

        // Unset becomes gathering
        update_working(&Worker::new("w", pos.clone()).with_energy(20, 50), &mut memory);
        assert_eq!(memory.working, Some(false));

        // Full starts working
        update_working(&Worker::new("w", pos.clone()).with_energy(50, 50), &mut memory);
        assert_eq!(memory.working, Some(true));

        // Partially spent keeps working
        update_working(&Worker::new("w", pos.clone()).with_energy(20, 50), &mut memory);
        assert_eq!(memory.working, Some(true));

        // Empty goes back to gathering
        update_working(&Worker::new("w", pos.clone()).with_energy(0, 50), &mut memory);
        assert_eq!(memory.working, Some(false));

        // Partially filled keeps gathering
        update_working(&Worker::new("w", pos).with_energy(20, 50), &mut memory);
        assert_eq!(memory.working, Some(false));
    }

    #[test]
    fn test_fresh_worker_next_to_source() {
        let mut world = SandboxWorld::new();
        let source = world.spawn_source(pos(11, 10), 3_000);
        world.spawn_worker("w1", pos(10, 10), WorkerSpec::default());
        let mut memory = WorkerMemory::new();

        let outcome = tick(&mut world, &mut memory);

        assert_eq!(
            outcome,
            TickOutcome::Gathering {
                harvest: ActionStatus::Ok,
                pickup: None
            }
        );
        assert_eq!(memory.goal, Some(Goal::Upgrade));
        assert_eq!(memory.working, Some(false));
        assert_eq!(memory.targets.get(TargetKind::Harvest), Some(&source));
        assert_eq!(world.worker("w1").unwrap().pos, pos(10, 10));
    }

    #[test]
    fn test_gathering_falls_back_to_pickup() {
        let mut world = SandboxWorld::new();
        let pile = world.spawn_dropped(pos(11, 10), ResourceType::Energy, 25);
        world.spawn_worker("w1", pos(10, 10), WorkerSpec::default());
        let mut memory = WorkerMemory::new();

        let outcome = tick(&mut world, &mut memory);

        assert_eq!(
            outcome,
            TickOutcome::Gathering {
                harvest: ActionStatus::NoSource,
                pickup: Some(ActionStatus::Ok)
            }
        );
        assert_eq!(memory.targets.get(TargetKind::Pickup), Some(&pile));
        // Gathering failures never touch the goal
        assert_eq!(memory.goal, Some(Goal::Upgrade));
        let said: Vec<_> = world.speech().iter().map(|s| s.message.as_str()).collect();
        assert_eq!(said, [markers::HARVEST, markers::HARVEST, markers::PICKUP]);
    }

    #[test]
    fn test_vanished_build_site_releases_goal() {
        let mut world = SandboxWorld::new();
        world.spawn_worker("w1", pos(10, 10), WorkerSpec::default().with_energy(100));
        let mut memory = WorkerMemory::new();
        memory.goal = Some(Goal::Build);
        memory.working = Some(true);
        memory.targets.set(TargetKind::Build, ObjectId::from("site_gone"));

        let outcome = tick(&mut world, &mut memory);

        assert_eq!(
            outcome,
            TickOutcome::Working {
                goal: Goal::Build,
                status: ActionStatus::NoTarget
            }
        );
        assert_eq!(memory.targets.get(TargetKind::Build), None);
        assert_eq!(memory.goal, None);
    }

    #[test]
    fn test_fill_goal_dispatches_to_fill() {
        let mut world = SandboxWorld::new();
        let spawn = world.spawn_structure(pos(11, 10), StructureType::Spawn, true);
        world.spawn_worker("w1", pos(10, 10), WorkerSpec::default().with_energy(100));
        let mut memory = WorkerMemory::new();
        memory.goal = Some(Goal::Fill);

        let outcome = tick(&mut world, &mut memory);

        assert_eq!(
            outcome,
            TickOutcome::Working {
                goal: Goal::Fill,
                status: ActionStatus::Ok
            }
        );
        assert_eq!(memory.targets.get(TargetKind::Fill), Some(&spawn));
        assert_eq!(world.energy_in(&spawn), Some(100));
        assert_eq!(memory.goal, Some(Goal::Fill));
    }

    #[test]
    fn test_reinforce_without_barriers_releases_goal() {
        let mut world = SandboxWorld::new();
        world.spawn_controller(pos(30, 30), 2);
        world.spawn_worker("w1", pos(10, 10), WorkerSpec::default().with_energy(100));
        let mut memory = WorkerMemory::new();
        memory.goal = Some(Goal::Reinforce);

        let outcome = tick(&mut world, &mut memory);

        assert_eq!(
            outcome,
            TickOutcome::Working {
                goal: Goal::Reinforce,
                status: ActionStatus::NoTarget
            }
        );
        assert_eq!(memory.goal, None);
        assert_eq!(world.speech().last().map(|s| s.message.as_str()), Some(markers::REINFORCE));
    }

    #[test]
    fn test_machine_markers_ignore_status_flags() {
        let mut world = SandboxWorld::new();
        world.spawn_source(pos(11, 10), 3_000);
        world.spawn_worker("w1", pos(10, 10), WorkerSpec::default());
        world.spawn_worker("w2", pos(20, 20), WorkerSpec::default().with_energy(100));
        let quiet = EngineConfig {
            status: StatusConfig {
                verbose: false,
                broadcast: false,
            },
            ..EngineConfig::default()
        };

        let gatherer = world.worker("w1").unwrap();
        run(&gatherer, &mut WorkerMemory::new(), &mut world, &quiet, &DefaultGoalPolicy);
        let loaded = world.worker("w2").unwrap();
        let outcome = run(&loaded, &mut WorkerMemory::new(), &mut world, &quiet, &NoGoal);

        assert_eq!(outcome, TickOutcome::Confused);
        let said: Vec<_> = world
            .speech()
            .iter()
            .map(|s| (s.worker.as_str(), s.message.as_str(), s.public))
            .collect();
        assert_eq!(
            said,
            [("w1", markers::HARVEST, true), ("w2", markers::CONFUSED, false)]
        );
    }

    #[test]
    fn test_missing_goal_is_confused() {
        let mut world = SandboxWorld::new();
        world.spawn_worker("w1", pos(10, 10), WorkerSpec::default().with_energy(100));
        let mut memory = WorkerMemory::new();
        let worker = world.worker("w1").unwrap();

        let outcome = run(&worker, &mut memory, &mut world, &EngineConfig::default(), &NoGoal);

        assert_eq!(outcome, TickOutcome::Confused);
        assert_eq!(world.speech()[0].message, markers::CONFUSED);
    }
}
