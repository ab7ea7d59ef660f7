//! Reinforce Action
//!
//! Raises walls and ramparts toward a threshold that grows tenfold with
//! each controller level. Barriers far below the threshold are served
//! first.

use worker_state::TargetKind;

use super::upgrade::WORK_RANGE;
use super::{note_refusal, ActionContext, Reach};
use crate::status::{markers, ActionStatus};
use crate::targets::Lookup;
use crate::world::{FindClass, Metric, WorldObject, WorldQuery};

/// Barrier hit points wanted at controller `level`: `3 * 10^level`.
pub fn reinforce_threshold(level: u8) -> u64 {
    3 * 10u64.saturating_pow(u32::from(level))
}

/// A barrier with less than a twentieth of the threshold counts as urgent.
const URGENT_DIVISOR: u64 = 20;

/// Reinforces the memoized barrier until it reaches the threshold for the
/// room's controller level.
pub fn reinforce<W: WorldQuery + ?Sized>(ctx: &mut ActionContext<'_, W>) -> ActionStatus {
    ctx.announce(markers::REINFORCE);

    let Some(level) = ctx
        .world
        .controller(ctx.worker.room())
        .and_then(|c| c.controller_level())
    else {
        return ActionStatus::NoTarget;
    };
    let threshold = reinforce_threshold(level);

    let origin = ctx.worker.pos.clone();
    let lookup = ctx.acquire(
        TargetKind::Reinforce,
        |world| {
            let urgent = |o: &WorldObject| {
                is_barrier(o) && barrier_hits(o).saturating_mul(URGENT_DIVISOR) < threshold
            };
            let weak = |o: &WorldObject| is_barrier(o) && barrier_hits(o) < threshold;
            world
                .find_nearest(&origin, FindClass::Structures, &urgent, Metric::ByRange)
                .or_else(|| world.find_nearest(&origin, FindClass::Structures, &weak, Metric::ByRange))
        },
        |o| o.hits().is_some_and(|(hits, _)| u64::from(hits) < threshold),
    );
    let barrier = match lookup {
        Lookup::Found(barrier) => barrier,
        other => return other.status(),
    };

    if ctx.approach(&barrier.pos, Reach::Within(WORK_RANGE)) {
        let result = ctx.world.repair(&ctx.worker.name, &barrier.id);
        note_refusal(ctx.worker, "reinforce", result);
    }
    ActionStatus::Ok
}

fn is_barrier(object: &WorldObject) -> bool {
    object.structure_type().is_some_and(|t| t.is_barrier())
}

fn barrier_hits(object: &WorldObject) -> u64 {
    object.hits().map_or(0, |(hits, _)| u64::from(hits))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{act, pos};
    use crate::sandbox::{SandboxWorld, WorkerSpec};
    use crate::world::StructureType;
    use worker_state::WorkerMemory;

    fn setup(level: u8) -> SandboxWorld {
        let mut world = SandboxWorld::new();
        world.spawn_controller(pos(40, 40), level);
        world.spawn_worker("w1", pos(10, 10), WorkerSpec::default().with_energy(50));
        world
    }

    #[test]
    fn test_threshold_scales_with_level() {
        assert_eq!(reinforce_threshold(0), 3);
        assert_eq!(reinforce_threshold(2), 300);
        assert_eq!(reinforce_threshold(5), 300_000);
        assert_eq!(reinforce_threshold(8), 300_000_000);
    }

    #[test]
    fn test_urgent_barrier_preferred_over_nearer_weak_one() {
        let mut world = setup(3);
        // Threshold 3000: 2000 is weak, 100 is urgent
        let weak = world.spawn_structure(pos(11, 10), StructureType::Wall, true);
        world.set_hits(&weak, 2_000);
        let urgent = world.spawn_structure(pos(25, 10), StructureType::Rampart, true);
        world.set_hits(&urgent, 100);
        let mut memory = WorkerMemory::new();

        act(&mut world, "w1", &mut memory, reinforce);

        assert_eq!(memory.targets.get(TargetKind::Reinforce), Some(&urgent));
    }

    #[test]
    fn test_weak_barrier_used_when_none_urgent() {
        let mut world = setup(3);
        let weak = world.spawn_structure(pos(12, 10), StructureType::Wall, true);
        world.set_hits(&weak, 2_000);
        let strong = world.spawn_structure(pos(11, 10), StructureType::Wall, true);
        world.set_hits(&strong, 5_000);
        let mut memory = WorkerMemory::new();

        let status = act(&mut world, "w1", &mut memory, reinforce);

        assert_eq!(status, ActionStatus::Ok);
        assert_eq!(memory.targets.get(TargetKind::Reinforce), Some(&weak));
        assert_eq!(world.resolve(&weak).and_then(|o| o.hits()).map(|h| h.0), Some(2_200));
    }

    #[test]
    fn test_barrier_at_threshold_is_released() {
        let mut world = setup(2);
        let wall = world.spawn_structure(pos(11, 10), StructureType::Wall, true);
        world.set_hits(&wall, 200);
        let mut memory = WorkerMemory::new();

        act(&mut world, "w1", &mut memory, reinforce);
        assert_eq!(memory.targets.get(TargetKind::Reinforce), Some(&wall));

        let status = act(&mut world, "w1", &mut memory, reinforce);
        assert_eq!(status, ActionStatus::NoTarget);
        assert!(memory.targets.is_empty());
    }

    #[test]
    fn test_no_controller_fails_after_announcing() {
        let mut world = SandboxWorld::new();
        world.spawn_worker("w1", pos(10, 10), WorkerSpec::default().with_energy(50));
        let mut memory = WorkerMemory::new();

        let status = act(&mut world, "w1", &mut memory, reinforce);

        assert_eq!(status, ActionStatus::NoTarget);
        assert_eq!(world.speech().len(), 1);
        assert_eq!(world.speech()[0].message, markers::REINFORCE);
    }
}
