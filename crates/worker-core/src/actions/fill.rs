//! Fill Action
//!
//! Carries energy into the nearest spawn, extension or tower with room left.

use worker_state::TargetKind;

use super::{note_refusal, ActionContext, Reach};
use crate::status::{markers, ActionStatus};
use crate::targets::Lookup;
use crate::world::{FindClass, Metric, ResourceType, WorldObject, WorldQuery};

/// Transfers carried energy into the nearest structure that still needs it.
pub fn fill<W: WorldQuery + ?Sized>(ctx: &mut ActionContext<'_, W>) -> ActionStatus {
    ctx.announce(markers::FILL);

    let origin = ctx.worker.pos.clone();
    let lookup = ctx.acquire(
        TargetKind::Fill,
        |world| world.find_nearest(&origin, FindClass::MyStructures, &needs_energy, Metric::ByPath),
        needs_energy,
    );
    let target = match lookup {
        Lookup::Found(target) => target,
        other => return other.status(),
    };

    if ctx.approach(&target.pos, Reach::Adjacent) {
        let result = ctx
            .world
            .transfer(&ctx.worker.name, &target.id, ResourceType::Energy);
        note_refusal(ctx.worker, "transfer", result);
    }
    ActionStatus::Ok
}

fn needs_energy(object: &WorldObject) -> bool {
    object.structure_type().is_some_and(|t| t.is_fillable())
        && object.free_capacity(ResourceType::Energy) > 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{act, pos};
    use crate::sandbox::{SandboxWorld, WorkerSpec};
    use crate::world::StructureType;
    use worker_state::WorkerMemory;

    fn loaded_worker(world: &mut SandboxWorld, x: i32, y: i32) {
        world.spawn_worker("w1", pos(x, y), WorkerSpec::default().with_energy(100));
    }

    #[test]
    fn test_fill_transfers_when_adjacent() {
        let mut world = SandboxWorld::new();
        let spawn = world.spawn_structure(pos(11, 10), StructureType::Spawn, true);
        loaded_worker(&mut world, 10, 10);
        let mut memory = WorkerMemory::new();

        let status = act(&mut world, "w1", &mut memory, fill);

        assert_eq!(status, ActionStatus::Ok);
        assert_eq!(memory.targets.get(TargetKind::Fill), Some(&spawn));
        assert_eq!(world.energy_in(&spawn), Some(100));
        assert_eq!(world.worker("w1").unwrap().energy, 0);
    }

    #[test]
    fn test_fill_ignores_full_and_foreign_structures() {
        let mut world = SandboxWorld::new();
        let full = world.spawn_structure(pos(11, 10), StructureType::Extension, true);
        world.set_energy(&full, 50);
        world.spawn_structure(pos(9, 10), StructureType::Spawn, false);
        world.spawn_structure(pos(10, 11), StructureType::Container, true);
        let tower = world.spawn_structure(pos(20, 10), StructureType::Tower, true);
        loaded_worker(&mut world, 10, 10);
        let mut memory = WorkerMemory::new();

        let status = act(&mut world, "w1", &mut memory, fill);

        assert_eq!(status, ActionStatus::Ok);
        assert_eq!(memory.targets.get(TargetKind::Fill), Some(&tower));
        // Not adjacent yet, so the worker stepped toward the tower
        assert_eq!(world.worker("w1").unwrap().pos.x, 11);
    }

    #[test]
    fn test_fill_without_candidates_fails() {
        let mut world = SandboxWorld::new();
        loaded_worker(&mut world, 10, 10);
        let mut memory = WorkerMemory::new();

        let status = act(&mut world, "w1", &mut memory, fill);

        assert_eq!(status, ActionStatus::NoTarget);
        assert!(memory.targets.is_empty());
    }

    #[test]
    fn test_full_target_is_dropped_then_replaced() {
        let mut world = SandboxWorld::new();
        let near = world.spawn_structure(pos(14, 10), StructureType::Extension, true);
        let far = world.spawn_structure(pos(30, 10), StructureType::Extension, true);
        loaded_worker(&mut world, 10, 10);
        let mut memory = WorkerMemory::new();

        act(&mut world, "w1", &mut memory, fill);
        assert_eq!(memory.targets.get(TargetKind::Fill), Some(&near));

        // Someone else fills it between ticks
        world.set_energy(&near, 50);
        let status = act(&mut world, "w1", &mut memory, fill);
        assert_eq!(status, ActionStatus::NoTarget);
        assert_eq!(memory.targets.get(TargetKind::Fill), None);

        act(&mut world, "w1", &mut memory, fill);
        assert_eq!(memory.targets.get(TargetKind::Fill), Some(&far));
    }

    #[test]
    fn test_fill_announces_marker() {
        let mut world = SandboxWorld::new();
        loaded_worker(&mut world, 10, 10);
        let mut memory = WorkerMemory::new();

        act(&mut world, "w1", &mut memory, fill);

        let speech = world.speech();
        assert_eq!(speech.len(), 1);
        assert_eq!(speech[0].message, markers::FILL);
        assert!(speech[0].public);
    }
}
