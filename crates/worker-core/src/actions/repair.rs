//! Repair Action
//!
//! Restores damaged structures. Walls and ramparts are left to
//! [`super::reinforce`], which works against a level-scaled threshold.

use worker_state::TargetKind;

use super::upgrade::WORK_RANGE;
use super::{note_refusal, ActionContext, Reach};
use crate::status::{markers, ActionStatus};
use crate::targets::Lookup;
use crate::world::{FindClass, Metric, WorldObject, WorldQuery};

/// Repairs the memoized structure until it is back at full hits.
pub fn repair<W: WorldQuery + ?Sized>(ctx: &mut ActionContext<'_, W>) -> ActionStatus {
    ctx.announce(markers::REPAIR);

    let origin = ctx.worker.pos.clone();
    let lookup = ctx.acquire(
        TargetKind::Repair,
        |world| world.find_nearest(&origin, FindClass::Structures, &needs_repair, Metric::ByPath),
        is_damaged,
    );
    let target = match lookup {
        Lookup::Found(target) => target,
        other => return other.status(),
    };

    if ctx.approach(&target.pos, Reach::Within(WORK_RANGE)) {
        let result = ctx.world.repair(&ctx.worker.name, &target.id);
        note_refusal(ctx.worker, "repair", result);
    }
    ActionStatus::Ok
}

fn is_damaged(object: &WorldObject) -> bool {
    object.hits().is_some_and(|(hits, max)| hits < max)
}

fn needs_repair(object: &WorldObject) -> bool {
    is_damaged(object) && !object.structure_type().is_some_and(|t| t.is_barrier())
}
