//! Harvest Action
//!
//! Mines energy from the nearest active source.

use worker_state::TargetKind;

use super::{note_refusal, ActionContext, Reach};
use crate::status::{markers, ActionStatus};
use crate::targets::Lookup;
use crate::world::{FindClass, Metric, WorldObject, WorldQuery};

/// Moves to the memoized source and harvests it.
///
/// Returns [`ActionStatus::NoTarget`] when the memoized source has vanished
/// or run dry (the slot is cleared), and [`ActionStatus::NoSource`] when no
/// active source could be found at all.
pub fn harvest<W: WorldQuery + ?Sized>(ctx: &mut ActionContext<'_, W>) -> ActionStatus {
    ctx.announce(markers::HARVEST);

    let origin = ctx.worker.pos.clone();
    let lookup = ctx.acquire(
        TargetKind::Harvest,
        |world| world.find_nearest(&origin, FindClass::ActiveSources, &|_: &WorldObject| true, Metric::ByPath),
        has_energy,
    );
    let source = match lookup {
        Lookup::Found(source) => source,
        Lookup::Invalidated(_) => return ActionStatus::NoTarget,
        Lookup::NotFound => return ActionStatus::NoSource,
    };

    if ctx.approach(&source.pos, Reach::Adjacent) {
        let result = ctx.world.harvest(&ctx.worker.name, &source.id);
        note_refusal(ctx.worker, "harvest", result);
    }
    ActionStatus::Ok
}

fn has_energy(object: &WorldObject) -> bool {
    object.source_energy().is_some_and(|energy| energy > 0)
}
