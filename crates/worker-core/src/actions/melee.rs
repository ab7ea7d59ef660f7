//! Melee Action
//!
//! Closes in on a named hostile and attacks it. Combat needs a fresh route
//! every tick, so this primitive moves through the host's own pathing and
//! never touches the target or path caches.

use worker_state::ObjectId;

use super::{note_refusal, ActionContext};
use crate::movement;
use crate::status::{markers, ActionStatus};
use crate::world::WorldQuery;

/// Attacks `victim` if adjacent, otherwise moves straight toward it.
pub fn melee<W: WorldQuery + ?Sized>(
    ctx: &mut ActionContext<'_, W>,
    victim: &ObjectId,
) -> ActionStatus {
    ctx.announce(markers::MELEE);

    let Some(target) = ctx.world.resolve(victim) else {
        return ActionStatus::NoTarget;
    };

    if ctx.world.is_adjacent(&ctx.worker.pos, &target.pos) {
        let result = ctx.world.attack(&ctx.worker.name, &target.id);
        note_refusal(ctx.worker, "attack", result);
    } else {
        let result = movement::direct_move(&mut *ctx.world, ctx.worker, &target.pos, &ctx.config.melee);
        note_refusal(ctx.worker, "move", result);
    }
    ActionStatus::Ok
}
