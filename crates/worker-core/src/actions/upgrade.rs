//! Upgrade Action

use super::{note_refusal, ActionContext, Reach};
use crate::status::{markers, ActionStatus};
use crate::world::WorldQuery;

/// Range at which a worker can upgrade, build, repair or reinforce.
pub(crate) const WORK_RANGE: u32 = 3;

/// Pours carried energy into the controller of the worker's current room.
///
/// The controller is looked up fresh every tick rather than memoized.
pub fn upgrade<W: WorldQuery + ?Sized>(ctx: &mut ActionContext<'_, W>) -> ActionStatus {
    ctx.announce(markers::UPGRADE);

    let Some(controller) = ctx.world.controller(ctx.worker.room()) else {
        return ActionStatus::NoTarget;
    };

    if ctx.approach(&controller.pos, Reach::Within(WORK_RANGE)) {
        let result = ctx.world.upgrade_controller(&ctx.worker.name, &controller.id);
        note_refusal(ctx.worker, "upgrade", result);
    }
    ActionStatus::Ok
}
