//! Pickup Action
//!
//! Collects dropped resources before they decay. Faster than mining when
//! something has been left on the ground.

use worker_state::TargetKind;

use super::{note_refusal, ActionContext, Reach};
use crate::status::{markers, ActionStatus};
use crate::targets::Lookup;
use crate::world::{FindClass, Metric, ResourceType, WorldObject, WorldQuery};

/// Walks to the nearest dropped pile of `resource` and picks it up.
pub fn pickup<W: WorldQuery + ?Sized>(
    ctx: &mut ActionContext<'_, W>,
    resource: ResourceType,
) -> ActionStatus {
    ctx.announce(markers::PICKUP);

    let origin = ctx.worker.pos.clone();
    let lookup = ctx.acquire(
        TargetKind::Pickup,
        |world| {
            world.find_nearest(
                &origin,
                FindClass::DroppedResources,
                &|o: &WorldObject| o.dropped_resource() == Some(resource),
                Metric::ByPath,
            )
        },
        |o| o.dropped_resource().is_some(),
    );
    let pile = match lookup {
        Lookup::Found(pile) => pile,
        other => return other.status(),
    };

    if ctx.approach(&pile.pos, Reach::Adjacent) {
        let result = ctx.world.pickup(&ctx.worker.name, &pile.id);
        note_refusal(ctx.worker, "pickup", result);
    }
    ActionStatus::Ok
}
