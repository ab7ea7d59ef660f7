//! Build Action
//!
//! Spends carried energy on the nearest construction site.

use worker_state::TargetKind;

use super::upgrade::WORK_RANGE;
use super::{note_refusal, ActionContext, Reach};
use crate::status::{markers, ActionStatus};
use crate::targets::Lookup;
use crate::world::{FindClass, Metric, ObjectKind, WorldObject, WorldQuery};

/// Builds the memoized construction site, searching for the nearest one if
/// none is held. A site that completed or was removed drops out of memory.
pub fn build<W: WorldQuery + ?Sized>(ctx: &mut ActionContext<'_, W>) -> ActionStatus {
    ctx.announce(markers::BUILD);

    let origin = ctx.worker.pos.clone();
    let lookup = ctx.acquire(
        TargetKind::Build,
        |world| {
            world.find_nearest(
                &origin,
                FindClass::ConstructionSites,
                &|_: &WorldObject| true,
                Metric::ByPath,
            )
        },
        is_site,
    );
    let site = match lookup {
        Lookup::Found(site) => site,
        other => return other.status(),
    };

    if ctx.approach(&site.pos, Reach::Within(WORK_RANGE)) {
        let result = ctx.world.build(&ctx.worker.name, &site.id);
        note_refusal(ctx.worker, "build", result);
    }
    ActionStatus::Ok
}

fn is_site(object: &WorldObject) -> bool {
    matches!(object.kind, ObjectKind::ConstructionSite { .. })
}
