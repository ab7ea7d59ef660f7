//! Target Cache
//!
//! Sticky per-action target memoization. A nearest-object search is paid
//! once; afterwards the stored id is resolved and re-validated every tick
//! and dropped the moment it stops qualifying.

use worker_state::{ObjectId, TargetKind, TargetSlots};

use crate::status::ActionStatus;
use crate::world::{WorldObject, WorldQuery};

/// Outcome of looking up the memoized target for one action kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// The slot holds a live target that still qualifies.
    Found(WorldObject),
    /// The slot held an id that vanished or stopped qualifying; it is now cleared.
    Invalidated(ObjectId),
    /// The slot was empty and this tick's search found nothing.
    NotFound,
}

impl Lookup {
    /// The status an action reports when it has no target to work on.
    ///
    /// Both failure kinds map to [`ActionStatus::NoTarget`]; extraction
    /// distinguishes them itself.
    pub fn status(&self) -> ActionStatus {
        match self {
            Lookup::Found(_) => ActionStatus::Ok,
            Lookup::Invalidated(_) | Lookup::NotFound => ActionStatus::NoTarget,
        }
    }
}

/// Resolves the target held in `kind`'s slot, searching for one if empty.
///
/// The search runs at most once per call and only when the slot is empty;
/// an empty result leaves the slot empty for a retry next tick. A held id
/// is resolved against the live world and checked with `is_valid`; if it
/// fails either step the slot is cleared and the call reports
/// [`Lookup::Invalidated`] without searching again.
pub fn acquire<W, S, V>(
    world: &W,
    slots: &mut TargetSlots,
    kind: TargetKind,
    search: S,
    is_valid: V,
) -> Lookup
where
    W: WorldQuery + ?Sized,
    S: FnOnce(&W) -> Option<ObjectId>,
    V: Fn(&WorldObject) -> bool,
{
    if slots.get(kind).is_none() {
        if let Some(id) = search(world) {
            tracing::trace!(?kind, %id, "acquired target");
            slots.set(kind, id);
        }
    }

    let Some(id) = slots.get(kind).cloned() else {
        return Lookup::NotFound;
    };

    match world.resolve(&id) {
        Some(object) if is_valid(&object) => Lookup::Found(object),
        _ => {
            tracing::trace!(?kind, %id, "dropped stale target");
            slots.clear(kind);
            Lookup::Invalidated(id)
        }
    }
}
