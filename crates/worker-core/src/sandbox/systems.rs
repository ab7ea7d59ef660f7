//! Sandbox Upkeep Systems
//!
//! Per-tick world maintenance that happens regardless of what workers do.

use bevy_ecs::prelude::*;

use super::components::{Body, Regenerates, SandboxClock, WorkerState};
use crate::world::ObjectKind;

/// Constants for world upkeep
pub mod upkeep_constants {
    /// Fatigue removed from every worker each tick
    pub const FATIGUE_RECOVERY: u32 = 2;
    /// Ticks between source refills
    pub const SOURCE_REGEN_TICKS: u32 = 300;
    /// Dropped piles lose ceil(amount / this) each tick
    pub const DECAY_DIVISOR: u32 = 1_000;
}

use upkeep_constants::*;

/// System: Recover worker fatigue
pub fn recover_fatigue(mut workers: Query<&mut WorkerState>) {
    for mut worker in &mut workers {
        worker.fatigue = worker.fatigue.saturating_sub(FATIGUE_RECOVERY);
    }
}

/// System: Age workers and despawn the ones that ran out of life
pub fn age_workers(mut commands: Commands, mut workers: Query<(Entity, &mut WorkerState)>) {
    for (entity, mut worker) in &mut workers {
        let Some(ttl) = worker.ticks_to_live else {
            continue;
        };
        let ttl = ttl.saturating_sub(1);
        worker.ticks_to_live = Some(ttl);
        if ttl == 0 {
            tracing::info!(worker = %worker.name, "worker expired");
            commands.entity(entity).despawn();
        }
    }
}

/// System: Refill sources on their regeneration cycle
pub fn regenerate_sources(mut sources: Query<(&mut Body, &mut Regenerates)>) {
    for (mut body, mut regen) in &mut sources {
        regen.countdown = regen.countdown.saturating_sub(1);
        if regen.countdown > 0 {
            continue;
        }
        regen.countdown = regen.interval;
        if let ObjectKind::Source {
            energy,
            energy_capacity,
        } = &mut body.0
        {
            *energy = *energy_capacity;
        }
    }
}

/// System: Shrink dropped resource piles, removing empty ones
pub fn decay_dropped(mut commands: Commands, mut piles: Query<(Entity, &mut Body)>) {
    for (entity, mut body) in &mut piles {
        let ObjectKind::Resource { amount, .. } = &mut body.0 else {
            continue;
        };
        *amount = amount.saturating_sub(amount.div_ceil(DECAY_DIVISOR));
        if *amount == 0 {
            commands.entity(entity).despawn();
        }
    }
}

/// System: Advance the game clock
pub fn tick_clock(mut clock: ResMut<SandboxClock>) {
    clock.tick += 1;
}

/// Builds the upkeep schedule, run once per [`super::SandboxWorld::advance`].
pub fn upkeep_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            recover_fatigue,
            age_workers,
            regenerate_sources,
            decay_dropped,
            tick_clock,
        )
            .chain(),
    );
    schedule
}
