//! Lifetime Bookkeeping
//!
//! Lowers the colony's worker head count shortly before a worker dies so a
//! replacement can be spawned in time.

use worker_state::WorkerMemory;

use crate::config::LifecycleConfig;
use crate::world::WorldQuery;
use crate::worker::Worker;

/// Decrements the role counter once the worker's remaining life drops to
/// `body_size * ttl_per_body_part`.
///
/// The latch in memory makes this exactly-once, even if the tick where the
/// threshold is crossed is skipped. Returns true when the counter was
/// decremented this call.
pub fn check_life<W: WorldQuery + ?Sized>(
    worker: &Worker,
    memory: &mut WorkerMemory,
    world: &mut W,
    config: &LifecycleConfig,
) -> bool {
    if memory.lifetime_counted {
        return false;
    }
    // Still spawning
    let Some(ttl) = worker.ticks_to_live else {
        return false;
    };
    if ttl > worker.body_size.saturating_mul(config.ttl_per_body_part) {
        return false;
    }

    let room = memory
        .room
        .clone()
        .unwrap_or_else(|| worker.room().to_string());
    world.decrement_role_count(&room, &config.role);
    memory.lifetime_counted = true;
    tracing::info!(worker = %worker.name, %room, ttl, "worker nearing end of life");
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::pos;
    use crate::sandbox::{SandboxWorld, WorkerSpec};

    fn worker_with_ttl(ttl: Option<u32>) -> Worker {
        let mut worker = Worker::new("w1", pos(5, 5));
        worker.body_size = 6;
        worker.ticks_to_live = ttl;
        worker
    }

    #[test]
    fn test_decrements_once_at_threshold() {
        let mut world = SandboxWorld::new();
        world.spawn_worker("w1", pos(5, 5), WorkerSpec::default());
        let before = world.role_count("W1N1", "Worker");
        let mut memory = WorkerMemory::for_room("W1N1");
        let config = LifecycleConfig::default();

        assert!(!check_life(&worker_with_ttl(Some(19)), &mut memory, &mut world, &config));
        assert!(check_life(&worker_with_ttl(Some(18)), &mut memory, &mut world, &config));
        assert!(!check_life(&worker_with_ttl(Some(17)), &mut memory, &mut world, &config));

        assert!(memory.lifetime_counted);
        assert_eq!(world.role_count("W1N1", "Worker"), before - 1);
    }

    #[test]
    fn test_skipped_threshold_tick_still_counts() {
        let mut world = SandboxWorld::new();
        let mut memory = WorkerMemory::new();

        assert!(check_life(
            &worker_with_ttl(Some(4)),
            &mut memory,
            &mut world,
            &LifecycleConfig::default()
        ));
    }

    #[test]
    fn test_spawning_worker_is_skipped() {
        let mut world = SandboxWorld::new();
        let mut memory = WorkerMemory::new();

        assert!(!check_life(&worker_with_ttl(None), &mut memory, &mut world, &LifecycleConfig::default()));
        assert!(!memory.lifetime_counted);
    }

    #[test]
    fn test_home_room_takes_precedence() {
        let mut world = SandboxWorld::new();
        let mut memory = WorkerMemory::for_room("W2N2");

        check_life(&worker_with_ttl(Some(1)), &mut memory, &mut world, &LifecycleConfig::default());

        assert_eq!(world.role_count("W2N2", "Worker"), -1);
        assert_eq!(world.role_count("W1N1", "Worker"), 0);
    }
}
