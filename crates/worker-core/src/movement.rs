//! Movement Optimizer
//!
//! Moves a worker one tile per tick along a memoized path. Full path
//! computation is the most expensive call a worker can make, so a route is
//! reused until the destination changes or the cursor runs off its end.
//!
//! Not suitable where a worker must react within the tick (combat); those
//! callers use [`direct_move`] instead.

use worker_state::{Direction, PathCache, Position};

use crate::config::MeleeConfig;
use crate::world::{HostResult, MoveOptions, PathOptions, WorldQuery};
use crate::worker::Worker;

/// What one call to [`optimized_move`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Fatigue blocked movement; nothing was touched.
    Fatigued,
    /// A step was issued and the cursor advanced.
    Stepped(Direction),
    /// No usable path to the destination exists right now.
    NoPath,
}

/// Advances `worker` one step toward `destination` using the path cache.
///
/// Replans when the cached destination differs from `destination`, when no
/// path is cached, or when the cursor has reached the end of the path. The
/// cursor advances once per issued step whether or not the host managed to
/// move the worker.
pub fn optimized_move<W>(
    world: &mut W,
    worker: &Worker,
    cache: &mut PathCache,
    destination: &Position,
) -> MoveOutcome
where
    W: WorldQuery + ?Sized,
{
    if !worker.can_move() {
        return MoveOutcome::Fatigued;
    }

    if !cache.is_valid_for(destination) {
        let options = PathOptions {
            ignore_creeps: false,
        };
        let path = world.compute_path(&worker.pos, destination, &options);
        tracing::trace!(
            worker = %worker.name,
            %destination,
            steps = path.as_ref().map_or(0, Vec::len),
            "replanned path"
        );
        cache.replan(destination.clone(), path);
    }

    let Some(direction) = cache.next_step().map(|step| step.direction) else {
        return MoveOutcome::NoPath;
    };

    if let Err(e) = world.move_step(&worker.name, direction) {
        tracing::debug!(worker = %worker.name, ?direction, "move refused: {}", e);
    }
    cache.advance();
    MoveOutcome::Stepped(direction)
}

/// Moves through the host's own pathing with combat settings, bypassing the cache.
pub fn direct_move<W>(
    world: &mut W,
    worker: &Worker,
    destination: &Position,
    config: &MeleeConfig,
) -> HostResult
where
    W: WorldQuery + ?Sized,
{
    let options = MoveOptions {
        reuse_path: config.reuse_path,
        visualize_path: config.visualize_path,
    };
    world.move_to(&worker.name, destination, &options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sandbox::{SandboxWorld, WorkerSpec};

    fn pos(x: i32, y: i32) -> Position {
        Position::new(x, y, "W1N1")
    }

    fn setup() -> SandboxWorld {
        let mut world = SandboxWorld::new();
        world.spawn_worker("w1", pos(10, 10), WorkerSpec::default());
        world
    }

    #[test]
    fn test_path_reuse_skips_recomputation() {
        let mut world = setup();
        let mut cache = PathCache::new();
        let dest = pos(20, 10);

        let worker = world.worker("w1").unwrap();
        assert!(matches!(
            optimized_move(&mut world, &worker, &mut cache, &dest),
            MoveOutcome::Stepped(_)
        ));
        assert_eq!(world.stats().path_computations, 1);
        assert_eq!(cache.step, Some(1));

        let worker = world.worker("w1").unwrap();
        optimized_move(&mut world, &worker, &mut cache, &dest);
        let worker = world.worker("w1").unwrap();
        optimized_move(&mut world, &worker, &mut cache, &dest);

        assert_eq!(world.stats().path_computations, 1);
        assert_eq!(cache.step, Some(3));
        // Every shortest route to x=20 gains one column per step
        assert_eq!(world.worker("w1").unwrap().pos.x, 13);
    }

    #[test]
    fn test_new_destination_forces_one_replan() {
        let mut world = setup();
        let mut cache = PathCache::new();

        let worker = world.worker("w1").unwrap();
        optimized_move(&mut world, &worker, &mut cache, &pos(20, 10));
        let worker = world.worker("w1").unwrap();
        optimized_move(&mut world, &worker, &mut cache, &pos(20, 10));
        assert_eq!(cache.step, Some(2));
        assert_eq!(world.stats().path_computations, 1);

        let worker = world.worker("w1").unwrap();
        let outcome = optimized_move(&mut world, &worker, &mut cache, &pos(12, 20));

        assert_eq!(world.stats().path_computations, 2);
        assert_eq!(cache.target, Some(pos(12, 20)));
        // Rewound to zero, then the first step of the new route executed
        assert_eq!(cache.step, Some(1));
        let first = cache.path.as_ref().unwrap()[0].direction;
        assert_eq!(outcome, MoveOutcome::Stepped(first));
    }

    #[test]
    fn test_exhausted_path_is_replanned() {
        let mut world = setup();
        let mut cache = PathCache::new();
        let dest = pos(12, 10);

        for _ in 0..2 {
            let worker = world.worker("w1").unwrap();
            optimized_move(&mut world, &worker, &mut cache, &dest);
        }
        assert_eq!(cache.remaining(), 0);
        assert_eq!(world.stats().path_computations, 1);

        let worker = world.worker("w1").unwrap();
        optimized_move(&mut world, &worker, &mut cache, &dest);
        assert_eq!(world.stats().path_computations, 2);
    }

    #[test]
    fn test_fatigue_skips_everything() {
        let mut world = setup();
        let mut cache = PathCache::new();

        let worker = world.worker("w1").unwrap().with_fatigue(2);
        let outcome = optimized_move(&mut world, &worker, &mut cache, &pos(20, 10));

        assert_eq!(outcome, MoveOutcome::Fatigued);
        assert_eq!(world.stats().path_computations, 0);
        assert_eq!(cache, PathCache::new());
    }

    #[test]
    fn test_unreachable_destination_reports_no_path() {
        let mut world = setup();
        let mut cache = PathCache::new();

        let worker = world.worker("w1").unwrap();
        let outcome = optimized_move(&mut world, &worker, &mut cache, &Position::new(5, 5, "W9N9"));

        assert_eq!(outcome, MoveOutcome::NoPath);
        assert_eq!(cache.step, Some(0));
        assert_eq!(world.worker("w1").unwrap().pos, pos(10, 10));
    }

    #[test]
    fn test_direct_move_bypasses_cache() {
        let mut world = setup();
        let worker = world.worker("w1").unwrap();

        direct_move(&mut world, &worker, &pos(15, 10), &MeleeConfig::default()).unwrap();

        assert_eq!(world.stats().direct_moves, 1);
        assert_eq!(world.stats().path_computations, 0);
        assert_eq!(world.worker("w1").unwrap().pos.x, 11);
    }
}
