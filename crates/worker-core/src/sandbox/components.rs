//! Sandbox Components
//!
//! Entity components and world resources backing the sandbox host.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use worker_state::{ObjectId, Position};

use crate::world::{ObjectKind, WorldObject};

/// Component: the stable id the engine refers to an object by
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Identity(pub ObjectId);

/// Component: where the object stands
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Placement(pub Position);

/// Component: what the object is, as the engine sees it
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Body(pub ObjectKind);

/// Component: a worker creep's private state
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct WorkerState {
    pub name: String,
    pub fatigue: u32,
    pub body_size: u32,
    pub work_parts: u32,
    pub energy: u32,
    pub capacity: u32,
    pub ticks_to_live: Option<u32>,
    /// Fatigue gained per tile moved
    pub move_fatigue: u32,
}

impl WorkerState {
    pub fn free_capacity(&self) -> u32 {
        self.capacity.saturating_sub(self.energy)
    }
}

/// Component: a source that refills on a fixed cycle
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Regenerates {
    pub interval: u32,
    pub countdown: u32,
}

impl Regenerates {
    pub fn every(interval: u32) -> Self {
        Self {
            interval,
            countdown: interval,
        }
    }
}

/// Resource: the sandbox game clock
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct SandboxClock {
    pub tick: u64,
}

/// Resource: impassable terrain tiles per room
#[derive(Resource, Debug, Clone, Default)]
pub struct Terrain {
    walls: HashMap<String, HashSet<(i32, i32)>>,
}

impl Terrain {
    pub fn set_wall(&mut self, pos: &Position) {
        self.walls
            .entry(pos.room_name.clone())
            .or_default()
            .insert((pos.x, pos.y));
    }

    pub fn is_wall(&self, pos: &Position) -> bool {
        self.walls
            .get(&pos.room_name)
            .is_some_and(|tiles| tiles.contains(&(pos.x, pos.y)))
    }

    /// Wall tiles of `room`.
    pub fn walls_in(&self, room: &str) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.walls.get(room).into_iter().flatten().copied()
    }

    pub fn wall_count(&self) -> usize {
        self.walls.values().map(HashSet::len).sum()
    }
}

/// Resource: call counters, for checking how hard the engine leans on the host
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SandboxStats {
    /// Full path computations requested through `compute_path`
    pub path_computations: u64,
    /// Successful one-tile steps
    pub moves: u64,
    /// Calls to the host's own pathing move
    pub direct_moves: u64,
}

/// One `say` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speech {
    pub tick: u64,
    pub worker: String,
    pub message: String,
    pub public: bool,
}

/// Resource: everything workers have said
#[derive(Resource, Debug, Clone, Default)]
pub struct SpeechLog(pub Vec<Speech>);

/// Resource: colony head counts per (room, role)
#[derive(Resource, Debug, Clone, Default)]
pub struct RoleCounts(pub BTreeMap<(String, String), i64>);

impl RoleCounts {
    pub fn get(&self, room: &str, role: &str) -> i64 {
        self.0
            .get(&(room.to_string(), role.to_string()))
            .copied()
            .unwrap_or(0)
    }

    pub fn adjust(&mut self, room: &str, role: &str, delta: i64) {
        *self
            .0
            .entry((room.to_string(), role.to_string()))
            .or_insert(0) += delta;
    }
}

/// Assembles the engine-facing snapshot of an object.
pub fn snapshot(identity: &Identity, placement: &Placement, body: &Body) -> WorldObject {
    WorldObject::new(identity.0.clone(), placement.0.clone(), body.0.clone())
}
