//! Sandbox Setup
//!
//! Seeded generation of a starter room: controller, sources, a spawn with
//! extensions and towers, pending construction, worn barriers and roads,
//! dropped energy, scattered terrain, and the worker creeps themselves.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use worker_state::Position;

use super::SandboxWorld;
use crate::actions::reinforce_threshold;
use crate::config::{RoomConfig, SandboxConfig, WorkerConfig};
use crate::world::{ResourceType, StructureType};

/// Tries before giving up on finding a free tile
const PLACEMENT_ATTEMPTS: usize = 10_000;

/// Energy in a freshly generated source
const SOURCE_ENERGY: u32 = 3_000;

/// Body of a worker creep to spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerSpec {
    pub body_size: u32,
    pub work_parts: u32,
    pub carry_capacity: u32,
    pub energy: u32,
    pub ticks_to_live: Option<u32>,
    pub move_fatigue: u32,
}

impl Default for WorkerSpec {
    fn default() -> Self {
        Self {
            body_size: 6,
            work_parts: 2,
            carry_capacity: 100,
            energy: 0,
            ticks_to_live: Some(1_500),
            move_fatigue: 0,
        }
    }
}

impl WorkerSpec {
    pub fn from_config(config: &WorkerConfig) -> Self {
        Self {
            body_size: config.body_size,
            work_parts: config.work_parts,
            carry_capacity: config.carry_capacity,
            energy: 0,
            ticks_to_live: Some(config.ticks_to_live),
            move_fatigue: config.move_fatigue,
        }
    }

    /// Starts loaded with `energy`, growing capacity to fit if needed.
    pub fn with_energy(mut self, energy: u32) -> Self {
        self.energy = energy;
        self.carry_capacity = self.carry_capacity.max(energy);
        self
    }

    pub fn with_ttl(mut self, ticks_to_live: u32) -> Self {
        self.ticks_to_live = Some(ticks_to_live);
        self
    }

    pub fn with_move_fatigue(mut self, move_fatigue: u32) -> Self {
        self.move_fatigue = move_fatigue;
        self
    }
}

/// Errors that can occur while generating a sandbox room.
#[derive(Debug, Error)]
pub enum SandboxError {
    #[error("invalid sandbox configuration: {0}")]
    InvalidConfig(String),

    #[error("room {room} has no free tile left for {what}")]
    RoomFull { room: String, what: &'static str },
}

impl SandboxConfig {
    /// Rejects layouts the sandbox cannot generate.
    pub fn validate(&self) -> Result<(), SandboxError> {
        let room = &self.room;
        let workers = &self.workers;
        if room.name.is_empty() {
            return Err(SandboxError::InvalidConfig("room name is empty".into()));
        }
        if room.controller_level == 0 || room.controller_level > 8 {
            return Err(SandboxError::InvalidConfig(format!(
                "controller level {} is outside 1..=8",
                room.controller_level
            )));
        }
        if workers.work_parts == 0 || workers.work_parts > workers.body_size {
            return Err(SandboxError::InvalidConfig(format!(
                "{} WORK parts do not fit a {}-part body",
                workers.work_parts, workers.body_size
            )));
        }
        if workers.carry_capacity == 0 {
            return Err(SandboxError::InvalidConfig("workers cannot carry anything".into()));
        }
        Ok(())
    }
}

impl SandboxWorld {
    /// Generates a starter room from `config`, seeded by `seed`.
    ///
    /// The same seed and config always produce the same room.
    pub fn generate(config: &SandboxConfig, seed: u64) -> Result<Self, SandboxError> {
        config.validate()?;
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut world = SandboxWorld::new();
        let room = &config.room;

        world.scatter_terrain(room, &mut rng);

        let controller = world.free_tile(room, &mut rng, "controller")?;
        world.spawn_controller(controller, room.controller_level);

        for _ in 0..room.sources {
            let pos = world.free_tile(room, &mut rng, "source")?;
            world.spawn_source(pos, SOURCE_ENERGY);
        }

        let spawn = world.free_tile(room, &mut rng, "spawn")?;
        world.spawn_structure(spawn, StructureType::Spawn, true);
        for _ in 0..room.extensions {
            let pos = world.free_tile(room, &mut rng, "extension")?;
            world.spawn_structure(pos, StructureType::Extension, true);
        }
        for _ in 0..room.towers {
            let pos = world.free_tile(room, &mut rng, "tower")?;
            world.spawn_structure(pos, StructureType::Tower, true);
        }

        const SITE_TYPES: [(StructureType, u32); 3] = [
            (StructureType::Road, 300),
            (StructureType::Extension, 3_000),
            (StructureType::Container, 5_000),
        ];
        for i in 0..room.construction_sites {
            let (structure_type, total) = SITE_TYPES[i % SITE_TYPES.len()];
            let pos = world.free_tile(room, &mut rng, "construction site")?;
            world.spawn_site(pos, structure_type, total);
        }

        let threshold = reinforce_threshold(room.controller_level).min(u64::from(u32::MAX)) as u32;
        for i in 0..room.barriers {
            let structure_type = if i % 2 == 0 {
                StructureType::Wall
            } else {
                StructureType::Rampart
            };
            let pos = world.free_tile(room, &mut rng, "barrier")?;
            let id = world.spawn_structure(pos, structure_type, true);
            world.set_hits(&id, rng.gen_range(1..=threshold.max(1)));
        }

        for _ in 0..room.damaged_roads {
            let pos = world.free_tile(room, &mut rng, "road")?;
            let id = world.spawn_structure(pos, StructureType::Road, true);
            world.set_hits(&id, rng.gen_range(500..4_500));
        }

        for _ in 0..room.dropped_piles {
            let pos = world.free_tile(room, &mut rng, "dropped energy")?;
            world.spawn_dropped(pos, ResourceType::Energy, rng.gen_range(20..200));
        }

        let spec = WorkerSpec::from_config(&config.workers);
        for i in 0..config.workers.count {
            let pos = world.free_tile(room, &mut rng, "worker")?;
            world.spawn_worker(&format!("worker_{:02}", i + 1), pos, spec.clone());
        }

        tracing::info!(
            room = %room.name,
            seed,
            objects = world.objects().len(),
            walls = world.terrain_walls(),
            "generated sandbox room"
        );
        Ok(world)
    }

    fn scatter_terrain(&mut self, room: &RoomConfig, rng: &mut SmallRng) {
        for _ in 0..room.terrain_walls {
            let pos = random_tile(room, rng);
            self.set_wall(&pos);
        }
    }

    /// A random tile away from the edge with no wall and no object on it.
    fn free_tile(
        &self,
        room: &RoomConfig,
        rng: &mut SmallRng,
        what: &'static str,
    ) -> Result<Position, SandboxError> {
        (0..PLACEMENT_ATTEMPTS)
            .map(|_| random_tile(room, rng))
            .find(|pos| !self.is_wall(pos) && !self.is_occupied(pos))
            .ok_or_else(|| SandboxError::RoomFull {
                room: room.name.clone(),
                what,
            })
    }
}

fn random_tile(room: &RoomConfig, rng: &mut SmallRng) -> Position {
    let edge = worker_state::ROOM_SIZE - 2;
    Position::new(rng.gen_range(2..edge), rng.gen_range(2..edge), room.name.as_str())
}
