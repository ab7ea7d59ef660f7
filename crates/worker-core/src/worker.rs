//! Worker Handle
//!
//! The ephemeral per-tick view of a worker, read fresh from the host.

use serde::{Deserialize, Serialize};
use worker_state::Position;

/// What the engine can see of a worker this tick.
///
/// Nothing here survives the tick; durable facts live in
/// [`worker_state::WorkerMemory`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    pub name: String,
    pub pos: Position,
    /// Ticks of movement cooldown left; the worker can only move at zero
    pub fatigue: u32,
    /// Energy currently carried
    pub energy: u32,
    pub carry_capacity: u32,
    /// Number of body parts
    pub body_size: u32,
    /// Ticks left to live; `None` while still spawning
    pub ticks_to_live: Option<u32>,
}

impl Worker {
    pub fn new(name: impl Into<String>, pos: Position) -> Self {
        Self {
            name: name.into(),
            pos,
            fatigue: 0,
            energy: 0,
            carry_capacity: 50,
            body_size: 3,
            ticks_to_live: Some(1_500),
        }
    }

    pub fn with_energy(mut self, energy: u32, carry_capacity: u32) -> Self {
        self.energy = energy;
        self.carry_capacity = carry_capacity;
        self
    }

    pub fn with_fatigue(mut self, fatigue: u32) -> Self {
        self.fatigue = fatigue;
        self
    }

    pub fn is_full(&self) -> bool {
        self.energy == self.carry_capacity
    }

    pub fn is_empty(&self) -> bool {
        self.energy == 0
    }

    pub fn can_move(&self) -> bool {
        self.fatigue == 0
    }

    /// Room the worker is standing in.
    pub fn room(&self) -> &str {
        &self.pos.room_name
    }
}
