//! Durable worker state and the shared world vocabulary.
//!
//! This crate contains pure data structures with no behavior logic.
//! It is a dependency for the engine crate and for any host that persists
//! worker memory between ticks.

pub mod goal;
pub mod ids;
pub mod memory;
pub mod position;

// Re-export goal types
pub use goal::{Goal, ParseGoalError};

// Re-export identifier types
pub use ids::ObjectId;

// Re-export durable memory types
pub use memory::{PathCache, TargetKind, TargetSlots, WorkerMemory};

// Re-export position types
pub use position::{positions_equal, Direction, InvalidDirection, Position, Step, ROOM_SIZE};
