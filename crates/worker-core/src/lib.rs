//! Worker behavior engine for a tick-driven colony simulation.
//!
//! Each tick a scheduler hands the engine one worker, its durable memory
//! and a [`WorldQuery`] host. The engine decides between gathering energy
//! and spending it on the worker's goal, memoizes targets and paths in the
//! worker's memory, and acts on the world only through the host.
//!
//! [`sandbox`] provides an in-process host for running and testing the
//! engine without a game server.

pub mod actions;
pub mod config;
pub mod lifecycle;
pub mod machine;
pub mod movement;
pub mod role;
pub mod sandbox;
pub mod status;
pub mod targets;
pub mod worker;
pub mod world;

#[cfg(test)]
mod fixtures;

pub use actions::ActionContext;
pub use config::{Config, ConfigError, EngineConfig};
pub use machine::{DefaultGoalPolicy, GoalPolicy, RoundRobinPolicy, TickOutcome};
pub use role::{Role, WorkerRole};
pub use status::ActionStatus;
pub use worker::Worker;
pub use world::{HostError, HostResult, WorldObject, WorldQuery};
