//! Durable Worker Memory
//!
//! Everything a worker remembers between ticks. No call stack survives a
//! tick boundary, so the engine re-derives its decisions from these fields
//! every time it runs.
//!
//! The serialized layout is flat, one record per worker:
//!
//! ```json
//! { "goal": "Build", "working": true, "target_build": "site_0004",
//!   "pathTarget": { "x": 20, "y": 14, "roomName": "W1N1" },
//!   "path": [ ... ], "pathStep": 3, "lifetimeCounterDecremented": false }
//! ```
//!
//! Unset fields are omitted and missing fields read back as unset.

use serde::{Deserialize, Serialize};

use crate::goal::Goal;
use crate::ids::ObjectId;
use crate::position::{positions_equal, Position, Step};

/// The action kinds that memoize a chosen target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    Fill,
    Pickup,
    Build,
    Repair,
    Reinforce,
    Harvest,
}

impl TargetKind {
    pub const ALL: [TargetKind; 6] = [
        TargetKind::Fill,
        TargetKind::Pickup,
        TargetKind::Build,
        TargetKind::Repair,
        TargetKind::Reinforce,
        TargetKind::Harvest,
    ];
}

/// One memoized target id per action kind.
///
/// A slot only says which object was chosen; it must be resolved and
/// re-validated before every use and cleared as soon as it fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetSlots {
    #[serde(rename = "target_fill", skip_serializing_if = "Option::is_none")]
    pub fill: Option<ObjectId>,
    #[serde(rename = "target_pickup", skip_serializing_if = "Option::is_none")]
    pub pickup: Option<ObjectId>,
    #[serde(rename = "target_build", skip_serializing_if = "Option::is_none")]
    pub build: Option<ObjectId>,
    #[serde(rename = "target_repair", skip_serializing_if = "Option::is_none")]
    pub repair: Option<ObjectId>,
    #[serde(rename = "target_reinforce", skip_serializing_if = "Option::is_none")]
    pub reinforce: Option<ObjectId>,
    #[serde(rename = "target_harvest", skip_serializing_if = "Option::is_none")]
    pub harvest: Option<ObjectId>,
}

impl TargetSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutable access to the slot for `kind`.
    pub fn slot_mut(&mut self, kind: TargetKind) -> &mut Option<ObjectId> {
        match kind {
            TargetKind::Fill => &mut self.fill,
            TargetKind::Pickup => &mut self.pickup,
            TargetKind::Build => &mut self.build,
            TargetKind::Repair => &mut self.repair,
            TargetKind::Reinforce => &mut self.reinforce,
            TargetKind::Harvest => &mut self.harvest,
        }
    }

    pub fn get(&self, kind: TargetKind) -> Option<&ObjectId> {
        match kind {
            TargetKind::Fill => self.fill.as_ref(),
            TargetKind::Pickup => self.pickup.as_ref(),
            TargetKind::Build => self.build.as_ref(),
            TargetKind::Repair => self.repair.as_ref(),
            TargetKind::Reinforce => self.reinforce.as_ref(),
            TargetKind::Harvest => self.harvest.as_ref(),
        }
    }

    pub fn set(&mut self, kind: TargetKind, id: ObjectId) {
        *self.slot_mut(kind) = Some(id);
    }

    /// Clears the slot, returning the id it held.
    pub fn clear(&mut self, kind: TargetKind) -> Option<ObjectId> {
        self.slot_mut(kind).take()
    }

    pub fn is_empty(&self) -> bool {
        TargetKind::ALL.iter().all(|kind| self.get(*kind).is_none())
    }
}

/// Memoized route toward one destination plus a cursor into it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathCache {
    /// Destination the cached path was computed for
    #[serde(rename = "pathTarget", skip_serializing_if = "Option::is_none")]
    pub target: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Step>>,
    /// Index of the next step to execute
    #[serde(rename = "pathStep", skip_serializing_if = "Option::is_none")]
    pub step: Option<usize>,
}

impl PathCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while the cache can keep driving a worker toward `destination`:
    /// the destination matches exactly and the cursor is still inside the path.
    pub fn is_valid_for(&self, destination: &Position) -> bool {
        if !positions_equal(self.target.as_ref(), Some(destination)) {
            return false;
        }
        match (&self.path, self.step) {
            (Some(path), Some(step)) => step < path.len(),
            _ => false,
        }
    }

    /// Replaces the cached route and rewinds the cursor.
    pub fn replan(&mut self, destination: Position, path: Option<Vec<Step>>) {
        self.target = Some(destination);
        self.path = path;
        self.step = Some(0);
    }

    /// The step under the cursor, if any.
    pub fn next_step(&self) -> Option<&Step> {
        let step = self.step?;
        self.path.as_ref()?.get(step)
    }

    /// Moves the cursor forward by one step.
    pub fn advance(&mut self) {
        self.step = Some(self.step.map_or(1, |s| s + 1));
    }

    /// Steps left before the path is exhausted.
    pub fn remaining(&self) -> usize {
        match (&self.path, self.step) {
            (Some(path), Some(step)) => path.len().saturating_sub(step),
            (Some(path), None) => path.len(),
            _ => 0,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// The complete durable record of one worker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerMemory {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<Goal>,
    /// Spending carried energy (true) or gathering it (false)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working: Option<bool>,
    #[serde(flatten)]
    pub targets: TargetSlots,
    #[serde(flatten)]
    pub path: PathCache,
    /// Home room whose role counter the lifetime bookkeeping decrements
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    /// Set once the home room's counter has been decremented for this worker
    #[serde(rename = "lifetimeCounterDecremented")]
    pub lifetime_counted: bool,
}

impl WorkerMemory {
    /// A fresh record: every field reads as unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh record bound to a home room.
    pub fn for_room(room: impl Into<String>) -> Self {
        Self {
            room: Some(room.into()),
            ..Self::default()
        }
    }

    /// Serializes the record in its persisted layout.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Reads a persisted record; missing fields come back unset.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Direction;

    fn sample_path() -> Vec<Step> {
        vec![
            Step::between((1, 1), (2, 2)).unwrap(),
            Step::between((2, 2), (3, 2)).unwrap(),
        ]
    }

    #[test]
    fn test_target_slots_are_independent() {
        let mut slots = TargetSlots::new();
        assert!(slots.is_empty());

        slots.set(TargetKind::Build, ObjectId::from("site_1"));
        slots.set(TargetKind::Harvest, ObjectId::from("source_1"));
        assert_eq!(slots.get(TargetKind::Build), Some(&ObjectId::from("site_1")));
        assert_eq!(slots.get(TargetKind::Fill), None);

        assert_eq!(slots.clear(TargetKind::Build), Some(ObjectId::from("site_1")));
        assert_eq!(slots.get(TargetKind::Build), None);
        assert!(!slots.is_empty());
    }

    #[test]
    fn test_path_cache_validity() {
        let dest = Position::new(3, 2, "W1N1");
        let mut cache = PathCache::new();
        assert!(!cache.is_valid_for(&dest));

        cache.replan(dest.clone(), Some(sample_path()));
        assert!(cache.is_valid_for(&dest));
        assert!(!cache.is_valid_for(&Position::new(3, 3, "W1N1")));

        cache.advance();
        assert!(cache.is_valid_for(&dest));
        assert_eq!(cache.next_step().map(|s| s.direction), Some(Direction::Right));

        cache.advance();
        assert_eq!(cache.remaining(), 0);
        assert!(!cache.is_valid_for(&dest));
    }

    #[test]
    fn test_path_cache_without_path_is_invalid() {
        let dest = Position::new(3, 2, "W1N1");
        let mut cache = PathCache::new();
        cache.replan(dest.clone(), None);
        assert!(!cache.is_valid_for(&dest));
        assert!(cache.next_step().is_none());
    }

    #[test]
    fn test_memory_persisted_layout() {
        let mut memory = WorkerMemory::for_room("W1N1");
        memory.goal = Some(Goal::Build);
        memory.working = Some(true);
        memory.targets.set(TargetKind::Build, ObjectId::from("site_7"));
        memory
            .path
            .replan(Position::new(3, 2, "W1N1"), Some(sample_path()));

        let json = memory.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["goal"], "Build");
        assert_eq!(value["working"], true);
        assert_eq!(value["target_build"], "site_7");
        assert_eq!(value["pathTarget"]["roomName"], "W1N1");
        assert_eq!(value["pathStep"], 0);
        assert_eq!(value["lifetimeCounterDecremented"], false);
        assert!(value.get("target_fill").is_none());

        let restored = WorkerMemory::from_json(&json).unwrap();
        assert_eq!(restored, memory);
    }

    #[test]
    fn test_missing_fields_read_as_unset() {
        let memory = WorkerMemory::from_json("{}").unwrap();
        assert_eq!(memory, WorkerMemory::new());
        assert!(memory.goal.is_none());
        assert!(memory.working.is_none());
        assert!(memory.targets.is_empty());
        assert!(memory.path.target.is_none());
    }
}
