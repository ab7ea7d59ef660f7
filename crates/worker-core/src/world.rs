//! World Query Capability
//!
//! The host-provided interface the engine drives workers through: spatial
//! search, id resolution, pathing, and the terminal world-mutating acts.
//! The engine never owns world state; every fact it acts on is read through
//! [`WorldQuery`] during the tick it is needed.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use worker_state::{Direction, ObjectId, Position, Step};

/// Resource types a worker can carry or find dropped on the ground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    #[default]
    Energy,
    Hydrogen,
}

/// Kinds of structure the engine distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureType {
    Spawn,
    Extension,
    Tower,
    Road,
    Container,
    Storage,
    Wall,
    Rampart,
}

impl StructureType {
    /// Structures a filler tops up with energy.
    pub fn is_fillable(self) -> bool {
        matches!(
            self,
            StructureType::Spawn | StructureType::Extension | StructureType::Tower
        )
    }

    /// Walls and ramparts are reinforced, never repaired.
    pub fn is_barrier(self) -> bool {
        matches!(self, StructureType::Wall | StructureType::Rampart)
    }

    /// Maximum hits of a freshly built structure.
    pub fn default_hits_max(self) -> u32 {
        match self {
            StructureType::Spawn => 5_000,
            StructureType::Extension => 1_000,
            StructureType::Tower => 3_000,
            StructureType::Road => 5_000,
            StructureType::Container => 250_000,
            StructureType::Storage => 10_000,
            StructureType::Wall => 300_000_000,
            StructureType::Rampart => 300_000_000,
        }
    }

    /// Energy capacity of a freshly built structure, if it stores energy.
    pub fn default_energy_capacity(self) -> Option<u32> {
        match self {
            StructureType::Spawn => Some(300),
            StructureType::Extension => Some(50),
            StructureType::Tower => Some(1_000),
            StructureType::Container => Some(2_000),
            StructureType::Storage => Some(1_000_000),
            _ => None,
        }
    }
}

/// Energy held by a structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergyStore {
    pub energy: u32,
    pub capacity: u32,
}

impl EnergyStore {
    pub fn new(energy: u32, capacity: u32) -> Self {
        Self { energy, capacity }
    }

    pub fn free_capacity(&self) -> u32 {
        self.capacity.saturating_sub(self.energy)
    }
}

/// A built structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureInfo {
    pub structure_type: StructureType,
    pub hits: u32,
    pub hits_max: u32,
    /// Owned by the worker's colony
    pub my: bool,
    pub store: Option<EnergyStore>,
}

/// A room controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerInfo {
    pub level: u8,
    pub progress: u64,
    pub progress_total: u64,
    pub my: bool,
}

/// What a live object is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ObjectKind {
    Structure(StructureInfo),
    Controller(ControllerInfo),
    Source {
        energy: u32,
        energy_capacity: u32,
    },
    Resource {
        resource: ResourceType,
        amount: u32,
    },
    ConstructionSite {
        structure_type: StructureType,
        progress: u32,
        progress_total: u32,
    },
    Creep {
        name: String,
        my: bool,
        hits: u32,
        hits_max: u32,
    },
}

/// A snapshot of a live object, valid for the tick it was resolved in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldObject {
    pub id: ObjectId,
    pub pos: Position,
    pub kind: ObjectKind,
}

impl WorldObject {
    pub fn new(id: impl Into<ObjectId>, pos: Position, kind: ObjectKind) -> Self {
        Self {
            id: id.into(),
            pos,
            kind,
        }
    }

    pub fn structure(&self) -> Option<&StructureInfo> {
        match &self.kind {
            ObjectKind::Structure(info) => Some(info),
            _ => None,
        }
    }

    pub fn structure_type(&self) -> Option<StructureType> {
        self.structure().map(|s| s.structure_type)
    }

    /// `(hits, hits_max)` for structures and creeps.
    pub fn hits(&self) -> Option<(u32, u32)> {
        match &self.kind {
            ObjectKind::Structure(info) => Some((info.hits, info.hits_max)),
            ObjectKind::Creep { hits, hits_max, .. } => Some((*hits, *hits_max)),
            _ => None,
        }
    }

    /// Free capacity for `resource`; zero for objects that cannot hold it.
    pub fn free_capacity(&self, resource: ResourceType) -> u32 {
        if resource != ResourceType::Energy {
            return 0;
        }
        self.structure()
            .and_then(|s| s.store)
            .map_or(0, |store| store.free_capacity())
    }

    /// Energy left in a source.
    pub fn source_energy(&self) -> Option<u32> {
        match &self.kind {
            ObjectKind::Source { energy, .. } => Some(*energy),
            _ => None,
        }
    }

    pub fn controller_level(&self) -> Option<u8> {
        match &self.kind {
            ObjectKind::Controller(info) => Some(info.level),
            _ => None,
        }
    }

    pub fn dropped_resource(&self) -> Option<ResourceType> {
        match &self.kind {
            ObjectKind::Resource { resource, .. } => Some(*resource),
            _ => None,
        }
    }
}

/// The object classes a nearest-object search ranges over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FindClass {
    /// Structures owned by the colony
    MyStructures,
    /// All structures regardless of owner
    Structures,
    DroppedResources,
    /// Sources with energy left
    ActiveSources,
    ConstructionSites,
}

impl FindClass {
    /// Whether `object` belongs to this class.
    pub fn admits(self, object: &WorldObject) -> bool {
        match (self, &object.kind) {
            (FindClass::MyStructures, ObjectKind::Structure(info)) => info.my,
            (FindClass::Structures, ObjectKind::Structure(_)) => true,
            (FindClass::DroppedResources, ObjectKind::Resource { .. }) => true,
            (FindClass::ActiveSources, ObjectKind::Source { energy, .. }) => *energy > 0,
            (FindClass::ConstructionSites, ObjectKind::ConstructionSite { .. }) => true,
            _ => false,
        }
    }
}

/// How "nearest" is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// Walking distance; unreachable candidates are skipped
    ByPath,
    /// Straight-line tile distance, ignoring terrain
    ByRange,
}

/// Options for a full path computation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathOptions {
    /// Plan through tiles currently occupied by creeps
    pub ignore_creeps: bool,
}

/// Options for the host's own one-shot move toward a position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOptions {
    /// Ticks the host may reuse its internal path; 0 replans every call
    pub reuse_path: u32,
    pub visualize_path: bool,
}

impl Default for MoveOptions {
    fn default() -> Self {
        Self {
            reuse_path: 5,
            visualize_path: false,
        }
    }
}

/// Why the host refused a terminal act.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("target is not in range")]
    NotInRange,

    #[error("worker is fatigued")]
    Tired,

    #[error("target is not valid for this action")]
    InvalidTarget,

    #[error("not enough resources")]
    NotEnoughResources,

    #[error("target is full")]
    Full,

    #[error("no path to destination")]
    NoPath,

    #[error("destination tile is blocked")]
    Blocked,

    #[error("unknown worker: {0}")]
    UnknownWorker(String),
}

pub type HostResult = Result<(), HostError>;

/// Everything the engine needs from the host environment.
///
/// Search and resolution are read-only. Path computation takes `&mut self`
/// so hosts can meter it; it is the most expensive call available.
pub trait WorldQuery {
    /// Nearest object of `class` passing `filter`, measured from `origin`.
    fn find_nearest(
        &self,
        origin: &Position,
        class: FindClass,
        filter: &dyn Fn(&WorldObject) -> bool,
        metric: Metric,
    ) -> Option<ObjectId>;

    /// The live object behind `id`, or `None` if it no longer exists.
    fn resolve(&self, id: &ObjectId) -> Option<WorldObject>;

    /// The controller of `room`, if the room has one.
    fn controller(&self, room: &str) -> Option<WorldObject>;

    /// A full path from `origin` to `destination`.
    fn compute_path(
        &mut self,
        origin: &Position,
        destination: &Position,
        options: &PathOptions,
    ) -> Option<Vec<Step>>;

    fn is_adjacent(&self, a: &Position, b: &Position) -> bool {
        a.is_near_to(b)
    }

    fn is_within_range(&self, a: &Position, b: &Position, range: u32) -> bool {
        a.in_range_to(b, range)
    }

    fn transfer(&mut self, worker: &str, target: &ObjectId, resource: ResourceType) -> HostResult;

    fn pickup(&mut self, worker: &str, target: &ObjectId) -> HostResult;

    fn harvest(&mut self, worker: &str, source: &ObjectId) -> HostResult;

    fn upgrade_controller(&mut self, worker: &str, controller: &ObjectId) -> HostResult;

    fn build(&mut self, worker: &str, site: &ObjectId) -> HostResult;

    fn repair(&mut self, worker: &str, target: &ObjectId) -> HostResult;

    fn attack(&mut self, worker: &str, victim: &ObjectId) -> HostResult;

    /// Moves one tile in `direction`.
    fn move_step(&mut self, worker: &str, direction: Direction) -> HostResult;

    /// The host's own pathing move, used where responsiveness beats reuse.
    fn move_to(&mut self, worker: &str, destination: &Position, options: &MoveOptions)
        -> HostResult;

    /// Shows a short status marker above the worker.
    fn say(&mut self, worker: &str, message: &str, public: bool);

    /// Lowers the colony's head count for `role` in `room`.
    fn decrement_role_count(&mut self, room: &str, role: &str);
}
