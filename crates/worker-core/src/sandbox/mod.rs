//! Sandbox Host
//!
//! An in-process stand-in for the game server. Objects live as entities in
//! a `bevy_ecs` world; the engine talks to it only through [`WorldQuery`].
//! Terminal acts follow the game's rules in simplified form, and world
//! upkeep runs as a system schedule once per [`SandboxWorld::advance`].

pub mod components;
pub mod pathing;
pub mod setup;
pub mod store;
pub mod systems;

pub use components::{SandboxStats, Speech};
pub use setup::{SandboxError, WorkerSpec};
pub use store::{DurableStore, StoreError};

use bevy_ecs::prelude::*;
use std::collections::BTreeMap;
use worker_state::{Direction, ObjectId, Position, Step};

use crate::world::{
    ControllerInfo, EnergyStore, FindClass, HostError, HostResult, Metric, MoveOptions,
    ObjectKind, PathOptions, ResourceType, StructureInfo, StructureType, WorldObject, WorldQuery,
};
use crate::worker::Worker;
use components::{
    snapshot, Body, Identity, Placement, Regenerates, RoleCounts, SandboxClock, SpeechLog,
    Terrain, WorkerState,
};
use pathing::{find_path, DistanceField, Obstacles};
use systems::upkeep_constants::SOURCE_REGEN_TICKS;

/// Game rule constants for terminal acts
pub mod rules {
    pub const HARVEST_POWER: u32 = 2;
    pub const BUILD_POWER: u32 = 5;
    pub const REPAIR_POWER: u32 = 100;
    pub const UPGRADE_POWER: u32 = 1;
    pub const ATTACK_POWER: u32 = 30;
    /// Range of upgrade, build and repair
    pub const WORK_RANGE: u32 = 3;
    /// Hit points per body part
    pub const HITS_PER_PART: u32 = 100;
    pub const MAX_CONTROLLER_LEVEL: u8 = 8;
}

use rules::*;

/// Role every sandbox worker is counted under.
pub const WORKER_ROLE: &str = "Worker";

/// Progress needed to leave controller `level`.
pub fn controller_progress_total(level: u8) -> u64 {
    match level {
        0 | 1 => 200,
        2 => 45_000,
        3 => 135_000,
        4 => 405_000,
        5 => 1_215_000,
        6 => 3_645_000,
        7 => 10_935_000,
        _ => 0,
    }
}

/// The sandbox world.
pub struct SandboxWorld {
    world: World,
    upkeep: Schedule,
    /// Live objects by id; ordered so ties resolve by id
    index: BTreeMap<ObjectId, Entity>,
    workers: BTreeMap<String, Entity>,
    next_serial: u64,
}

impl Default for SandboxWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl SandboxWorld {
    /// An empty world at tick 0.
    pub fn new() -> Self {
        let mut world = World::new();
        world.insert_resource(SandboxClock::default());
        world.insert_resource(Terrain::default());
        world.insert_resource(SandboxStats::default());
        world.insert_resource(SpeechLog::default());
        world.insert_resource(RoleCounts::default());

        Self {
            world,
            upkeep: systems::upkeep_schedule(),
            index: BTreeMap::new(),
            workers: BTreeMap::new(),
            next_serial: 0,
        }
    }

    fn next_id(&mut self, prefix: &str) -> ObjectId {
        self.next_serial += 1;
        ObjectId(format!("{}_{:04}", prefix, self.next_serial))
    }

    fn insert(&mut self, id: ObjectId, pos: Position, kind: ObjectKind) -> Entity {
        let entity = self
            .world
            .spawn((Identity(id.clone()), Placement(pos), Body(kind)))
            .id();
        self.index.insert(id, entity);
        entity
    }

    // === Population ===

    /// Spawns a structure at full hits with an empty store.
    pub fn spawn_structure(&mut self, pos: Position, structure_type: StructureType, my: bool) -> ObjectId {
        let id = self.next_id(&format!("{:?}", structure_type).to_lowercase());
        let hits_max = structure_type.default_hits_max();
        let info = StructureInfo {
            structure_type,
            hits: hits_max,
            hits_max,
            my,
            store: structure_type
                .default_energy_capacity()
                .map(|capacity| EnergyStore::new(0, capacity)),
        };
        self.insert(id.clone(), pos, ObjectKind::Structure(info));
        id
    }

    /// Spawns a full source that refills on the standard cycle.
    pub fn spawn_source(&mut self, pos: Position, energy: u32) -> ObjectId {
        let id = self.next_id("source");
        let entity = self.insert(
            id.clone(),
            pos,
            ObjectKind::Source {
                energy,
                energy_capacity: energy,
            },
        );
        self.world
            .entity_mut(entity)
            .insert(Regenerates::every(SOURCE_REGEN_TICKS));
        id
    }

    pub fn spawn_dropped(&mut self, pos: Position, resource: ResourceType, amount: u32) -> ObjectId {
        let id = self.next_id("pile");
        self.insert(id.clone(), pos, ObjectKind::Resource { resource, amount });
        id
    }

    pub fn spawn_site(&mut self, pos: Position, structure_type: StructureType, progress_total: u32) -> ObjectId {
        let id = self.next_id("site");
        self.insert(
            id.clone(),
            pos,
            ObjectKind::ConstructionSite {
                structure_type,
                progress: 0,
                progress_total,
            },
        );
        id
    }

    /// Spawns an owned controller at `level` with no progress.
    pub fn spawn_controller(&mut self, pos: Position, level: u8) -> ObjectId {
        let id = self.next_id("controller");
        let info = ControllerInfo {
            level,
            progress: 0,
            progress_total: controller_progress_total(level),
            my: true,
        };
        self.insert(id.clone(), pos, ObjectKind::Controller(info));
        id
    }

    /// Spawns a hostile creep with `hits` hit points.
    pub fn spawn_hostile(&mut self, pos: Position, hits: u32) -> ObjectId {
        let id = self.next_id("hostile");
        let name = id.to_string();
        self.insert(
            id.clone(),
            pos,
            ObjectKind::Creep {
                name,
                my: false,
                hits,
                hits_max: hits,
            },
        );
        id
    }

    /// Spawns a worker creep and counts it toward its room's head count.
    /// The worker's object id is its name.
    pub fn spawn_worker(&mut self, name: &str, pos: Position, spec: WorkerSpec) -> ObjectId {
        let id = ObjectId::new(name);
        let hits = spec.body_size * HITS_PER_PART;
        let room = pos.room_name.clone();
        let entity = self.insert(
            id.clone(),
            pos,
            ObjectKind::Creep {
                name: name.to_string(),
                my: true,
                hits,
                hits_max: hits,
            },
        );
        self.world.entity_mut(entity).insert(WorkerState {
            name: name.to_string(),
            fatigue: 0,
            body_size: spec.body_size,
            work_parts: spec.work_parts,
            energy: spec.energy.min(spec.carry_capacity),
            capacity: spec.carry_capacity,
            ticks_to_live: spec.ticks_to_live,
            move_fatigue: spec.move_fatigue,
        });
        self.workers.insert(name.to_string(), entity);
        self.world
            .resource_mut::<RoleCounts>()
            .adjust(&room, WORKER_ROLE, 1);
        id
    }

    /// Marks a tile as impassable terrain.
    pub fn set_wall(&mut self, pos: &Position) {
        self.world.resource_mut::<Terrain>().set_wall(pos);
    }

    pub fn is_wall(&self, pos: &Position) -> bool {
        self.world.resource::<Terrain>().is_wall(pos)
    }

    /// Whether any object stands on `pos`.
    pub fn is_occupied(&self, pos: &Position) -> bool {
        self.index.values().any(|&entity| {
            self.world
                .get::<Placement>(entity)
                .is_some_and(|placement| placement.0 == *pos)
        })
    }

    /// Removes an object; returns false if it did not exist.
    pub fn remove(&mut self, id: &ObjectId) -> bool {
        let Some(entity) = self.index.remove(id) else {
            return false;
        };
        self.workers.retain(|_, e| *e != entity);
        self.world.despawn(entity)
    }

    // === Inspection and direct edits ===

    /// Fresh view of a live worker.
    pub fn worker(&self, name: &str) -> Option<Worker> {
        let entity = *self.workers.get(name)?;
        let state = self.world.get::<WorkerState>(entity)?;
        let pos = self.world.get::<Placement>(entity)?.0.clone();
        Some(Worker {
            name: state.name.clone(),
            pos,
            fatigue: state.fatigue,
            energy: state.energy,
            carry_capacity: state.capacity,
            body_size: state.body_size,
            ticks_to_live: state.ticks_to_live,
        })
    }

    /// Names of live workers, in name order.
    pub fn worker_names(&self) -> Vec<String> {
        self.workers.keys().cloned().collect()
    }

    pub fn is_alive(&self, name: &str) -> bool {
        self.workers.contains_key(name)
    }

    /// Energy stored in a structure.
    pub fn energy_in(&self, id: &ObjectId) -> Option<u32> {
        self.resolve(id)?.structure()?.store.map(|s| s.energy)
    }

    /// Sets a structure's stored energy, clamped to capacity.
    pub fn set_energy(&mut self, id: &ObjectId, energy: u32) {
        self.edit(id, |kind| {
            if let ObjectKind::Structure(StructureInfo {
                store: Some(store), ..
            }) = kind
            {
                store.energy = energy.min(store.capacity);
            }
        });
    }

    /// Sets a structure's or creep's hits, clamped to its maximum.
    pub fn set_hits(&mut self, id: &ObjectId, hits: u32) {
        self.edit(id, |kind| match kind {
            ObjectKind::Structure(info) => info.hits = hits.min(info.hits_max),
            ObjectKind::Creep {
                hits: h, hits_max, ..
            } => *h = hits.min(*hits_max),
            _ => {}
        });
    }

    pub fn set_source_energy(&mut self, id: &ObjectId, value: u32) {
        self.edit(id, |kind| {
            if let ObjectKind::Source {
                energy,
                energy_capacity,
            } = kind
            {
                *energy = value.min(*energy_capacity);
            }
        });
    }

    fn edit(&mut self, id: &ObjectId, f: impl FnOnce(&mut ObjectKind)) {
        let Some(&entity) = self.index.get(id) else {
            return;
        };
        if let Some(mut body) = self.world.get_mut::<Body>(entity) {
            f(&mut body.0);
        }
    }

    /// Every live object, in id order.
    pub fn objects(&self) -> Vec<WorldObject> {
        self.index
            .values()
            .filter_map(|&entity| self.object(entity))
            .collect()
    }

    pub fn stats(&self) -> &SandboxStats {
        self.world.resource::<SandboxStats>()
    }

    pub fn speech(&self) -> &[Speech] {
        &self.world.resource::<SpeechLog>().0
    }

    pub fn role_count(&self, room: &str, role: &str) -> i64 {
        self.world.resource::<RoleCounts>().get(room, role)
    }

    pub fn tick(&self) -> u64 {
        self.world.resource::<SandboxClock>().tick
    }

    pub fn terrain_walls(&self) -> usize {
        self.world.resource::<Terrain>().wall_count()
    }

    /// Runs world upkeep and moves the clock forward one tick.
    pub fn advance(&mut self) {
        self.upkeep.run(&mut self.world);

        let world = &self.world;
        self.index.retain(|_, e| world.get_entity(*e).is_some());
        self.workers.retain(|_, e| world.get_entity(*e).is_some());
    }

    // === Internals ===

    fn object(&self, entity: Entity) -> Option<WorldObject> {
        let entity = self.world.get_entity(entity)?;
        Some(snapshot(
            entity.get::<Identity>()?,
            entity.get::<Placement>()?,
            entity.get::<Body>()?,
        ))
    }

    fn worker_entity(&self, name: &str) -> Result<Entity, HostError> {
        self.workers
            .get(name)
            .copied()
            .ok_or_else(|| HostError::UnknownWorker(name.to_string()))
    }

    fn worker_parts(&self, name: &str) -> Result<(Entity, WorkerState, Position), HostError> {
        let entity = self.worker_entity(name)?;
        let state = self
            .world
            .get::<WorkerState>(entity)
            .cloned()
            .ok_or_else(|| HostError::UnknownWorker(name.to_string()))?;
        let pos = self
            .world
            .get::<Placement>(entity)
            .map(|p| p.0.clone())
            .ok_or_else(|| HostError::UnknownWorker(name.to_string()))?;
        Ok((entity, state, pos))
    }

    fn target(&self, id: &ObjectId) -> Result<(Entity, WorldObject), HostError> {
        let entity = *self.index.get(id).ok_or(HostError::InvalidTarget)?;
        let object = self.object(entity).ok_or(HostError::InvalidTarget)?;
        Ok((entity, object))
    }

    fn set_carried(&mut self, worker: Entity, energy: u32) {
        if let Some(mut state) = self.world.get_mut::<WorkerState>(worker) {
            state.energy = energy;
        }
    }

    fn set_kind(&mut self, entity: Entity, kind: ObjectKind) {
        if let Some(mut body) = self.world.get_mut::<Body>(entity) {
            body.0 = kind;
        }
    }

    fn despawn(&mut self, id: &ObjectId, entity: Entity) {
        self.index.remove(id);
        self.workers.retain(|_, e| *e != entity);
        self.world.despawn(entity);
    }

    /// Tiles in `room` that cannot be walked through.
    fn obstacles(&self, room: &str, ignore_creeps: bool) -> Obstacles {
        let mut blocked = Obstacles::new();
        for object in self.objects() {
            if object.pos.room_name != room {
                continue;
            }
            let blocks = match &object.kind {
                ObjectKind::Structure(info) => match info.structure_type {
                    StructureType::Road | StructureType::Container => false,
                    StructureType::Rampart => !info.my,
                    _ => true,
                },
                ObjectKind::Controller(_) | ObjectKind::Source { .. } => true,
                ObjectKind::Creep { .. } => !ignore_creeps,
                ObjectKind::Resource { .. } | ObjectKind::ConstructionSite { .. } => false,
            };
            if blocks {
                blocked.insert((object.pos.x, object.pos.y));
            }
        }
        blocked.extend(self.world.resource::<Terrain>().walls_in(room));
        blocked
    }

    fn require_range(from: &Position, to: &Position, range: u32) -> HostResult {
        if from.in_range_to(to, range) {
            Ok(())
        } else {
            Err(HostError::NotInRange)
        }
    }

    fn step_worker(&mut self, entity: Entity, state: &WorkerState, from: &Position, direction: Direction) -> HostResult {
        if state.fatigue > 0 {
            return Err(HostError::Tired);
        }
        let to = from.offset(direction).ok_or(HostError::Blocked)?;
        if self.obstacles(&from.room_name, false).contains(&(to.x, to.y)) {
            return Err(HostError::Blocked);
        }
        if let Some(mut placement) = self.world.get_mut::<Placement>(entity) {
            placement.0 = to;
        }
        if let Some(mut worker) = self.world.get_mut::<WorkerState>(entity) {
            worker.fatigue += worker.move_fatigue;
        }
        self.world.resource_mut::<SandboxStats>().moves += 1;
        Ok(())
    }
}

impl WorldQuery for SandboxWorld {
    fn find_nearest(
        &self,
        origin: &Position,
        class: FindClass,
        filter: &dyn Fn(&WorldObject) -> bool,
        metric: Metric,
    ) -> Option<ObjectId> {
        let candidates = self
            .objects()
            .into_iter()
            .filter(|o| o.pos.room_name == origin.room_name)
            .filter(|o| class.admits(o) && filter(o));

        let (obstacles, field) = match metric {
            Metric::ByRange => (Obstacles::new(), None),
            Metric::ByPath => {
                let obstacles = self.obstacles(&origin.room_name, false);
                let field = DistanceField::flood((origin.x, origin.y), &obstacles, None);
                (obstacles, Some(field))
            }
        };

        let mut best: Option<(u32, ObjectId)> = None;
        for candidate in candidates {
            let tile = (candidate.pos.x, candidate.pos.y);
            let distance = match &field {
                None => origin.range_to(&candidate.pos),
                Some(_) if tile == (origin.x, origin.y) => Some(0),
                Some(field) => field.distance_to(tile, &obstacles),
            };
            let Some(distance) = distance else {
                continue;
            };
            if best.as_ref().map_or(true, |(d, _)| distance < *d) {
                best = Some((distance, candidate.id));
            }
        }
        best.map(|(_, id)| id)
    }

    fn resolve(&self, id: &ObjectId) -> Option<WorldObject> {
        self.object(*self.index.get(id)?)
    }

    fn controller(&self, room: &str) -> Option<WorldObject> {
        self.objects()
            .into_iter()
            .find(|o| o.pos.room_name == room && matches!(o.kind, ObjectKind::Controller(_)))
    }

    fn compute_path(
        &mut self,
        origin: &Position,
        destination: &Position,
        options: &PathOptions,
    ) -> Option<Vec<Step>> {
        self.world.resource_mut::<SandboxStats>().path_computations += 1;
        if origin.room_name != destination.room_name {
            return None;
        }
        let obstacles = self.obstacles(&origin.room_name, options.ignore_creeps);
        find_path(
            (origin.x, origin.y),
            (destination.x, destination.y),
            &obstacles,
        )
    }

    fn transfer(&mut self, worker: &str, target: &ObjectId, resource: ResourceType) -> HostResult {
        let (entity, state, pos) = self.worker_parts(worker)?;
        let (target_entity, object) = self.target(target)?;
        if resource != ResourceType::Energy || state.energy == 0 {
            return Err(HostError::NotEnoughResources);
        }
        Self::require_range(&pos, &object.pos, 1)?;

        let ObjectKind::Structure(mut info) = object.kind else {
            return Err(HostError::InvalidTarget);
        };
        let Some(store) = info.store.as_mut() else {
            return Err(HostError::InvalidTarget);
        };
        let amount = state.energy.min(store.free_capacity());
        if amount == 0 {
            return Err(HostError::Full);
        }
        store.energy += amount;

        self.set_kind(target_entity, ObjectKind::Structure(info));
        self.set_carried(entity, state.energy - amount);
        Ok(())
    }

    fn pickup(&mut self, worker: &str, target: &ObjectId) -> HostResult {
        let (entity, state, pos) = self.worker_parts(worker)?;
        let (pile_entity, object) = self.target(target)?;
        let ObjectKind::Resource { resource, amount } = object.kind else {
            return Err(HostError::InvalidTarget);
        };
        // Workers only carry energy
        if resource != ResourceType::Energy {
            return Err(HostError::InvalidTarget);
        }
        Self::require_range(&pos, &object.pos, 1)?;

        let taken = amount.min(state.free_capacity());
        if taken == 0 {
            return Err(HostError::Full);
        }
        self.set_carried(entity, state.energy + taken);
        if taken == amount {
            self.despawn(target, pile_entity);
        } else {
            self.set_kind(
                pile_entity,
                ObjectKind::Resource {
                    resource,
                    amount: amount - taken,
                },
            );
        }
        Ok(())
    }

    fn harvest(&mut self, worker: &str, source: &ObjectId) -> HostResult {
        let (entity, state, pos) = self.worker_parts(worker)?;
        let (source_entity, object) = self.target(source)?;
        let ObjectKind::Source {
            energy,
            energy_capacity,
        } = object.kind
        else {
            return Err(HostError::InvalidTarget);
        };
        Self::require_range(&pos, &object.pos, 1)?;
        if energy == 0 {
            return Err(HostError::NotEnoughResources);
        }

        let mined = (state.work_parts * HARVEST_POWER)
            .min(energy)
            .min(state.free_capacity());
        if mined == 0 {
            return Err(HostError::Full);
        }
        self.set_kind(
            source_entity,
            ObjectKind::Source {
                energy: energy - mined,
                energy_capacity,
            },
        );
        self.set_carried(entity, state.energy + mined);
        Ok(())
    }

    fn upgrade_controller(&mut self, worker: &str, controller: &ObjectId) -> HostResult {
        let (entity, state, pos) = self.worker_parts(worker)?;
        let (controller_entity, object) = self.target(controller)?;
        let ObjectKind::Controller(mut info) = object.kind else {
            return Err(HostError::InvalidTarget);
        };
        Self::require_range(&pos, &object.pos, WORK_RANGE)?;
        if state.energy == 0 {
            return Err(HostError::NotEnoughResources);
        }

        let spent = (state.work_parts * UPGRADE_POWER).min(state.energy);
        info.progress += u64::from(spent);
        if info.level < MAX_CONTROLLER_LEVEL && info.progress >= info.progress_total {
            info.progress -= info.progress_total;
            info.level += 1;
            info.progress_total = controller_progress_total(info.level);
            tracing::info!(controller = %controller, level = info.level, "controller leveled up");
        }
        self.set_kind(controller_entity, ObjectKind::Controller(info));
        self.set_carried(entity, state.energy - spent);
        Ok(())
    }

    fn build(&mut self, worker: &str, site: &ObjectId) -> HostResult {
        let (entity, state, pos) = self.worker_parts(worker)?;
        let (site_entity, object) = self.target(site)?;
        let ObjectKind::ConstructionSite {
            structure_type,
            progress,
            progress_total,
        } = object.kind
        else {
            return Err(HostError::InvalidTarget);
        };
        Self::require_range(&pos, &object.pos, WORK_RANGE)?;
        if state.energy == 0 {
            return Err(HostError::NotEnoughResources);
        }

        let spent = (state.work_parts * BUILD_POWER)
            .min(state.energy)
            .min(progress_total.saturating_sub(progress));
        self.set_carried(entity, state.energy - spent);

        let progress = progress + spent;
        if progress >= progress_total {
            self.despawn(site, site_entity);
            let built = self.spawn_structure(object.pos, structure_type, true);
            tracing::debug!(site = %site, structure = %built, "construction finished");
        } else {
            self.set_kind(
                site_entity,
                ObjectKind::ConstructionSite {
                    structure_type,
                    progress,
                    progress_total,
                },
            );
        }
        Ok(())
    }

    fn repair(&mut self, worker: &str, target: &ObjectId) -> HostResult {
        let (entity, state, pos) = self.worker_parts(worker)?;
        let (target_entity, object) = self.target(target)?;
        let ObjectKind::Structure(mut info) = object.kind else {
            return Err(HostError::InvalidTarget);
        };
        Self::require_range(&pos, &object.pos, WORK_RANGE)?;
        if info.hits >= info.hits_max {
            return Err(HostError::Full);
        }
        if state.energy == 0 {
            return Err(HostError::NotEnoughResources);
        }

        let spent = state.work_parts.min(state.energy);
        info.hits = info
            .hits
            .saturating_add(spent * REPAIR_POWER)
            .min(info.hits_max);
        self.set_kind(target_entity, ObjectKind::Structure(info));
        self.set_carried(entity, state.energy - spent);
        Ok(())
    }

    fn attack(&mut self, worker: &str, victim: &ObjectId) -> HostResult {
        let (_, _, pos) = self.worker_parts(worker)?;
        let (victim_entity, mut object) = self.target(victim)?;
        Self::require_range(&pos, &object.pos, 1)?;

        let remaining = match &mut object.kind {
            ObjectKind::Creep { hits, .. } => {
                *hits = hits.saturating_sub(ATTACK_POWER);
                *hits
            }
            ObjectKind::Structure(info) => {
                info.hits = info.hits.saturating_sub(ATTACK_POWER);
                info.hits
            }
            _ => return Err(HostError::InvalidTarget),
        };
        if remaining == 0 {
            tracing::debug!(%victim, "destroyed");
            self.despawn(victim, victim_entity);
        } else {
            self.set_kind(victim_entity, object.kind);
        }
        Ok(())
    }

    fn move_step(&mut self, worker: &str, direction: Direction) -> HostResult {
        let (entity, state, pos) = self.worker_parts(worker)?;
        self.step_worker(entity, &state, &pos, direction)
    }

    fn move_to(&mut self, worker: &str, destination: &Position, options: &MoveOptions) -> HostResult {
        self.world.resource_mut::<SandboxStats>().direct_moves += 1;
        let (entity, state, pos) = self.worker_parts(worker)?;
        if state.fatigue > 0 {
            return Err(HostError::Tired);
        }
        if pos.room_name != destination.room_name {
            return Err(HostError::NoPath);
        }
        tracing::trace!(
            worker,
            %destination,
            reuse_path = options.reuse_path,
            visualize_path = options.visualize_path,
            "direct move"
        );

        let obstacles = self.obstacles(&pos.room_name, false);
        let path = find_path((pos.x, pos.y), (destination.x, destination.y), &obstacles)
            .ok_or(HostError::NoPath)?;
        match path.first() {
            Some(step) => self.step_worker(entity, &state, &pos, step.direction),
            None => Ok(()),
        }
    }

    fn say(&mut self, worker: &str, message: &str, public: bool) {
        let tick = self.tick();
        self.world.resource_mut::<SpeechLog>().0.push(Speech {
            tick,
            worker: worker.to_string(),
            message: message.to_string(),
            public,
        });
    }

    fn decrement_role_count(&mut self, room: &str, role: &str) {
        self.world.resource_mut::<RoleCounts>().adjust(room, role, -1);
    }
}
