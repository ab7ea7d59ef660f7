//! Grid Pathing
//!
//! Breadth-first search over the 8-connected tile grid of a single room.
//! Neighbors are expanded in [`Direction::ALL`] order, so equal-length
//! routes always resolve the same way.

use std::collections::{HashSet, VecDeque};
use worker_state::{Direction, Step, ROOM_SIZE};

/// Tiles that cannot be entered in one room.
pub type Obstacles = HashSet<(i32, i32)>;

fn in_bounds(x: i32, y: i32) -> bool {
    (0..ROOM_SIZE).contains(&x) && (0..ROOM_SIZE).contains(&y)
}

fn index(x: i32, y: i32) -> usize {
    (y * ROOM_SIZE + x) as usize
}

/// Walking distances and back-pointers from one origin tile.
#[derive(Debug, Clone)]
pub struct DistanceField {
    origin: (i32, i32),
    dist: Vec<Option<u32>>,
    parent: Vec<Option<(i32, i32)>>,
}

impl DistanceField {
    /// Floods outward from `origin` across every tile not in `obstacles`.
    ///
    /// `goal` may be an obstacle tile: it is still entered, but never
    /// expanded from. The flood stops as soon as `goal` is reached.
    pub fn flood(origin: (i32, i32), obstacles: &Obstacles, goal: Option<(i32, i32)>) -> Self {
        let tiles = (ROOM_SIZE * ROOM_SIZE) as usize;
        let mut field = Self {
            origin,
            dist: vec![None; tiles],
            parent: vec![None; tiles],
        };
        if !in_bounds(origin.0, origin.1) {
            return field;
        }
        field.dist[index(origin.0, origin.1)] = Some(0);

        let mut frontier = VecDeque::from([origin]);
        while let Some((x, y)) = frontier.pop_front() {
            if Some((x, y)) == goal {
                break;
            }
            let next = field.dist[index(x, y)].unwrap_or(0) + 1;
            for direction in Direction::ALL {
                let (dx, dy) = direction.delta();
                let (nx, ny) = (x + dx, y + dy);
                if !in_bounds(nx, ny) || field.dist[index(nx, ny)].is_some() {
                    continue;
                }
                let is_goal = Some((nx, ny)) == goal;
                if obstacles.contains(&(nx, ny)) && !is_goal {
                    continue;
                }
                field.dist[index(nx, ny)] = Some(next);
                field.parent[index(nx, ny)] = Some((x, y));
                frontier.push_back((nx, ny));
            }
        }
        field
    }

    /// Steps needed to enter `tile`. Obstacle tiles count as enterable
    /// from any reached neighbor.
    pub fn distance_to(&self, tile: (i32, i32), obstacles: &Obstacles) -> Option<u32> {
        if !in_bounds(tile.0, tile.1) {
            return None;
        }
        if let Some(d) = self.dist[index(tile.0, tile.1)] {
            return Some(d);
        }
        if !obstacles.contains(&tile) {
            return None;
        }
        Direction::ALL
            .iter()
            .filter_map(|direction| {
                let (dx, dy) = direction.delta();
                let (nx, ny) = (tile.0 + dx, tile.1 + dy);
                if !in_bounds(nx, ny) || obstacles.contains(&(nx, ny)) {
                    return None;
                }
                self.dist[index(nx, ny)]
            })
            .min()
            .map(|d| d + 1)
    }

    /// The route from the origin into `tile`, if the flood reached it.
    pub fn path_to(&self, tile: (i32, i32)) -> Option<Vec<Step>> {
        if !in_bounds(tile.0, tile.1) {
            return None;
        }
        self.dist[index(tile.0, tile.1)]?;

        let mut tiles = vec![tile];
        let mut current = tile;
        while current != self.origin {
            current = self.parent[index(current.0, current.1)]?;
            tiles.push(current);
        }
        tiles.reverse();
        tiles
            .windows(2)
            .map(|pair| Step::between(pair[0], pair[1]))
            .collect()
    }
}

/// Shortest route from `origin` into `goal`, or `None` if unreachable.
pub fn find_path(origin: (i32, i32), goal: (i32, i32), obstacles: &Obstacles) -> Option<Vec<Step>> {
    DistanceField::flood(origin, obstacles, Some(goal)).path_to(goal)
}
