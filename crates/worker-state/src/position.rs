//! Position Types
//!
//! Room positions, compass directions and path steps.
//!
//! # Example
//!
//! ```
//! use worker_state::{positions_equal, Position};
//!
//! let a = Position::new(10, 12, "W1N1");
//! let b = Position::new(10, 12, "W1N1");
//! assert!(positions_equal(Some(&a), Some(&b)));
//! assert!(!positions_equal(None, None));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Width and height of a room in tiles.
pub const ROOM_SIZE: i32 = 50;

/// A tile inside a named room.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
    #[serde(rename = "roomName")]
    pub room_name: String,
}

impl Position {
    /// Creates a new Position.
    pub fn new(x: i32, y: i32, room_name: impl Into<String>) -> Self {
        Self {
            x,
            y,
            room_name: room_name.into(),
        }
    }

    /// Chebyshev distance to `other`, or `None` when the rooms differ.
    pub fn range_to(&self, other: &Position) -> Option<u32> {
        if self.room_name != other.room_name {
            return None;
        }
        let dx = (self.x - other.x).unsigned_abs();
        let dy = (self.y - other.y).unsigned_abs();
        Some(dx.max(dy))
    }

    /// Returns true if `other` is in the same room and within `range` tiles.
    pub fn in_range_to(&self, other: &Position, range: u32) -> bool {
        self.range_to(other).is_some_and(|r| r <= range)
    }

    /// Returns true if `other` is on this tile or one of the eight around it.
    pub fn is_near_to(&self, other: &Position) -> bool {
        self.in_range_to(other, 1)
    }

    /// The neighbouring tile in `direction`, or `None` at the room edge.
    pub fn offset(&self, direction: Direction) -> Option<Position> {
        let (dx, dy) = direction.delta();
        let x = self.x + dx;
        let y = self.y + dy;
        if !(0..ROOM_SIZE).contains(&x) || !(0..ROOM_SIZE).contains(&y) {
            return None;
        }
        Some(Position::new(x, y, self.room_name.clone()))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} {},{}]", self.room_name, self.x, self.y)
    }
}

/// Strict positional equality used for path reuse.
///
/// True iff both sides are present and x, y and room name all match.
/// An absent side never equals anything, including another absent side,
/// so an empty path cache can never be mistaken for a valid one.
pub fn positions_equal(a: Option<&Position>, b: Option<&Position>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.x == b.x && a.y == b.y && a.room_name == b.room_name,
        _ => false,
    }
}

/// One of the eight compass directions, numbered clockwise from `Top`.
///
/// Persisted as its number, 1 through 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Direction {
    Top = 1,
    TopRight = 2,
    Right = 3,
    BottomRight = 4,
    Bottom = 5,
    BottomLeft = 6,
    Left = 7,
    TopLeft = 8,
}

impl Direction {
    /// All directions in clockwise order.
    pub const ALL: [Direction; 8] = [
        Direction::Top,
        Direction::TopRight,
        Direction::Right,
        Direction::BottomRight,
        Direction::Bottom,
        Direction::BottomLeft,
        Direction::Left,
        Direction::TopLeft,
    ];

    /// Tile offset `(dx, dy)`; y grows downward.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Top => (0, -1),
            Direction::TopRight => (1, -1),
            Direction::Right => (1, 0),
            Direction::BottomRight => (1, 1),
            Direction::Bottom => (0, 1),
            Direction::BottomLeft => (-1, 1),
            Direction::Left => (-1, 0),
            Direction::TopLeft => (-1, -1),
        }
    }

    /// The direction matching a unit offset, if any.
    pub fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.delta() == (dx, dy))
    }
}

impl From<Direction> for u8 {
    fn from(direction: Direction) -> Self {
        direction as u8
    }
}

impl TryFrom<u8> for Direction {
    type Error = InvalidDirection;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Direction::ALL
            .into_iter()
            .find(|d| u8::from(*d) == value)
            .ok_or(InvalidDirection(value))
    }
}

/// A direction number outside 1..=8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidDirection(pub u8);

impl fmt::Display for InvalidDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid direction {}, expected 1 to 8", self.0)
    }
}

impl std::error::Error for InvalidDirection {}

/// One step of a computed path: the tile reached and how it was entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub x: i32,
    pub y: i32,
    pub dx: i32,
    pub dy: i32,
    pub direction: Direction,
}

impl Step {
    /// Builds the step that enters `to` from the adjacent tile `from`.
    pub fn between(from: (i32, i32), to: (i32, i32)) -> Option<Self> {
        let dx = to.0 - from.0;
        let dy = to.1 - from.1;
        Direction::from_delta(dx, dy).map(|direction| Self {
            x: to.0,
            y: to.1,
            dx,
            dy,
            direction,
        })
    }
}
