//! Action Status
//!
//! What an action primitive reports back to the goal machine, and the
//! short markers workers show while performing each action.

use std::fmt;

/// Result of one action primitive for one tick.
///
/// Every primitive is total: it always returns one of these, never panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionStatus {
    /// Acted, or still approaching a valid target.
    Ok,
    /// No valid target exists and none could be found this tick.
    NoTarget,
    /// Extraction only: no source could be assigned at all.
    NoSource,
}

impl ActionStatus {
    /// Numeric status code: 0, -1 or -2.
    pub fn code(self) -> i32 {
        match self {
            ActionStatus::Ok => 0,
            ActionStatus::NoTarget => -1,
            ActionStatus::NoSource => -2,
        }
    }

    #[inline]
    pub fn is_ok(self) -> bool {
        matches!(self, ActionStatus::Ok)
    }
}

impl fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionStatus::Ok => write!(f, "ok"),
            ActionStatus::NoTarget => write!(f, "no target"),
            ActionStatus::NoSource => write!(f, "no source"),
        }
    }
}

/// Status markers shown above a worker.
pub mod markers {
    pub const FILL: &str = "⚙ ⛴";
    pub const PICKUP: &str = "♻";
    pub const HARVEST: &str = "⛏";
    pub const UPGRADE: &str = "⚙ 🕹";
    pub const BUILD: &str = "⚙ ⚒";
    pub const REPAIR: &str = "⚙ ⛓";
    pub const REINFORCE: &str = "⚙ 🏛";
    pub const MELEE: &str = "⚔";
    /// Loaded but holding no goal
    pub const CONFUSED: &str = "⁉";
}
