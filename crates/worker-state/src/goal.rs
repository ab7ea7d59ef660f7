//! Worker Goals
//!
//! The high-level objective a worker spends its carried energy on.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What a loaded worker is currently trying to achieve for its colony.
///
/// `Upgrade` is the fallback objective: every room a worker can stand in
/// usefully has a controller to feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Goal {
    /// Top up spawns, extensions and towers
    Fill,
    /// Repair damaged non-wall structures
    Fix,
    /// Work on construction sites
    Build,
    /// Feed the room controller
    #[default]
    Upgrade,
    /// Raise walls and ramparts toward the level threshold
    Reinforce,
}

impl Goal {
    /// All goals in declaration order.
    pub const ALL: [Goal; 5] = [
        Goal::Fill,
        Goal::Fix,
        Goal::Build,
        Goal::Upgrade,
        Goal::Reinforce,
    ];
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Goal::Fill => write!(f, "Fill"),
            Goal::Fix => write!(f, "Fix"),
            Goal::Build => write!(f, "Build"),
            Goal::Upgrade => write!(f, "Upgrade"),
            Goal::Reinforce => write!(f, "Reinforce"),
        }
    }
}

impl FromStr for Goal {
    type Err = ParseGoalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fill" => Ok(Goal::Fill),
            "fix" | "repair" => Ok(Goal::Fix),
            "build" => Ok(Goal::Build),
            "upgrade" => Ok(Goal::Upgrade),
            "reinforce" => Ok(Goal::Reinforce),
            _ => Err(ParseGoalError(s.to_string())),
        }
    }
}

/// Error type for parsing a Goal from a string.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseGoalError(pub String);

impl fmt::Display for ParseGoalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown goal: '{}', expected one of fill, fix, build, upgrade, reinforce",
            self.0
        )
    }
}

impl std::error::Error for ParseGoalError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_goal_is_upgrade() {
        assert_eq!(Goal::default(), Goal::Upgrade);
    }

    #[test]
    fn test_goal_parse() {
        assert_eq!("Build".parse::<Goal>(), Ok(Goal::Build));
        assert_eq!("repair".parse::<Goal>(), Ok(Goal::Fix));
        assert!("harvest".parse::<Goal>().is_err());
    }

    #[test]
    fn test_goal_display_matches_persisted_form() {
        for goal in Goal::ALL {
            let json = serde_json::to_string(&goal).unwrap();
            assert_eq!(json, format!("\"{}\"", goal));
        }
    }
}
