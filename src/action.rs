use serde::{Deserialize, Serialize};
use std::fmt;

/// A move the agent can hand back to the host.
///
/// `Stop` is accepted as a legal move but never carries an expected utility,
/// so the policy only ever picks it as a fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    North,
    South,
    East,
    West,
    Stop,
}

impl Action {
    /// The four moving actions, in tie-break order.
    pub const CARDINALS: [Action; 4] = [Action::North, Action::South, Action::East, Action::West];

    /// Coordinate offset of a move; North increases `y`.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Action::North => (0, 1),
            Action::South => (0, -1),
            Action::East => (1, 0),
            Action::West => (-1, 0),
            Action::Stop => (0, 0),
        }
    }

    /// Arrow used by the policy map.
    pub fn symbol(self) -> char {
        match self {
            Action::North => '^',
            Action::South => 'v',
            Action::East => '>',
            Action::West => '<',
            Action::Stop => '*',
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::North => "North",
            Action::South => "South",
            Action::East => "East",
            Action::West => "West",
            Action::Stop => "Stop",
        };
        f.write_str(name)
    }
}
