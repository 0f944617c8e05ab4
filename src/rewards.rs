use crate::config::RewardConfig;
use crate::environment::WorldSnapshot;
use crate::error::Result;
use crate::grid::{Grid, Position};

/// Offsets of the eight cells surrounding a dangerous ghost.
const GHOST_RADIUS: [(i32, i32); 8] = [
    (-1, 1),
    (0, 1),
    (1, 1),
    (-1, 0),
    (1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Reward values stamped onto the grid each decision step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RewardTable {
    pub food: f64,
    pub capsule: f64,
    pub ghost: f64,
    pub ghost_neighbor: f64,
    pub scared_ghost: f64,
}

impl Default for RewardTable {
    fn default() -> Self {
        RewardTable {
            food: 5.0,
            capsule: 5.0,
            ghost: -10.0,
            ghost_neighbor: -5.0,
            scared_ghost: 20.0,
        }
    }
}

impl From<&RewardConfig> for RewardTable {
    fn from(config: &RewardConfig) -> Self {
        RewardTable {
            food: config.food,
            capsule: config.capsule,
            ghost: config.ghost,
            ghost_neighbor: config.ghost_neighbor,
            scared_ghost: config.scared_ghost,
        }
    }
}

/// Overwrite every reward on `grid` from a fresh snapshot.
///
/// Writes replace rather than accumulate, in the order food, capsules,
/// ghosts, so a ghost's penalty wins over food on the same cell. A ghost whose
/// surrounding cells leave the grid fails with `OutOfBounds`.
pub fn assign_rewards(grid: &mut Grid, snapshot: &WorldSnapshot, table: &RewardTable) -> Result<()> {
    grid.clear_rewards();

    for &pos in &snapshot.food {
        grid.set_reward(pos, table.food)?;
    }
    for &pos in &snapshot.capsules {
        grid.set_reward(pos, table.capsule)?;
    }

    for ghost in &snapshot.ghosts {
        let pos = ghost.position;
        if ghost.is_scared() {
            grid.set_reward(pos, table.scared_ghost)?;
            continue;
        }
        grid.set_reward(pos, table.ghost)?;
        for (dx, dy) in GHOST_RADIUS {
            grid.set_reward(Position::new(pos.x + dx, pos.y + dy), table.ghost_neighbor)?;
        }
    }

    Ok(())
}
