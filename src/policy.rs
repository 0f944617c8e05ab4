use crate::action::Action;
use crate::config::SolverConfig;
use crate::error::{Result, SolverError};
use crate::grid::{Grid, Position};

/// Noisy movement: the intended direction succeeds with `intended`
/// probability, otherwise the agent slips to either perpendicular direction
/// with `perpendicular` probability each. It never slips backwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionModel {
    pub intended: f64,
    pub perpendicular: f64,
}

impl Default for TransitionModel {
    fn default() -> Self {
        TransitionModel {
            intended: 0.8,
            perpendicular: 0.1,
        }
    }
}

impl From<&SolverConfig> for TransitionModel {
    fn from(config: &SolverConfig) -> Self {
        TransitionModel {
            intended: config.intended_probability,
            perpendicular: config.perpendicular_probability,
        }
    }
}

/// Expected utility of each cardinal action from one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionValues {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl ActionValues {
    /// Value of a moving action; `Stop` has none.
    pub fn get(&self, action: Action) -> Option<f64> {
        match action {
            Action::North => Some(self.north),
            Action::South => Some(self.south),
            Action::East => Some(self.east),
            Action::West => Some(self.west),
            Action::Stop => None,
        }
    }

    /// Pairs in tie-break order.
    pub fn iter(&self) -> impl Iterator<Item = (Action, f64)> {
        [
            (Action::North, self.north),
            (Action::South, self.south),
            (Action::East, self.east),
            (Action::West, self.west),
        ]
        .into_iter()
    }

    pub fn max(&self) -> f64 {
        self.north.max(self.south).max(self.east).max(self.west)
    }
}

impl TransitionModel {
    /// Expected utility of every cardinal action taken at `pos`, reading the
    /// utilities currently stored on `grid`.
    pub fn expected_utilities(&self, grid: &Grid, pos: Position) -> Result<ActionValues> {
        grid.get_id(pos)?;
        let north = landing_utility(grid, pos, Action::North)?;
        let south = landing_utility(grid, pos, Action::South)?;
        let east = landing_utility(grid, pos, Action::East)?;
        let west = landing_utility(grid, pos, Action::West)?;

        let (p, q) = (self.intended, self.perpendicular);
        Ok(ActionValues {
            north: p * north + q * east + q * west,
            south: p * south + q * east + q * west,
            east: p * east + q * south + q * north,
            west: p * west + q * south + q * north,
        })
    }
}

/// Utility of where a move in `action` lands. Walls and the grid edge both
/// leave the agent in place.
fn landing_utility(grid: &Grid, pos: Position, action: Action) -> Result<f64> {
    match grid.neighbor(pos, action) {
        Some(neighbor) => grid.neighbor_utility(neighbor, pos),
        None => grid.utility(pos),
    }
}

/// Pick the legal action with the highest expected utility.
///
/// Ties go to the earliest of North, South, East, West. Fails with
/// `EmptyLegalActionSet` when no cardinal action is legal.
pub fn best_action(values: &ActionValues, legal: &[Action]) -> Result<Action> {
    let mut best: Option<(Action, f64)> = None;
    for (action, value) in values.iter() {
        if !legal.contains(&action) {
            continue;
        }
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((action, value)),
        }
    }
    best.map(|(action, _)| action)
        .ok_or(SolverError::EmptyLegalActionSet)
}

/// Greedy policy at `pos` over the utilities currently on `grid`.
pub fn extract_policy(
    grid: &Grid,
    model: &TransitionModel,
    pos: Position,
    legal: &[Action],
) -> Result<Action> {
    let values = model.expected_utilities(grid, pos)?;
    best_action(&values, legal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(north: f64, south: f64, east: f64, west: f64) -> ActionValues {
        ActionValues { north, south, east, west }
    }

    #[test]
    fn ties_prefer_enumeration_order() {
        let v = values(1.0, 1.0, 1.0, 1.0);
        assert_eq!(best_action(&v, &Action::CARDINALS).unwrap(), Action::North);
        assert_eq!(best_action(&v, &[Action::West, Action::East]).unwrap(), Action::East);
    }

    #[test]
    fn stop_alone_has_no_answer() {
        let v = values(1.0, 2.0, 3.0, 4.0);
        assert!(matches!(
            best_action(&v, &[Action::Stop]),
            Err(SolverError::EmptyLegalActionSet)
        ));
    }

    #[test]
    fn illegal_maximum_is_ignored() {
        let v = values(0.0, -1.0, 9.0, -3.0);
        assert_eq!(best_action(&v, &[Action::South, Action::West, Action::Stop]).unwrap(), Action::South);
    }
}
