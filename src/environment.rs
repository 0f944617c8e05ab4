//! The boundary with the host game.
//!
//! The host owns the simulation. Once per episode the agent reads the level
//! boundary and its walls, and once per decision step it takes a
//! [`WorldSnapshot`] of everything that moves.

use crate::action::Action;
use crate::grid::Position;
use serde::{Deserialize, Serialize};

/// Observation of a single ghost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GhostObservation {
    pub position: Position,
    /// Remaining scared ticks; zero means the ghost is dangerous.
    pub scared_timer: u32,
}

impl GhostObservation {
    pub fn new(position: Position, scared_timer: u32) -> Self {
        GhostObservation {
            position,
            scared_timer,
        }
    }

    pub fn is_scared(&self) -> bool {
        self.scared_timer > 0
    }
}

/// Everything the solver needs from the host for one decision.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub agent: Position,
    pub legal: Vec<Action>,
    pub food: Vec<Position>,
    pub capsules: Vec<Position>,
    pub ghosts: Vec<GhostObservation>,
}

impl WorldSnapshot {
    /// Read the per-step state out of the host
    pub fn observe<E: Environment + ?Sized>(env: &E) -> Self {
        WorldSnapshot {
            agent: env.agent_position(),
            legal: env.legal_actions(),
            food: env.food(),
            capsules: env.capsules(),
            ghosts: env
                .ghost_states()
                .into_iter()
                .map(|((x, y), timer)| GhostObservation::new(Position::from_continuous(x, y), timer))
                .collect(),
        }
    }
}

/// Queries the agent makes against the host simulation.
pub trait Environment {
    /// Corner coordinates of the level; the largest x and y bound the grid.
    fn corners(&self) -> Vec<Position>;
    fn walls(&self) -> Vec<Position>;
    fn agent_position(&self) -> Position;
    fn legal_actions(&self) -> Vec<Action>;
    fn food(&self) -> Vec<Position>;
    fn capsules(&self) -> Vec<Position>;
    /// Ghost positions as reported by the host (possibly between cells)
    /// paired with their scared timers.
    fn ghost_states(&self) -> Vec<((f64, f64), u32)>;
}
