use crate::action::Action;
use crate::config::Config;
use crate::decision_log::{DecisionLog, LoggedDecision};
use crate::environment::{Environment, WorldSnapshot};
use crate::error::{Result, SolverError};
use crate::grid::{Grid, Position};
use crate::policy::best_action;
use crate::rewards::{assign_rewards, RewardTable};
use crate::value_iteration::{IterationOutcome, ValueIteration};

/// Result of a single decision step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub action: Action,
    pub outcome: IterationOutcome,
    /// Set when no cardinal action was legal and Stop was returned.
    pub fallback: bool,
}

/// Grid size implied by the level's corner coordinates.
pub fn grid_size_from_corners(corners: &[Position]) -> Result<(i32, i32)> {
    let max_x = corners.iter().map(|c| c.x).max().ok_or(SolverError::NoCorners)?;
    let max_y = corners.iter().map(|c| c.y).max().ok_or(SolverError::NoCorners)?;
    match (max_x.checked_add(1), max_y.checked_add(1)) {
        (Some(width), Some(height)) => Ok((width, height)),
        _ => Err(SolverError::InvalidDimensions {
            message: format!("corner ({}, {}) is past the largest grid", max_x, max_y),
        }),
    }
}

/// Value-iteration agent for one episode.
///
/// Built from the host at the start of a game; owns its grid until dropped.
pub struct MdpAgent {
    grid: Grid,
    solver: ValueIteration,
    rewards: RewardTable,
    log: Option<DecisionLog>,
    steps: usize,
}

impl MdpAgent {
    /// Build the map from the host's corners and walls, then plan once.
    pub fn register_initial_state<E: Environment + ?Sized>(env: &E, config: &Config) -> Result<Self> {
        let (width, height) = grid_size_from_corners(&env.corners())?;
        let grid = Grid::with_walls(width, height, &env.walls())?;
        tracing::info!(width, height, walls = grid.walls().len(), "registered initial state");

        let mut agent = MdpAgent {
            grid,
            solver: ValueIteration::from(&config.solver),
            rewards: RewardTable::from(&config.rewards),
            log: if config.logging.enable_decision_log {
                Some(DecisionLog::new())
            } else {
                None
            },
            steps: 0,
        };

        let snapshot = WorldSnapshot::observe(env);
        agent.plan(&snapshot)?;
        Ok(agent)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn solver(&self) -> &ValueIteration {
        &self.solver
    }

    /// Restamp rewards and rerun value iteration.
    pub fn plan(&mut self, snapshot: &WorldSnapshot) -> Result<IterationOutcome> {
        assign_rewards(&mut self.grid, snapshot, &self.rewards)?;
        self.solver.run(&mut self.grid)
    }

    /// Full decision step over an already taken snapshot.
    ///
    /// When no cardinal action is legal the agent answers Stop.
    pub fn decide(&mut self, snapshot: &WorldSnapshot) -> Result<Decision> {
        let outcome = self.plan(snapshot)?;
        let values = self
            .solver
            .model
            .expected_utilities(&self.grid, snapshot.agent)?;

        let (action, fallback) = match best_action(&values, &snapshot.legal) {
            Ok(action) => (action, false),
            Err(SolverError::EmptyLegalActionSet) => {
                tracing::warn!(
                    x = snapshot.agent.x,
                    y = snapshot.agent.y,
                    legal = ?snapshot.legal,
                    "no cardinal action is legal, stopping"
                );
                (Action::Stop, true)
            }
            Err(e) => return Err(e),
        };

        if let Some(log) = self.log.as_mut() {
            log.record(LoggedDecision {
                timestamp_ms: 0,
                step: self.steps,
                position: snapshot.agent,
                legal: snapshot.legal.clone(),
                chosen: action,
                sweeps: outcome.sweeps,
                termination: outcome.termination,
                fallback,
            });
        }
        self.steps += 1;

        Ok(Decision {
            action,
            outcome,
            fallback,
        })
    }

    /// Query the host and choose the next move.
    pub fn get_action<E: Environment + ?Sized>(&mut self, env: &E) -> Result<Action> {
        let snapshot = WorldSnapshot::observe(env);
        Ok(self.decide(&snapshot)?.action)
    }

    /// End of the episode; hands back the decision log if one was kept.
    pub fn finish(self) -> Option<DecisionLog> {
        tracing::info!(steps = self.steps, "episode finished");
        self.log
    }
}
