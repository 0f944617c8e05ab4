use crate::config::SolverConfig;
use crate::error::Result;
use crate::grid::{Grid, Position};
use crate::policy::TransitionModel;
use serde::{Deserialize, Serialize};

/// How a run of value iteration ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// Two consecutive sweeps produced exactly the same utility field.
    Converged,
    /// The sweep cap ran out first; the last field is used as is.
    SweepCapReached,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterationOutcome {
    pub sweeps: usize,
    pub termination: Termination,
}

impl IterationOutcome {
    pub fn converged(&self) -> bool {
        self.termination == Termination::Converged
    }
}

/// Bellman backups over every non-wall cell until the field stops moving.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueIteration {
    pub discount: f64,
    pub max_sweeps: usize,
    pub model: TransitionModel,
}

impl Default for ValueIteration {
    fn default() -> Self {
        ValueIteration {
            discount: 0.3,
            max_sweeps: 50,
            model: TransitionModel::default(),
        }
    }
}

impl From<&SolverConfig> for ValueIteration {
    fn from(config: &SolverConfig) -> Self {
        ValueIteration {
            discount: config.discount,
            max_sweeps: config.max_sweeps,
            model: TransitionModel::from(config),
        }
    }
}

impl ValueIteration {
    pub fn new(discount: f64, max_sweeps: usize) -> Self {
        ValueIteration {
            discount,
            max_sweeps,
            model: TransitionModel::default(),
        }
    }

    /// New utility for one cell from the utilities currently on the grid
    pub fn bellman(&self, grid: &Grid, pos: Position) -> Result<f64> {
        let best = self.model.expected_utilities(grid, pos)?.max();
        Ok(grid.reward(pos)? + self.discount * best)
    }

    /// One synchronous sweep. Every backup reads the field as it stood when
    /// the sweep began; the new field replaces it only once all cells are done.
    /// Returns true when nothing changed.
    pub fn sweep(&self, grid: &mut Grid) -> Result<bool> {
        let previous = grid.utilities();
        let mut next = previous.clone();

        for (id, pos) in grid.positions().enumerate() {
            if grid.is_wall(pos)? {
                continue;
            }
            next[id] = self.bellman(grid, pos)?;
        }

        let unchanged = next == previous;
        grid.set_utilities(next)?;
        Ok(unchanged)
    }

    /// Sweep until two consecutive fields are identical or the cap is hit
    pub fn run(&self, grid: &mut Grid) -> Result<IterationOutcome> {
        for sweep in 1..=self.max_sweeps {
            if self.sweep(grid)? {
                tracing::debug!(sweeps = sweep, "value iteration converged");
                return Ok(IterationOutcome {
                    sweeps: sweep,
                    termination: Termination::Converged,
                });
            }
        }

        tracing::debug!(
            sweeps = self.max_sweeps,
            "value iteration stopped at the sweep cap"
        );
        Ok(IterationOutcome {
            sweeps: self.max_sweeps,
            termination: Termination::SweepCapReached,
        })
    }
}
