use crate::action::Action;
use crate::error::{Result, SolverError};
use serde::{Deserialize, Serialize};

/// A position on the grid. `y` grows northwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// Snap a continuous host coordinate onto the grid by truncation.
    /// Ghosts report half-cell positions while moving between cells.
    pub fn from_continuous(x: f64, y: f64) -> Self {
        Position {
            x: x.trunc() as i32,
            y: y.trunc() as i32,
        }
    }

    /// The position one step away in the direction of `action`, or `None`
    /// when the step leaves the `i32` range.
    pub fn step(self, action: Action) -> Option<Position> {
        let (dx, dy) = action.delta();
        Some(Position::new(self.x.checked_add(dx)?, self.y.checked_add(dy)?))
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Position::new(x, y)
    }
}

/// State stored for one grid square.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Cell {
    pub wall: bool,
    pub reward: f64,
    pub utility: f64,
}

/// Fixed-size map of cells holding walls, rewards and utilities.
/// Cells are stored row-major: id = x + y * width.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every cell free, zero reward and zero utility
    pub fn new(width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(SolverError::InvalidDimensions {
                message: format!("{}x{} has no cells", width, height),
            });
        }
        let count = width
            .checked_mul(height)
            .ok_or_else(|| SolverError::InvalidDimensions {
                message: format!("{}x{} cells overflow the cell index", width, height),
            })?;
        Ok(Grid {
            width,
            height,
            cells: vec![Cell::default(); count as usize],
        })
    }

    /// Create a grid with specific wall cells
    pub fn with_walls(width: i32, height: i32, walls: &[Position]) -> Result<Self> {
        let mut grid = Self::new(width, height)?;
        for &pos in walls {
            grid.set_wall(pos)?;
        }
        Ok(grid)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Convert a position to its cell ID, rejecting anything off the grid
    pub fn get_id(&self, pos: Position) -> Result<usize> {
        if !self.contains(pos) {
            return Err(SolverError::OutOfBounds {
                x: pos.x,
                y: pos.y,
                width: self.width,
                height: self.height,
            });
        }
        Ok((pos.x + pos.y * self.width) as usize)
    }

    /// Convert a cell ID back to its position
    pub fn get_coords(&self, id: usize) -> Position {
        let id = id as i32;
        Position::new(id % self.width, id / self.width)
    }

    pub fn cell(&self, pos: Position) -> Result<&Cell> {
        let id = self.get_id(pos)?;
        Ok(&self.cells[id])
    }

    fn cell_mut(&mut self, pos: Position) -> Result<&mut Cell> {
        let id = self.get_id(pos)?;
        Ok(&mut self.cells[id])
    }

    pub fn set_wall(&mut self, pos: Position) -> Result<()> {
        self.cell_mut(pos)?.wall = true;
        Ok(())
    }

    pub fn is_wall(&self, pos: Position) -> Result<bool> {
        Ok(self.cell(pos)?.wall)
    }

    pub fn set_reward(&mut self, pos: Position, value: f64) -> Result<()> {
        self.cell_mut(pos)?.reward = value;
        Ok(())
    }

    pub fn reward(&self, pos: Position) -> Result<f64> {
        Ok(self.cell(pos)?.reward)
    }

    pub fn set_utility(&mut self, pos: Position, value: f64) -> Result<()> {
        self.cell_mut(pos)?.utility = value;
        Ok(())
    }

    pub fn utility(&self, pos: Position) -> Result<f64> {
        Ok(self.cell(pos)?.utility)
    }

    /// Utility seen when trying to move from `this` into `neighbor`.
    ///
    /// Walking into a wall leaves the agent where it was, so a wall neighbor
    /// contributes the utility of `this` rather than its own stored value.
    pub fn neighbor_utility(&self, neighbor: Position, this: Position) -> Result<f64> {
        let target = self.cell(neighbor)?;
        let origin = self.cell(this)?;
        if target.wall {
            Ok(origin.utility)
        } else {
            Ok(target.utility)
        }
    }

    /// The adjacent position in direction `action`, or `None` past the edge.
    pub fn neighbor(&self, pos: Position, action: Action) -> Option<Position> {
        pos.step(action).filter(|&next| self.contains(next))
    }

    /// Every position, row by row from y = 0.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.cells.len()).map(move |id| self.get_coords(id))
    }

    /// Reset every reward to zero
    pub fn clear_rewards(&mut self) {
        for cell in &mut self.cells {
            cell.reward = 0.0;
        }
    }

    /// Copy of the utility field, indexed by cell ID
    pub fn utilities(&self) -> Vec<f64> {
        self.cells.iter().map(|cell| cell.utility).collect()
    }

    /// Replace the whole utility field at once
    pub fn set_utilities(&mut self, field: Vec<f64>) -> Result<()> {
        if field.len() != self.cells.len() {
            return Err(SolverError::InvalidDimensions {
                message: format!(
                    "utility field has {} entries, grid has {}",
                    field.len(),
                    self.cells.len()
                ),
            });
        }
        for (cell, utility) in self.cells.iter_mut().zip(field) {
            cell.utility = utility;
        }
        Ok(())
    }

    /// Positions of every wall cell
    pub fn walls(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.wall)
            .map(|(id, _)| self.get_coords(id))
            .collect()
    }
}
