//! Pacman level layouts in the Berkeley `.lay` text format.
//!
//! ```text
//! %%%%%%%
//! %P . G%
//! %%%%%%%
//! ```
//!
//! `%` wall, `.` food, `o` capsule, `G` (or a digit) ghost, `P` the agent,
//! space for an empty square. The first line is the top row, so it gets the
//! largest `y`.

use crate::action::Action;
use crate::environment::{Environment, GhostObservation};
use crate::error::{Result, SolverError};
use crate::grid::{Grid, Position};
use std::fs;
use std::path::Path;

/// A static level: walls, items, ghosts and the agent's square.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub width: i32,
    pub height: i32,
    pub walls: Vec<Position>,
    pub food: Vec<Position>,
    pub capsules: Vec<Position>,
    pub ghosts: Vec<GhostObservation>,
    pub agent: Position,
}

impl Layout {
    /// Parse a layout from text
    pub fn parse(text: &str) -> Result<Self> {
        let mut rows: Vec<&str> = text.lines().map(|line| line.trim_end_matches('\r')).collect();
        // A row of spaces is a real row; only empty lines at the end are dropped
        while rows.last().map_or(false, |line| line.is_empty()) {
            rows.pop();
        }

        if rows.is_empty() {
            return Err(SolverError::Layout {
                message: "no rows found".to_string(),
            });
        }

        let width = rows[0].chars().count() as i32;
        let height = rows.len() as i32;

        let mut layout = Layout {
            width,
            height,
            walls: Vec::new(),
            food: Vec::new(),
            capsules: Vec::new(),
            ghosts: Vec::new(),
            agent: Position::new(-1, -1),
        };
        let mut agent_found = false;

        for (row, line) in rows.iter().enumerate() {
            if line.chars().count() as i32 != width {
                return Err(SolverError::Layout {
                    message: format!(
                        "row {} has {} columns, expected {}",
                        row,
                        line.chars().count(),
                        width
                    ),
                });
            }

            let y = height - 1 - row as i32;
            for (x, ch) in line.chars().enumerate() {
                let pos = Position::new(x as i32, y);
                match ch {
                    '%' => layout.walls.push(pos),
                    '.' => layout.food.push(pos),
                    'o' => layout.capsules.push(pos),
                    'G' | '1'..='4' => layout.ghosts.push(GhostObservation::new(pos, 0)),
                    'P' => {
                        if agent_found {
                            return Err(SolverError::Layout {
                                message: format!("second agent at ({}, {})", pos.x, pos.y),
                            });
                        }
                        layout.agent = pos;
                        agent_found = true;
                    }
                    ' ' => {}
                    other => {
                        return Err(SolverError::Layout {
                            message: format!("unknown character '{}' at ({}, {})", other, pos.x, pos.y),
                        });
                    }
                }
            }
        }

        if !agent_found {
            return Err(SolverError::Layout {
                message: "no agent 'P' found".to_string(),
            });
        }

        Ok(layout)
    }

    /// Load a layout file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| SolverError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&contents)
    }

    fn is_wall_at(&self, pos: Position) -> bool {
        self.walls.contains(&pos)
    }

    /// Stop plus every cardinal move that lands on a free square
    pub fn legal_actions_at(&self, pos: Position) -> Vec<Action> {
        let mut legal: Vec<Action> = Action::CARDINALS
            .into_iter()
            .filter(|&action| {
                pos.step(action).map_or(false, |next| {
                    next.x >= 0
                        && next.x < self.width
                        && next.y >= 0
                        && next.y < self.height
                        && !self.is_wall_at(next)
                })
            })
            .collect();
        legal.push(Action::Stop);
        legal
    }

    /// Empty grid with this layout's walls
    pub fn grid(&self) -> Result<Grid> {
        Grid::with_walls(self.width, self.height, &self.walls)
    }

    /// Move the agent if the target is a free square inside the level
    pub fn move_agent(&mut self, pos: Position) -> bool {
        let inside = pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height;
        if inside && !self.is_wall_at(pos) {
            self.agent = pos;
            true
        } else {
            false
        }
    }

    /// Add food to a free square, or remove it if already there
    pub fn toggle_food(&mut self, pos: Position) {
        if let Some(index) = self.food.iter().position(|&f| f == pos) {
            self.food.remove(index);
        } else if !self.is_wall_at(pos) {
            self.food.push(pos);
        }
    }

    /// Render back to `.lay` text
    pub fn to_text(&self) -> String {
        let mut result = String::new();
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                let pos = Position::new(x, y);
                let symbol = if pos == self.agent {
                    'P'
                } else if self.ghosts.iter().any(|g| g.position == pos) {
                    'G'
                } else if self.is_wall_at(pos) {
                    '%'
                } else if self.capsules.contains(&pos) {
                    'o'
                } else if self.food.contains(&pos) {
                    '.'
                } else {
                    ' '
                };
                result.push(symbol);
            }
            result.push('\n');
        }
        result
    }
}

impl Environment for Layout {
    fn corners(&self) -> Vec<Position> {
        vec![
            Position::new(0, 0),
            Position::new(self.width - 1, 0),
            Position::new(0, self.height - 1),
            Position::new(self.width - 1, self.height - 1),
        ]
    }

    fn walls(&self) -> Vec<Position> {
        self.walls.clone()
    }

    fn agent_position(&self) -> Position {
        self.agent
    }

    fn legal_actions(&self) -> Vec<Action> {
        self.legal_actions_at(self.agent)
    }

    fn food(&self) -> Vec<Position> {
        self.food.clone()
    }

    fn capsules(&self) -> Vec<Position> {
        self.capsules.clone()
    }

    fn ghost_states(&self) -> Vec<((f64, f64), u32)> {
        self.ghosts
            .iter()
            .map(|g| ((g.position.x as f64, g.position.y as f64), g.scared_timer))
            .collect()
    }
}
