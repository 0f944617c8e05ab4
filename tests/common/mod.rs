#![allow(dead_code)]

use mdpgrid::{Action, Environment, Grid, Layout, Position};
use std::fs;
use std::path::{Path, PathBuf};

/// Host stand-in with every observation spelled out by the test
#[derive(Debug, Clone, Default)]
pub struct FakeHost {
    pub width: i32,
    pub height: i32,
    pub walls: Vec<Position>,
    pub agent: Position,
    pub legal: Vec<Action>,
    pub food: Vec<Position>,
    pub capsules: Vec<Position>,
    pub ghosts: Vec<((f64, f64), u32)>,
}

impl FakeHost {
    /// Open room of the given size surrounded by a one-cell wall border
    pub fn walled_room(width: i32, height: i32) -> Self {
        FakeHost {
            width,
            height,
            walls: border(width, height),
            legal: vec![Action::North, Action::South, Action::East, Action::West, Action::Stop],
            ..Default::default()
        }
    }
}

impl Environment for FakeHost {
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
        self.legal.clone()
    }

    fn food(&self) -> Vec<Position> {
        self.food.clone()
    }

    fn capsules(&self) -> Vec<Position> {
        self.capsules.clone()
    }

    fn ghost_states(&self) -> Vec<((f64, f64), u32)> {
        self.ghosts.clone()
    }
}

/// Positions of a one-cell wall ring around a width x height level
pub fn border(width: i32, height: i32) -> Vec<Position> {
    let mut walls = Vec::new();
    for y in 0..height {
        for x in 0..width {
            if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                walls.push(Position::new(x, y));
            }
        }
    }
    walls
}

/// Grid without walls
pub fn open_grid(width: i32, height: i32) -> Grid {
    Grid::new(width, height).expect("valid dimensions")
}

/// Every `.lay` file under test_data/layouts, sorted by name
pub fn layout_files() -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = fs::read_dir("./test_data/layouts")
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .map(|entry| entry.path())
                .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("lay"))
                .collect()
        })
        .unwrap_or_default();
    paths.sort();
    paths
}

pub fn load_layout(name: &str) -> Layout {
    let path = Path::new("./test_data/layouts").join(name);
    Layout::load(&path).unwrap_or_else(|e| panic!("failed to load {}: {}", name, e))
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}
