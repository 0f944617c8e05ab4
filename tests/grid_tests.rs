mod common;

use common::open_grid;
use mdpgrid::{Action, Grid, Position, SolverError};

#[test]
fn new_grid_is_empty() {
    let grid = open_grid(4, 3);
    assert_eq!(grid.width(), 4);
    assert_eq!(grid.height(), 3);
    for pos in grid.positions() {
        assert!(!grid.is_wall(pos).unwrap());
        assert_eq!(grid.reward(pos).unwrap(), 0.0);
        assert_eq!(grid.utility(pos).unwrap(), 0.0);
    }
    assert_eq!(grid.positions().count(), 12);
}

#[test]
fn setters_touch_only_their_cell() {
    let mut grid = open_grid(3, 3);
    let pos = Position::new(2, 1);
    grid.set_reward(pos, 5.0).unwrap();
    grid.set_utility(pos, 1.25).unwrap();
    grid.set_wall(Position::new(0, 0)).unwrap();

    assert_eq!(grid.reward(pos).unwrap(), 5.0);
    assert_eq!(grid.utility(pos).unwrap(), 1.25);
    assert!(grid.is_wall(Position::new(0, 0)).unwrap());
    assert!(!grid.is_wall(pos).unwrap());
    assert_eq!(grid.reward(Position::new(1, 1)).unwrap(), 0.0);
    assert_eq!(grid.walls(), vec![Position::new(0, 0)]);
}

#[test]
fn every_accessor_rejects_out_of_bounds() {
    let mut grid = open_grid(3, 2);
    let outside = [
        Position::new(-1, 0),
        Position::new(0, -1),
        Position::new(3, 0),
        Position::new(0, 2),
    ];
    let inside = Position::new(1, 1);

    for pos in outside {
        assert!(matches!(grid.is_wall(pos), Err(SolverError::OutOfBounds { .. })));
        assert!(matches!(grid.reward(pos), Err(SolverError::OutOfBounds { .. })));
        assert!(matches!(grid.utility(pos), Err(SolverError::OutOfBounds { .. })));
        assert!(matches!(grid.set_wall(pos), Err(SolverError::OutOfBounds { .. })));
        assert!(matches!(grid.set_reward(pos, 1.0), Err(SolverError::OutOfBounds { .. })));
        assert!(matches!(grid.set_utility(pos, 1.0), Err(SolverError::OutOfBounds { .. })));
        assert!(matches!(grid.neighbor_utility(pos, inside), Err(SolverError::OutOfBounds { .. })));
        assert!(matches!(grid.neighbor_utility(inside, pos), Err(SolverError::OutOfBounds { .. })));
    }
}

#[test]
fn out_of_bounds_reports_coordinates() {
    let grid = open_grid(3, 2);
    match grid.reward(Position::new(7, -2)) {
        Err(SolverError::OutOfBounds { x, y, width, height }) => {
            assert_eq!((x, y, width, height), (7, -2, 3, 2));
        }
        other => panic!("expected OutOfBounds, got {:?}", other),
    }
}

#[test]
fn wall_neighbor_reflects_own_utility() {
    let mut grid = open_grid(3, 3);
    let wall = Position::new(1, 1);
    grid.set_wall(wall).unwrap();
    grid.set_utility(wall, 99.0).unwrap();

    for (i, pos) in [
        Position::new(1, 0),
        Position::new(0, 1),
        Position::new(2, 1),
        Position::new(1, 2),
    ]
    .into_iter()
    .enumerate()
    {
        let own = i as f64 + 0.5;
        grid.set_utility(pos, own).unwrap();
        assert_eq!(grid.neighbor_utility(wall, pos).unwrap(), own);
    }

    // The wall keeps whatever was written to it
    assert_eq!(grid.utility(wall).unwrap(), 99.0);
}

#[test]
fn free_neighbor_reports_its_own_utility() {
    let mut grid = open_grid(2, 1);
    grid.set_utility(Position::new(0, 0), 1.0).unwrap();
    grid.set_utility(Position::new(1, 0), 7.0).unwrap();
    assert_eq!(grid.neighbor_utility(Position::new(1, 0), Position::new(0, 0)).unwrap(), 7.0);
}

#[test]
fn neighbor_stops_at_the_edge() {
    let grid = open_grid(2, 2);
    let corner = Position::new(0, 0);
    assert_eq!(grid.neighbor(corner, Action::North), Some(Position::new(0, 1)));
    assert_eq!(grid.neighbor(corner, Action::East), Some(Position::new(1, 0)));
    assert_eq!(grid.neighbor(corner, Action::South), None);
    assert_eq!(grid.neighbor(corner, Action::West), None);
}

#[test]
fn clear_rewards_keeps_walls_and_utilities() {
    let mut grid = open_grid(2, 2);
    grid.set_wall(Position::new(1, 1)).unwrap();
    grid.set_reward(Position::new(0, 0), 5.0).unwrap();
    grid.set_utility(Position::new(0, 0), 2.0).unwrap();

    grid.clear_rewards();

    assert_eq!(grid.reward(Position::new(0, 0)).unwrap(), 0.0);
    assert_eq!(grid.utility(Position::new(0, 0)).unwrap(), 2.0);
    assert!(grid.is_wall(Position::new(1, 1)).unwrap());
}

#[test]
fn utility_field_replacement_checks_length() {
    let mut grid = open_grid(2, 2);
    grid.set_utilities(vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    assert_eq!(grid.utility(Position::new(1, 1)).unwrap(), 4.0);
    assert_eq!(grid.utilities(), vec![1.0, 2.0, 3.0, 4.0]);

    assert!(matches!(
        grid.set_utilities(vec![0.0; 3]),
        Err(SolverError::InvalidDimensions { .. })
    ));
}

#[test]
fn with_walls_rejects_walls_off_the_grid() {
    assert!(Grid::with_walls(2, 2, &[Position::new(2, 2)]).is_err());
}

#[test]
fn cell_count_overflow_is_invalid_dimensions() {
    for (width, height) in [(65536, 65536), (i32::MAX, 2)] {
        assert!(matches!(
            Grid::new(width, height),
            Err(SolverError::InvalidDimensions { .. })
        ));
    }
}

#[test]
fn neighbors_past_i32_range_are_off_grid() {
    let grid = open_grid(3, 3);
    assert_eq!(grid.neighbor(Position::new(1, i32::MAX), Action::North), None);
    assert_eq!(grid.neighbor(Position::new(i32::MIN, 1), Action::West), None);
}
