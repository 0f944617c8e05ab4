mod common;

use common::{layout_files, load_layout};
use mdpgrid::{Action, Environment, Layout, Position, SolverError};

const CORRIDOR: &str = "\
%%%%%
%P.G%
%o  %
%%%%%
";

#[test]
fn first_line_is_the_top_row() {
    let layout = Layout::parse(CORRIDOR).unwrap();
    assert_eq!((layout.width, layout.height), (5, 4));
    assert_eq!(layout.agent, Position::new(1, 2));
    assert_eq!(layout.food, vec![Position::new(2, 2)]);
    assert_eq!(layout.capsules, vec![Position::new(1, 1)]);
    assert_eq!(layout.ghosts.len(), 1);
    assert_eq!(layout.ghosts[0].position, Position::new(3, 2));
    assert!(!layout.ghosts[0].is_scared());
    assert_eq!(layout.walls.len(), 5 + 5 + 2 + 2);
}

#[test]
fn legal_actions_follow_walls() {
    let layout = Layout::parse(CORRIDOR).unwrap();
    assert_eq!(
        layout.legal_actions(),
        vec![Action::South, Action::East, Action::Stop]
    );
}

#[test]
fn corners_span_the_level() {
    let layout = Layout::parse(CORRIDOR).unwrap();
    let corners = layout.corners();
    assert!(corners.contains(&Position::new(0, 0)));
    assert!(corners.contains(&Position::new(4, 3)));
}

#[test]
fn text_round_trips() {
    let layout = Layout::parse(CORRIDOR).unwrap();
    assert_eq!(layout.to_text(), CORRIDOR);
    assert_eq!(Layout::parse(&layout.to_text()).unwrap(), layout);
}

#[test]
fn rows_of_spaces_are_kept() {
    let layout = Layout::parse("  G\n   \nP  \n\n\n").unwrap();
    assert_eq!((layout.width, layout.height), (3, 3));
    assert_eq!(layout.agent, Position::new(0, 0));
    assert_eq!(layout.ghosts[0].position, Position::new(2, 2));
}

#[test]
fn blank_line_inside_a_level_is_rejected() {
    assert!(matches!(
        Layout::parse("%%%\n\n%P%\n%%%\n"),
        Err(SolverError::Layout { .. })
    ));
}

#[test]
fn windows_line_endings_are_accepted() {
    let text = CORRIDOR.replace('\n', "\r\n");
    assert_eq!(Layout::parse(&text).unwrap(), Layout::parse(CORRIDOR).unwrap());
}

#[test]
fn malformed_layouts_are_rejected() {
    let cases = [
        "",
        "%%%\n%%\n",
        "%%%\n% %\n%%%\n",
        "%%%%\n%PP%\n%%%%\n",
        "%%%\n%P#\n%%%\n",
    ];
    for text in cases {
        assert!(
            matches!(Layout::parse(text), Err(SolverError::Layout { .. })),
            "accepted {:?}",
            text
        );
    }
}

#[test]
fn editing_helpers_respect_walls() {
    let mut layout = Layout::parse(CORRIDOR).unwrap();
    assert!(!layout.move_agent(Position::new(0, 0)));
    assert!(!layout.move_agent(Position::new(9, 9)));
    assert!(layout.move_agent(Position::new(2, 1)));
    assert_eq!(layout.agent, Position::new(2, 1));

    layout.toggle_food(Position::new(2, 2));
    assert!(layout.food.is_empty());
    layout.toggle_food(Position::new(3, 1));
    assert_eq!(layout.food, vec![Position::new(3, 1)]);
    layout.toggle_food(Position::new(0, 0));
    assert_eq!(layout.food.len(), 1);
}

#[test]
fn every_layout_file_parses() {
    let files = layout_files();
    assert!(!files.is_empty(), "no layouts under test_data/layouts");
    for path in files {
        let layout = Layout::load(&path).unwrap_or_else(|e| panic!("{}: {}", path.display(), e));
        let grid = layout.grid().unwrap();
        assert_eq!(grid.walls().len(), layout.walls.len());
        assert!(!grid.is_wall(layout.agent).unwrap());
    }
}

#[test]
fn small_grid_has_two_pellets() {
    let layout = load_layout("smallGrid.lay");
    assert_eq!((layout.width, layout.height), (7, 6));
    assert_eq!(layout.agent, Position::new(4, 1));
    assert_eq!(layout.food.len(), 2);
}

#[test]
fn missing_file_is_an_io_error() {
    assert!(matches!(
        Layout::load(std::path::Path::new("./test_data/layouts/does_not_exist.lay")),
        Err(SolverError::Io { .. })
    ));
}
