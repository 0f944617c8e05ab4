use crate::action::Action;
use crate::error::Result;
use crate::grid::{Grid, Position};
use crate::policy::{best_action, TransitionModel};

fn render_values(grid: &Grid, value: impl Fn(Position) -> Result<f64>) -> Result<String> {
    let mut result = String::new();
    for y in (0..grid.height()).rev() {
        let mut fields = Vec::with_capacity(grid.width() as usize);
        for x in 0..grid.width() {
            let pos = Position::new(x, y);
            if grid.is_wall(pos)? {
                fields.push(format!("{:>8}", "%"));
            } else {
                fields.push(format!("{:>8.3}", value(pos)?));
            }
        }
        result.push_str(&fields.join(" "));
        result.push('\n');
    }
    Ok(result)
}

/// Utility table, top row first as seen on screen
pub fn utilities_to_string(grid: &Grid) -> Result<String> {
    render_values(grid, |pos| grid.utility(pos))
}

/// Reward table, top row first as seen on screen
pub fn rewards_to_string(grid: &Grid) -> Result<String> {
    render_values(grid, |pos| grid.reward(pos))
}

/// One arrow per free cell pointing along the greedy policy over the moves
/// that do not walk into a wall.
pub fn policy_to_string(grid: &Grid, model: &TransitionModel) -> Result<String> {
    let mut result = String::new();
    for y in (0..grid.height()).rev() {
        for x in 0..grid.width() {
            let pos = Position::new(x, y);
            if grid.is_wall(pos)? {
                result.push('%');
                continue;
            }
            let mut open = Vec::with_capacity(4);
            for action in Action::CARDINALS {
                if let Some(next) = grid.neighbor(pos, action) {
                    if !grid.is_wall(next)? {
                        open.push(action);
                    }
                }
            }
            let values = model.expected_utilities(grid, pos)?;
            let symbol = best_action(&values, &open)
                .map(Action::symbol)
                .unwrap_or(Action::Stop.symbol());
            result.push(symbol);
        }
        result.push('\n');
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_row_is_printed_first() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.set_utility(Position::new(0, 1), 1.0).unwrap();
        grid.set_wall(Position::new(1, 0)).unwrap();
        let text = utilities_to_string(&grid).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "   1.000    0.000");
        assert_eq!(lines[1], "   0.000        %");
    }

    #[test]
    fn enclosed_cell_shows_stop() {
        let walls = [
            Position::new(1, 0),
            Position::new(0, 1),
            Position::new(2, 1),
            Position::new(1, 2),
        ];
        let grid = Grid::with_walls(3, 3, &walls).unwrap();
        let map = policy_to_string(&grid, &TransitionModel::default()).unwrap();
        assert_eq!(map.lines().nth(1), Some("%*%"));
    }
}
