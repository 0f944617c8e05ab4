use arboard::Clipboard;
use macroquad::prelude::*;
use mdpgrid::render::{policy_to_string, utilities_to_string};
use mdpgrid::{Action, Config, Decision, Layout, MdpAgent, Position, WorldSnapshot};
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();
}

/// Visualization state
struct VisState {
    config: Config,
    layout: Layout,
    agent: MdpAgent,
    decision: Decision,
    show_rewards: bool,
    cell_size: f32,
}

impl VisState {
    fn new(config: Config, layout: Layout) -> mdpgrid::Result<Self> {
        let (agent, decision) = Self::plan(&config, &layout)?;
        Ok(VisState {
            cell_size: config.viewer.cell_size,
            config,
            layout,
            agent,
            decision,
            show_rewards: false,
        })
    }

    /// Rebuild the agent for the current layout and take one decision
    fn plan(config: &Config, layout: &Layout) -> mdpgrid::Result<(MdpAgent, Decision)> {
        let mut agent = MdpAgent::register_initial_state(layout, config)?;
        let decision = agent.decide(&WorldSnapshot::observe(layout))?;
        Ok((agent, decision))
    }

    /// Plan on `layout` and switch to it only if planning succeeds.
    /// On failure the current layout, agent and decision are kept.
    fn apply(&mut self, layout: Layout) -> bool {
        match Self::plan(&self.config, &layout) {
            Ok((agent, decision)) => {
                self.layout = layout;
                self.agent = agent;
                self.decision = decision;
                true
            }
            Err(e) => {
                tracing::error!("Planning failed: {}", e);
                false
            }
        }
    }

    /// Screen row 0 is the top of the level, the largest y
    fn cell_at(&self, mouse_x: f32, mouse_y: f32) -> Option<Position> {
        let column = (mouse_x / self.cell_size) as i32;
        let row = (mouse_y / self.cell_size) as i32;
        let pos = Position::new(column, self.layout.height - 1 - row);
        if mouse_x >= 0.0 && mouse_y >= 0.0 && self.agent.grid().contains(pos) {
            Some(pos)
        } else {
            None
        }
    }

    fn handle_click(&mut self, mouse_x: f32, mouse_y: f32) {
        let Some(pos) = self.cell_at(mouse_x, mouse_y) else {
            return;
        };

        let mut edited = self.layout.clone();
        // Left click: toggle food
        if is_mouse_button_pressed(MouseButton::Left) {
            edited.toggle_food(pos);
            self.apply(edited);
        }
        // Right click: move agent
        else if is_mouse_button_pressed(MouseButton::Right) && edited.move_agent(pos) {
            self.apply(edited);
        }
    }

    fn copy_to_clipboard(&self) {
        let text = match utilities_to_string(self.agent.grid()) {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("Failed to render utilities: {}", e);
                return;
            }
        };
        match Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(&text) {
                    tracing::warn!("Failed to copy to clipboard: {}", e);
                } else {
                    tracing::info!("Utility table copied to clipboard");
                    // Keep clipboard alive for a moment to ensure clipboard managers can capture it
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }
            Err(e) => tracing::warn!("Failed to access clipboard: {}", e),
        }
    }

    fn paste_from_clipboard(&mut self) {
        let text = match Clipboard::new().and_then(|mut clipboard| clipboard.get_text()) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Failed to read clipboard: {}", e);
                return;
            }
        };
        match Layout::parse(&text) {
            Ok(layout) => {
                let (width, height) = (layout.width, layout.height);
                if self.apply(layout) {
                    tracing::info!("Pasted {}x{} layout", width, height);
                }
            }
            Err(e) => tracing::warn!("Clipboard does not hold a layout: {}", e),
        }
    }

    fn cell_color(&self, value: f64, scale: f64) -> Color {
        let t = if scale > 0.0 { (value / scale).clamp(-1.0, 1.0) as f32 } else { 0.0 };
        if t >= 0.0 {
            Color::new(0.15, 0.2 + 0.7 * t, 0.15, 1.0)
        } else {
            Color::new(0.2 - 0.7 * t, 0.15, 0.15, 1.0)
        }
    }

    fn draw(&self) {
        let viewer = &self.config.viewer;
        clear_background(Color::from_rgba(viewer.background_r, viewer.background_g, viewer.background_b, 255));

        let grid = self.agent.grid();
        let value_of = |pos: Position| {
            let cell = grid.cell(pos).ok();
            match (cell, self.show_rewards) {
                (Some(cell), true) => cell.reward,
                (Some(cell), false) => cell.utility,
                (None, _) => 0.0,
            }
        };
        let scale = grid
            .positions()
            .filter(|&pos| !grid.is_wall(pos).unwrap_or(true))
            .map(|pos| value_of(pos).abs())
            .fold(0.0, f64::max);

        let policy = policy_to_string(grid, &self.agent.solver().model).unwrap_or_default();
        let policy_rows: Vec<Vec<char>> = policy.lines().map(|line| line.chars().collect()).collect();

        // Draw grid cells
        for pos in grid.positions() {
            let row = self.layout.height - 1 - pos.y;
            let px = pos.x as f32 * self.cell_size;
            let py = row as f32 * self.cell_size;

            if grid.is_wall(pos).unwrap_or(true) {
                draw_rectangle(px, py, self.cell_size - 1.0, self.cell_size - 1.0, DARKBLUE);
                continue;
            }

            let color = self.cell_color(value_of(pos), scale);
            draw_rectangle(px, py, self.cell_size - 1.0, self.cell_size - 1.0, color);

            let center_x = px + self.cell_size * 0.5;
            let center_y = py + self.cell_size * 0.5;
            if pos == self.layout.agent {
                draw_circle(center_x, center_y, self.cell_size * 0.35, YELLOW);
            } else if self.layout.ghosts.iter().any(|g| g.position == pos) {
                draw_circle(center_x, center_y, self.cell_size * 0.35, PINK);
            } else if self.layout.capsules.contains(&pos) {
                draw_circle(center_x, center_y, self.cell_size * 0.2, WHITE);
            } else if self.layout.food.contains(&pos) {
                draw_circle(center_x, center_y, self.cell_size * 0.08, WHITE);
            }

            if let Some(symbol) = policy_rows.get(row as usize).and_then(|r| r.get(pos.x as usize)) {
                draw_text(&symbol.to_string(), px + 2.0, py + 12.0, 14.0, LIGHTGRAY);
            }
        }

        // Draw info
        let info_x = self.layout.width as f32 * self.cell_size + 10.0;
        let lines = [
            format!("Agent: ({}, {})", self.layout.agent.x, self.layout.agent.y),
            format!("Chosen: {}", self.decision.action),
            format!(
                "Sweeps: {} ({:?})",
                self.decision.outcome.sweeps, self.decision.outcome.termination
            ),
            format!("Showing: {}", if self.show_rewards { "rewards" } else { "utilities" }),
            "Left click: toggle food".to_string(),
            "Right click: move agent".to_string(),
            "R: toggle rewards/utilities".to_string(),
            "C: copy utilities to clipboard".to_string(),
            "V: paste layout from clipboard".to_string(),
            "Esc: close window".to_string(),
        ];
        for (i, line) in lines.iter().enumerate() {
            draw_text(line, info_x, 20.0 + i as f32 * 20.0, 20.0, WHITE);
        }

        let target = match self.decision.action {
            Action::Stop => None,
            action => self.layout.agent.step(action),
        };
        if let Some(target) = target {
            let row = self.layout.height - 1 - target.y;
            draw_rectangle_lines(
                target.x as f32 * self.cell_size,
                row as f32 * self.cell_size,
                self.cell_size - 1.0,
                self.cell_size - 1.0,
                2.0,
                YELLOW,
            );
        }
    }
}

#[macroquad::main("mdpgrid - value iteration")]
async fn main() {
    init_logging();

    let config = Config::load();
    let args: Vec<String> = std::env::args().collect();
    let layout_path = args
        .get(1)
        .cloned()
        .unwrap_or_else(|| config.viewer.layout_path.clone());

    let layout = match Layout::load(Path::new(&layout_path)) {
        Ok(layout) => layout,
        Err(e) => {
            tracing::error!("Failed to load layout '{}': {}", layout_path, e);
            return;
        }
    };

    let mut state = match VisState::new(config, layout) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Failed to plan on '{}': {}", layout_path, e);
            return;
        }
    };

    loop {
        // Handle input
        if is_mouse_button_pressed(MouseButton::Left) || is_mouse_button_pressed(MouseButton::Right) {
            let (mouse_x, mouse_y) = mouse_position();
            state.handle_click(mouse_x, mouse_y);
        }

        if is_key_pressed(KeyCode::R) {
            state.show_rewards = !state.show_rewards;
        }

        if is_key_pressed(KeyCode::C) {
            state.copy_to_clipboard();
        }

        if is_key_pressed(KeyCode::V) {
            state.paste_from_clipboard();
        }

        // Close window on Escape
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        state.draw();

        next_frame().await
    }
}
