//! Flat top-down renderer and the text panel.

use macroquad::prelude::*;

use crate::error::SinkError;
use crate::events::{HudSink, RenderSink};
use crate::frame::Frame;
use crate::grid::CellState;
use crate::hud::HudState;
use crate::types::{RingTag, SnakeKind};

/// Ring colour: heads carry the snake's colour, bodies light green, tails blue
pub fn ring_color(kind: SnakeKind, tag: RingTag) -> Color {
    match (kind, tag) {
        (SnakeKind::Player, RingTag::Head) => ORANGE,
        (SnakeKind::Agent, RingTag::Head) => Color::from_rgba(45, 128, 32, 255),
        (_, RingTag::Body) => Color::from_rgba(144, 238, 144, 255),
        (_, RingTag::Tail) => BLUE,
    }
}

pub struct PlanarView {
    pub cell_size: f32,
    pub background: Color,
}

impl PlanarView {
    pub fn new(cell_size: f32, background: Color) -> Self {
        PlanarView { cell_size, background }
    }

    fn cell_color(state: CellState, wall: bool) -> Color {
        match state {
            CellState::Obstacle => BLACK,
            CellState::Occupied if wall => RED,
            CellState::Occupied | CellState::Empty => WHITE,
        }
    }
}

impl RenderSink for PlanarView {
    fn render(&mut self, frame: &Frame) -> Result<(), SinkError> {
        set_default_camera();
        clear_background(self.background);
        let size = self.cell_size;

        for cell in &frame.cells {
            let px = cell.pos.col as f32 * size;
            let py = cell.pos.row as f32 * size;
            draw_rectangle(px, py, size, size, Self::cell_color(cell.state, cell.wall));
            draw_rectangle_lines(px, py, size, size, 1.0, LIGHTGRAY);
        }

        for food in &frame.foods {
            draw_circle(
                food.col as f32 * size + size / 2.0,
                food.row as f32 * size + size / 2.0,
                size / 2.0,
                ORANGE,
            );
        }

        for snake in &frame.snakes {
            for ring in &snake.rings {
                draw_rectangle(
                    ring.pos.col as f32 * size,
                    ring.pos.row as f32 * size,
                    size,
                    size,
                    ring_color(snake.kind, ring.tag),
                );
            }
        }
        Ok(())
    }
}

/// Draws the panel lines in the top-left corner over whichever view is active
pub struct TextPanel {
    pub font_size: f32,
}

impl Default for TextPanel {
    fn default() -> Self {
        TextPanel { font_size: 18.0 }
    }
}

impl HudSink for TextPanel {
    fn refresh(&mut self, hud: &HudState) -> Result<(), SinkError> {
        set_default_camera();
        let lines = hud.lines();
        let height = self.font_size * (lines.len() as f32 + 0.5);
        draw_rectangle(4.0, 4.0, 280.0, height, Color::from_rgba(0, 0, 0, 160));
        for (i, line) in lines.iter().enumerate() {
            draw_text(line, 10.0, 4.0 + self.font_size * (i as f32 + 1.0), self.font_size, WHITE);
        }
        Ok(())
    }
}
