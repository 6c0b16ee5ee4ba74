//! 3D renderer: walls, stones and rings as cubes, food as spheres, seen
//! through a camera that orbits the board centre.

use macroquad::prelude::*;

use crate::error::SinkError;
use crate::events::RenderSink;
use crate::frame::Frame;
use crate::grid::CellState;
use crate::planar::ring_color;

pub struct VolumetricView {
    /// Camera angle around the board centre, radians
    pub yaw: f32,
    pub distance: f32,
    pub height: f32,
}

impl Default for VolumetricView {
    fn default() -> Self {
        VolumetricView {
            yaw: std::f32::consts::FRAC_PI_2,
            distance: 26.0,
            height: 20.0,
        }
    }
}

impl VolumetricView {
    /// Rotate the camera by `delta` radians
    pub fn orbit(&mut self, delta: f32) {
        self.yaw = (self.yaw + delta).rem_euclid(std::f32::consts::TAU);
    }

    fn camera(&self, frame: &Frame) -> Camera3D {
        let centre = vec3(frame.cols as f32 / 2.0, 0.0, frame.rows as f32 / 2.0);
        Camera3D {
            position: centre + vec3(self.distance * self.yaw.cos(), self.height, self.distance * self.yaw.sin()),
            target: centre,
            up: Vec3::Y,
            ..Default::default()
        }
    }
}

impl RenderSink for VolumetricView {
    fn render(&mut self, frame: &Frame) -> Result<(), SinkError> {
        clear_background(WHITE);
        set_camera(&self.camera(frame));

        for cell in &frame.cells {
            let at = vec3(cell.pos.col as f32, 0.0, cell.pos.row as f32);
            if cell.wall {
                draw_cube(at + vec3(0.0, 0.5, 0.0), Vec3::ONE, None, RED);
            } else if cell.state == CellState::Obstacle {
                draw_cube(at + vec3(0.0, 0.5, 0.0), Vec3::ONE, None, BLACK);
            } else {
                draw_cube_wires(at, vec3(1.0, 0.0, 1.0), DARKGRAY);
            }
        }

        for food in &frame.foods {
            draw_sphere(
                vec3(food.col as f32, 0.5, food.row as f32),
                0.5,
                None,
                Color::from_rgba(246, 252, 45, 255),
            );
        }

        for snake in &frame.snakes {
            for ring in &snake.rings {
                draw_cube(
                    vec3(ring.pos.col as f32, 0.5, ring.pos.row as f32),
                    vec3(0.9, 0.9, 0.9),
                    None,
                    ring_color(snake.kind, ring.tag),
                );
            }
        }

        set_default_camera();
        Ok(())
    }
}
