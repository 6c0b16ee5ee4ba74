use rand::Rng;
use std::ops::RangeInclusive;
use tracing::debug;

use crate::error::EngineError;
use crate::grid::{CellState, Grid};
use crate::snake::Snake;
use crate::spawner::Spawner;
use crate::types::{Position, SnakeKind};

/// Smallest board that still has an interior once walls and the start
/// corridor are taken out
pub const MIN_SIDE: i32 = 5;

/// Board dimensions and population for one build
#[derive(Debug, Clone)]
pub struct Layout {
    pub cols: i32,
    pub rows: i32,
    pub stones: usize,
    pub foods: usize,
    pub agents: usize,
    pub player_length: usize,
    pub agent_length: RangeInclusive<usize>,
}

/// Grid, stones, food and snakes of one session
#[derive(Debug, Clone)]
pub struct Board {
    pub grid: Grid,
    pub stones: Vec<Position>,
    pub foods: Vec<Position>,
    pub player: Snake,
    pub agents: Vec<Snake>,
}

impl Board {
    /// Build a fresh board: walls, stones, food, the player, then agents
    pub fn build(layout: &Layout, spawner: &Spawner, rng: &mut impl Rng) -> Result<Self, EngineError> {
        if layout.cols < MIN_SIDE || layout.rows < MIN_SIDE {
            return Err(EngineError::InvalidBoard {
                cols: layout.cols,
                rows: layout.rows,
                reason: format!("both sides must be at least {MIN_SIDE}"),
            });
        }
        if layout.agent_length.is_empty() {
            return Err(EngineError::InvalidBoard {
                cols: layout.cols,
                rows: layout.rows,
                reason: "agent length range is empty".to_string(),
            });
        }

        let mut grid = Grid::new(layout.cols, layout.rows);
        let stones = spawner.place_obstacles(&mut grid, layout.stones, rng)?;
        let foods = spawner.place_food(&grid, layout.foods, rng)?;
        let player = Snake::spawn(SnakeKind::Player, layout.player_length, &mut grid, rng, spawner.max_attempts)?;

        let mut agents = Vec::with_capacity(layout.agents);
        for _ in 0..layout.agents {
            let length = rng.gen_range(layout.agent_length.clone());
            agents.push(Snake::spawn(SnakeKind::Agent, length, &mut grid, rng, spawner.max_attempts)?);
        }

        debug!(
            cols = layout.cols,
            rows = layout.rows,
            stones = stones.len(),
            foods = foods.len(),
            agents = agents.len(),
            "board built"
        );

        Ok(Board {
            grid,
            stones,
            foods,
            player,
            agents,
        })
    }

    /// True when any ring of any snake sits on `pos`
    fn covered(&self, pos: Position) -> bool {
        self.snakes().any(|s| s.positions().any(|p| p == pos))
    }

    /// Clear the vacated tail cell unless another ring still covers it, then
    /// mark the moved snake's rings occupied
    fn settle(grid: &mut Grid, snake: &Snake, vacated: Option<Position>) {
        if let Some(pos) = vacated {
            grid.set_state_at(pos, CellState::Empty);
        }
        for ring in snake.rings.iter().rev() {
            grid.set_state_at(ring.pos, CellState::Occupied);
        }
    }

    pub fn advance_player(&mut self) {
        let tail = self.player.tail();
        self.player.move_player();
        let vacated = Some(tail).filter(|&t| !self.covered(t));
        Self::settle(&mut self.grid, &self.player, vacated);
    }

    /// Move every agent in turn; later agents see the cells earlier ones
    /// just took, and a tail cell the player moved into stays occupied
    pub fn advance_agents(&mut self, rng: &mut impl Rng) {
        for i in 0..self.agents.len() {
            let tail = self.agents[i].tail();
            self.agents[i].move_agent(&self.grid, rng);
            let vacated = Some(tail).filter(|&t| !self.covered(t));
            Self::settle(&mut self.grid, &self.agents[i], vacated);
        }
    }

    /// Remove one food item; false when nothing was there
    pub fn remove_food(&mut self, pos: Position) -> bool {
        match self.foods.iter().position(|&f| f == pos) {
            Some(i) => {
                self.foods.swap_remove(i);
                true
            }
            None => false,
        }
    }

    pub fn snakes(&self) -> impl Iterator<Item = &Snake> {
        std::iter::once(&self.player).chain(self.agents.iter())
    }
}
