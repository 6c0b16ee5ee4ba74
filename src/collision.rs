//! Head-versus-entity tests for the player snake.
//!
//! Hits are returned as values in a fixed order instead of firing effects, so
//! the session decides what a tick with several hits means.

use crate::board::Board;
use crate::snake::Snake;
use crate::types::Position;

/// What the player's head ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    /// Head on the perimeter
    Wall,
    /// Head on its own ring `ring` (always >= 1)
    SelfBite { ring: usize },
    /// Head on ring `ring` of agent `agent`
    Agent { agent: usize, ring: usize },
    Obstacle(Position),
    Food(Position),
}

impl Collision {
    /// Every hit except food ends the session
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Collision::Food(_))
    }
}

/// Exact coordinate equality
pub fn check_collision(head: Position, target: Position) -> bool {
    head == target
}

/// True when `head` sits on the board's perimeter
pub fn check_bounds(head: Position, cols: i32, rows: i32) -> bool {
    head.row == 0 || head.row == rows - 1 || head.col == 0 || head.col == cols - 1
}

/// Rings beyond the head that the head overlaps
pub fn self_collisions(snake: &Snake) -> impl Iterator<Item = Collision> + '_ {
    let head = snake.head();
    snake
        .rings
        .iter()
        .enumerate()
        .skip(1)
        .filter(move |(_, r)| check_collision(head, r.pos))
        .map(|(ring, _)| Collision::SelfBite { ring })
}

/// Rings of `other` that `head` overlaps
pub fn snake_collisions(head: Position, agent: usize, other: &Snake) -> impl Iterator<Item = Collision> + '_ {
    other
        .rings
        .iter()
        .enumerate()
        .filter(move |(_, r)| check_collision(head, r.pos))
        .map(move |(ring, _)| Collision::Agent { agent, ring })
}

/// Every hit of the player's head this tick, in the order
/// wall, self, agents, obstacles, food. No category short-circuits another.
pub fn resolve(board: &Board) -> Vec<Collision> {
    let head = board.player.head();
    let mut hits = Vec::new();

    if check_bounds(head, board.grid.cols, board.grid.rows) {
        hits.push(Collision::Wall);
    }
    hits.extend(self_collisions(&board.player));
    for (i, agent) in board.agents.iter().enumerate() {
        hits.extend(snake_collisions(head, i, agent));
    }
    hits.extend(
        board
            .stones
            .iter()
            .filter(|&&s| check_collision(head, s))
            .map(|&s| Collision::Obstacle(s)),
    );
    hits.extend(
        board
            .foods
            .iter()
            .filter(|&&f| check_collision(head, f))
            .map(|&f| Collision::Food(f)),
    );
    hits
}
