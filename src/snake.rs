use rand::Rng;

use crate::error::EngineError;
use crate::grid::{CellState, Grid};
use crate::types::{Direction, Position, Ring, RingTag, SnakeKind};

/// An agent re-rolls its heading when a 0..=10 roll lands at or below this
const WANDER_THRESHOLD: u32 = 3;

/// Ordered chain of rings, head first
#[derive(Debug, Clone)]
pub struct Snake {
    pub kind: SnakeKind,
    pub rings: Vec<Ring>,
    /// Heading used by the next move
    pub direction: Direction,
}

impl Snake {
    /// Build a snake from explicit rings, head first. Tags are assigned from
    /// the ring order.
    pub fn from_positions(kind: SnakeKind, positions: &[Position], direction: Direction) -> Self {
        let last = positions.len().saturating_sub(1);
        let rings = positions
            .iter()
            .enumerate()
            .map(|(i, &pos)| {
                let tag = if i == 0 {
                    RingTag::Head
                } else if i == last {
                    RingTag::Tail
                } else {
                    RingTag::Body
                };
                Ring::new(pos, tag)
            })
            .collect();
        Self { kind, rings, direction }
    }

    /// Seed a head on a random empty interior cell and grow the chain to
    /// `size` rings, marking every ring `Occupied`. A seed that cannot be
    /// grown is rolled back and the whole snake is reseeded, up to
    /// `max_attempts` seeds.
    pub fn spawn(
        kind: SnakeKind,
        size: usize,
        grid: &mut Grid,
        rng: &mut impl Rng,
        max_attempts: usize,
    ) -> Result<Self, EngineError> {
        let size = size.max(1);
        for _ in 0..max_attempts {
            let head = Position::new(rng.gen_range(1..=grid.cols - 2), rng.gen_range(1..=grid.rows - 2));
            if grid.state_at(head) != Some(CellState::Empty) {
                continue;
            }
            let Some(positions) = Self::hydrate(head, size, grid) else {
                continue;
            };

            let direction = match kind {
                SnakeKind::Agent => Direction::random(rng),
                SnakeKind::Player => away_from_neck(&positions).unwrap_or_else(|| Direction::random(rng)),
            };
            return Ok(Self::from_positions(kind, &positions, direction));
        }

        Err(EngineError::PlacementExhausted {
            what: "snake",
            placed: 0,
            requested: size,
            attempts: max_attempts,
        })
    }

    /// Grow a chain from `head` by attaching each ring to the first empty
    /// neighbour of the previous one (Up, Right, Down, Left). Returns `None`
    /// and restores the touched cells when a ring has no empty neighbour.
    fn hydrate(head: Position, size: usize, grid: &mut Grid) -> Option<Vec<Position>> {
        let mut positions = vec![head];
        grid.set_state_at(head, CellState::Occupied);

        for _ in 1..size {
            let prev = positions[positions.len() - 1];
            let next = Direction::ALL
                .iter()
                .map(|&d| prev.step(d))
                .find(|&p| grid.state_at(p) == Some(CellState::Empty));

            match next {
                Some(pos) => {
                    grid.set_state_at(pos, CellState::Occupied);
                    positions.push(pos);
                }
                None => {
                    for pos in positions {
                        grid.set_state_at(pos, CellState::Empty);
                    }
                    return None;
                }
            }
        }
        Some(positions)
    }

    pub fn head(&self) -> Position {
        self.rings[0].pos
    }

    pub fn tail(&self) -> Position {
        self.rings[self.rings.len() - 1].pos
    }

    pub fn len(&self) -> usize {
        self.rings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.rings.iter().map(|r| r.pos)
    }

    /// Shift every ring onto its predecessor and advance the head one cell
    fn shift(&mut self) {
        for i in (1..self.rings.len()).rev() {
            self.rings[i].pos = self.rings[i - 1].pos;
        }
        self.rings[0].pos = self.rings[0].pos.step(self.direction);
    }

    /// Player move: unconditional shift. Whatever the head lands on is judged
    /// afterwards by the collision pass.
    pub fn move_player(&mut self) {
        self.shift();
    }

    /// Agent move: advance or turn, then maybe wander. Returns whether the
    /// snake advanced.
    pub fn move_agent(&mut self, grid: &Grid, rng: &mut impl Rng) -> bool {
        let start = self.direction;
        let moved = self.advance_or_turn(grid, rng);
        self.wander(rng, start);
        moved
    }

    /// Advance into an empty cell, turn clockwise at a stone, pick a fresh
    /// heading at anything occupied
    fn advance_or_turn(&mut self, grid: &Grid, rng: &mut impl Rng) -> bool {
        let start = self.direction;
        match grid.state_at(self.head().step(start)) {
            Some(CellState::Empty) => {
                self.shift();
                true
            }
            Some(CellState::Obstacle) => {
                self.direction = start.clockwise();
                false
            }
            Some(CellState::Occupied) | None => {
                self.direction = Direction::random_except(rng, &[start.opposite()]);
                false
            }
        }
    }

    /// Random heading change on a low roll. Never reverses the current
    /// heading nor the heading the pass started with.
    fn wander(&mut self, rng: &mut impl Rng, start: Direction) {
        let roll: u32 = rng.gen_range(0..=10);
        if roll <= WANDER_THRESHOLD {
            let current = self.direction;
            self.direction = Direction::random_except(rng, &[current.opposite(), start.opposite()]);
        }
    }

    /// Direction intent from the player; the exact reverse of the current
    /// heading is ignored
    pub fn steer(&mut self, direction: Direction) -> bool {
        if direction == self.direction.opposite() {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Append a ring on top of the current tail. It separates from the old
    /// tail on the next shift.
    pub fn grow(&mut self) {
        let last = self.rings.len() - 1;
        if last > 0 {
            self.rings[last].tag = RingTag::Body;
        }
        let pos = self.rings[last].pos;
        self.rings.push(Ring::new(pos, RingTag::Tail));
    }
}

/// Heading that points from the head away from the second ring
fn away_from_neck(positions: &[Position]) -> Option<Direction> {
    let (head, neck) = (positions.first()?, positions.get(1)?);
    Direction::ALL
        .iter()
        .find(|&&d| head.step(d) == *neck)
        .map(|d| d.opposite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn line(len: i32) -> Snake {
        let positions: Vec<Position> = (0..len).map(|i| Position::new(10 - i, 5)).collect();
        Snake::from_positions(SnakeKind::Player, &positions, Direction::Right)
    }

    #[test]
    fn test_from_positions_tags() {
        let snake = line(4);
        assert_eq!(snake.rings[0].tag, RingTag::Head);
        assert_eq!(snake.rings[1].tag, RingTag::Body);
        assert_eq!(snake.rings[3].tag, RingTag::Tail);
    }

    #[test]
    fn test_move_player_shifts() {
        let mut snake = line(4);
        let before: Vec<Position> = snake.positions().collect();
        snake.move_player();
        assert_eq!(snake.head(), Position::new(11, 5));
        for i in 1..4 {
            assert_eq!(snake.rings[i].pos, before[i - 1]);
        }
    }

    #[test]
    fn test_steer_rejects_reverse() {
        let mut snake = line(3);
        assert!(!snake.steer(Direction::Left));
        assert_eq!(snake.direction, Direction::Right);
        assert!(snake.steer(Direction::Up));
        assert!(!snake.steer(Direction::Down));
        // judged against the current heading, Up, so Left is a turn
        assert!(snake.steer(Direction::Left));
        assert_eq!(snake.direction, Direction::Left);
        assert!(!snake.steer(Direction::Right));
    }

    #[test]
    fn test_grow_duplicates_tail() {
        let mut snake = line(3);
        let tail = snake.tail();
        snake.grow();
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.tail(), tail);
        assert_eq!(snake.rings[2].tag, RingTag::Body);
        assert_eq!(snake.rings[3].tag, RingTag::Tail);

        snake.move_player();
        assert_eq!(snake.rings[3].pos, tail);
        assert_ne!(snake.rings[2].pos, tail);
    }

    #[test]
    fn test_spawn_marks_rings() {
        let mut grid = Grid::new(20, 15);
        let mut rng = StdRng::seed_from_u64(11);
        let snake = Snake::spawn(SnakeKind::Player, 4, &mut grid, &mut rng, 100).unwrap();
        assert_eq!(snake.len(), 4);
        for pos in snake.positions() {
            assert!(!grid.is_wall(pos.col, pos.row));
            assert_eq!(grid.state_at(pos), Some(CellState::Occupied));
        }
        // player starts heading away from its own body
        assert_ne!(snake.head().step(snake.direction), snake.rings[1].pos);
    }

    #[test]
    fn test_spawn_rolls_back_on_failure() {
        // 3x3 board has a single interior cell, so a 2-ring snake never fits
        let mut grid = Grid::new(3, 3);
        let mut rng = StdRng::seed_from_u64(2);
        let err = Snake::spawn(SnakeKind::Agent, 2, &mut grid, &mut rng, 10).unwrap_err();
        assert!(matches!(err, EngineError::PlacementExhausted { what: "snake", .. }));
        assert_eq!(grid.state(1, 1), Some(CellState::Empty));
    }

    #[test]
    fn test_agent_turns_clockwise_at_stone() {
        let mut grid = Grid::new(20, 20);
        grid.set_state(11, 5, CellState::Obstacle);
        let mut snake = line(3);
        snake.kind = SnakeKind::Agent;
        let mut rng = StdRng::seed_from_u64(5);
        let before: Vec<Position> = snake.positions().collect();
        let moved = snake.move_agent(&grid, &mut rng);
        assert!(!moved);
        assert_eq!(snake.positions().collect::<Vec<_>>(), before);
        assert_ne!(snake.direction, Direction::Left);
    }

    #[test]
    fn test_stone_turn_is_exactly_clockwise() {
        let mut grid = Grid::new(20, 20);
        let mut rng = StdRng::seed_from_u64(5);
        let mut snake = line(3);
        snake.kind = SnakeKind::Agent;

        grid.set_state(11, 5, CellState::Obstacle);
        assert!(!snake.advance_or_turn(&grid, &mut rng));
        assert_eq!(snake.direction, Direction::Down);

        grid.set_state(10, 6, CellState::Obstacle);
        assert!(!snake.advance_or_turn(&grid, &mut rng));
        assert_eq!(snake.direction, Direction::Left);
        assert_eq!(snake.head(), Position::new(10, 5));
    }

    #[test]
    fn test_agent_advances_into_empty() {
        let grid = Grid::new(20, 20);
        let mut snake = line(3);
        let mut rng = StdRng::seed_from_u64(8);
        assert!(snake.move_agent(&grid, &mut rng));
        assert_eq!(snake.head(), Position::new(11, 5));
    }
}
