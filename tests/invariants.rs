mod common;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use common::p;
use ringsnake::collision::self_collisions;
use ringsnake::{Board, CellState, Difficulty, Direction, Grid, Layout, Position, Snake, SnakeKind, Spawner};

fn difficulty() -> impl Strategy<Value = Difficulty> {
    prop_oneof![
        Just(Difficulty::Easy),
        Just(Difficulty::Medium),
        Just(Difficulty::Hard),
    ]
}

fn direction() -> impl Strategy<Value = Direction> {
    (0u8..4).prop_map(Direction::from_index)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn stones_keep_their_distance(seed in any::<u64>(), difficulty in difficulty()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut grid = Grid::new(35, 20);
        let count = difficulty.stone_count(35, 20);
        let stones = Spawner::default().place_obstacles(&mut grid, count, &mut rng).unwrap();

        prop_assert_eq!(stones.len(), count);
        prop_assert_eq!(grid.count(CellState::Obstacle), count);
        for (i, a) in stones.iter().enumerate() {
            prop_assert!(!Spawner::in_start_corridor(&grid, *a));
            prop_assert!(!grid.is_wall(a.col, a.row));
            for b in &stones[i + 1..] {
                prop_assert!((a.col - b.col).abs() != 1, "{:?} and {:?} share a neighbouring column", a, b);
                prop_assert!((a.row - b.row).abs() != 1, "{:?} and {:?} share a neighbouring row", a, b);
            }
        }
    }

    #[test]
    fn food_lands_on_distinct_empty_cells(seed in any::<u64>(), count in 1usize..6) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut grid = Grid::new(35, 20);
        let spawner = Spawner::default();
        spawner.place_obstacles(&mut grid, 11, &mut rng).unwrap();
        let foods = spawner.place_food(&grid, count, &mut rng).unwrap();

        prop_assert_eq!(foods.len(), count);
        for (i, food) in foods.iter().enumerate() {
            prop_assert_eq!(grid.state_at(*food), Some(CellState::Empty));
            prop_assert!(!foods[i + 1..].contains(food));
        }
    }

    #[test]
    fn player_move_is_a_pure_shift(len in 1i32..8, turns in prop::collection::vec(direction(), 1..20)) {
        let cells: Vec<Position> = (0..len).map(|i| p(10 - i, 10)).collect();
        let mut snake = Snake::from_positions(SnakeKind::Player, &cells, Direction::Right);

        for turn in turns {
            snake.steer(turn);
            let before: Vec<Position> = snake.positions().collect();
            snake.move_player();
            let after: Vec<Position> = snake.positions().collect();

            prop_assert_eq!(after[0], before[0].step(snake.direction));
            for i in 1..after.len() {
                prop_assert_eq!(after[i], before[i - 1]);
            }
        }
    }

    #[test]
    fn agents_never_reverse(seed in any::<u64>(), steps in 1usize..60) {
        let mut rng = StdRng::seed_from_u64(seed);
        let layout = Layout {
            cols: 35,
            rows: 20,
            stones: 19,
            foods: 1,
            agents: 2,
            player_length: 4,
            agent_length: 3..=6,
        };
        let mut board = Board::build(&layout, &Spawner::default(), &mut rng).unwrap();

        for _ in 0..steps {
            let before: Vec<Direction> = board.agents.iter().map(|a| a.direction).collect();
            board.advance_agents(&mut rng);
            for (agent, prior) in board.agents.iter().zip(before) {
                prop_assert_ne!(agent.direction, prior.opposite());
            }
        }
    }

    #[test]
    fn every_ring_stays_occupied(seed in any::<u64>(), steps in 1usize..60) {
        let mut rng = StdRng::seed_from_u64(seed);
        let layout = Layout {
            cols: 20,
            rows: 12,
            stones: 4,
            foods: 1,
            agents: 3,
            player_length: 4,
            agent_length: 3..=6,
        };
        let mut board = Board::build(&layout, &Spawner::default(), &mut rng).unwrap();

        for _ in 0..steps {
            board.advance_agents(&mut rng);
            for snake in board.snakes() {
                for pos in snake.positions() {
                    prop_assert_eq!(board.grid.state_at(pos), Some(CellState::Occupied));
                }
            }
        }
    }

    #[test]
    fn self_bite_iff_head_repeats(cells in prop::collection::vec((0i32..3, 0i32..3), 1..9)) {
        let cells: Vec<Position> = cells.into_iter().map(|(c, r)| p(c, r)).collect();
        let snake = Snake::from_positions(SnakeKind::Player, &cells, Direction::Up);
        let repeats = cells[1..].contains(&cells[0]);
        prop_assert_eq!(self_collisions(&snake).next().is_some(), repeats);
    }

    #[test]
    fn grow_adds_one_ring_at_the_tail(len in 1i32..8) {
        let cells: Vec<Position> = (0..len).map(|i| p(5, 5 + i)).collect();
        let mut snake = Snake::from_positions(SnakeKind::Agent, &cells, Direction::Up);
        let tail = snake.tail();
        snake.grow();
        prop_assert_eq!(snake.len(), len as usize + 1);
        prop_assert_eq!(snake.tail(), tail);
    }
}
