#![allow(dead_code)]

use ringsnake::records::MemoryRecordStore;
use ringsnake::{Board, CellState, Direction, Grid, Mode, Position, Session, SessionSettings, Snake, SnakeKind};

/// Parse a board drawn as text. Every line is one row and every character
/// one column:
///
/// - `#` wall (must sit on the perimeter)
/// - `.` empty
/// - `X` stone
/// - `*` food on an empty cell
/// - `@` food on a wall cell, for tests that need a fatal hit and a pickup
///   on the same step
///
/// Returns the grid with stones marked, the stones and the food.
pub fn parse_layout(lines: &[&str]) -> (Grid, Vec<Position>, Vec<Position>) {
    let rows = lines.len() as i32;
    let cols = lines.first().map(|l| l.len()).unwrap_or(0) as i32;
    let mut grid = Grid::new(cols, rows);
    let mut stones = Vec::new();
    let mut foods = Vec::new();

    for (row, line) in lines.iter().enumerate() {
        assert_eq!(line.len() as i32, cols, "row {} has the wrong width", row);
        for (col, ch) in line.chars().enumerate() {
            let pos = Position::new(col as i32, row as i32);
            let wall = grid.is_wall(pos.col, pos.row);
            match ch {
                '#' | '@' => assert!(wall, "'{}' inside the board at {:?}", ch, pos),
                '.' | 'X' | '*' => assert!(!wall, "'{}' on the perimeter at {:?}", ch, pos),
                other => panic!("unknown layout character '{}'", other),
            }
            match ch {
                'X' => {
                    grid.set_state_at(pos, CellState::Obstacle);
                    stones.push(pos);
                }
                '*' | '@' => foods.push(pos),
                _ => {}
            }
        }
    }
    (grid, stones, foods)
}

/// 20 columns by 10 rows with nothing inside
pub const OPEN_20X10: [&str; 10] = [
    "####################",
    "#..................#",
    "#..................#",
    "#..................#",
    "#..................#",
    "#..................#",
    "#..................#",
    "#..................#",
    "#..................#",
    "####################",
];

pub fn p(col: i32, row: i32) -> Position {
    Position::new(col, row)
}

/// Build a snake from explicit cells (head first) and mark them occupied
pub fn place_snake(grid: &mut Grid, kind: SnakeKind, cells: &[Position], direction: Direction) -> Snake {
    for &pos in cells {
        grid.set_state_at(pos, CellState::Occupied);
    }
    Snake::from_positions(kind, cells, direction)
}

/// Board from a text layout with a hand-placed player and no agents
pub fn board_from_layout(lines: &[&str], player: &[Position], direction: Direction) -> Board {
    let (mut grid, stones, foods) = parse_layout(lines);
    let player = place_snake(&mut grid, SnakeKind::Player, player, direction);
    Board {
        grid,
        stones,
        foods,
        player,
        agents: Vec::new(),
    }
}

/// Settings for a seeded session on a board of the given size
pub fn settings(mode: Mode, cols: i32, rows: i32) -> SessionSettings {
    SessionSettings {
        cols,
        rows,
        mode,
        seed: Some(2024),
        ..SessionSettings::default()
    }
}

/// Seeded session whose generated board is swapped for the scripted one.
/// The returned store shares its history with the session's.
pub fn scripted_session(
    mode: Mode,
    lines: &[&str],
    player: &[Position],
    direction: Direction,
) -> (Session, MemoryRecordStore) {
    let board = board_from_layout(lines, player, direction);
    let store = MemoryRecordStore::new();
    let mut session = Session::new(
        settings(mode, board.grid.cols, board.grid.rows),
        Box::new(store.clone()),
    )
    .expect("seeded session builds");
    session.board = board;
    (session, store)
}

pub fn count<T, F: Fn(&T) -> bool>(items: &[T], pred: F) -> usize {
    items.iter().filter(|i| pred(i)).count()
}
