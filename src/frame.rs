use serde::Serialize;

use crate::board::Board;
use crate::grid::CellState;
use crate::types::{Position, Ring, SnakeKind};

#[derive(Debug, Clone, Serialize)]
pub struct CellView {
    pub pos: Position,
    pub state: CellState,
    pub wall: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SnakeView {
    pub kind: SnakeKind,
    pub rings: Vec<Ring>,
}

/// Read-only snapshot handed to render sinks
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub cols: i32,
    pub rows: i32,
    pub revision: u64,
    pub cells: Vec<CellView>,
    pub stones: Vec<Position>,
    pub foods: Vec<Position>,
    /// Agents first, player last, so the player draws on top
    pub snakes: Vec<SnakeView>,
}

impl Frame {
    pub fn capture(board: &Board) -> Self {
        let grid = &board.grid;
        let cells = grid
            .cells
            .iter()
            .map(|c| CellView {
                pos: Position::new(c.col, c.row),
                state: c.state,
                wall: grid.is_wall(c.col, c.row),
            })
            .collect();

        let snakes = board
            .agents
            .iter()
            .chain(std::iter::once(&board.player))
            .map(|s| SnakeView {
                kind: s.kind,
                rings: s.rings.clone(),
            })
            .collect();

        Frame {
            cols: grid.cols,
            rows: grid.rows,
            revision: grid.get_revision(),
            cells,
            stones: board.stones.clone(),
            foods: board.foods.clone(),
            snakes,
        }
    }

    pub fn player(&self) -> Option<&SnakeView> {
        self.snakes.iter().find(|s| s.kind == SnakeKind::Player)
    }
}
