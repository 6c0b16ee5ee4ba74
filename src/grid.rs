use serde::{Deserialize, Serialize};

use crate::types::Position;

/// State of one board cell. Values match the 0/1/2 encoding used by the
/// record files and the event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    Empty = 0,
    Obstacle = 1,
    Occupied = 2,
}

/// One board cell. `index` is derived from the coordinates, see [`Grid::get_id`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
    pub index: i32,
    pub state: CellState,
}

/// Grid structure for storing cell states
///
/// Cells are stored column-major. Lookups go through the derived index
/// `row * (cols - 1) + col`; the only coordinates that share an index are a
/// right-edge wall and the left-edge wall one row below, both of which stay
/// `Occupied` for the whole session.
#[derive(Clone, Debug)]
pub struct Grid {
    pub cols: i32,
    pub rows: i32,
    pub cells: Vec<Cell>,
    /// Slots in `cells` for each derived index, in construction order
    by_index: Vec<Vec<usize>>,
    /// Revision number - incremented whenever a cell state changes
    pub revision: u64,
}

impl Grid {
    /// Create a grid with every perimeter cell occupied (walls) and the
    /// interior empty
    pub fn new(cols: i32, rows: i32) -> Self {
        let capacity = (cols.max(0) * rows.max(0)) as usize;
        let mut cells = Vec::with_capacity(capacity);
        let index_range = (rows.max(0) * (cols - 1).max(0) + 1) as usize;
        let mut by_index = vec![Vec::new(); index_range];

        for col in 0..cols {
            for row in 0..rows {
                let wall = row == 0 || row == rows - 1 || col == 0 || col == cols - 1;
                let index = row * (cols - 1) + col;
                if let Some(slots) = by_index.get_mut(index as usize) {
                    slots.push(cells.len());
                }
                cells.push(Cell {
                    col,
                    row,
                    index,
                    state: if wall { CellState::Occupied } else { CellState::Empty },
                });
            }
        }

        Grid {
            cols,
            rows,
            cells,
            by_index,
            revision: 0,
        }
    }

    /// Convert (col, row) coordinates to the derived cell index
    pub fn get_id(&self, col: i32, row: i32) -> i32 {
        row * (self.cols - 1) + col
    }

    fn slots(&self, col: i32, row: i32) -> Option<&Vec<usize>> {
        let id = self.get_id(col, row);
        if id < 0 {
            return None;
        }
        self.by_index.get(id as usize).filter(|slots| !slots.is_empty())
    }

    /// State of the first cell carrying the derived index of (col, row), or
    /// `None` when the index is outside the synthesised range
    pub fn state(&self, col: i32, row: i32) -> Option<CellState> {
        self.slots(col, row).map(|slots| self.cells[slots[0]].state)
    }

    pub fn state_at(&self, pos: Position) -> Option<CellState> {
        self.state(pos.col, pos.row)
    }

    /// Overwrite the state of every cell carrying the derived index of
    /// (col, row). No bounds validation beyond the index range; callers keep
    /// coordinates on the board.
    pub fn set_state(&mut self, col: i32, row: i32, state: CellState) {
        let slots = match self.slots(col, row) {
            Some(slots) => slots.clone(),
            None => return,
        };
        let mut changed = false;
        for slot in slots {
            if self.cells[slot].state != state {
                self.cells[slot].state = state;
                changed = true;
            }
        }
        if changed {
            self.revision += 1;
        }
    }

    pub fn set_state_at(&mut self, pos: Position, state: CellState) {
        self.set_state(pos.col, pos.row, state);
    }

    /// Perimeter test against the true board size
    pub fn is_wall(&self, col: i32, row: i32) -> bool {
        col == 0 || row == 0 || col == self.cols - 1 || row == self.rows - 1
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.col >= 0 && pos.col < self.cols && pos.row >= 0 && pos.row < self.rows
    }

    pub fn empty_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .filter(|c| c.state == CellState::Empty)
            .map(|c| Position::new(c.col, c.row))
    }

    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|c| c.state == state).count()
    }

    /// Get current grid revision number
    pub fn get_revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walls_are_occupied() {
        let grid = Grid::new(10, 8);
        for cell in &grid.cells {
            if grid.is_wall(cell.col, cell.row) {
                assert_eq!(cell.state, CellState::Occupied);
            } else {
                assert_eq!(cell.state, CellState::Empty);
            }
        }
        assert_eq!(grid.count(CellState::Occupied), 2 * 10 + 2 * 6);
    }

    #[test]
    fn test_index_formula() {
        let grid = Grid::new(35, 20);
        assert_eq!(grid.get_id(3, 2), 2 * 34 + 3);
        let cell = grid.cells.iter().find(|c| c.col == 3 && c.row == 2).unwrap();
        assert_eq!(cell.index, 71);
    }

    #[test]
    fn test_aliased_indices_are_walls() {
        let grid = Grid::new(12, 9);
        // (cols - 1, r) shares an index with (0, r + 1)
        assert_eq!(grid.get_id(11, 3), grid.get_id(0, 4));
        assert_eq!(grid.state(11, 3), Some(CellState::Occupied));
    }

    #[test]
    fn test_set_state_and_revision() {
        let mut grid = Grid::new(10, 10);
        let rev = grid.get_revision();
        grid.set_state(4, 4, CellState::Obstacle);
        assert_eq!(grid.state(4, 4), Some(CellState::Obstacle));
        assert_eq!(grid.get_revision(), rev + 1);

        // Same value again is not a change
        grid.set_state(4, 4, CellState::Obstacle);
        assert_eq!(grid.get_revision(), rev + 1);
    }

    #[test]
    fn test_out_of_range_is_none() {
        let mut grid = Grid::new(10, 10);
        assert_eq!(grid.state(0, -1), None);
        assert_eq!(grid.state(0, 11), None);
        grid.set_state(0, 11, CellState::Empty);
        assert_eq!(grid.count(CellState::Empty), 64);
    }
}
