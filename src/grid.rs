use crate::error::{GridError, PatternError};
use crate::pattern::{self, Pattern};
use crate::topology;

/// One grid cell: the committed state plus the state computed for the next generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    alive: bool,
    pending: bool,
}

impl Cell {
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Record the next state. Not visible through `is_alive` until `commit`.
    fn mark_next(&mut self, state: bool) {
        self.pending = state;
    }

    fn commit(&mut self) {
        self.alive = self.pending;
        self.pending = false;
    }
}

/// Classic survival/birth rule, applied unchanged under every topology:
/// a live cell survives with 2 or 3 neighbors, a dead cell is born with exactly 3.
fn next_state(alive: bool, neighbors: usize) -> bool {
    matches!((alive, neighbors), (true, 2) | (true, 3) | (false, 3))
}

/// Fixed-size grid of cells, stored row-major. Cells outside the grid count as dead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// All-dead grid. Both dimensions must be at least 1.
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::InvalidDimensions { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![Cell::default(); rows * cols],
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Read-only view of the cell at `(row, col)`.
    ///
    /// # Panics
    /// If the coordinate is outside the grid.
    pub fn cell_at(&self, row: usize, col: usize) -> &Cell {
        assert!(
            row < self.rows && col < self.cols,
            "cell ({row}, {col}) outside {}x{} grid",
            self.rows,
            self.cols
        );
        &self.cells[row * self.cols + col]
    }

    /// Decode a text pattern and write it at the top-left corner.
    ///
    /// On error the grid is left exactly as it was.
    pub fn decode(&mut self, text: &str) -> Result<(), PatternError> {
        let pattern = pattern::decode(text, self.rows, self.cols)?;
        self.apply(&pattern)
    }

    /// Reset every cell to dead, then write `pattern` at the top-left corner.
    pub fn apply(&mut self, pattern: &Pattern) -> Result<(), PatternError> {
        pattern.check_fits(self.rows, self.cols)?;
        self.cells.fill(Cell::default());
        for (r, c, alive) in pattern.cells() {
            self.cells[r * self.cols + c].alive = alive;
        }
        Ok(())
    }

    /// Live neighbors of `(row, col)` under the given topology id.
    ///
    /// Neighbors outside the grid are skipped. An unknown topology id has no
    /// offsets, so the count is 0.
    pub fn neighbor_count(&self, row: usize, col: usize, topology_id: u32) -> usize {
        topology::offsets_for_id(topology_id)
            .iter()
            .filter(|&&(dr, dc)| self.is_alive_at(row as isize + dr, col as isize + dc))
            .count()
    }

    fn is_alive_at(&self, row: isize, col: isize) -> bool {
        if row < 0 || col < 0 {
            return false;
        }
        let (row, col) = (row as usize, col as usize);
        row < self.rows && col < self.cols && self.cells[row * self.cols + col].alive
    }

    /// Advance one generation.
    ///
    /// Every next state is computed from the committed states before any cell
    /// is committed.
    pub fn step(&mut self, topology_id: u32) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let neighbors = self.neighbor_count(row, col, topology_id);
                let idx = row * self.cols + col;
                let next = next_state(self.cells[idx].alive, neighbors);
                self.cells[idx].mark_next(next);
            }
        }

        for cell in &mut self.cells {
            cell.commit();
        }
    }

    /// Count live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.alive).count()
    }

    /// Iterate over rows as slices of cells.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.cols)
    }
}
