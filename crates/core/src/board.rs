//! Board module - the playfield grid
//!
//! The grid is `columns` wide and `visible_rows + hidden_rows` tall, stored as a flat
//! row-major vector. Row 0 is the topmost hidden spawn row and the last row is the floor.
//! Coordinates are `(x, y)` with `x` the column and `y` the row.
//!
//! Every access goes through a bounds check: out-of-range coordinates are blocking for
//! collision purposes and are silently skipped when writing.

use arrayvec::ArrayVec;

use crate::pieces::Shape;
use crate::types::{Cell, PieceKind, COLUMNS, HIDDEN_ROWS, MAX_SHAPE_SIZE, VISIBLE_ROWS};

/// Row indices returned by a single full-row scan (a piece spans at most 4 rows)
pub type FullRows = ArrayVec<usize, MAX_SHAPE_SIZE>;

/// The game board
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    width: usize,
    height: usize,
    hidden_rows: usize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty 10x22 board (20 visible rows, 2 hidden)
    pub fn new() -> Self {
        Self::with_dimensions(
            COLUMNS as usize,
            VISIBLE_ROWS as usize,
            HIDDEN_ROWS as usize,
        )
    }

    /// Create an empty board with custom dimensions
    pub fn with_dimensions(columns: usize, visible_rows: usize, hidden_rows: usize) -> Self {
        let height = visible_rows + hidden_rows;
        Self {
            width: columns,
            height,
            hidden_rows,
            cells: vec![None; columns * height],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.is_out_of_bounds(x, y) {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.width
    }

    /// Total number of rows, hidden rows included
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn hidden_rows(&self) -> usize {
        self.hidden_rows
    }

    pub fn visible_rows(&self) -> usize {
        self.height - self.hidden_rows
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if position is out of bounds
    pub fn is_out_of_bounds(&self, x: i32, y: i32) -> bool {
        x < 0 || x >= self.width as i32 || y < 0 || y >= self.height as i32
    }

    /// Whether `shape` placed with its top-left corner at `(origin_x, origin_y)` collides
    ///
    /// A filled cell collides when it lies left of column 0, right of the last column, below
    /// the floor, or on an occupied cell. Cells above row 0 never collide, so pieces may
    /// overhang the top while spawning.
    pub fn intersects(&self, shape: &Shape, origin_x: i32, origin_y: i32) -> bool {
        shape.filled_cells().any(|(i, j)| {
            let x = origin_x + j as i32;
            let y = origin_y + i as i32;

            if x < 0 || x >= self.width as i32 || y >= self.height as i32 {
                return true;
            }
            y >= 0 && self.is_occupied(x, y)
        })
    }

    /// Merge a piece into the grid
    ///
    /// Cells that fall outside the grid are dropped. Returns the number of cells written.
    pub fn lock(&mut self, shape: &Shape, origin_x: i32, origin_y: i32, kind: PieceKind) -> usize {
        let mut written = 0;
        for (i, j) in shape.filled_cells() {
            if self.set(origin_x + j as i32, origin_y + i as i32, Some(kind)) {
                written += 1;
            }
        }
        written
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height {
            return false;
        }
        let start = y * self.width;
        self.cells[start..start + self.width]
            .iter()
            .all(|cell| cell.is_some())
    }

    /// Full rows within `from_row..=to_row`, bottom to top
    ///
    /// Rows in the hidden spawn band are never eligible. At most four rows are reported,
    /// which covers any range spanned by a single piece.
    pub fn find_full_rows(&self, from_row: usize, to_row: usize) -> FullRows {
        let mut rows = FullRows::new();
        if self.height == 0 {
            return rows;
        }

        let bottom = to_row.min(self.height - 1);
        let top = from_row.max(self.hidden_rows);
        if top > bottom {
            return rows;
        }

        for y in (top..=bottom).rev() {
            if self.is_row_full(y) && rows.try_push(y).is_err() {
                break;
            }
        }
        rows
    }

    /// Remove the given rows and collapse everything above them
    ///
    /// Each surviving row moves down by the number of removed rows below it; the vacated
    /// rows at the top are emptied. Out-of-range and duplicate indices are ignored.
    /// Returns the number of rows removed.
    pub fn clear_and_collapse(&mut self, rows: &[usize]) -> usize {
        let width = self.width;
        let mut write_y = self.height;
        let mut removed = 0;

        // Two-pointer compaction from the floor upward
        for read_y in (0..self.height).rev() {
            if rows.contains(&read_y) {
                removed += 1;
                continue;
            }

            write_y -= 1;
            if write_y != read_y {
                let src = read_y * width;
                self.cells.copy_within(src..src + width, write_y * width);
            }
        }

        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        removed
    }

    /// Number of occupied cells on the whole grid
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Cells of row `y`, or `None` when out of range
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        Some(&self.cells[start..start + self.width])
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
