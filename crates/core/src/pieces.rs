//! Pieces module - the tetromino catalog and matrix rotation
//!
//! Every piece is a square boolean matrix (2x2 for O, 3x3 for J/L/S/T/Z, 4x4 for I).
//! Rotation builds a new matrix of the same size; catalog definitions are never mutated.
//! There are no wall kicks: a rotation either fits at the current origin or is rejected.

use crate::types::{Direction, PieceKind, MAX_SHAPE_SIZE};

/// Square occupancy matrix of a piece in its local frame
///
/// Only the top-left `size x size` block of `cells` is meaningful; the rest stays `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: u8,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Catalog constructor over a padded 4x4 grid of 0/1 values
    const fn padded(size: u8, rows: [[u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE]) -> Self {
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut i = 0;
        while i < size as usize {
            let mut j = 0;
            while j < size as usize {
                cells[i][j] = rows[i][j] != 0;
                j += 1;
            }
            i += 1;
        }
        Self { size, cells }
    }

    /// Build a shape from rows of 0/1 values
    ///
    /// Returns `None` unless the rows form a square of edge 1 to 4.
    pub fn from_rows(rows: &[&[u8]]) -> Option<Self> {
        let size = rows.len();
        if size == 0 || size > MAX_SHAPE_SIZE || rows.iter().any(|row| row.len() != size) {
            return None;
        }

        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (i, row) in rows.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                cells[i][j] = v != 0;
            }
        }

        Some(Self {
            size: size as u8,
            cells,
        })
    }

    /// Edge length of the matrix
    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Whether local cell `(row, col)` is occupied; out-of-range is empty
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.size() && col < self.size() && self.cells[row][col]
    }

    /// Occupied cells as `(row, col)` pairs, row-major
    pub fn filled_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.size();
        (0..n)
            .flat_map(move |i| (0..n).map(move |j| (i, j)))
            .filter(move |&(i, j)| self.cells[i][j])
    }

    /// Number of occupied cells (4 for every catalog piece)
    pub fn filled_count(&self) -> usize {
        self.filled_cells().count()
    }

    /// Rows of the matrix as 0/1 values, for renderers and snapshots
    pub fn rows(&self) -> Vec<Vec<u8>> {
        let n = self.size();
        (0..n)
            .map(|i| (0..n).map(|j| u8::from(self.is_filled(i, j))).collect())
            .collect()
    }

    /// Return this shape turned 90° in `direction`
    ///
    /// Right (clockwise): `new[j][n-1-i] = old[i][j]`.
    /// Left (counter-clockwise): `new[n-1-j][i] = old[i][j]`.
    pub fn rotated(&self, direction: Direction) -> Shape {
        let n = self.size();
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];

        for i in 0..n {
            for j in 0..n {
                match direction {
                    Direction::Right => cells[j][n - 1 - i] = self.cells[i][j],
                    Direction::Left => cells[n - 1 - j][i] = self.cells[i][j],
                }
            }
        }

        Shape {
            size: self.size,
            cells,
        }
    }
}

const I_SHAPE: Shape = Shape::padded(4, [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]);
const J_SHAPE: Shape = Shape::padded(3, [[1, 0, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
const L_SHAPE: Shape = Shape::padded(3, [[0, 0, 1, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
const O_SHAPE: Shape = Shape::padded(2, [[1, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
const S_SHAPE: Shape = Shape::padded(3, [[0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
const T_SHAPE: Shape = Shape::padded(3, [[0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
const Z_SHAPE: Shape = Shape::padded(3, [[1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);

/// Catalog definition of a piece
pub fn get_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::L => L_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::Z => Z_SHAPE,
    }
}

/// Spawn column that centers a shape of `shape_size` on a board of `columns`
///
/// I and O end up exactly centered; the 3x3 pieces lean one column left.
pub fn spawn_x(columns: usize, shape_size: usize) -> i32 {
    (columns as i32 - shape_size as i32) / 2
}
