//! Placement grid.
//!
//! Square, `size` = colors in play. A color lands in exactly one column
//! per row, given by the rotation `column = (color_index + row) % size`, so
//! each row and each column sees every color once. Filled cells are never
//! emptied within a run.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::runes::{RuneColor, Token};

/// Grid coordinate, `(row, col)`, 0-based.
pub type Cell = (usize, usize);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    /// Row-major.
    cells: Vector<Option<Token>>,
}

impl Grid {
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: std::iter::repeat(None).take(size * size).collect(),
        }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Column `color` occupies in `row`.
    #[must_use]
    pub fn column_for(&self, color: RuneColor, row: usize) -> usize {
        (color.index() + row) % self.size
    }

    /// Color mapped to `(row, col)`.
    #[must_use]
    pub fn color_at(&self, row: usize, col: usize) -> Option<RuneColor> {
        RuneColor::from_index((col + self.size - row % self.size) % self.size)
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&Token> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.cells[row * self.size + col].as_ref()
    }

    #[must_use]
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_some()
    }

    /// Whether `color` already sits in `row`.
    #[must_use]
    pub fn row_has_color(&self, row: usize, color: RuneColor) -> bool {
        row < self.size && self.is_occupied(row, self.column_for(color, row))
    }

    /// Put `token` into its mapped cell of `row`.
    ///
    /// Returns the column, or gives the token back if the cell is taken.
    pub fn place(&mut self, row: usize, token: Token) -> Result<usize, Token> {
        if row >= self.size {
            return Err(token);
        }
        let col = self.column_for(token.color, row);
        let slot = &mut self.cells[row * self.size + col];
        if slot.is_some() {
            return Err(token);
        }
        *slot = Some(token);
        Ok(col)
    }

    /// Occupied cells in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (Cell, &Token)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, cell)| cell.as_ref().map(|t| ((i / size, i % size), t)))
    }

    /// Number of filled cells.
    #[must_use]
    pub fn filled(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Cell storage agrees with `size`. Only a decoded grid can fail this.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.cells.len() == self.size * self.size
    }
}
