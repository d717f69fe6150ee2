//! Segment discovery: maximal 4-connected groups of occupied grid cells.
//!
//! Always recomputed from the grid. A single new cell can bridge two
//! previously separate segments, so results are never cached across rounds.

use smallvec::SmallVec;

use crate::board::{Cell, Grid};

/// Orthogonal neighbours of `cell` inside a `size`×`size` grid.
fn neighbours((row, col): Cell, size: usize) -> SmallVec<[Cell; 4]> {
    let mut out = SmallVec::new();
    if row > 0 {
        out.push((row - 1, col));
    }
    if row + 1 < size {
        out.push((row + 1, col));
    }
    if col > 0 {
        out.push((row, col - 1));
    }
    if col + 1 < size {
        out.push((row, col + 1));
    }
    out
}

/// Every segment of `grid`, each listed in discovery order.
///
/// Segments are ordered by their first cell in row-major order. Empty cells
/// contribute nothing and block connectivity; diagonals do not connect.
#[must_use]
pub fn find_segments(grid: &Grid) -> Vec<Vec<Cell>> {
    let size = grid.size();
    let mut visited = vec![false; size * size];
    let mut segments = Vec::new();

    for ((row, col), _) in grid.occupied() {
        if visited[row * size + col] {
            continue;
        }

        let mut segment = Vec::new();
        let mut stack = vec![(row, col)];
        visited[row * size + col] = true;

        while let Some(cell) = stack.pop() {
            segment.push(cell);
            for (r, c) in neighbours(cell, size) {
                if !visited[r * size + c] && grid.is_occupied(r, c) {
                    visited[r * size + c] = true;
                    stack.push((r, c));
                }
            }
        }

        segments.push(segment);
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runes::{EffectTier, Token, TokenId};

    /// Fill `(row, col)` with whatever color the rotation maps there.
    fn fill(grid: &mut Grid, cells: &[Cell]) {
        for (i, &(row, col)) in cells.iter().enumerate() {
            let color = grid.color_at(row, col).unwrap();
            let token = Token::new(TokenId(i as u32), color, EffectTier::Common, grid.size());
            grid.place(row, token).unwrap();
        }
    }

    #[test]
    fn test_empty_grid_has_no_segments() {
        assert!(find_segments(&Grid::new(4)).is_empty());
    }

    #[test]
    fn test_l_shape_and_isolated_cell() {
        let mut grid = Grid::new(3);
        fill(&mut grid, &[(0, 0), (0, 1), (1, 1), (2, 2)]);

        let segments = find_segments(&grid);

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].len(), 3);
        assert_eq!(segments[1], vec![(2, 2)]);
    }

    #[test]
    fn test_diagonals_do_not_connect() {
        let mut grid = Grid::new(3);
        fill(&mut grid, &[(0, 0), (1, 1), (2, 2)]);

        assert_eq!(find_segments(&grid).len(), 3);
    }

    #[test]
    fn test_bridge_merges_segments() {
        let mut grid = Grid::new(3);
        fill(&mut grid, &[(0, 0), (0, 2)]);
        assert_eq!(find_segments(&grid).len(), 2);

        let bridge = grid.color_at(0, 1).unwrap();
        grid.place(0, Token::new(TokenId(9), bridge, EffectTier::Common, 3)).unwrap();

        let segments = find_segments(&grid);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].len(), 3);
        assert!(segments[0].contains(&(0, 1)));
    }
}
