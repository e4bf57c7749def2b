// Grid geometry for a rows x columns field of boxes
//
// Neighbors are computed from row/column arithmetic instead of stored links,
// so boxes never reference each other.

use crate::types::{BoxCoord, Direction};

/// Returns the box sharing the given edge of `at`, or `None` at the boundary
///
/// # Arguments
/// * `rows` - Number of box rows in the grid
/// * `columns` - Number of box columns in the grid
/// * `at` - Box whose edge is inspected
/// * `direction` - Which edge of `at`
pub fn neighbor(rows: usize, columns: usize, at: BoxCoord, direction: Direction) -> Option<BoxCoord> {
    match direction {
        Direction::Top if at.row > 0 => Some(BoxCoord::new(at.row - 1, at.column)),
        Direction::Left if at.column > 0 => Some(BoxCoord::new(at.row, at.column - 1)),
        Direction::Right if at.column + 1 < columns => Some(BoxCoord::new(at.row, at.column + 1)),
        Direction::Bottom if at.row + 1 < rows => Some(BoxCoord::new(at.row + 1, at.column)),
        _ => None,
    }
}

/// Total number of distinct edges on a rows x columns grid of boxes
pub fn edge_count(rows: usize, columns: usize) -> usize {
    2 * rows * columns + rows + columns
}
