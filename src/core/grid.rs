//! Board geometry: cell and vertex coordinates.
//!
//! ## GridPosition
//!
//! Addresses one cell of the fixed 9x9 board. Both coordinates are in
//! `0..GRID_SIZE`. Ordering is lexicographic by `x`, then `y`, which scoring
//! uses as its deterministic tie-break order.
//!
//! ## VertexPosition
//!
//! Addresses a corner point of the cell lattice, in `0..=GRID_SIZE` on both
//! axes. Border edges run between adjacent vertices.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Side length of the board in cells.
pub const GRID_SIZE: u8 = 9;

/// A cell coordinate on the 9x9 board.
///
/// ```
/// use tiny_islands::core::GridPosition;
///
/// let pos = GridPosition::new(2, 7);
/// assert_eq!(pos.x(), 2);
/// assert_eq!(pos.y(), 7);
/// assert!(GridPosition::try_new(9, 0).is_none());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    x: u8,
    y: u8,
}

impl GridPosition {
    /// Create a cell position.
    ///
    /// Panics if either coordinate is outside the board.
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        assert!(x < GRID_SIZE && y < GRID_SIZE, "Cell coordinate out of range");
        Self { x, y }
    }

    /// Create a cell position, or `None` if either coordinate is outside the board.
    #[must_use]
    pub const fn try_new(x: u8, y: u8) -> Option<Self> {
        if x < GRID_SIZE && y < GRID_SIZE {
            Some(Self { x, y })
        } else {
            None
        }
    }

    /// Column index, counted from the left.
    #[must_use]
    pub const fn x(self) -> u8 {
        self.x
    }

    /// Row index, counted from the top.
    #[must_use]
    pub const fn y(self) -> u8 {
        self.y
    }

    /// Iterate over every cell of the board in row-major order.
    pub fn all() -> impl Iterator<Item = GridPosition> {
        (0..GRID_SIZE).flat_map(|y| (0..GRID_SIZE).map(move |x| GridPosition { x, y }))
    }

    /// Translate by `(dx, dy)`, returning `None` when the result leaves the board.
    #[must_use]
    pub fn offset(self, dx: i8, dy: i8) -> Option<GridPosition> {
        let x = i16::from(self.x) + i16::from(dx);
        let y = i16::from(self.y) + i16::from(dy);
        if (0..i16::from(GRID_SIZE)).contains(&x) && (0..i16::from(GRID_SIZE)).contains(&y) {
            Some(GridPosition {
                x: x as u8,
                y: y as u8,
            })
        } else {
            None
        }
    }

    /// Manhattan distance to another cell.
    #[must_use]
    pub fn manhattan(self, other: GridPosition) -> u32 {
        u32::from(self.x.abs_diff(other.x)) + u32::from(self.y.abs_diff(other.y))
    }

    /// The orthogonal neighbors that lie on the board (2 to 4 cells).
    #[must_use]
    pub fn neighbors4(self) -> SmallVec<[GridPosition; 4]> {
        const OFFSETS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
        OFFSETS
            .iter()
            .filter_map(|&(dx, dy)| self.offset(dx, dy))
            .collect()
    }

    /// The orthogonal and diagonal neighbors that lie on the board (3 to 8 cells).
    #[must_use]
    pub fn neighbors8(self) -> SmallVec<[GridPosition; 8]> {
        const OFFSETS: [(i8, i8); 8] = [
            (-1, -1),
            (0, -1),
            (1, -1),
            (-1, 0),
            (1, 0),
            (-1, 1),
            (0, 1),
            (1, 1),
        ];
        OFFSETS
            .iter()
            .filter_map(|&(dx, dy)| self.offset(dx, dy))
            .collect()
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A corner point of the cell lattice.
///
/// The cell at `(x, y)` spans the vertices `(x, y)` through `(x+1, y+1)`,
/// so vertex coordinates run one past the cell range on each axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VertexPosition {
    x: u8,
    y: u8,
}

impl VertexPosition {
    /// Create a vertex position.
    ///
    /// Panics if either coordinate is outside `0..=GRID_SIZE`.
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        assert!(x <= GRID_SIZE && y <= GRID_SIZE, "Vertex coordinate out of range");
        Self { x, y }
    }

    /// Create a vertex position, or `None` if either coordinate is out of range.
    #[must_use]
    pub const fn try_new(x: u8, y: u8) -> Option<Self> {
        if x <= GRID_SIZE && y <= GRID_SIZE {
            Some(Self { x, y })
        } else {
            None
        }
    }

    #[must_use]
    pub const fn x(self) -> u8 {
        self.x
    }

    #[must_use]
    pub const fn y(self) -> u8 {
        self.y
    }
}

impl fmt::Display for VertexPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Component-wise (min, max) corners of a cell set, or `None` when empty.
pub fn bounding_box(cells: impl IntoIterator<Item = GridPosition>) -> Option<(GridPosition, GridPosition)> {
    let mut corners: Option<(GridPosition, GridPosition)> = None;
    for cell in cells {
        corners = Some(match corners {
            None => (cell, cell),
            Some((min, max)) => (
                GridPosition {
                    x: min.x.min(cell.x),
                    y: min.y.min(cell.y),
                },
                GridPosition {
                    x: max.x.max(cell.x),
                    y: max.y.max(cell.y),
                },
            ),
        });
    }
    corners
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_basics() {
        let pos = GridPosition::new(3, 5);
        assert_eq!(pos.x(), 3);
        assert_eq!(pos.y(), 5);
        assert_eq!(format!("{}", pos), "(3, 5)");
    }

    #[test]
    #[should_panic(expected = "Cell coordinate out of range")]
    fn test_position_out_of_range() {
        let _ = GridPosition::new(9, 0);
    }

    #[test]
    fn test_try_new() {
        assert_eq!(GridPosition::try_new(8, 8), Some(GridPosition::new(8, 8)));
        assert!(GridPosition::try_new(9, 0).is_none());
        assert!(GridPosition::try_new(0, 9).is_none());
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let mut cells = vec![
            GridPosition::new(3, 3),
            GridPosition::new(2, 3),
            GridPosition::new(3, 2),
        ];
        cells.sort();
        assert_eq!(
            cells,
            vec![
                GridPosition::new(2, 3),
                GridPosition::new(3, 2),
                GridPosition::new(3, 3),
            ]
        );
    }

    #[test]
    fn test_all_covers_board_once() {
        let cells: Vec<_> = GridPosition::all().collect();
        assert_eq!(cells.len(), 81);
        assert_eq!(cells[0], GridPosition::new(0, 0));
        assert_eq!(cells[80], GridPosition::new(8, 8));

        let mut unique = cells.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 81);
    }

    #[test]
    fn test_offset() {
        let pos = GridPosition::new(0, 8);
        assert_eq!(pos.offset(1, 0), Some(GridPosition::new(1, 8)));
        assert_eq!(pos.offset(-1, 0), None);
        assert_eq!(pos.offset(0, 1), None);
        assert_eq!(pos.offset(0, -8), Some(GridPosition::new(0, 0)));
    }

    #[test]
    fn test_manhattan() {
        let a = GridPosition::new(1, 2);
        let b = GridPosition::new(4, 0);
        assert_eq!(a.manhattan(b), 5);
        assert_eq!(b.manhattan(a), 5);
        assert_eq!(a.manhattan(a), 0);
    }

    #[test]
    fn test_neighbors4() {
        assert_eq!(GridPosition::new(0, 0).neighbors4().len(), 2);
        assert_eq!(GridPosition::new(4, 0).neighbors4().len(), 3);
        assert_eq!(GridPosition::new(4, 4).neighbors4().len(), 4);

        let neighbors = GridPosition::new(4, 4).neighbors4();
        assert!(neighbors.contains(&GridPosition::new(3, 4)));
        assert!(neighbors.contains(&GridPosition::new(5, 4)));
        assert!(neighbors.contains(&GridPosition::new(4, 3)));
        assert!(neighbors.contains(&GridPosition::new(4, 5)));
    }

    #[test]
    fn test_neighbors8() {
        assert_eq!(GridPosition::new(0, 0).neighbors8().len(), 3);
        assert_eq!(GridPosition::new(4, 0).neighbors8().len(), 5);
        assert_eq!(GridPosition::new(4, 4).neighbors8().len(), 8);
        assert_eq!(GridPosition::new(8, 8).neighbors8().len(), 3);
    }

    #[test]
    fn test_vertex_range() {
        let corner = VertexPosition::new(9, 9);
        assert_eq!(corner.x(), 9);
        assert!(VertexPosition::try_new(10, 0).is_none());
    }

    #[test]
    #[should_panic(expected = "Vertex coordinate out of range")]
    fn test_vertex_out_of_range() {
        let _ = VertexPosition::new(0, 10);
    }

    #[test]
    fn test_bounding_box() {
        let cells = [
            GridPosition::new(2, 5),
            GridPosition::new(4, 1),
            GridPosition::new(3, 3),
        ];
        assert_eq!(
            bounding_box(cells),
            Some((GridPosition::new(2, 1), GridPosition::new(4, 5)))
        );
        assert_eq!(bounding_box(std::iter::empty()), None);
    }
}
