//! Island geometry: border edges, region validation, and walk resolution.
//!
//! ## Region validation
//!
//! A border turn submits a set of candidate cells. `resolve_region` accepts
//! the set only when it is non-empty, orthogonally connected, free of
//! fully-surrounded holes, and drawable within `MAX_BORDER_EDGES` boundary
//! edges. Checks run in that order, so the reported error is always the
//! first rule the region breaks.
//!
//! ## Edges
//!
//! Boundary edges separate a member cell from a non-member neighbor or from
//! the outside of the board. Edges are canonical (start before end in
//! lexicographic order), sorted, and deduplicated, so two regions with the
//! same cells always produce the same edge list.
//!
//! ## Walks
//!
//! Freehand borders arrive as a closed vertex walk. `walk_edges` turns the
//! walk into edges and `cells_inside` ray-casts which cells the loop
//! encloses; the resulting cell set then goes through `resolve_region`, so
//! both entry paths enforce the same invariants.

use crate::core::{bounding_box, EngineError, GridPosition, VertexPosition};
use im::OrdSet;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};

/// Most boundary edges a single border turn may draw.
pub const MAX_BORDER_EDGES: usize = 24;

/// Regions enclosing fewer cells than this classify as lakes.
pub const LAKE_THRESHOLD: usize = 10;

/// One unit-length border segment between two adjacent lattice vertices.
///
/// Construction keeps edges canonical: `start` is always the lexicographically
/// smaller endpoint, and `end` lies one step in `+x` (horizontal) or `+y`
/// (vertical) from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorderEdge {
    pub start: VertexPosition,
    pub end: VertexPosition,
    pub is_horizontal: bool,
}

impl BorderEdge {
    /// Horizontal edge from `start` to the vertex one step right of it.
    #[must_use]
    pub fn horizontal(start: VertexPosition) -> Self {
        Self {
            start,
            end: VertexPosition::new(start.x() + 1, start.y()),
            is_horizontal: true,
        }
    }

    /// Vertical edge from `start` to the vertex one step below it.
    #[must_use]
    pub fn vertical(start: VertexPosition) -> Self {
        Self {
            start,
            end: VertexPosition::new(start.x(), start.y() + 1),
            is_horizontal: false,
        }
    }
}

/// A resolved region: its boundary edges, its cells, and its classification.
///
/// Islands are only created through [`resolve_region`] or [`resolve_walk`],
/// so every `Island` satisfies the region invariants and `is_lake` always
/// reflects the enclosed cell count.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Island {
    edges: Vec<BorderEdge>,
    enclosed_cells: OrdSet<GridPosition>,
    is_lake: bool,
}

impl Island {
    /// Boundary edges in canonical sorted order.
    #[must_use]
    pub fn edges(&self) -> &[BorderEdge] {
        &self.edges
    }

    /// Cells enclosed by the border, in ascending order.
    #[must_use]
    pub fn cells(&self) -> &OrdSet<GridPosition> {
        &self.enclosed_cells
    }

    #[must_use]
    pub fn contains(&self, position: GridPosition) -> bool {
        self.enclosed_cells.contains(&position)
    }

    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.enclosed_cells.len()
    }

    /// Small regions count as lakes; they score like islands but render as water.
    #[must_use]
    pub fn is_lake(&self) -> bool {
        self.is_lake
    }
}

/// Validate a candidate cell set and resolve it into an [`Island`].
///
/// Duplicate cells in the input are tolerated; validation runs on the set.
pub fn resolve_region(cells: &[GridPosition]) -> Result<Island, EngineError> {
    let cells: OrdSet<GridPosition> = cells.iter().copied().collect();
    if cells.is_empty() {
        return Err(EngineError::EmptyRegion);
    }
    check_connected(&cells)?;
    check_no_holes(&cells)?;

    let edges = boundary_edges(&cells);
    if edges.len() > MAX_BORDER_EDGES {
        return Err(EngineError::BorderTooLong {
            edges: edges.len(),
            limit: MAX_BORDER_EDGES,
        });
    }

    let is_lake = cells.len() < LAKE_THRESHOLD;
    Ok(Island {
        edges,
        enclosed_cells: cells,
        is_lake,
    })
}

/// Resolve a closed vertex walk into an [`Island`].
///
/// Equivalent to [`walk_edges`] followed by [`cells_inside`] and
/// [`resolve_region`].
pub fn resolve_walk(walk: &[VertexPosition]) -> Result<Island, EngineError> {
    let edges = walk_edges(walk)?;
    resolve_region(&cells_inside(&edges))
}

/// Breadth-first reachability from the region's first cell.
fn check_connected(cells: &OrdSet<GridPosition>) -> Result<(), EngineError> {
    let Some(&start) = cells.iter().next() else {
        return Ok(());
    };

    let mut seen = FxHashSet::default();
    let mut frontier = VecDeque::new();
    seen.insert(start);
    frontier.push_back(start);

    while let Some(cell) = frontier.pop_front() {
        for neighbor in cell.neighbors4() {
            if cells.contains(&neighbor) && seen.insert(neighbor) {
                frontier.push_back(neighbor);
            }
        }
    }

    if seen.len() == cells.len() {
        Ok(())
    } else {
        Err(EngineError::Disconnected)
    }
}

/// Reject regions that fully surround a cell they do not contain.
///
/// A hole is a non-member cell whose four orthogonal neighbors are all
/// members; a cell on the board edge can never qualify. The scan covers the
/// region's bounding box in row-major order, so the reported cell is stable.
fn check_no_holes(cells: &OrdSet<GridPosition>) -> Result<(), EngineError> {
    let Some((min, max)) = bounding_box(cells.iter().copied()) else {
        return Ok(());
    };

    for y in min.y()..=max.y() {
        for x in min.x()..=max.x() {
            let cell = GridPosition::new(x, y);
            if cells.contains(&cell) {
                continue;
            }
            let neighbors = cell.neighbors4();
            if neighbors.len() == 4 && neighbors.iter().all(|n| cells.contains(n)) {
                return Err(EngineError::HasHole(cell));
            }
        }
    }
    Ok(())
}

/// Derive the boundary edges of a cell set.
///
/// Each side of a member cell that faces a non-member (or the outside of the
/// board) contributes one edge.
fn boundary_edges(cells: &OrdSet<GridPosition>) -> Vec<BorderEdge> {
    let member = |cell: &GridPosition, dx: i8, dy: i8| {
        cell.offset(dx, dy).is_some_and(|n| cells.contains(&n))
    };

    let mut edges = BTreeSet::new();
    for cell in cells {
        let (x, y) = (cell.x(), cell.y());
        if !member(cell, -1, 0) {
            edges.insert(BorderEdge::vertical(VertexPosition::new(x, y)));
        }
        if !member(cell, 1, 0) {
            edges.insert(BorderEdge::vertical(VertexPosition::new(x + 1, y)));
        }
        if !member(cell, 0, -1) {
            edges.insert(BorderEdge::horizontal(VertexPosition::new(x, y)));
        }
        if !member(cell, 0, 1) {
            edges.insert(BorderEdge::horizontal(VertexPosition::new(x, y + 1)));
        }
    }
    edges.into_iter().collect()
}

/// Convert a closed vertex walk into canonical border edges.
///
/// The walk must revisit its first vertex at the end, take only unit
/// axis-aligned steps, and never trace the same edge twice.
pub fn walk_edges(walk: &[VertexPosition]) -> Result<Vec<BorderEdge>, EngineError> {
    if walk.len() < 5 {
        return Err(EngineError::InvalidWalk("walk needs at least four steps"));
    }
    if walk.first() != walk.last() {
        return Err(EngineError::InvalidWalk("walk must end where it starts"));
    }

    let mut edges = BTreeSet::new();
    for pair in walk.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let dx = i16::from(b.x()) - i16::from(a.x());
        let dy = i16::from(b.y()) - i16::from(a.y());
        let edge = match (dx, dy) {
            (1, 0) => BorderEdge::horizontal(a),
            (-1, 0) => BorderEdge::horizontal(b),
            (0, 1) => BorderEdge::vertical(a),
            (0, -1) => BorderEdge::vertical(b),
            _ => {
                return Err(EngineError::InvalidWalk(
                    "steps must be unit-length and axis-aligned",
                ))
            }
        };
        if !edges.insert(edge) {
            return Err(EngineError::InvalidWalk("walk traces an edge twice"));
        }
    }
    Ok(edges.into_iter().collect())
}

/// Cells enclosed by a set of border edges.
///
/// Casts a ray downward from each cell center and counts crossings of
/// horizontal edges; an odd count means the cell is inside the loop.
#[must_use]
pub fn cells_inside(edges: &[BorderEdge]) -> Vec<GridPosition> {
    GridPosition::all()
        .filter(|cell| {
            let crossings = edges
                .iter()
                .filter(|e| e.is_horizontal && e.start.x() == cell.x() && e.start.y() > cell.y())
                .count();
            crossings % 2 == 1
        })
        .collect()
}
