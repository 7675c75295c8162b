//! Tile types, chunk shapes, and the per-turn choice model.
//!
//! ## Choice
//!
//! Each placement turn offers two choices. A choice fixes the tile type and
//! the chunk of the board the tile may go in; it does not fix the exact cell.
//! Chunk legality is a presentation concern: the engine validates occupancy
//! only, so hosts enforce "placed inside the chunk" before applying a turn.

use super::grid::GridPosition;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the seven tile types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileType {
    Houses,
    Waves,
    Ships,
    Forest,
    Mountain,
    Churches,
    Beach,
}

impl TileType {
    /// Every tile type, in a fixed order used for counting and iteration.
    pub const ALL: [TileType; 7] = [
        TileType::Houses,
        TileType::Waves,
        TileType::Ships,
        TileType::Forest,
        TileType::Mountain,
        TileType::Churches,
        TileType::Beach,
    ];

    /// Position of this type within [`TileType::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Tile types that want open water. Misplaced when inside an island.
    #[must_use]
    pub const fn is_sea(self) -> bool {
        matches!(self, TileType::Waves | TileType::Ships)
    }

    /// Tile types that want solid ground. Misplaced when outside every island.
    #[must_use]
    pub const fn is_land(self) -> bool {
        matches!(
            self,
            TileType::Houses | TileType::Forest | TileType::Mountain | TileType::Churches
        )
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            TileType::Houses => "houses",
            TileType::Waves => "waves",
            TileType::Ships => "ships",
            TileType::Forest => "forest",
            TileType::Mountain => "mountain",
            TileType::Churches => "churches",
            TileType::Beach => "beach",
        }
    }
}

impl fmt::Display for TileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The shape of the board region a choice restricts placement to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkShape {
    /// One of nine 3x3 blocks, numbered 1-9 from top-left, row by row.
    Cluster,
    /// One of nine rows, numbered 1-9 from the top.
    Horizontal,
    /// One of nine columns, numbered 1-9 from the left.
    Vertical,
}

impl ChunkShape {
    pub const ALL: [ChunkShape; 3] = [ChunkShape::Cluster, ChunkShape::Horizontal, ChunkShape::Vertical];
}

/// A tile offer: tile type plus the chunk it must be placed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    pub tile_type: TileType,
    pub chunk_shape: ChunkShape,
    /// 1-based chunk number, always in `1..=9`.
    pub chunk_index: u8,
}

impl Choice {
    /// Create a choice.
    ///
    /// Panics if `chunk_index` is not in `1..=9`.
    #[must_use]
    pub const fn new(tile_type: TileType, chunk_shape: ChunkShape, chunk_index: u8) -> Self {
        assert!(chunk_index >= 1 && chunk_index <= 9, "Chunk index out of range");
        Self {
            tile_type,
            chunk_shape,
            chunk_index,
        }
    }

    /// The nine cells this choice allows placement in.
    ///
    /// ```
    /// use tiny_islands::core::{Choice, ChunkShape, GridPosition, TileType};
    ///
    /// let choice = Choice::new(TileType::Forest, ChunkShape::Cluster, 5);
    /// let cells = choice.chunk_cells();
    /// assert_eq!(cells.len(), 9);
    /// assert!(cells.contains(&GridPosition::new(4, 4)));
    /// ```
    #[must_use]
    pub fn chunk_cells(&self) -> Vec<GridPosition> {
        let index = self.chunk_index - 1;
        match self.chunk_shape {
            ChunkShape::Cluster => {
                let x0 = (index % 3) * 3;
                let y0 = (index / 3) * 3;
                (y0..y0 + 3)
                    .flat_map(|y| (x0..x0 + 3).map(move |x| GridPosition::new(x, y)))
                    .collect()
            }
            ChunkShape::Horizontal => (0..9).map(|x| GridPosition::new(x, index)).collect(),
            ChunkShape::Vertical => (0..9).map(|y| GridPosition::new(index, y)).collect(),
        }
    }

    /// Whether `position` lies inside this choice's chunk.
    #[must_use]
    pub fn allows(&self, position: GridPosition) -> bool {
        let index = self.chunk_index - 1;
        match self.chunk_shape {
            ChunkShape::Cluster => {
                position.x() / 3 == index % 3 && position.y() / 3 == index / 3
            }
            ChunkShape::Horizontal => position.y() == index,
            ChunkShape::Vertical => position.x() == index,
        }
    }
}

/// A tile committed to a specific cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedTile {
    pub choice: Choice,
    pub position: GridPosition,
}
