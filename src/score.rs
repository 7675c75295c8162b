//! Whole-board scoring.
//!
//! Scores exist only for finished games: [`calculate_score`] returns 0 while
//! turns remain. Lakes count as island ground for every rule below, they
//! only render differently.
//!
//! ## Rules
//!
//! - **Ships** score their Manhattan distance to the nearest other ship or
//!   island cell (any cell of the board counts, occupied or not). A ship on
//!   an island, or with no reference point at all, scores 0.
//! - **Waves** score 2 when no other wave shares their row, column, or
//!   8-neighborhood, otherwise 0.
//! - **Beaches** score 1 per orthogonally adjacent island cell.
//! - **Houses** score 1 per distinct non-house tile type among their 8
//!   neighbors.
//! - **Churches** score 2 per house in their 8-neighborhood plus 1 per other
//!   house on a shared island, but score 0 if another church stands on any
//!   island they touch.
//! - **Forests** share 2 x (n - 1) points per orthogonally connected group
//!   of n, split evenly; the remainder goes to the lexicographically
//!   smallest positions.
//! - **Mountains** score 2 per forest in their 8-neighborhood.
//!
//! Each misplaced tile costs a flat 5 points: land tiles off-island, sea
//! tiles on an island, and beaches anywhere on an island.

use crate::core::{GridPosition, TileType};
use crate::region::Island;
use crate::state::GameState;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

/// Flat cost of one misplaced tile.
pub const MISPLACED_PENALTY: i64 = 5;

/// Per-tile scoring detail for a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileScore {
    pub position: GridPosition,
    pub tile_type: TileType,
    /// Rule points before any penalty.
    pub points: i64,
    pub misplaced: bool,
}

/// Total score of a finished game, 0 for a game still in progress.
#[must_use]
pub fn calculate_score(state: &GameState) -> i64 {
    score_breakdown(state)
        .iter()
        .map(|tile| tile.points - if tile.misplaced { MISPLACED_PENALTY } else { 0 })
        .sum()
}

/// Per-tile scores of a finished game, in placement order.
///
/// Empty for a game still in progress. The game total is always the sum of
/// the entries' points minus the penalties of the misplaced ones.
#[must_use]
pub fn score_breakdown(state: &GameState) -> Vec<TileScore> {
    if !state.has_ended() {
        return Vec::new();
    }

    let board = BoardIndex::from_state(state);
    state
        .placed_tiles()
        .iter()
        .map(|tile| {
            let tile_type = tile.choice.tile_type;
            TileScore {
                position: tile.position,
                tile_type,
                points: board.points(tile.position, tile_type),
                misplaced: board.misplaced(tile.position, tile_type),
            }
        })
        .collect()
}

/// Lookup structure shared by all scoring rules.
struct BoardIndex {
    tiles: FxHashMap<GridPosition, TileType>,
    islands: Vec<Island>,
    island_cells: FxHashSet<GridPosition>,
    forest_points: FxHashMap<GridPosition, i64>,
}

impl BoardIndex {
    fn from_state(state: &GameState) -> Self {
        let tiles = state
            .placed_tiles()
            .iter()
            .map(|tile| (tile.position, tile.choice.tile_type))
            .collect();
        let islands = state.islands().iter().cloned().collect();
        Self::build(tiles, islands)
    }

    fn build(tiles: FxHashMap<GridPosition, TileType>, islands: Vec<Island>) -> Self {
        let island_cells = islands
            .iter()
            .flat_map(|island| island.cells().iter().copied())
            .collect();
        let forest_points = forest_group_points(&tiles);
        Self {
            tiles,
            islands,
            island_cells,
            forest_points,
        }
    }

    fn on_island(&self, position: GridPosition) -> bool {
        self.island_cells.contains(&position)
    }

    fn same_island(&self, a: GridPosition, b: GridPosition) -> bool {
        self.islands
            .iter()
            .any(|island| island.contains(a) && island.contains(b))
    }

    fn points(&self, position: GridPosition, tile: TileType) -> i64 {
        match tile {
            TileType::Houses => self.house_points(position),
            TileType::Waves => self.wave_points(position),
            TileType::Ships => self.ship_points(position),
            TileType::Forest => self.forest_points.get(&position).copied().unwrap_or(0),
            TileType::Mountain => self.mountain_points(position),
            TileType::Churches => self.church_points(position),
            TileType::Beach => self.beach_points(position),
        }
    }

    fn misplaced(&self, position: GridPosition, tile: TileType) -> bool {
        let on_island = self.on_island(position);
        if tile.is_land() {
            !on_island
        } else if tile.is_sea() {
            on_island
        } else {
            // beaches belong on the shoreline, outside any island
            on_island
        }
    }

    fn ship_points(&self, position: GridPosition) -> i64 {
        if self.on_island(position) {
            return 0;
        }
        GridPosition::all()
            .filter(|cell| {
                self.island_cells.contains(cell)
                    || (*cell != position && self.tiles.get(cell) == Some(&TileType::Ships))
            })
            .map(|cell| i64::from(position.manhattan(cell)))
            .min()
            .unwrap_or(0)
    }

    fn wave_points(&self, position: GridPosition) -> i64 {
        let shares_line = self.tiles.iter().any(|(&cell, &tile)| {
            tile == TileType::Waves
                && cell != position
                && (cell.x() == position.x() || cell.y() == position.y())
        });
        let crowded = position
            .neighbors8()
            .iter()
            .any(|neighbor| self.tiles.get(neighbor) == Some(&TileType::Waves));
        if shares_line || crowded {
            0
        } else {
            2
        }
    }

    fn beach_points(&self, position: GridPosition) -> i64 {
        position
            .neighbors4()
            .iter()
            .filter(|neighbor| self.island_cells.contains(*neighbor))
            .count() as i64
    }

    fn house_points(&self, position: GridPosition) -> i64 {
        let mut seen = [false; TileType::ALL.len()];
        for neighbor in position.neighbors8() {
            if let Some(&tile) = self.tiles.get(&neighbor) {
                if tile != TileType::Houses {
                    seen[tile.index()] = true;
                }
            }
        }
        seen.iter().filter(|present| **present).count() as i64
    }

    fn church_points(&self, position: GridPosition) -> i64 {
        let rivaled = self.tiles.iter().any(|(&cell, &tile)| {
            tile == TileType::Churches && cell != position && self.same_island(position, cell)
        });
        if rivaled {
            return 0;
        }

        let near = position.neighbors8();
        let mut points = 0;
        for (&cell, &tile) in &self.tiles {
            if tile != TileType::Houses {
                continue;
            }
            if near.contains(&cell) {
                points += 2;
            } else if self.same_island(position, cell) {
                points += 1;
            }
        }
        points
    }

    fn mountain_points(&self, position: GridPosition) -> i64 {
        let forests = position
            .neighbors8()
            .iter()
            .filter(|neighbor| self.tiles.get(neighbor) == Some(&TileType::Forest))
            .count() as i64;
        2 * forests
    }
}

/// Points of every forest tile, grouped by orthogonal connectivity.
///
/// A group of n forests shares 2 x (n - 1) points. Integer division splits
/// them; the remainder lands on the lexicographically smallest cells, so the
/// distribution is deterministic.
fn forest_group_points(tiles: &FxHashMap<GridPosition, TileType>) -> FxHashMap<GridPosition, i64> {
    let mut forests: Vec<GridPosition> = tiles
        .iter()
        .filter(|(_, tile)| **tile == TileType::Forest)
        .map(|(cell, _)| *cell)
        .collect();
    forests.sort();

    let mut points = FxHashMap::default();
    let mut seen = FxHashSet::default();
    for &start in &forests {
        if seen.contains(&start) {
            continue;
        }

        let mut group = vec![start];
        let mut frontier = vec![start];
        seen.insert(start);
        while let Some(cell) = frontier.pop() {
            for neighbor in cell.neighbors4() {
                if tiles.get(&neighbor) == Some(&TileType::Forest) && seen.insert(neighbor) {
                    group.push(neighbor);
                    frontier.push(neighbor);
                }
            }
        }

        group.sort();
        let size = group.len() as i64;
        let total = 2 * (size - 1);
        let base = total / size;
        let extra = total % size;
        for (rank, cell) in group.iter().enumerate() {
            points.insert(*cell, base + i64::from((rank as i64) < extra));
        }
    }
    points
}
