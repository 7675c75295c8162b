//! The bounded tile pool behind each turn's offers.
//!
//! ## Build
//!
//! A pool is a shuffled multiset of tile types. Building one starts every
//! type at its minimum count, then adds tiles one at a time to randomly
//! chosen types that still have headroom until the configured total is
//! reached. The result is shuffled once and consumed front to back, so a
//! seed fully determines the draw order.
//!
//! ## Exhaustion
//!
//! Twenty-seven placement turns draw 54 tiles; the default pool holds 52.
//! A pool with `refill_when_empty` set rebuilds itself from its config (on
//! the same RNG stream) whenever it cannot supply a full pair. Without the
//! flag the shortfall surfaces as [`EngineError::PoolExhausted`].

use crate::core::{Choice, ChunkShape, EngineError, GameRng, TileType};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Entries in a default pool build.
pub const POOL_SIZE: usize = 52;

/// Times a second offer is re-rolled before falling back to a chunk shift.
const OFFER_RETRIES: usize = 4;

/// Inclusive (min, max) tile counts per type, in [`TileType::ALL`] order.
pub const DEFAULT_BOUNDS: [(u8, u8); 7] = [
    (8, 11),  // houses
    (8, 10),  // waves
    (3, 3),   // ships
    (11, 13), // forest
    (3, 5),   // mountain
    (4, 6),   // churches
    (8, 9),   // beach
];

/// Tunable pool parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolConfig {
    /// Inclusive per-type (min, max) counts, in [`TileType::ALL`] order.
    pub bounds: [(u8, u8); 7],
    /// Entries per pool build.
    pub total: usize,
    /// Rebuild instead of failing when a pair cannot be served.
    pub refill_when_empty: bool,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            bounds: DEFAULT_BOUNDS,
            total: POOL_SIZE,
            refill_when_empty: true,
        }
    }
}

impl PoolConfig {
    /// Inclusive (min, max) count for one tile type.
    #[must_use]
    pub fn bounds_for(&self, tile: TileType) -> (u8, u8) {
        self.bounds[tile.index()]
    }

    /// Reject configurations that can never produce a `total`-sized pool.
    ///
    /// `total` must be reachable between the summed minimums and maximums,
    /// every per-type range must be ordered, and a pool must cover at least
    /// one full pair.
    pub fn validate(&self) -> Result<(), EngineError> {
        let min_sum: usize = self.bounds.iter().map(|(min, _)| *min as usize).sum();
        let max_sum: usize = self.bounds.iter().map(|(_, max)| *max as usize).sum();
        let ordered = self.bounds.iter().all(|(min, max)| min <= max);

        if self.total < 2 || !ordered || min_sum > self.total || self.total > max_sum {
            return Err(EngineError::InvalidPoolBounds {
                total: self.total,
                min_sum,
                max_sum,
            });
        }
        Ok(())
    }
}

/// A built pool and its draw position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoicePool {
    config: PoolConfig,
    entries: Vec<TileType>,
    cursor: usize,
    refills: u32,
}

impl ChoicePool {
    /// Validate `config` and build the initial pool.
    pub fn new(config: PoolConfig, rng: &mut GameRng) -> Result<Self, EngineError> {
        config.validate()?;
        let entries = build_entries(&config, rng);
        Ok(Self {
            config,
            entries,
            cursor: 0,
            refills: 0,
        })
    }

    #[must_use]
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Entries of the current build, drawn and undrawn. Mainly for diagnostics.
    #[must_use]
    pub fn entries(&self) -> &[TileType] {
        &self.entries
    }

    /// Entries left in the current build.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.entries.len() - self.cursor
    }

    /// How many times the pool has been rebuilt after running dry.
    #[must_use]
    pub fn refills(&self) -> u32 {
        self.refills
    }

    /// Draw the next two tile types.
    ///
    /// Rebuilds first when fewer than two entries remain and the config
    /// allows it, so a served pair always comes from a single build.
    pub fn draw_pair(&mut self, rng: &mut GameRng) -> Result<(TileType, TileType), EngineError> {
        if self.remaining() < 2 {
            if !self.config.refill_when_empty {
                return Err(EngineError::PoolExhausted);
            }
            self.rebuild(rng);
        }
        let first = self.take_next();
        let second = self.take_next();
        Ok((first, second))
    }

    /// Draw a full placement offer: two distinct choices.
    ///
    /// The second choice is re-rolled a few times if it collides with the
    /// first; as a last resort its chunk shifts one position, which always
    /// breaks the tie.
    pub fn draw_choices(&mut self, rng: &mut GameRng) -> Result<(Choice, Choice), EngineError> {
        let (first_tile, second_tile) = self.draw_pair(rng)?;
        let first = random_choice(first_tile, rng);
        let mut second = random_choice(second_tile, rng);

        let mut retries = 0;
        while second == first && retries < OFFER_RETRIES {
            second = random_choice(second_tile, rng);
            retries += 1;
        }
        if second == first {
            second.chunk_index = second.chunk_index % 9 + 1;
        }
        Ok((first, second))
    }

    fn rebuild(&mut self, rng: &mut GameRng) {
        self.entries = build_entries(&self.config, rng);
        self.cursor = 0;
        self.refills += 1;
    }

    fn take_next(&mut self) -> TileType {
        let tile = self.entries[self.cursor];
        self.cursor += 1;
        tile
    }
}

/// Build one shuffled pool from validated bounds.
fn build_entries(config: &PoolConfig, rng: &mut GameRng) -> Vec<TileType> {
    let mut counts = [0usize; TileType::ALL.len()];
    let mut filled = 0;
    for tile in TileType::ALL {
        let (min, _) = config.bounds_for(tile);
        counts[tile.index()] = min as usize;
        filled += min as usize;
    }

    while filled < config.total {
        let open: SmallVec<[TileType; 7]> = TileType::ALL
            .into_iter()
            .filter(|tile| counts[tile.index()] < config.bounds_for(*tile).1 as usize)
            .collect();
        assert!(!open.is_empty(), "Validated bounds leave headroom below total");
        let tile = open[rng.gen_range_usize(0..open.len())];
        counts[tile.index()] += 1;
        filled += 1;
    }

    let mut entries = Vec::with_capacity(config.total);
    for tile in TileType::ALL {
        entries.extend(std::iter::repeat(tile).take(counts[tile.index()]));
    }
    rng.shuffle(&mut entries);
    entries
}

/// Roll a random chunk for a drawn tile type.
fn random_choice(tile_type: TileType, rng: &mut GameRng) -> Choice {
    let shape = ChunkShape::ALL[rng.gen_range_usize(0..ChunkShape::ALL.len())];
    let chunk_index = rng.gen_range_usize(1..10) as u8;
    Choice::new(tile_type, shape, chunk_index)
}
