//! # tiny-islands
//!
//! A deterministic rules engine for a 9x9 tile-placement puzzle.
//!
//! ## Design Principles
//!
//! 1. **Pure Turn Application**: Applying a turn maps `(snapshot, input)` to
//!    a new snapshot or an error. Old snapshots are never modified.
//!
//! 2. **Validation Before Mutation**: Every check runs before any state is
//!    built, so a failed call leaves nothing half-applied.
//!
//! 3. **Host-Driven I/O**: The engine never reads a clock, draws, or writes
//!    files. Hosts supply identifiers and persist the JSON documents.
//!
//! ## Architecture
//!
//! - **Snapshot-Per-Turn**: O(1) cloning via `im-rs`, so the full 30-turn
//!   history of snapshots costs little more than one board.
//!
//! - **Seeded Offers**: All randomness (pool fill, shuffle, chunk rolls)
//!   flows through one ChaCha8 RNG with O(1) serializable state, making any
//!   game replayable from a seed.
//!
//! ## Modules
//!
//! - `core`: Grid geometry, tiles and choices, turn schedule, RNG, errors
//! - `region`: Border walks, candidate-cell validation, island resolution
//! - `state`: Immutable game snapshots and the turn record
//! - `pool`: The bounded 52-entry tile pool and offer generation
//! - `engine`: Game sessions, turn application, saves
//! - `score`: End-of-game scoring and the per-tile breakdown
//! - `persist`: JSON documents for snapshots

pub mod core;
pub mod region;
pub mod state;
pub mod pool;
pub mod engine;
pub mod score;
pub mod persist;

// Re-export commonly used types
pub use crate::core::{
    Choice, ChunkShape, PlacedTile, TileType,
    EngineError,
    GameRng, GameRngState,
    GridPosition, VertexPosition, GRID_SIZE,
    TurnPhase, CYCLE_TURNS, PLACEMENT_TURNS, TURN_COUNT, TURN_SCHEDULE,
};

pub use crate::region::{
    cells_inside, resolve_region, resolve_walk, walk_edges,
    BorderEdge, Island, LAKE_THRESHOLD, MAX_BORDER_EDGES,
};

pub use crate::state::{GameState, GameSummary, TurnRecord};

pub use crate::pool::{ChoicePool, PoolConfig, POOL_SIZE};

pub use crate::engine::{Game, GameBuilder, GameSave};

pub use crate::score::{
    calculate_score, score_breakdown, TileScore, MISPLACED_PENALTY,
};

pub use crate::persist::{from_json, to_json, to_json_pretty};
