//! Core engine types: geometry, tiles, the turn schedule, RNG, errors.
//!
//! This module contains the fundamental building blocks shared by every
//! layer above: they carry no game state of their own.

pub mod grid;
pub mod tile;
pub mod schedule;
pub mod rng;
pub mod error;

pub use grid::{bounding_box, GridPosition, VertexPosition, GRID_SIZE};
pub use tile::{Choice, ChunkShape, PlacedTile, TileType};
pub use schedule::{cycle_of, turn_in_cycle, TurnPhase, CYCLE_TURNS, PLACEMENT_TURNS, TURN_COUNT, TURN_SCHEDULE};
pub use rng::{GameRng, GameRngState};
pub use error::EngineError;
