//! Engine error type.
//!
//! Every fallible engine entry point validates its inputs in full before
//! building a new snapshot, so a returned error never leaves a partially
//! updated game behind.

use super::grid::GridPosition;
use super::schedule::TurnPhase;
use thiserror::Error;

/// Errors produced by turn application, region validation, and the pool.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// The game has ended, or the current turn is of the other phase.
    #[error("turn {turn} does not accept a {expected} action")]
    InvalidState { turn: u32, expected: TurnPhase },

    /// The target cell already holds a tile.
    #[error("cell {0} already holds a tile")]
    OccupiedCell(GridPosition),

    /// A border turn submitted no cells.
    #[error("candidate region is empty")]
    EmptyRegion,

    /// The candidate cells do not form one orthogonally connected region.
    #[error("candidate region is not connected")]
    Disconnected,

    /// The candidate region fully surrounds a cell it does not contain.
    #[error("candidate region surrounds the hole at {0}")]
    HasHole(GridPosition),

    /// The region's boundary needs more edges than one border turn may draw.
    #[error("region boundary has {edges} edges, limit is {limit}")]
    BorderTooLong { edges: usize, limit: usize },

    /// A vertex walk is not a closed loop of unit, axis-aligned steps.
    #[error("invalid border walk: {0}")]
    InvalidWalk(&'static str),

    /// A non-refilling pool cannot supply two more draws.
    #[error("choice pool cannot supply two more draws")]
    PoolExhausted,

    /// Pool bounds can never produce a pool of the configured size.
    #[error("pool bounds cannot reach {total} tiles (minimums sum to {min_sum}, maximums to {max_sum})")]
    InvalidPoolBounds {
        total: usize,
        min_sum: usize,
        max_sum: usize,
    },
}
