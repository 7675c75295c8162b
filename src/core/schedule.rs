//! The fixed 30-turn schedule.
//!
//! A game is three cycles of nine placement turns followed by one border
//! turn. The phase of a turn is a pure function of its 1-based number,
//! answered from a static table rather than recomputed from game state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of turns in a full game.
pub const TURN_COUNT: u32 = 30;

/// Number of placement turns in a full game.
pub const PLACEMENT_TURNS: u32 = 27;

/// Turns per cycle: nine placements and one border.
pub const CYCLE_TURNS: u32 = 10;

/// What kind of action a turn accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnPhase {
    /// Pick one of two offered tiles and place it on an empty cell.
    Placement,
    /// Draw a closed border, forming a new island or lake.
    Border,
}

/// Phase of each turn, indexed by `turn_number - 1`.
pub const TURN_SCHEDULE: [TurnPhase; TURN_COUNT as usize] = {
    use TurnPhase::{Border as B, Placement as P};
    [
        P, P, P, P, P, P, P, P, P, B, // cycle 1
        P, P, P, P, P, P, P, P, P, B, // cycle 2
        P, P, P, P, P, P, P, P, P, B, // cycle 3
    ]
};

impl TurnPhase {
    /// Phase of the given 1-based turn number, or `None` past the end of the game.
    #[must_use]
    pub fn of(turn_number: u32) -> Option<TurnPhase> {
        let index = (turn_number as usize).checked_sub(1)?;
        TURN_SCHEDULE.get(index).copied()
    }
}

impl fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TurnPhase::Placement => "placement",
            TurnPhase::Border => "border",
        })
    }
}

/// 1-based cycle the given turn belongs to, clamped to the last cycle after
/// the game ends.
#[must_use]
pub fn cycle_of(turn_number: u32) -> u32 {
    if turn_number > TURN_COUNT {
        TURN_COUNT / CYCLE_TURNS
    } else {
        turn_number.saturating_sub(1) / CYCLE_TURNS + 1
    }
}

/// 1-based position of the given turn within its cycle, clamped to the last
/// turn after the game ends.
#[must_use]
pub fn turn_in_cycle(turn_number: u32) -> u32 {
    if turn_number > TURN_COUNT {
        CYCLE_TURNS
    } else {
        turn_number.saturating_sub(1) % CYCLE_TURNS + 1
    }
}
