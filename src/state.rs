//! Game state snapshots.
//!
//! ## Snapshot model
//!
//! `GameState` is an immutable record of one moment in a game. Applying a
//! turn never mutates the input snapshot: the engine clones it, appends the
//! turn's outcome, and returns the clone. Backed by `im::Vector`, a clone is
//! O(1) and the whole 30-turn history of a game can be kept alive cheaply
//! for undo or review.
//!
//! ## History
//!
//! Every applied turn appends one `TurnRecord` holding both offered choices
//! and what was done with the chosen one, so a finished state replays the
//! player's decisions without the session that produced them.

use crate::core::{
    cycle_of, turn_in_cycle, Choice, EngineError, GridPosition, PlacedTile, TurnPhase, TURN_COUNT,
};
use crate::region::{BorderEdge, Island};
use im::Vector;
use serde::{Deserialize, Serialize};

/// Outcome of one applied turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnRecord {
    /// The choice the player kept.
    pub chosen: Choice,
    /// The choice the player passed on.
    pub discarded: Choice,
    /// Target cell for placement turns, `None` for border turns.
    pub placed_at: Option<GridPosition>,
    /// Edges drawn by border turns, empty for placement turns.
    pub edges_drawn: Vec<BorderEdge>,
}

/// One immutable snapshot of a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    current_turn: u32,
    choice_history: Vector<TurnRecord>,
    game_id: String,
    created_at: String,
    placed_tiles: Vector<PlacedTile>,
    border_lines: Vector<BorderEdge>,
    islands: Vector<Island>,
}

impl GameState {
    /// A fresh game at turn 1 with an empty board.
    ///
    /// `game_id` and `created_at` are caller-supplied labels; the engine
    /// never reads a clock or generates identifiers itself.
    #[must_use]
    pub fn new(game_id: impl Into<String>, created_at: impl Into<String>) -> Self {
        Self {
            current_turn: 1,
            choice_history: Vector::new(),
            game_id: game_id.into(),
            created_at: created_at.into(),
            placed_tiles: Vector::new(),
            border_lines: Vector::new(),
            islands: Vector::new(),
        }
    }

    /// 1-based number of the turn waiting to be played.
    #[must_use]
    pub fn current_turn(&self) -> u32 {
        self.current_turn
    }

    #[must_use]
    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    #[must_use]
    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    /// One record per applied turn, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<TurnRecord> {
        &self.choice_history
    }

    #[must_use]
    pub fn placed_tiles(&self) -> &Vector<PlacedTile> {
        &self.placed_tiles
    }

    /// Every border edge drawn so far, across all islands.
    #[must_use]
    pub fn border_lines(&self) -> &Vector<BorderEdge> {
        &self.border_lines
    }

    #[must_use]
    pub fn islands(&self) -> &Vector<Island> {
        &self.islands
    }

    /// Phase of the current turn, or `None` once the game has ended.
    #[must_use]
    pub fn phase(&self) -> Option<TurnPhase> {
        TurnPhase::of(self.current_turn)
    }

    /// A game ends when its turn counter passes the schedule.
    #[must_use]
    pub fn has_ended(&self) -> bool {
        self.current_turn > TURN_COUNT
    }

    /// The tile occupying `position`, if any.
    #[must_use]
    pub fn tile_at(&self, position: GridPosition) -> Option<&PlacedTile> {
        self.placed_tiles.iter().find(|t| t.position == position)
    }

    /// Whether `position` lies inside any island or lake.
    #[must_use]
    pub fn is_island_cell(&self, position: GridPosition) -> bool {
        self.islands.iter().any(|island| island.contains(position))
    }

    /// Whether some island or lake contains both cells.
    #[must_use]
    pub fn same_island(&self, a: GridPosition, b: GridPosition) -> bool {
        self.islands
            .iter()
            .any(|island| island.contains(a) && island.contains(b))
    }

    /// Derived overview of the game, including its score.
    #[must_use]
    pub fn summary(&self) -> GameSummary {
        GameSummary {
            game_id: self.game_id.clone(),
            current_turn: self.current_turn,
            total_turns: TURN_COUNT,
            turns_played: self.choice_history.len(),
            points: crate::score::calculate_score(self),
            ended: self.has_ended(),
            created_at: self.created_at.clone(),
            tiles_placed: self.placed_tiles.len(),
            border_lines_drawn: self.border_lines.len(),
            islands_formed: self.islands.len(),
            phase: self.phase(),
            cycle: cycle_of(self.current_turn),
            turn_in_cycle: turn_in_cycle(self.current_turn),
        }
    }

    pub(crate) fn expect_phase(&self, expected: TurnPhase) -> Result<(), EngineError> {
        if self.phase() == Some(expected) {
            Ok(())
        } else {
            Err(EngineError::InvalidState {
                turn: self.current_turn,
                expected,
            })
        }
    }

    /// Snapshot with one more tile on the board and the turn advanced.
    pub(crate) fn with_placement(
        &self,
        chosen: Choice,
        discarded: Choice,
        position: GridPosition,
    ) -> GameState {
        let mut next = self.clone();
        next.placed_tiles.push_back(PlacedTile {
            choice: chosen,
            position,
        });
        next.choice_history.push_back(TurnRecord {
            chosen,
            discarded,
            placed_at: Some(position),
            edges_drawn: Vec::new(),
        });
        next.current_turn += 1;
        next
    }

    /// Snapshot with one more island on the board and the turn advanced.
    pub(crate) fn with_border(&self, chosen: Choice, discarded: Choice, island: Island) -> GameState {
        let mut next = self.clone();
        next.border_lines.extend(island.edges().iter().copied());
        next.choice_history.push_back(TurnRecord {
            chosen,
            discarded,
            placed_at: None,
            edges_drawn: island.edges().to_vec(),
        });
        next.islands.push_back(island);
        next.current_turn += 1;
        next
    }
}

/// Derived, display-oriented view of a [`GameState`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    pub game_id: String,
    pub current_turn: u32,
    pub total_turns: u32,
    pub turns_played: usize,
    pub points: i64,
    pub ended: bool,
    pub created_at: String,
    pub tiles_placed: usize,
    pub border_lines_drawn: usize,
    pub islands_formed: usize,
    pub phase: Option<TurnPhase>,
    pub cycle: u32,
    pub turn_in_cycle: u32,
}
