//! The game session and turn state machine.
//!
//! ## Session vs. state
//!
//! A [`Game`] holds the only mutable pieces of a running game: the choice
//! pool and the RNG behind it. Everything else lives in immutable
//! [`GameState`] snapshots. Drawing offers mutates the session; applying a
//! turn is a pure function from one snapshot to the next. The split means a
//! host can hand out snapshots freely (UI previews, undo stacks, replays)
//! while funneling every draw through one place.
//!
//! ## Turn flow
//!
//! ```
//! use tiny_islands::core::GridPosition;
//! use tiny_islands::engine::Game;
//!
//! let (mut game, state) = Game::builder().game_id("demo").build(42).unwrap();
//!
//! let offers = game.available_choices(&state).unwrap();
//! let next = game
//!     .apply_placement_turn(&state, offers[0], offers[1], GridPosition::new(4, 4))
//!     .unwrap();
//!
//! assert_eq!(next.current_turn(), 2);
//! assert_eq!(state.current_turn(), 1); // the old snapshot is untouched
//! ```

use crate::core::{Choice, EngineError, GameRng, GameRngState, GridPosition, TurnPhase};
use crate::pool::{ChoicePool, PoolConfig};
use crate::region::resolve_region;
use crate::state::GameState;
use serde::{Deserialize, Serialize};

/// A running game session: the choice pool and its RNG.
#[derive(Clone, Debug)]
pub struct Game {
    pool: ChoicePool,
    rng: GameRng,
}

impl Game {
    /// Start configuring a new game.
    #[must_use]
    pub fn builder() -> GameBuilder {
        GameBuilder::new()
    }

    /// The two offers for the current placement turn.
    ///
    /// Returns an empty list on border turns and after the game has ended.
    /// Each call on a placement turn draws fresh offers and consumes two
    /// pool entries, so hosts cache the result per turn.
    pub fn available_choices(&mut self, state: &GameState) -> Result<Vec<Choice>, EngineError> {
        if state.phase() != Some(TurnPhase::Placement) {
            return Ok(Vec::new());
        }
        let (first, second) = self.pool.draw_choices(&mut self.rng)?;
        Ok(vec![first, second])
    }

    /// Apply a placement turn, returning the next snapshot.
    ///
    /// Validates phase and occupancy. Whether `position` lies inside the
    /// chosen chunk is the host's concern when offering cells, not a board
    /// constraint, so it is not re-checked here.
    pub fn apply_placement_turn(
        &self,
        state: &GameState,
        chosen: Choice,
        discarded: Choice,
        position: GridPosition,
    ) -> Result<GameState, EngineError> {
        state.expect_phase(TurnPhase::Placement)?;
        if state.tile_at(position).is_some() {
            return Err(EngineError::OccupiedCell(position));
        }
        Ok(state.with_placement(chosen, discarded, position))
    }

    /// Apply a border turn, resolving `cells` into a new island or lake.
    pub fn apply_border_turn(
        &self,
        state: &GameState,
        chosen: Choice,
        discarded: Choice,
        cells: &[GridPosition],
    ) -> Result<GameState, EngineError> {
        state.expect_phase(TurnPhase::Border)?;
        let island = resolve_region(cells)?;
        Ok(state.with_border(chosen, discarded, island))
    }

    /// The session's pool, for inspection.
    #[must_use]
    pub fn pool(&self) -> &ChoicePool {
        &self.pool
    }

    /// Capture the session for persistence.
    ///
    /// A save plus the matching [`GameState`] snapshot fully determine all
    /// future offers.
    #[must_use]
    pub fn save(&self) -> GameSave {
        GameSave {
            rng: self.rng.state(),
            pool: self.pool.clone(),
        }
    }

    /// Rebuild a session from a save.
    #[must_use]
    pub fn restore(save: GameSave) -> Game {
        Game {
            rng: GameRng::from_state(&save.rng),
            pool: save.pool,
        }
    }
}

/// Serializable session state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSave {
    pub rng: GameRngState,
    pub pool: ChoicePool,
}

/// Builder for new games.
///
/// `game_id` and `created_at` are opaque labels chosen by the host; the
/// engine never touches a clock.
#[derive(Clone, Debug)]
pub struct GameBuilder {
    game_id: String,
    created_at: String,
    pool: PoolConfig,
}

impl GameBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            game_id: "game".to_string(),
            created_at: String::new(),
            pool: PoolConfig::default(),
        }
    }

    #[must_use]
    pub fn game_id(mut self, game_id: impl Into<String>) -> Self {
        self.game_id = game_id.into();
        self
    }

    #[must_use]
    pub fn created_at(mut self, created_at: impl Into<String>) -> Self {
        self.created_at = created_at.into();
        self
    }

    #[must_use]
    pub fn pool(mut self, config: PoolConfig) -> Self {
        self.pool = config;
        self
    }

    /// Build the session and its opening snapshot.
    ///
    /// Fails with [`EngineError::InvalidPoolBounds`] when the pool config
    /// can never produce a full pool.
    pub fn build(self, seed: u64) -> Result<(Game, GameState), EngineError> {
        let mut rng = GameRng::new(seed);
        let pool = ChoicePool::new(self.pool, &mut rng)?;
        let state = GameState::new(self.game_id, self.created_at);
        Ok((Game { pool, rng }, state))
    }
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ChunkShape, TileType, TURN_COUNT};
    use crate::score::calculate_score;

    /// 27 placements: eight tiles on the first island, four on the second,
    /// three on the third, and twelve at sea, with four deliberate
    /// misplacements (one beach inland, houses, mountain, and a church at
    /// sea).
    const SCRIPT: [(TileType, GridPosition); 27] = [
        (TileType::Houses, GridPosition::new(1, 1)),
        (TileType::Houses, GridPosition::new(2, 1)),
        (TileType::Churches, GridPosition::new(0, 1)),
        (TileType::Forest, GridPosition::new(2, 3)),
        (TileType::Forest, GridPosition::new(3, 3)),
        (TileType::Forest, GridPosition::new(3, 2)),
        (TileType::Mountain, GridPosition::new(1, 3)),
        (TileType::Beach, GridPosition::new(3, 1)),
        (TileType::Houses, GridPosition::new(6, 6)),
        (TileType::Churches, GridPosition::new(5, 5)),
        (TileType::Forest, GridPosition::new(7, 7)),
        (TileType::Mountain, GridPosition::new(5, 7)),
        (TileType::Houses, GridPosition::new(1, 6)),
        (TileType::Forest, GridPosition::new(0, 5)),
        (TileType::Forest, GridPosition::new(0, 6)),
        (TileType::Ships, GridPosition::new(8, 0)),
        (TileType::Ships, GridPosition::new(4, 8)),
        (TileType::Waves, GridPosition::new(5, 2)),
        (TileType::Waves, GridPosition::new(8, 4)),
        (TileType::Waves, GridPosition::new(4, 6)),
        (TileType::Beach, GridPosition::new(4, 1)),
        (TileType::Beach, GridPosition::new(8, 7)),
        (TileType::Houses, GridPosition::new(8, 8)),
        (TileType::Mountain, GridPosition::new(4, 4)),
        (TileType::Ships, GridPosition::new(8, 2)),
        (TileType::Waves, GridPosition::new(2, 8)),
        (TileType::Churches, GridPosition::new(6, 1)),
    ];

    fn block(x0: u8, y0: u8, width: u8, height: u8) -> Vec<GridPosition> {
        (y0..y0 + height)
            .flat_map(|y| (x0..x0 + width).map(move |x| GridPosition::new(x, y)))
            .collect()
    }

    /// 1-based cluster index containing `position`.
    fn chunk_for(position: GridPosition) -> u8 {
        (position.y() / 3) * 3 + position.x() / 3 + 1
    }

    fn border_cells(turn: u32) -> Vec<GridPosition> {
        match turn {
            10 => block(0, 0, 4, 4), // 16 cells: a real island
            20 => block(5, 5, 3, 3), // 9 cells: a lake
            30 => block(0, 5, 3, 3), // 9 cells: a lake
            _ => panic!("turn {turn} is not a border turn"),
        }
    }

    fn dummy_choice(tile_type: TileType) -> Choice {
        Choice::new(tile_type, ChunkShape::Cluster, 1)
    }

    /// Play the scripted 30-turn game, drawing offers like a real host.
    fn play_scripted(seed: u64) -> (Game, GameState) {
        let (mut game, mut state) = Game::builder()
            .game_id("scripted")
            .created_at("2024-01-01T00:00:00Z")
            .build(seed)
            .unwrap();

        let mut tiles = SCRIPT.iter();
        for _ in 0..TURN_COUNT {
            state = match state.phase().unwrap() {
                TurnPhase::Placement => {
                    let offers = game.available_choices(&state).unwrap();
                    assert_eq!(offers.len(), 2);
                    let &(tile_type, position) = tiles.next().unwrap();
                    let chosen =
                        Choice::new(tile_type, ChunkShape::Cluster, chunk_for(position));
                    game.apply_placement_turn(&state, chosen, offers[1], position)
                        .unwrap()
                }
                TurnPhase::Border => {
                    let cells = border_cells(state.current_turn());
                    game.apply_border_turn(
                        &state,
                        dummy_choice(TileType::Ships),
                        dummy_choice(TileType::Waves),
                        &cells,
                    )
                    .unwrap()
                }
            };
        }
        assert!(tiles.next().is_none());
        (game, state)
    }

    #[test]
    fn test_builder_starts_at_turn_one() {
        let (game, state) = Game::builder()
            .game_id("fresh")
            .created_at("2024-05-01")
            .build(7)
            .unwrap();

        assert_eq!(state.current_turn(), 1);
        assert_eq!(state.game_id(), "fresh");
        assert_eq!(state.created_at(), "2024-05-01");
        assert_eq!(game.pool().remaining(), 52);
    }

    #[test]
    fn test_invalid_pool_config_fails_build() {
        let config = PoolConfig {
            total: 500,
            ..PoolConfig::default()
        };
        assert!(matches!(
            Game::builder().pool(config).build(1),
            Err(EngineError::InvalidPoolBounds { total: 500, .. })
        ));
    }

    #[test]
    fn test_available_choices_draws_two() {
        let (mut game, state) = Game::builder().build(42).unwrap();
        let offers = game.available_choices(&state).unwrap();

        assert_eq!(offers.len(), 2);
        assert_ne!(offers[0], offers[1]);
        assert_eq!(game.pool().remaining(), 50);
        for offer in &offers {
            assert!((1..=9).contains(&offer.chunk_index));
        }
    }

    #[test]
    fn test_available_choices_empty_on_border_turn() {
        let (mut game, mut state) = Game::builder().build(42).unwrap();
        for turn in 1..=9u32 {
            let offers = game.available_choices(&state).unwrap();
            state = game
                .apply_placement_turn(&state, offers[0], offers[1], GridPosition::new(turn as u8 - 1, 8))
                .unwrap();
        }

        assert_eq!(state.phase(), Some(TurnPhase::Border));
        let before = game.pool().remaining();
        assert_eq!(game.available_choices(&state).unwrap(), Vec::new());
        // Border turns draw nothing
        assert_eq!(game.pool().remaining(), before);
    }

    #[test]
    fn test_available_choices_empty_after_end() {
        let (mut game, state) = play_scripted(3);
        assert!(state.has_ended());
        assert_eq!(game.available_choices(&state).unwrap(), Vec::new());
    }

    #[test]
    fn test_placement_rejects_wrong_phase_and_occupied_cells() {
        let (mut game, state) = Game::builder().build(9).unwrap();
        let offers = game.available_choices(&state).unwrap();
        let position = GridPosition::new(3, 3);
        let state = game
            .apply_placement_turn(&state, offers[0], offers[1], position)
            .unwrap();

        // Same cell again
        assert_eq!(
            game.apply_placement_turn(&state, offers[0], offers[1], position),
            Err(EngineError::OccupiedCell(position))
        );

        // Border action on a placement turn
        assert_eq!(
            game.apply_border_turn(&state, offers[0], offers[1], &block(0, 0, 3, 3)),
            Err(EngineError::InvalidState {
                turn: 2,
                expected: TurnPhase::Border,
            })
        );

        // The failed calls left the snapshot usable
        assert_eq!(state.current_turn(), 2);
        assert_eq!(state.placed_tiles().len(), 1);
    }

    #[test]
    fn test_border_turn_validation_and_region_errors() {
        let (mut game, mut state) = Game::builder().build(21).unwrap();

        // Placement action outside a placement turn
        for x in 0..9u8 {
            let offers = game.available_choices(&state).unwrap();
            state = game
                .apply_placement_turn(&state, offers[0], offers[1], GridPosition::new(x, 0))
                .unwrap();
        }
        assert_eq!(state.current_turn(), 10);
        assert_eq!(
            game.apply_placement_turn(
                &state,
                dummy_choice(TileType::Beach),
                dummy_choice(TileType::Ships),
                GridPosition::new(0, 8)
            ),
            Err(EngineError::InvalidState {
                turn: 10,
                expected: TurnPhase::Placement,
            })
        );

        // Region failures pass through untouched
        let split = [GridPosition::new(0, 4), GridPosition::new(2, 4)];
        assert_eq!(
            game.apply_border_turn(
                &state,
                dummy_choice(TileType::Beach),
                dummy_choice(TileType::Ships),
                &split
            ),
            Err(EngineError::Disconnected)
        );
        assert_eq!(state.current_turn(), 10);
    }

    #[test]
    fn test_apply_never_mutates_input_state() {
        let (mut game, state) = Game::builder().build(15).unwrap();
        let offers = game.available_choices(&state).unwrap();

        let next = game
            .apply_placement_turn(&state, offers[0], offers[1], GridPosition::new(5, 5))
            .unwrap();

        assert_eq!(state.current_turn(), 1);
        assert!(state.placed_tiles().is_empty());
        assert_eq!(next.current_turn(), 2);

        // Two different futures can fork off the same snapshot
        let fork = game
            .apply_placement_turn(&state, offers[0], offers[1], GridPosition::new(6, 6))
            .unwrap();
        assert!(next.tile_at(GridPosition::new(5, 5)).is_some());
        assert!(fork.tile_at(GridPosition::new(5, 5)).is_none());
    }

    #[test]
    fn test_scripted_game_reaches_end_state() {
        let (game, state) = play_scripted(42);

        assert!(state.has_ended());
        assert_eq!(state.current_turn(), 31);
        assert_eq!(state.phase(), None);
        assert_eq!(state.history().len(), 30);
        assert_eq!(state.placed_tiles().len(), 27);
        assert_eq!(state.islands().len(), 3);
        // 16 + 12 + 12 edges across the three borders
        assert_eq!(state.border_lines().len(), 40);

        assert!(!state.islands()[0].is_lake());
        assert!(state.islands()[1].is_lake());
        assert!(state.islands()[2].is_lake());

        // 52 entries cannot cover 27 turns of two draws
        assert_eq!(game.pool().refills(), 1);

        // The finished game survives the document round-trip
        let json = crate::persist::to_json(&state).unwrap();
        assert_eq!(crate::persist::from_json(&json).unwrap(), state);
    }

    #[test]
    fn test_scripted_game_scores_twenty_three() {
        // Hand-scored: houses 9, churches 5, forest 6, mountain 4, beach 5,
        // waves 8, ships 6 = 43 points, minus 4 misplaced tiles at 5 each
        let (_, state) = play_scripted(42);
        assert_eq!(calculate_score(&state), 23);

        let summary = state.summary();
        assert_eq!(summary.points, 23);
        assert!(summary.ended);
        assert_eq!(summary.turns_played, 30);
        assert_eq!(summary.tiles_placed, 27);
        assert_eq!(summary.islands_formed, 3);
        assert_eq!(summary.border_lines_drawn, 40);
        assert_eq!(summary.cycle, 3);
        assert_eq!(summary.turn_in_cycle, 10);
        assert_eq!(summary.phase, None);
    }

    #[test]
    fn test_scripted_score_is_seed_independent() {
        // Offers differ per seed but the script pins every decision
        let (_, a) = play_scripted(1);
        let (_, b) = play_scripted(99);
        assert_eq!(calculate_score(&a), calculate_score(&b));
    }

    #[test]
    fn test_turns_rejected_after_end() {
        let (game, state) = play_scripted(8);

        assert_eq!(
            game.apply_placement_turn(
                &state,
                dummy_choice(TileType::Houses),
                dummy_choice(TileType::Waves),
                GridPosition::new(4, 0)
            ),
            Err(EngineError::InvalidState {
                turn: 31,
                expected: TurnPhase::Placement,
            })
        );
        assert_eq!(
            game.apply_border_turn(
                &state,
                dummy_choice(TileType::Houses),
                dummy_choice(TileType::Waves),
                &block(4, 4, 2, 2)
            ),
            Err(EngineError::InvalidState {
                turn: 31,
                expected: TurnPhase::Border,
            })
        );
    }

    #[test]
    fn test_same_seed_replays_same_offers() {
        let (mut game1, state1) = Game::builder().build(1234).unwrap();
        let (mut game2, state2) = Game::builder().build(1234).unwrap();

        let mut s1 = state1;
        let mut s2 = state2;
        for x in 0..9u8 {
            let offers1 = game1.available_choices(&s1).unwrap();
            let offers2 = game2.available_choices(&s2).unwrap();
            assert_eq!(offers1, offers2);

            let position = GridPosition::new(x, 4);
            s1 = game1
                .apply_placement_turn(&s1, offers1[0], offers1[1], position)
                .unwrap();
            s2 = game2
                .apply_placement_turn(&s2, offers2[0], offers2[1], position)
                .unwrap();
        }
        assert_eq!(s1, s2);
    }

    #[test]
    fn test_save_restore_resumes_identical_offers() {
        let (mut game, mut state) = Game::builder().build(77).unwrap();
        for x in 0..5u8 {
            let offers = game.available_choices(&state).unwrap();
            state = game
                .apply_placement_turn(&state, offers[0], offers[1], GridPosition::new(x, 2))
                .unwrap();
        }

        let save = game.save();
        let json = serde_json::to_string(&save).unwrap();
        let restored_save: GameSave = serde_json::from_str(&json).unwrap();
        let mut restored = Game::restore(restored_save);

        let original_offers = game.available_choices(&state).unwrap();
        let restored_offers = restored.available_choices(&state).unwrap();
        assert_eq!(original_offers, restored_offers);
        assert_eq!(game.pool().remaining(), restored.pool().remaining());
    }

    #[test]
    fn test_strict_pool_surfaces_exhaustion() {
        let config = PoolConfig {
            refill_when_empty: false,
            ..PoolConfig::default()
        };
        let (mut game, mut state) = Game::builder().pool(config).build(5).unwrap();

        let mut tiles = SCRIPT.iter();
        loop {
            match state.phase().unwrap() {
                TurnPhase::Placement => {
                    let offers = match game.available_choices(&state) {
                        Ok(offers) => offers,
                        Err(err) => {
                            // 26 pairs fit in 52 entries; the 27th placement
                            // turn cannot be served
                            assert_eq!(err, EngineError::PoolExhausted);
                            assert_eq!(state.current_turn(), 29);
                            assert_eq!(game.pool().remaining(), 0);
                            return;
                        }
                    };
                    let &(tile_type, position) = tiles.next().unwrap();
                    let chosen =
                        Choice::new(tile_type, ChunkShape::Cluster, chunk_for(position));
                    state = game
                        .apply_placement_turn(&state, chosen, offers[1], position)
                        .unwrap();
                }
                TurnPhase::Border => {
                    let cells = border_cells(state.current_turn());
                    state = game
                        .apply_border_turn(
                            &state,
                            dummy_choice(TileType::Ships),
                            dummy_choice(TileType::Waves),
                            &cells,
                        )
                        .unwrap();
                }
            }
        }
    }
}
