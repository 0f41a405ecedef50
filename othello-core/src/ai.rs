//! Computer player: uniformly random legal moves

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::board::Coord;
use crate::error::EngineError;
use crate::game::{GameEngine, TurnOutcome};

// ============================================================================
// RANDOM PLAYER
// ============================================================================

/// Plays a uniformly random legal move. Owns its RNG so games can be replayed from a seed.
pub struct RandomPlayer {
    rng: ChaCha8Rng,
}

impl RandomPlayer {
    /// Seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// `Some(seed)` replays deterministically, `None` draws from entropy
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::with_seed(s),
            None => Self::new(),
        }
    }

    /// Pick a legal move for the player to move without applying it
    pub fn choose_move(&mut self, state: &GameEngine) -> Option<Coord> {
        state
            .legal_moves(state.current_player())
            .choose(&mut self.rng)
            .copied()
    }

    /// Apply a random legal move for the player to move. The turn is not handed on.
    pub fn play_move(&mut self, state: &mut GameEngine) -> Result<Coord, EngineError> {
        let player = state.current_player();
        state.random_move(player, &mut self.rng)
    }

    /// Play random moves for both sides until neither can move
    pub fn play_game(&mut self, initial: GameEngine) -> (GameEngine, Vec<Coord>) {
        let mut state = initial;
        let mut history = Vec::new();

        // A position handed in mid-game may need a forfeit before anyone can move
        if !state.has_legal_move(state.current_player()) {
            state.advance_turn();
        }

        while !state.is_game_over() {
            match self.play_move(&mut state) {
                Ok(mv) => history.push(mv),
                Err(_) => break,
            }

            if let TurnOutcome::GameOver(_) = state.advance_turn() {
                break;
            }
        }

        (state, history)
    }
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameResult, Player};

    #[test]
    fn test_choose_move_is_legal() {
        let game = GameEngine::default();
        let mut player = RandomPlayer::with_seed(1);
        let mv = player.choose_move(&game).unwrap();
        assert!(game.is_legal_move(mv, Player::Black));
    }

    #[test]
    fn test_choose_move_none_when_stuck() {
        let game = GameEngine::new(2).unwrap();
        let mut player = RandomPlayer::with_seed(1);
        assert_eq!(player.choose_move(&game), None);
    }

    #[test]
    fn test_play_game_finishes() {
        let mut player = RandomPlayer::with_seed(42);
        let (final_state, history) = player.play_game(GameEngine::default());

        assert!(final_state.is_game_over());
        assert_ne!(final_state.result(), GameResult::Ongoing);
        // Each move adds exactly one tile to the four starting ones
        assert_eq!(final_state.counts().total(), 4 + history.len());
    }

    #[test]
    fn test_same_seed_same_game() {
        let (a, moves_a) = RandomPlayer::with_seed(9).play_game(GameEngine::default());
        let (b, moves_b) = RandomPlayer::with_seed(9).play_game(GameEngine::default());
        assert_eq!(moves_a, moves_b);
        assert_eq!(a, b);
    }

    #[test]
    fn test_play_game_handles_opening_forfeit() {
        // White to move but only Black can play
        let game = GameEngine::from_rows(&["BW..", "....", "....", "...."], Player::White).unwrap();
        let (final_state, history) = RandomPlayer::with_seed(3).play_game(game);
        assert_eq!(history, vec![Coord::new(0, 2)]);
        assert_eq!(final_state.result(), GameResult::BlackWins);
    }
}
