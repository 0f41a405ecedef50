//! Interactive game session
//!
//! Drives one game over any line-based input and text output: renders the
//! board with legal moves marked, reads human moves, plays the computer's
//! random moves and reports forfeits and the final result.

use std::io::{BufRead, Write};

use anyhow::Result;

use othello_core::{
    Coord, EngineError, GameConfig, GameEngine, GameMode, GameSummary, RandomPlayer, TurnOutcome,
};

/// How a session ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    /// Neither side could move
    Finished(GameSummary),
    /// A human quit or input ran out
    Abandoned,
}

/// What the human did on their turn
enum HumanAction {
    Moved,
    Quit,
}

/// One game between humans and/or the random computer player
pub struct Session {
    engine: GameEngine,
    mode: GameMode,
    computer: RandomPlayer,
}

impl Session {
    pub fn new(config: &GameConfig) -> Result<Self, EngineError> {
        let engine = GameEngine::new(config.board_size)?;
        Ok(Self::from_engine(
            engine,
            config.mode,
            RandomPlayer::from_seed(config.seed),
        ))
    }

    pub fn from_engine(engine: GameEngine, mode: GameMode, computer: RandomPlayer) -> Self {
        Self {
            engine,
            mode,
            computer,
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Play until the game ends or a human quits
    pub fn run<R: BufRead, W: Write>(&mut self, input: &mut R, output: &mut W) -> Result<SessionEnd> {
        // The player to move may already be stuck (tiny boards, custom positions)
        if !self.engine.has_legal_move(self.engine.current_player()) {
            self.hand_over(output)?;
        }

        while !self.engine.is_game_over() {
            let player = self.engine.current_player();

            if self.mode.is_human(player) {
                if let HumanAction::Quit = self.human_turn(input, output)? {
                    writeln!(output, "Game abandoned.")?;
                    tracing::info!("game abandoned by {}", player);
                    return Ok(SessionEnd::Abandoned);
                }
            } else {
                let mv = self.computer.play_move(&mut self.engine)?;
                writeln!(output, "Computer ({}) plays {}", player, mv)?;
            }

            if let TurnOutcome::GameOver(_) = self.hand_over(output)? {
                break;
            }
        }

        self.report_result(output)?;
        Ok(SessionEnd::Finished(self.engine.summary()))
    }

    /// Advance the turn and announce forfeits
    fn hand_over<W: Write>(&mut self, output: &mut W) -> Result<TurnOutcome> {
        let outcome = self.engine.advance_turn();
        if let TurnOutcome::Passed { passed, .. } = outcome {
            writeln!(output, "{} has no legal move and passes.", passed)?;
        }
        Ok(outcome)
    }

    fn human_turn<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
    ) -> Result<HumanAction> {
        let player = self.engine.current_player();
        let moves = self.engine.legal_moves(player);

        writeln!(output, "\n{}", self.engine.render(&moves))?;

        loop {
            write!(output, "{} to move: ", player)?;
            output.flush()?;

            let line = match read_line(input)? {
                Some(line) => line,
                None => return Ok(HumanAction::Quit),
            };

            match line.to_ascii_lowercase().as_str() {
                "" => continue,
                "quit" | "q" => return Ok(HumanAction::Quit),
                "moves" | "?" => {
                    writeln!(output, "Legal moves: {}", format_moves(&moves))?;
                    continue;
                }
                _ => {}
            }

            let coord: Coord = match line.parse() {
                Ok(coord) => coord,
                Err(e) => {
                    writeln!(output, "{}", e)?;
                    continue;
                }
            };

            match self.engine.apply_move(coord, player) {
                Ok(flips) => {
                    tracing::debug!("{} played {} flipping {}", player, coord, flips.len());
                    return Ok(HumanAction::Moved);
                }
                Err(e) => {
                    writeln!(output, "{}. Legal moves: {}", e, format_moves(&moves))?;
                }
            }
        }
    }

    fn report_result<W: Write>(&self, output: &mut W) -> Result<()> {
        let counts = self.engine.counts();
        writeln!(output, "\n{}", self.engine.board())?;
        writeln!(output, "-----------")?;
        writeln!(output, "GAME OVER: {}", self.engine.result())?;
        writeln!(output, "Black: {}  |  White: {}", counts.black, counts.white)?;
        Ok(())
    }
}

/// Read one trimmed line; None at end of input
pub(crate) fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn format_moves(moves: &[Coord]) -> String {
    moves
        .iter()
        .map(|mv| mv.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use othello_core::{GameResult, Player};
    use std::io::Cursor;

    fn script(moves: &[Coord]) -> Cursor<String> {
        let text: String = moves.iter().map(|mv| format!("{}\n", mv)).collect();
        Cursor::new(text)
    }

    #[test]
    fn test_pvp_replays_scripted_game() {
        let (expected, history) = RandomPlayer::with_seed(12).play_game(GameEngine::new(6).unwrap());

        let mut session = Session::from_engine(
            GameEngine::new(6).unwrap(),
            GameMode::PvP,
            RandomPlayer::with_seed(0),
        );
        let mut output = Vec::new();
        let end = session.run(&mut script(&history), &mut output).unwrap();

        assert_eq!(end, SessionEnd::Finished(expected.summary()));
        assert_eq!(session.engine(), &expected);
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("GAME OVER"));
    }

    #[test]
    fn test_pve_against_seeded_computer() {
        // Mirror the session: human takes the first legal move, computer shares the seed
        let human = Player::White;
        let mut mirror = GameEngine::new(6).unwrap();
        let mut computer = RandomPlayer::with_seed(31);
        let mut human_moves = Vec::new();
        while !mirror.is_game_over() {
            if mirror.current_player() == human {
                let mv = mirror.legal_moves(human)[0];
                mirror.apply_move(mv, human).unwrap();
                human_moves.push(mv);
            } else {
                computer.play_move(&mut mirror).unwrap();
            }
            mirror.advance_turn();
        }

        let mut session = Session::from_engine(
            GameEngine::new(6).unwrap(),
            GameMode::PvE { human },
            RandomPlayer::with_seed(31),
        );
        let mut output = Vec::new();
        let end = session.run(&mut script(&human_moves), &mut output).unwrap();

        assert_eq!(end, SessionEnd::Finished(mirror.summary()));
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Computer (Black) plays"));
    }

    #[test]
    fn test_bad_input_reprompts_without_mutation() {
        let mut session = Session::from_engine(
            GameEngine::default(),
            GameMode::PvP,
            RandomPlayer::with_seed(0),
        );
        let mut input = Cursor::new("zz\na1\nmoves\nd3\nquit\n");
        let mut output = Vec::new();
        let end = session.run(&mut input, &mut output).unwrap();

        assert_eq!(end, SessionEnd::Abandoned);
        // Only d3 was applied
        assert_eq!(session.engine().counts().black, 4);
        assert_eq!(session.engine().current_player(), Player::White);

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("cannot parse coordinate"));
        assert!(text.contains("illegal move a1 for Black"));
        assert!(text.contains("Legal moves: d3, c4, f5, e6"));
        assert!(text.contains("Game abandoned."));
    }

    #[test]
    fn test_end_of_input_abandons() {
        let mut session = Session::from_engine(
            GameEngine::default(),
            GameMode::PvP,
            RandomPlayer::with_seed(0),
        );
        let end = session.run(&mut Cursor::new(""), &mut Vec::new()).unwrap();
        assert_eq!(end, SessionEnd::Abandoned);
        assert_eq!(session.engine(), &GameEngine::default());
    }

    #[test]
    fn test_forfeit_is_announced() {
        let engine = GameEngine::from_rows(&["BW..", "....", "....", "BW.."], Player::Black).unwrap();
        let mut session = Session::from_engine(engine, GameMode::PvP, RandomPlayer::with_seed(0));
        let mut output = Vec::new();
        let end = session.run(&mut Cursor::new("c1\nc4\n"), &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("White has no legal move and passes."));
        match end {
            SessionEnd::Finished(summary) => {
                assert_eq!(summary.result, GameResult::BlackWins);
                assert_eq!((summary.black, summary.white), (6, 0));
            }
            SessionEnd::Abandoned => panic!("game should have finished"),
        }
    }

    #[test]
    fn test_move_past_column_z() {
        let mut first = ".".repeat(28);
        first.replace_range(25..27, "BW");
        let empty = ".".repeat(28);
        let mut rows = vec![first.as_str()];
        rows.extend(std::iter::repeat(empty.as_str()).take(27));
        let engine = GameEngine::from_rows(&rows, Player::Black).unwrap();

        let mut session = Session::from_engine(engine, GameMode::PvP, RandomPlayer::with_seed(0));
        let mut output = Vec::new();
        let end = session
            .run(&mut Cursor::new("(0, 27)\n"), &mut output)
            .unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(!text.contains("cannot parse coordinate"));
        match end {
            SessionEnd::Finished(summary) => {
                assert_eq!(summary.result, GameResult::BlackWins);
                assert_eq!((summary.black, summary.white), (3, 0));
            }
            SessionEnd::Abandoned => panic!("game should have finished"),
        }
    }

    #[test]
    fn test_stuck_start_finishes_immediately() {
        let config = GameConfig::pvp().with_board_size(2);
        let mut session = Session::new(&config).unwrap();
        let end = session.run(&mut Cursor::new(""), &mut Vec::new()).unwrap();
        assert_eq!(
            end,
            SessionEnd::Finished(GameSummary {
                board_size: 2,
                black: 2,
                white: 2,
                result: GameResult::Tie,
            })
        );
    }

    #[test]
    fn test_session_rejects_bad_size() {
        let config = GameConfig::pvp().with_board_size(5);
        assert!(matches!(
            Session::new(&config),
            Err(EngineError::OddBoardSize(5))
        ));
    }
}
