//! Menu screens - the navigation state machine around a game
//!
//! MainMenu -> ModeSelect -> ColorSelect -> Playing -> GameOver, with
//! Settings and Back edges. The engine never sees any of this.

use std::io::{BufRead, Write};

use anyhow::Result;

use othello_core::{GameConfig, GameMode, Player};

use crate::session::read_line;

/// Where the player currently is in the menus
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    MainMenu,
    ModeSelect,
    ColorSelect,
    Settings,
    Playing(GameMode),
    GameOver,
    Quit,
}

impl Screen {
    pub fn title(self) -> &'static str {
        match self {
            Screen::MainMenu => "OTHELLO",
            Screen::ModeSelect => "SELECT MODE",
            Screen::ColorSelect => "CHOOSE COLOR",
            Screen::Settings => "SETTINGS",
            Screen::Playing(_) => "PLAYING",
            Screen::GameOver => "GAME OVER",
            Screen::Quit => "",
        }
    }

    /// Labels offered on this screen, in order
    pub fn options(self) -> &'static [&'static str] {
        match self {
            Screen::MainMenu => &["Play", "Settings", "Quit"],
            Screen::ModeSelect => &["Vs Computer", "Vs Player", "Back"],
            Screen::ColorSelect => &["Play as Black", "Play as White", "Back"],
            Screen::Settings => &["Back"],
            Screen::GameOver => &["Main menu", "Quit"],
            Screen::Playing(_) | Screen::Quit => &[],
        }
    }

    /// Next screen for a 1-based option number
    pub fn select(self, choice: usize) -> Option<Screen> {
        let next = match (self, choice) {
            (Screen::MainMenu, 1) => Screen::ModeSelect,
            (Screen::MainMenu, 2) => Screen::Settings,
            (Screen::MainMenu, 3) => Screen::Quit,

            (Screen::ModeSelect, 1) => Screen::ColorSelect,
            (Screen::ModeSelect, 2) => Screen::Playing(GameMode::PvP),
            (Screen::ModeSelect, 3) => Screen::MainMenu,

            (Screen::ColorSelect, 1) => Screen::Playing(GameMode::PvE {
                human: Player::Black,
            }),
            (Screen::ColorSelect, 2) => Screen::Playing(GameMode::PvE {
                human: Player::White,
            }),
            (Screen::ColorSelect, 3) => Screen::ModeSelect,

            (Screen::Settings, 1) => Screen::MainMenu,

            (Screen::GameOver, 1) => Screen::MainMenu,
            (Screen::GameOver, 2) => Screen::Quit,

            _ => return None,
        };
        Some(next)
    }

    /// Accept an option number or a case-insensitive option label
    pub fn parse_choice(self, text: &str) -> Option<Screen> {
        let text = text.trim();
        if let Ok(n) = text.parse::<usize>() {
            return self.select(n);
        }

        self.options()
            .iter()
            .position(|label| label.eq_ignore_ascii_case(text))
            .and_then(|i| self.select(i + 1))
    }
}

/// Show `screen`, read choices until one is valid and return the next screen.
/// End of input counts as quitting.
pub fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    screen: Screen,
    config: &GameConfig,
) -> Result<Screen> {
    writeln!(output, "\n== {} ==", screen.title())?;
    if screen == Screen::Settings {
        writeln!(output, "Board size: {}", config.board_size)?;
        match config.seed {
            Some(seed) => writeln!(output, "Seed: {}", seed)?,
            None => writeln!(output, "Seed: random")?,
        }
        writeln!(output, "High scores: {}", config.scores_path.display())?;
    }
    for (i, label) in screen.options().iter().enumerate() {
        writeln!(output, "  {}) {}", i + 1, label)?;
    }

    loop {
        write!(output, "> ")?;
        output.flush()?;

        let line = match read_line(input)? {
            Some(line) => line,
            None => return Ok(Screen::Quit),
        };

        match screen.parse_choice(&line) {
            Some(next) => {
                tracing::debug!("menu: {:?} -> {:?}", screen, next);
                return Ok(next);
            }
            None => writeln!(output, "Please pick 1-{}.", screen.options().len())?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_forward_path() {
        let screen = Screen::MainMenu.select(1).unwrap();
        assert_eq!(screen, Screen::ModeSelect);
        let screen = screen.select(1).unwrap();
        assert_eq!(screen, Screen::ColorSelect);
        let screen = screen.select(2).unwrap();
        assert_eq!(
            screen,
            Screen::Playing(GameMode::PvE {
                human: Player::White
            })
        );
    }

    #[test]
    fn test_back_edges() {
        assert_eq!(Screen::ColorSelect.select(3), Some(Screen::ModeSelect));
        assert_eq!(Screen::ModeSelect.select(3), Some(Screen::MainMenu));
        assert_eq!(Screen::Settings.select(1), Some(Screen::MainMenu));
        assert_eq!(Screen::GameOver.select(1), Some(Screen::MainMenu));
    }

    #[test]
    fn test_invalid_choices() {
        assert_eq!(Screen::MainMenu.select(0), None);
        assert_eq!(Screen::MainMenu.select(4), None);
        assert_eq!(Screen::Settings.select(2), None);
        assert_eq!(Screen::Quit.select(1), None);
    }

    #[test]
    fn test_parse_choice_by_label() {
        assert_eq!(
            Screen::ModeSelect.parse_choice("vs player"),
            Some(Screen::Playing(GameMode::PvP))
        );
        assert_eq!(Screen::MainMenu.parse_choice(" QUIT "), Some(Screen::Quit));
        assert_eq!(Screen::MainMenu.parse_choice("dance"), None);
    }

    #[test]
    fn test_prompt_reprompts_on_bad_input() {
        let mut input = Cursor::new("9\nsettings\n");
        let mut output = Vec::new();
        let next = prompt(&mut input, &mut output, Screen::MainMenu, &GameConfig::default()).unwrap();

        assert_eq!(next, Screen::Settings);
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("== OTHELLO =="));
        assert!(text.contains("Please pick 1-3."));
    }

    #[test]
    fn test_prompt_eof_quits() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();
        let next = prompt(&mut input, &mut output, Screen::ModeSelect, &GameConfig::default()).unwrap();
        assert_eq!(next, Screen::Quit);
    }

    #[test]
    fn test_settings_shows_config() {
        let mut input = Cursor::new("1\n");
        let mut output = Vec::new();
        let config = GameConfig::default().with_board_size(6).with_seed(17);
        prompt(&mut input, &mut output, Screen::Settings, &config).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Board size: 6"));
        assert!(text.contains("Seed: 17"));
    }
}
