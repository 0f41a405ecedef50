//! Game configuration: board size, mode and seeding

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::game::{Player, DEFAULT_BOARD_SIZE};

/// Default location of the high-score table
pub const DEFAULT_SCORES_PATH: &str = "othello_scores.json";

/// Who controls each side
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GameMode {
    /// One human against the random computer player
    PvE { human: Player },
    /// Two humans sharing the terminal
    PvP,
}

impl GameMode {
    /// Whether `player` is driven by a person
    pub fn is_human(self, player: Player) -> bool {
        match self {
            GameMode::PvE { human } => human == player,
            GameMode::PvP => true,
        }
    }
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::PvE {
            human: Player::Black,
        }
    }
}

/// Configuration for a game session
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board edge length (even, at least 2)
    pub board_size: usize,
    /// Mode and human side
    pub mode: GameMode,
    /// Random seed for the computer player (None = entropy)
    pub seed: Option<u64>,
    /// Where high scores are kept
    pub scores_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            mode: GameMode::default(),
            seed: None,
            scores_path: PathBuf::from(DEFAULT_SCORES_PATH),
        }
    }
}

impl GameConfig {
    /// Player against computer, human on `human`
    pub fn pve(human: Player) -> Self {
        Self {
            mode: GameMode::PvE { human },
            ..Default::default()
        }
    }

    /// Two humans
    pub fn pvp() -> Self {
        Self {
            mode: GameMode::PvP,
            ..Default::default()
        }
    }

    pub fn with_board_size(mut self, board_size: usize) -> Self {
        self.board_size = board_size;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_scores_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.scores_path = path.into();
        self
    }

    /// Load from JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.board_size, 8);
        assert_eq!(config.mode, GameMode::PvE { human: Player::Black });
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_builders() {
        let config = GameConfig::pvp().with_board_size(6).with_seed(5);
        assert_eq!(config.mode, GameMode::PvP);
        assert_eq!(config.board_size, 6);
        assert_eq!(config.seed, Some(5));
    }

    #[test]
    fn test_is_human() {
        let mode = GameMode::PvE { human: Player::White };
        assert!(mode.is_human(Player::White));
        assert!(!mode.is_human(Player::Black));
        assert!(GameMode::PvP.is_human(Player::Black));
    }

    #[test]
    fn test_partial_json() {
        let config: GameConfig =
            serde_json::from_str(r#"{"board_size": 10, "mode": {"kind": "pve", "human": "White"}}"#)
                .unwrap();
        assert_eq!(config.board_size, 10);
        assert_eq!(config.mode, GameMode::PvE { human: Player::White });
        assert_eq!(config.scores_path, PathBuf::from(DEFAULT_SCORES_PATH));
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("othello-config-{}.json", std::process::id()));
        let config = GameConfig::pve(Player::White).with_seed(11);
        config.save(&path).unwrap();
        assert_eq!(GameConfig::load(&path).unwrap(), config);
        std::fs::remove_file(&path).ok();
    }
}
