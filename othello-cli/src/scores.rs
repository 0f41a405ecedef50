//! High-score table persisted as JSON

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use serde::{Deserialize, Serialize};

use othello_core::config::DEFAULT_SCORES_PATH;
use othello_core::{GameMode, GameSummary, Player};

#[derive(Args)]
pub struct ScoresArgs {
    /// High-score file
    #[arg(long, value_name = "FILE", default_value = DEFAULT_SCORES_PATH)]
    pub scores: PathBuf,

    /// Number of entries to show
    #[arg(long, default_value = "10")]
    pub limit: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// One recorded score
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: usize,
    pub board_size: usize,
    pub recorded_at: DateTime<Utc>,
}

/// Best score per (name, board size)
#[derive(Clone, Debug, Default)]
pub struct HighScores {
    entries: Vec<ScoreEntry>,
}

impl HighScores {
    /// Load from JSON file; a missing file is an empty table
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scores: {}", path.display()))?;
        let entries = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse scores: {}", path.display()))?;
        Ok(Self { entries })
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write scores: {}", path.display()))?;
        Ok(())
    }

    /// Record `score` for `name` now. Returns whether the table changed.
    pub fn update(&mut self, name: &str, score: usize, board_size: usize) -> bool {
        self.update_at(name, score, board_size, Utc::now())
    }

    /// Keeps only the best score per name and board size
    pub fn update_at(
        &mut self,
        name: &str,
        score: usize,
        board_size: usize,
        recorded_at: DateTime<Utc>,
    ) -> bool {
        let existing = self
            .entries
            .iter_mut()
            .find(|e| e.name == name && e.board_size == board_size);

        match existing {
            Some(entry) if entry.score >= score => false,
            Some(entry) => {
                entry.score = score;
                entry.recorded_at = recorded_at;
                true
            }
            None => {
                self.entries.push(ScoreEntry {
                    name: name.to_string(),
                    score,
                    board_size,
                    recorded_at,
                });
                true
            }
        }
    }

    /// Highest scores first; earlier records win ties
    pub fn top(&self, limit: usize) -> Vec<&ScoreEntry> {
        let mut sorted: Vec<&ScoreEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.recorded_at.cmp(&b.recorded_at))
        });
        sorted.truncate(limit);
        sorted
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The tile count worth recording: the human's in PvE, the winner's in PvP
pub fn score_for(mode: GameMode, summary: &GameSummary) -> usize {
    match mode {
        GameMode::PvE { human: Player::Black } => summary.black,
        GameMode::PvE { human: Player::White } => summary.white,
        GameMode::PvP => summary.black.max(summary.white),
    }
}

/// Show the high-score table
pub fn run(args: ScoresArgs) -> Result<()> {
    let table = HighScores::load(&args.scores)?;
    let top = table.top(args.limit);
    tracing::debug!("loaded high scores from {}", args.scores.display());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&top)?);
        return Ok(());
    }

    if table.is_empty() {
        println!("No high scores yet.");
        return Ok(());
    }

    println!("\n=== High Scores ===");
    for (rank, entry) in top.iter().enumerate() {
        println!(
            "{:>3}. {:<20} {:>4}  ({}x{}, {})",
            rank + 1,
            entry.name,
            entry.score,
            entry.board_size,
            entry.board_size,
            entry.recorded_at.format("%Y-%m-%d")
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use othello_core::GameResult;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_update_keeps_best() {
        let mut table = HighScores::default();
        assert!(table.update_at("ada", 30, 8, at(1)));
        assert!(!table.update_at("ada", 20, 8, at(2)));
        assert!(!table.update_at("ada", 30, 8, at(3)));
        assert!(table.update_at("ada", 40, 8, at(4)));
        assert!(table.update_at("ada", 10, 6, at(5)));

        let top = table.top(10);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].score, 40);
        assert_eq!(top[0].recorded_at, at(4));
    }

    #[test]
    fn test_top_ordering() {
        let mut table = HighScores::default();
        table.update_at("late", 33, 8, at(9));
        table.update_at("early", 33, 8, at(1));
        table.update_at("best", 50, 8, at(5));

        let names: Vec<_> = table.top(2).iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["best", "early"]);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let path = std::env::temp_dir().join("othello-scores-does-not-exist.json");
        let table = HighScores::load(&path).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("othello-scores-{}.json", std::process::id()));
        let mut table = HighScores::default();
        table.update_at("grace", 42, 8, at(2));
        table.save(&path).unwrap();

        let loaded = HighScores::load(&path).unwrap();
        assert_eq!(loaded.top(1), table.top(1));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let path = std::env::temp_dir().join(format!("othello-scores-bad-{}.json", std::process::id()));
        std::fs::write(&path, "not json").unwrap();
        assert!(HighScores::load(&path).is_err());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_score_for() {
        let summary = GameSummary {
            board_size: 8,
            black: 40,
            white: 24,
            result: GameResult::BlackWins,
        };
        assert_eq!(score_for(GameMode::PvE { human: Player::White }, &summary), 24);
        assert_eq!(score_for(GameMode::PvE { human: Player::Black }, &summary), 40);
        assert_eq!(score_for(GameMode::PvP, &summary), 40);
    }
}
