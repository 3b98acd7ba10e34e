//! High score leaderboard system
//!
//! Persisted through the key-value store, tracks the top 5 survival times.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_HIGH_SCORES;
use crate::persistence::{KeyValueStore, keys, load_json, save_json};

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    /// Seconds survived
    pub score: f32,
}

/// High score leaderboard, sorted descending by score
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score would make the leaderboard
    pub fn qualifies(&self, score: f32) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add a score. Ties rank below existing entries.
    /// Returns the rank achieved (1-indexed) or None if it fell off the board.
    pub fn add_score(&mut self, name: &str, score: f32) -> Option<usize> {
        self.normalize();
        let entry = HighScoreEntry {
            name: name.to_string(),
            score,
        };

        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_HIGH_SCORES);

        (pos < MAX_HIGH_SCORES).then_some(pos + 1)
    }

    /// Sort descending (stable, so earlier ties stay ahead) and cap the length
    fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.score.total_cmp(&a.score));
        self.entries.truncate(MAX_HIGH_SCORES);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<f32> {
        self.entries.first().map(|e| e.score)
    }

    /// Load from the store; absent or malformed data is an empty board
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        let mut scores: Self = load_json(store, keys::LEADERBOARD);
        scores.normalize();
        log::info!("Loaded {} high scores", scores.entries.len());
        scores
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) {
        save_json(store, keys::LEADERBOARD, self);
        log::info!("High scores saved ({} entries)", self.entries.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use proptest::prelude::*;

    fn scores(board: &HighScores) -> Vec<f32> {
        board.entries.iter().map(|e| e.score).collect()
    }

    #[test]
    fn test_keeps_top_five_descending() {
        let mut board = HighScores::new();
        for (i, score) in [12.3, 45.0, 7.1, 99.9, 50.0, 1.0].into_iter().enumerate() {
            board.add_score(&format!("p{i}"), score);
        }
        assert_eq!(scores(&board), vec![99.9, 50.0, 45.0, 12.3, 7.1]);
    }

    #[test]
    fn test_rank_reporting() {
        let mut board = HighScores::new();
        assert_eq!(board.add_score("a", 10.0), Some(1));
        assert_eq!(board.add_score("b", 20.0), Some(1));
        assert_eq!(board.add_score("c", 15.0), Some(2));
        for _ in 0..2 {
            board.add_score("filler", 30.0);
        }
        assert!(!board.qualifies(5.0));
        assert_eq!(board.add_score("d", 5.0), None);
        assert_eq!(board.entries.len(), MAX_HIGH_SCORES);
    }

    #[test]
    fn test_load_repairs_unsorted_and_oversized_board() {
        let mut store = MemoryStore::new();
        let stored: Vec<f32> = vec![1.0, 50.0, 3.0, 70.0, 2.0, 9.0, 40.0];
        let raw = stored
            .iter()
            .map(|s| format!(r#"{{"name":"x","score":{s}}}"#))
            .collect::<Vec<_>>()
            .join(",");
        store.set(keys::LEADERBOARD, &format!("[{raw}]"));

        let board = HighScores::load(&store);
        assert_eq!(scores(&board), vec![70.0, 50.0, 40.0, 9.0, 3.0]);
    }

    #[test]
    fn test_add_score_sorts_unsorted_entries() {
        let mut board = HighScores {
            entries: vec![
                HighScoreEntry { name: "a".into(), score: 1.0 },
                HighScoreEntry { name: "b".into(), score: 50.0 },
            ],
        };
        assert_eq!(board.add_score("c", 20.0), Some(2));
        assert_eq!(scores(&board), vec![50.0, 20.0, 1.0]);
    }

    #[test]
    fn test_ties_rank_below_existing() {
        let mut board = HighScores::new();
        board.add_score("first", 10.0);
        assert_eq!(board.add_score("second", 10.0), Some(2));
        assert_eq!(board.entries[0].name, "first");
    }

    #[test]
    fn test_persisted_as_plain_array() {
        let mut store = MemoryStore::new();
        let mut board = HighScores::new();
        board.add_score("ana", 12.5);
        board.save(&mut store);

        assert_eq!(
            store.get(keys::LEADERBOARD).as_deref(),
            Some(r#"[{"name":"ana","score":12.5}]"#)
        );
        assert_eq!(HighScores::load(&store), board);
    }

    #[test]
    fn test_load_malformed_is_empty() {
        let mut store = MemoryStore::new();
        store.set(keys::LEADERBOARD, "{\"oops\":");
        assert!(HighScores::load(&store).is_empty());
    }

    proptest! {
        #[test]
        fn board_stays_sorted_and_capped(inserts in prop::collection::vec(0.0f32..1000.0, 0..20)) {
            let mut board = HighScores::new();
            for score in &inserts {
                board.add_score("p", *score);
            }
            prop_assert!(board.entries.len() <= MAX_HIGH_SCORES);
            prop_assert_eq!(board.entries.len(), inserts.len().min(MAX_HIGH_SCORES));
            prop_assert!(board.entries.windows(2).all(|w| w[0].score >= w[1].score));

            let mut expected = inserts.clone();
            expected.sort_by(|a, b| b.total_cmp(a));
            expected.truncate(MAX_HIGH_SCORES);
            prop_assert_eq!(scores(&board), expected);
        }
    }
}
