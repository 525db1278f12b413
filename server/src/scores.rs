use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone)]
struct ScoreEntry {
    player_name: String,
    score: u64,
    date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopScore {
    pub player_name: String,
    pub score: u64,
    pub date: String,
}

/// In-memory score table. Lives as long as the process.
#[derive(Clone, Default)]
pub struct ScoreBoard {
    entries: Arc<Mutex<Vec<ScoreEntry>>>,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn save(&self, player_name: String, score: u64) {
        self.save_at(player_name, score, Utc::now()).await;
    }

    async fn save_at(&self, player_name: String, score: u64, date: DateTime<Utc>) {
        let mut entries = self.entries.lock().await;
        entries.push(ScoreEntry {
            player_name,
            score,
            date,
        });
    }

    /// Highest scores first; ties keep submission order.
    pub async fn top(&self, limit: usize) -> Vec<TopScore> {
        let entries = self.entries.lock().await;
        let mut sorted: Vec<&ScoreEntry> = entries.iter().collect();
        sorted.sort_by(|a, b| b.score.cmp(&a.score));
        sorted
            .into_iter()
            .take(limit)
            .map(|entry| TopScore {
                player_name: entry.player_name.clone(),
                score: entry.score,
                date: entry.date.format(DATE_FORMAT).to_string(),
            })
            .collect()
    }

    pub async fn total_players(&self) -> usize {
        let entries = self.entries.lock().await;
        entries
            .iter()
            .map(|entry| entry.player_name.as_str())
            .collect::<HashSet<_>>()
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[tokio::test]
    async fn test_top_orders_by_score_and_limits() {
        let board = ScoreBoard::new();
        for (name, score) in [("a", 3), ("b", 10), ("c", 7), ("d", 1)] {
            board.save(name.to_string(), score).await;
        }
        let top = board.top(3).await;
        let scores: Vec<u64> = top.iter().map(|s| s.score).collect();
        assert_eq!(scores, vec![10, 7, 3]);
        assert_eq!(top[0].player_name, "b");
    }

    #[tokio::test]
    async fn test_ties_keep_submission_order() {
        let board = ScoreBoard::new();
        board.save("first".to_string(), 5).await;
        board.save("second".to_string(), 5).await;
        let top = board.top(20).await;
        assert_eq!(top[0].player_name, "first");
        assert_eq!(top[1].player_name, "second");
    }

    #[tokio::test]
    async fn test_total_players_counts_distinct_names() {
        let board = ScoreBoard::new();
        assert_eq!(board.total_players().await, 0);
        board.save("alice".to_string(), 1).await;
        board.save("alice".to_string(), 2).await;
        board.save("bob".to_string(), 0).await;
        assert_eq!(board.total_players().await, 2);
    }

    #[tokio::test]
    async fn test_date_format() {
        let board = ScoreBoard::new();
        let date = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();
        board.save_at("alice".to_string(), 4, date).await;
        assert_eq!(board.top(1).await[0].date, "2024-03-09 14:05:00");
    }
}
